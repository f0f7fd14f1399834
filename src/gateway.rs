use std::{collections::BTreeMap, time::Duration};

use anyhow::Result as AnyResult;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use quorum_types::{
    quantity, Address, Block, CallPayload, IstanbulStats, NodeInfo, Peer, SendTxPayload,
    Snapshot, Transaction, TransactionReceipt,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    api::*,
    transport::{HttpTransport, Request, Transport},
    Error, Result,
};

/// Typed access to a node's JSON-RPC methods.
///
/// Every method performs exactly one request/response exchange and never retries. Failures
/// are reported as tagged [`Error`]s rather than zero values.
///
/// # Example
///
/// ```no_run
/// let gateway = quorum_client::HttpGatewayBuilder::new("http://localhost:22000")
///     .build()
///     .unwrap();
/// let height = gateway.block_height().unwrap();
/// let block = gateway.block_by_number(&format!("{:#x}", height)).unwrap();
/// ```
pub struct RpcGateway<T> {
    transport: T,
}

impl<T: Transport> RpcGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `method` with positional `params` and decodes the result as `R`.
    /// A missing or `null` result is an `Error::EmptyResponse`.
    pub fn request<R: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<R> {
        self.request_optional(method, params)?
            .ok_or_else(|| Error::EmptyResponse {
                method: method.to_string(),
            })
    }

    /// Like `request`, but a missing or `null` result is returned as `None`.
    pub fn request_optional<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Option<R>> {
        let request = Request::new(method, params);
        debug!("sending `{}` (request id: {})", method, request.id);

        let response = self.transport.send(&request)?;
        response.check_id(&request)?;
        match response.into_result() {
            Ok(Some(result)) => serde_json::from_value(result)
                .map(Some)
                .map_err(|e| Error::decode(method, e)),
            Ok(None) => Ok(None),
            Err(e) => {
                debug!("`{}` failed: {}", method, e);
                Err(e)
            }
        }
    }

    pub fn transaction_by_hash(&self, tx_hash: &str) -> Result<Transaction> {
        self.request(ETH_GET_TRANSACTION_BY_HASH, vec![json!(tx_hash)])
    }

    /// Returns the block with full transaction objects. `number` is a hex quantity or a tag
    /// such as `"latest"`.
    pub fn block_by_number(&self, number: &str) -> Result<Block> {
        self.request(ETH_GET_BLOCK_BY_NUMBER, vec![json!(number), json!(true)])
    }

    /// Returns the receipt of a mined transaction. Nodes answer `null` for transactions that
    /// are still pending, which surfaces as `Error::EmptyResponse`.
    pub fn transaction_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt> {
        self.request(ETH_GET_TRANSACTION_RECEIPT, vec![json!(tx_hash)])
    }

    /// Submits a transaction for the node to sign and returns its hash.
    pub fn send_transaction(&self, payload: &SendTxPayload) -> Result<String> {
        self.request(ETH_SEND_TRANSACTION, vec![json!(payload)])
    }

    /// Executes a read-only call against the latest block and returns the raw hex output.
    pub fn call(&self, payload: &CallPayload) -> Result<String> {
        self.request(ETH_CALL, vec![json!(payload), json!(LATEST_BLOCK)])
    }

    pub fn accounts(&self) -> Result<Vec<String>> {
        self.request(ETH_ACCOUNTS, vec![])
    }

    pub fn balance(&self, account: &str) -> Result<String> {
        self.request(ETH_GET_BALANCE, vec![json!(account), json!(LATEST_BLOCK)])
    }

    pub fn code(&self, address: &str) -> Result<String> {
        self.request(ETH_GET_CODE, vec![json!(address), json!(LATEST_BLOCK)])
    }

    pub fn coinbase(&self) -> Result<String> {
        self.request(ETH_COINBASE, vec![])
    }

    /// Returns the number of the most recent block as a hex quantity.
    pub fn block_number(&self) -> Result<String> {
        self.request(ETH_BLOCK_NUMBER, vec![])
    }

    /// Returns the number of the most recent block.
    pub fn block_height(&self) -> Result<u64> {
        let number = self.block_number()?;
        quantity::parse_u64(&number).map_err(|e| Error::decode(ETH_BLOCK_NUMBER, e))
    }

    pub fn pending_transactions(&self) -> Result<Vec<Transaction>> {
        self.request(ETH_PENDING_TRANSACTIONS, vec![])
    }

    /// Returns the unencrypted payload of a private transaction, given the payload hash
    /// found in its `input`.
    pub fn quorum_payload(&self, payload_hash: &str) -> Result<String> {
        self.request(ETH_GET_QUORUM_PAYLOAD, vec![json!(payload_hash)])
    }

    pub fn net_listening(&self) -> Result<bool> {
        self.request(NET_LISTENING, vec![])
    }

    /// Creates a new account protected by `password` and returns its address.
    pub fn new_account(&self, password: &str) -> Result<String> {
        self.request(PERSONAL_NEW_ACCOUNT, vec![json!(password)])
    }

    /// Unlocks `account` with the node's default unlock duration.
    pub fn unlock_account(&self, account: &str, password: &str) -> Result<bool> {
        self.request(
            PERSONAL_UNLOCK_ACCOUNT,
            vec![json!(account), json!(password), Value::Null],
        )
    }

    pub fn admin_peers(&self) -> Result<Vec<Peer>> {
        self.request(ADMIN_PEERS, vec![])
    }

    pub fn admin_node_info(&self) -> Result<NodeInfo> {
        self.request(ADMIN_NODE_INFO, vec![])
    }

    pub fn add_peer(&self, enode: &str) -> Result<bool> {
        self.request(ADMIN_ADD_PEER, vec![json!(enode)])
    }

    /// Votes to add (`authorize`) or remove `address` from the validator set.
    /// Nodes acknowledge with a `null` result.
    pub fn propose_validator(&self, address: &Address, authorize: bool) -> Result<()> {
        self.request_optional::<Value>(ISTANBUL_PROPOSE, vec![json!(address), json!(authorize)])
            .map(|_| ())
    }

    /// Returns the current proposals and whether each one votes to add or remove.
    pub fn candidates(&self) -> Result<BTreeMap<Address, bool>> {
        self.request(ISTANBUL_GET_CANDIDATES, vec![])
    }

    pub fn validators(&self, block_number: &str) -> Result<Vec<Address>> {
        self.request(ISTANBUL_GET_VALIDATORS, vec![json!(block_number)])
    }

    pub fn snapshot(&self, block_number: &str) -> Result<Snapshot> {
        self.request(ISTANBUL_GET_SNAPSHOT, vec![json!(block_number)])
    }

    /// Returns block production and gas statistics for the blocks in `[start, end]`.
    pub fn statistics(&self, start: &str, end: &str) -> Result<IstanbulStats> {
        self.request(ISTANBUL_GET_STATISTICS, vec![json!(start), json!(end)])
    }
}

#[derive(Clone, Debug)]
pub struct HttpGatewayBuilder {
    url: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpGatewayBuilder {
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: url.as_ref().to_string(),
            ..Default::default()
        }
    }

    /// Append the value of the named header.
    pub fn header(mut self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> AnyResult<Self> {
        self.headers.insert(
            HeaderName::from_bytes(name.as_ref())?,
            HeaderValue::from_bytes(value.as_ref())?,
        );
        Ok(self)
    }

    /// Assign the provided headers as the defaults for all requests made by the gateway.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Bound the time a single request may take. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<RpcGateway<HttpTransport>> {
        info!("connecting to node at {}", self.url);
        Ok(RpcGateway::new(HttpTransport::new(
            self.url,
            self.headers,
            self.timeout,
        )?))
    }
}

impl Default for HttpGatewayBuilder {
    fn default() -> Self {
        Self {
            url: "http://localhost:22000".to_string(),
            headers: HeaderMap::new(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{testing::MockTransport, transport::Response};

    #[test]
    fn test_request_result() {
        let gateway = RpcGateway::new(MockTransport::new(|req| {
            Ok(Response::result(req, "0xed9d02e382b34818e88b88a309c7fe71e65f419d"))
        }));
        assert_eq!(
            gateway.coinbase().unwrap(),
            "0xed9d02e382b34818e88b88a309c7fe71e65f419d"
        );
        let requests = gateway.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, ETH_COINBASE);
        assert!(requests[0].params.is_empty());
    }

    #[test]
    fn test_empty_response() {
        let gateway = RpcGateway::new(MockTransport::new(|req| Ok(Response::empty(req))));
        match gateway.balance("0x01") {
            Err(Error::EmptyResponse { method }) => assert_eq!(method, ETH_GET_BALANCE),
            other => panic!("expected empty response, got {:?}", other),
        }
    }

    #[test]
    fn test_null_result_allowed_for_propose() {
        let gateway = RpcGateway::new(MockTransport::new(|req| Ok(Response::empty(req))));
        let addr = Address([7u8; 20]);
        gateway.propose_validator(&addr, true).unwrap();
        let requests = gateway.transport().requests();
        assert_eq!(requests[0].method, ISTANBUL_PROPOSE);
        assert_eq!(requests[0].params, vec![json!(addr.to_string()), json!(true)]);
    }

    #[test]
    fn test_decode_error() {
        let gateway = RpcGateway::new(MockTransport::new(|req| Ok(Response::result(req, 42))));
        match gateway.accounts() {
            Err(Error::Decode { method, .. }) => assert_eq!(method, ETH_ACCOUNTS),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_block_height() {
        let gateway =
            RpcGateway::new(MockTransport::new(|req| Ok(Response::result(req, "0x1b4"))));
        assert_eq!(gateway.block_height().unwrap(), 436);

        let gateway = RpcGateway::new(MockTransport::new(|req| Ok(Response::result(req, "1b4"))));
        assert!(matches!(gateway.block_height(), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_mismatched_id() {
        let gateway = RpcGateway::new(MockTransport::new(|req| {
            let mut res = Response::result(req, true);
            res.id = json!("not-the-request");
            Ok(res)
        }));
        assert!(matches!(gateway.net_listening(), Err(Error::Transport(_))));
    }

    #[test]
    fn test_builder_header() {
        assert!(HttpGatewayBuilder::new("http://localhost:22000")
            .header("x-api-key", "secret")
            .is_ok());
        assert!(HttpGatewayBuilder::new("http://localhost:22000")
            .header("bad header", "secret")
            .is_err());
    }
}
