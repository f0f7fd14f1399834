use quorum_types::{CallPayload, SendTxPayload, TransactionParam};
use serde::{Deserialize, Serialize};

use crate::{
    api,
    coder::{Bytecode, Decoder, Encoder},
    gateway::RpcGateway,
    polling::{CancellationToken, PollingParams, PollingService},
    transport::Transport,
    Error, Result,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Gas limit attached to every transaction, as a hex quantity.
    pub gas_limit: String,

    /// Submit even when the sender could not be unlocked; the failure is only logged.
    pub lenient_unlock: bool,

    /// Governs how long `deploy_contract` waits for the contract address.
    pub polling: PollingParams,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            gas_limit: api::DEFAULT_GAS_LIMIT.to_string(),
            lenient_unlock: false,
            polling: PollingParams::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn gas_limit(mut self, gas_limit: impl Into<String>) -> Self {
        self.gas_limit = gas_limit.into();
        self
    }

    pub fn lenient_unlock(mut self, lenient: bool) -> Self {
        self.lenient_unlock = lenient;
        self
    }

    pub fn polling_params(mut self, params: PollingParams) -> Self {
        self.polling = params;
        self
    }
}

/// Drives the multi-call workflows built on top of an [`RpcGateway`]: submitting signed
/// transactions, deploying contracts and waiting for their address, and read-only calls.
pub struct Orchestrator<T> {
    gateway: RpcGateway<T>,
    config: OrchestratorConfig,
}

impl<T: Transport> Orchestrator<T> {
    pub fn new(gateway: RpcGateway<T>, config: OrchestratorConfig) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &RpcGateway<T> {
        &self.gateway
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Unlocks the sender, then submits a transaction whose data is produced by `encoder`.
    /// Returns the node's result, normally the transaction hash.
    pub fn submit_transaction(
        &self,
        param: &TransactionParam,
        encoder: &impl Encoder,
    ) -> Result<String> {
        self.unlock(param)?;

        let data = encoder.encode().map_err(Error::Encode)?;
        let payload = SendTxPayload::new(param, data, self.config.gas_limit.as_str());

        info!(
            "sending transaction from {} (private: {})",
            param.from,
            payload.private_for.is_some()
        );
        let tx_hash = self.gateway.send_transaction(&payload)?;
        debug!("transaction submitted: {}", tx_hash);
        Ok(tx_hash)
    }

    fn unlock(&self, param: &TransactionParam) -> Result<()> {
        let reason = match self.gateway.unlock_account(&param.from, &param.password) {
            Ok(true) => return Ok(()),
            Ok(false) => "node refused to unlock the account".to_string(),
            Err(e) => e.to_string(),
        };

        if self.config.lenient_unlock {
            warn!(
                "could not unlock {}, submitting anyway: {}",
                param.from, reason
            );
            Ok(())
        } else {
            error!("could not unlock {}: {}", param.from, reason);
            Err(Error::Unlock {
                account: param.from.clone(),
                reason,
            })
        }
    }

    /// Deploys `bytecode` from the node's coinbase account and waits until the receipt
    /// reports the new contract's address. `private_for` restricts the contract to the
    /// given participants.
    ///
    /// Waiting is bounded by the configured `PollingParams` and can be aborted through
    /// `cancel`.
    pub fn deploy_contract(
        &self,
        bytecode: &str,
        private_for: Option<Vec<String>>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let coinbase = self.gateway.coinbase()?;
        let mut param = TransactionParam::new(coinbase, "");
        if let Some(participants) = private_for {
            param = param.private_for(participants);
        }

        let tx_hash = self.submit_transaction(&param, &Bytecode::new(bytecode))?;
        info!("deploying contract in transaction {}", tx_hash);

        let address =
            PollingService::new(self.config.polling).poll_for(&tx_hash, cancel, || {
                let receipt = self.gateway.transaction_receipt(&tx_hash)?;
                Ok(receipt.contract_address().map(str::to_string))
            })?;
        info!("contract deployed at {}", address);
        Ok(address)
    }

    /// Calls the contract at `to` without creating a transaction. The `0x` prefix of the
    /// node's output is stripped before it reaches `decoder`.
    pub fn call<D: Decoder>(
        &self,
        to: &str,
        encoder: &impl Encoder,
        decoder: &D,
    ) -> Result<D::Output> {
        let payload = CallPayload {
            to: to.to_string(),
            data: encoder.encode().map_err(Error::Encode)?,
        };
        let output = self.gateway.call(&payload)?;
        let hex = output.strip_prefix("0x").unwrap_or(output.as_str());
        decoder
            .decode(hex)
            .map_err(|e| Error::decode(api::ETH_CALL, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::{testing::MockTransport, transport::Response};

    fn orchestrator(
        handler: impl Fn(&crate::transport::Request) -> Result<Response> + Send + Sync + 'static,
    ) -> Orchestrator<MockTransport> {
        Orchestrator::new(
            RpcGateway::new(MockTransport::new(handler)),
            OrchestratorConfig::default(),
        )
    }

    #[test]
    fn test_unlock_refused_is_fatal() {
        let orch = orchestrator(|req| match req.method.as_str() {
            api::PERSONAL_UNLOCK_ACCOUNT => Ok(Response::result(req, false)),
            _ => Ok(Response::result(req, "0xhash")),
        });
        let err = orch
            .submit_transaction(&TransactionParam::new("0xfrom", "pw"), &Bytecode::new("0x00"))
            .unwrap_err();
        match err {
            Error::Unlock { account, .. } => assert_eq!(account, "0xfrom"),
            e => panic!("expected unlock error, got {:?}", e),
        }
        assert!(orch
            .gateway()
            .transport()
            .requests_for(api::ETH_SEND_TRANSACTION)
            .is_empty());
    }

    #[test]
    fn test_unlock_params() {
        let orch = orchestrator(|req| match req.method.as_str() {
            api::PERSONAL_UNLOCK_ACCOUNT => Ok(Response::result(req, true)),
            _ => Ok(Response::result(req, "0xhash")),
        });
        orch.submit_transaction(&TransactionParam::new("0xfrom", "pw"), &Bytecode::new("0x00"))
            .unwrap();
        let unlocks = orch
            .gateway()
            .transport()
            .requests_for(api::PERSONAL_UNLOCK_ACCOUNT);
        assert_eq!(unlocks.len(), 1);
        assert_eq!(
            unlocks[0].params,
            vec![json!("0xfrom"), json!("pw"), serde_json::Value::Null]
        );
    }

    #[test]
    fn test_encode_failure() {
        struct Broken;
        impl Encoder for Broken {
            fn encode(&self) -> anyhow::Result<String> {
                Err(anyhow::anyhow!("missing argument"))
            }
        }

        let orch = orchestrator(|req| Ok(Response::result(req, true)));
        let err = orch
            .submit_transaction(&TransactionParam::new("0xfrom", "pw"), &Broken)
            .unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
    }

    #[test]
    fn test_config_from_json() {
        let config: OrchestratorConfig = serde_json::from_value(json!({
            "lenient_unlock": true,
            "polling": { "max_attempts": 5 }
        }))
        .unwrap();
        assert!(config.lenient_unlock);
        assert_eq!(config.gas_limit, api::DEFAULT_GAS_LIMIT);
        assert_eq!(config.polling.max_attempts, 5);
        assert_eq!(config.polling.sleep_duration, 1000);
    }
}
