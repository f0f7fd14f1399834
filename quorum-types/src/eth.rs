//! Records returned by the `eth_*` namespace.
//!
//! Quantities and hashes are kept as the hex strings the node sends. Fields the node reports
//! as `null` (e.g. `to` of a contract creation, or `contractAddress` before mining) decode
//! into empty strings.

use crate::nullable;

/// A transaction as returned by `eth_getTransactionByHash` and `eth_pendingTransactions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "nullable")]
    pub block_hash: String,
    #[serde(deserialize_with = "nullable")]
    pub block_number: String,
    pub from: String,
    pub gas: String,
    pub gas_price: String,
    pub hash: String,
    pub input: String,
    pub nonce: String,
    #[serde(deserialize_with = "nullable")]
    pub to: String,
    #[serde(deserialize_with = "nullable")]
    pub transaction_index: String,
    pub value: String,
    pub v: String,
    pub r: String,
    pub s: String,
}

impl Transaction {
    /// Returns whether the transaction has been included in a block.
    pub fn is_pending(&self) -> bool {
        self.block_hash.is_empty()
    }
}

/// A block with full transaction objects, as returned by `eth_getBlockByNumber(_, true)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Block {
    pub number: String,
    pub hash: String,
    pub parent_hash: String,
    pub nonce: String,
    pub sha3_uncles: String,
    pub logs_bloom: String,
    pub transactions_root: String,
    pub state_root: String,
    pub miner: String,
    pub difficulty: String,
    pub total_difficulty: String,
    pub extra_data: String,
    pub size: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub timestamp: String,
    pub transactions: Vec<Transaction>,
    pub uncles: Vec<String>,
}

/// An event log attached to a receipt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    pub block_hash: String,
    pub block_number: String,
    pub data: String,
    pub log_index: String,
    pub topics: Vec<String>,
    pub transaction_hash: String,
    pub transaction_index: String,
}

/// The outcome of a mined transaction, as returned by `eth_getTransactionReceipt`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub block_hash: String,
    pub block_number: String,
    #[serde(deserialize_with = "nullable")]
    pub contract_address: String,
    pub cumulative_gas_used: String,
    pub from: String,
    pub gas_used: String,
    pub logs: Vec<Log>,
    pub logs_bloom: String,
    #[serde(deserialize_with = "nullable")]
    pub root: String,
    #[serde(deserialize_with = "nullable")]
    pub to: String,
    pub transaction_hash: String,
    pub transaction_index: String,
}

impl TransactionReceipt {
    /// Returns the address of the contract created by this transaction, if any.
    pub fn contract_address(&self) -> Option<&str> {
        Some(self.contract_address.as_str()).filter(|addr| !addr.is_empty())
    }
}
