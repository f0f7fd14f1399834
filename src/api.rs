//! Names of the node's JSON-RPC methods and well-known parameter values.

pub const JSONRPC_VERSION: &str = "2.0";

/// The block tag used for state queries against the head of the chain.
pub const LATEST_BLOCK: &str = "latest";

/// Gas limit attached to every submitted transaction (20,000,000).
pub const DEFAULT_GAS_LIMIT: &str = "0x1312d00";

pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";
pub const ETH_CALL: &str = "eth_call";
pub const ETH_COINBASE: &str = "eth_coinbase";
pub const ETH_GET_BALANCE: &str = "eth_getBalance";
pub const ETH_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
pub const ETH_GET_CODE: &str = "eth_getCode";
pub const ETH_GET_QUORUM_PAYLOAD: &str = "eth_getQuorumPayload";
pub const ETH_GET_TRANSACTION_BY_HASH: &str = "eth_getTransactionByHash";
pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
pub const ETH_PENDING_TRANSACTIONS: &str = "eth_pendingTransactions";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

pub const NET_LISTENING: &str = "net_listening";

pub const PERSONAL_NEW_ACCOUNT: &str = "personal_newAccount";
pub const PERSONAL_UNLOCK_ACCOUNT: &str = "personal_unlockAccount";

pub const ADMIN_ADD_PEER: &str = "admin_addPeer";
pub const ADMIN_NODE_INFO: &str = "admin_nodeInfo";
pub const ADMIN_PEERS: &str = "admin_peers";

pub const ISTANBUL_GET_CANDIDATES: &str = "istanbul_getCandidates";
pub const ISTANBUL_GET_SNAPSHOT: &str = "istanbul_getSnapshot";
pub const ISTANBUL_GET_STATISTICS: &str = "istanbul_getStatistics";
pub const ISTANBUL_GET_VALIDATORS: &str = "istanbul_getValidators";
pub const ISTANBUL_PROPOSE: &str = "istanbul_propose";
