#[macro_use]
extern crate serde;

mod address;
mod admin;
mod eth;
mod istanbul;
pub mod quantity;
mod transaction;

pub use address::Address;
pub use admin::{EthProtocolInfo, NodeInfo, Peer, PeerNetwork, Ports, Protocols};
pub use eth::{Block, Log, Transaction, TransactionReceipt};
pub use istanbul::{AccountStats, IstanbulStats, Snapshot, Tally, Vote};
pub use transaction::{CallPayload, SendTxPayload, TransactionParam};

/// Deserializes a string that the node may report as `null` into an empty string.
fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <Option<String> as serde::Deserialize>::deserialize(deserializer).map(Option::unwrap_or_default)
}
