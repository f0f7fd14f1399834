//! Records returned by the `admin_*` namespace.

/// Information about the local node, as returned by `admin_nodeInfo`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeInfo {
    pub id: String,
    pub name: String,
    pub enode: String,
    pub ip: String,
    pub ports: Ports,
    pub listen_addr: String,
    pub protocols: Protocols,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ports {
    pub discovery: u16,
    pub listener: u16,
}

/// A connected peer, one element of the `admin_peers` result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Peer {
    pub id: String,
    pub name: String,
    pub caps: Vec<String>,
    pub network: PeerNetwork,
    pub protocols: Protocols,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeerNetwork {
    pub local_address: String,
    pub remote_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protocols {
    pub eth: EthProtocolInfo,
}

/// State of the `eth` sub-protocol for a node or peer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthProtocolInfo {
    pub network: u64,
    pub version: u64,
    pub difficulty: u64,
    pub genesis: String,
    pub head: String,
}
