//! Records returned by the Istanbul BFT `istanbul_*` namespace.

use std::collections::BTreeMap;

use crate::Address;

/// The validator set and vote state at a given block, as returned by `istanbul_getSnapshot`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub epoch: u64,
    pub number: u64,
    pub hash: String,
    pub votes: Vec<Vote>,
    pub tally: BTreeMap<Address, Tally>,
    pub validators: Vec<Address>,
    pub policy: u64,
}

/// A single vote cast by `validator` to add or remove `address` from the validator set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vote {
    pub validator: Address,
    pub block: u64,
    pub address: Address,
    pub authorize: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tally {
    pub authorize: bool,
    pub votes: u64,
}

/// Block production and gas usage over a block range, as returned by `istanbul_getStatistics`.
///
/// `validators`/`blocks_mined` and `users`/`gas_consumptions` are parallel lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IstanbulStats {
    pub validators: Vec<Address>,
    pub blocks_mined: Vec<u32>,
    pub users: Vec<Address>,
    pub gas_consumptions: Vec<u64>,
    #[serde(rename = "max_gas_used")]
    pub max_gas: u64,
}

/// An account paired with a statistic. For validators `value` is the number of mined blocks;
/// for users it is their total gas consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountStats {
    pub account: Address,
    pub value: u64,
}

impl IstanbulStats {
    /// Pairs each validator with the number of blocks it mined.
    pub fn validator_stats(&self) -> Vec<AccountStats> {
        self.validators
            .iter()
            .zip(&self.blocks_mined)
            .map(|(account, mined)| AccountStats {
                account: *account,
                value: u64::from(*mined),
            })
            .collect()
    }

    /// Pairs each user with its gas consumption.
    pub fn user_stats(&self) -> Vec<AccountStats> {
        self.users
            .iter()
            .zip(&self.gas_consumptions)
            .map(|(account, gas)| AccountStats {
                account: *account,
                value: *gas,
            })
            .collect()
    }
}
