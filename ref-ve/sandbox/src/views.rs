//! Typed results of the views the scenarios read
use near_sdk::json_types::{U128, U64};
use near_workspaces::types::{AccountId, NearToken};
use serde::{Deserialize, Serialize};

/// Result of the ve contract's `get_metadata`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub owner_id: AccountId,
    pub operators: Vec<AccountId>,
    pub whitelisted_accounts: Vec<AccountId>,
    pub lptoken_contract_id: AccountId,
    pub lptoken_id: String,
    pub lptoken_decimals: u8,
    pub account_count: U64,
    pub proposal_count: U64,
    pub cur_total_ve_lpt: U128,
    pub cur_lock_lpt: U128,
    pub lostfound: U128,
}

/// NEP-145 `storage_balance_bounds`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBalanceBounds {
    pub min: U128,
    pub max: Option<U128>,
}

impl StorageBalanceBounds {
    pub fn min_deposit(&self) -> NearToken {
        NearToken::from_yoctonear(self.min.0)
    }
}

/// NEP-145 `storage_balance_of`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBalance {
    pub total: U128,
    pub available: U128,
}

/// Result of `mft_metadata`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenMetadata {
    pub spec: String,
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
    pub reference: Option<String>,
    pub reference_hash: Option<String>,
    pub decimals: u8,
}
