use std::path::{Path, PathBuf};

use near_sdk::json_types::U128;
use near_workspaces::types::NearToken;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::failure::{ErrorPath, FailureAsserter};

/// Environment variable naming a JSON file with [`SandboxConfig`]
pub const CONFIG_ENV_VAR: &str = "REF_VE_SANDBOX_CONFIG";

pub const DEFAULT_CONTRACTS_DIR: &str = "compiled-contracts";
pub const DEFAULT_ACCOUNT_BALANCE: NearToken = NearToken::from_near(100);

/// Parameters of a sandbox test run
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Directory holding `ref_ve.wasm`, `mock_ft.wasm` and `mock_mft.wasm`
    pub contracts_dir: PathBuf,
    /// Where the leaf message sits inside a serialized failure
    pub error_path: ErrorPath,
    pub fixture: FixtureConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            contracts_dir: PathBuf::from(DEFAULT_CONTRACTS_DIR),
            error_path: ErrorPath::default(),
            fixture: FixtureConfig::default(),
        }
    }
}

impl SandboxConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or defaults if it's unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::debug!(path = ?path, "loading sandbox config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn failure_asserter(&self) -> FailureAsserter {
        FailureAsserter::new(self.error_path.clone())
    }
}

/// Names and parameters of the standard test workspace
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConfig {
    pub owner: String,
    pub alice: String,
    pub bob: String,
    pub lptoken_contract: String,
    pub ref_ve_contract: String,
    pub ft_contract: String,
    pub mft_contract: String,
    pub symbol: String,
    pub lptoken_id: String,
    pub lptoken_decimals: u8,
    /// Initial balance of every created account, in yocto
    pub account_balance: U128,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            owner: "ref_owner".to_string(),
            alice: "alice".to_string(),
            bob: "bob".to_string(),
            lptoken_contract: "lpt".to_string(),
            ref_ve_contract: "ref-ve".to_string(),
            ft_contract: "mock-ft".to_string(),
            mft_contract: "mock-mft".to_string(),
            symbol: "loveRef".to_string(),
            lptoken_id: ":0".to_string(),
            lptoken_decimals: 24,
            account_balance: U128(DEFAULT_ACCOUNT_BALANCE.as_yoctonear()),
        }
    }
}

impl FixtureConfig {
    pub fn account_balance(&self) -> NearToken {
        NearToken::from_yoctonear(self.account_balance.0)
    }
}
