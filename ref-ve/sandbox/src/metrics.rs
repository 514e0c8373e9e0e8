use near_workspaces::types::{AccountId, Gas, NearToken};
use near_workspaces::Account;
use serde::de::DeserializeOwned;

use crate::call::{call_raw, CallOptions};
use crate::error::Result;
use crate::outcome::{ensure_success, parse_success_value};

/// Gas units to yocto: one gas is counted as 10^9 yocto
const YOCTO_PER_GAS: u128 = 1_000_000_000;

/// Resource usage of a single call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallMetrics {
    /// Approximation: `gas_burnt` with nine zeroes appended, in yocto
    pub tokens_burnt: NearToken,
    /// Gas burnt by the transaction outcome
    pub gas_burnt: Gas,
    pub logs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricsResult<T> {
    pub success_value: T,
    pub metrics: CallMetrics,
}

impl CallMetrics {
    pub fn new<I, S>(gas_burnt: Gas, logs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens_burnt: approx_tokens_burnt(gas_burnt),
            gas_burnt,
            logs: logs.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn approx_tokens_burnt(gas: Gas) -> NearToken {
    NearToken::from_yoctonear(u128::from(gas.as_gas()) * YOCTO_PER_GAS)
}

/// Performs a call and collects its return value along with gas and logs
///
/// Nothing is retried: if the call fails, parsing its return value fails with
/// the execution error.
pub async fn call_with_metrics<T: DeserializeOwned>(
    account: &Account,
    contract_id: &AccountId,
    method: &str,
    args: serde_json::Value,
    options: CallOptions,
) -> Result<MetricsResult<T>> {
    let result = call_raw(account, contract_id, method, args, options).await?;
    let metrics = CallMetrics::new(result.outcome().gas_burnt, result.logs());
    ensure_success(&result)?;
    let success_value = parse_success_value(&result.raw_bytes()?)?;

    tracing::debug!(
        method,
        gas_burnt = metrics.gas_burnt.as_gas(),
        tokens_burnt = metrics.tokens_burnt.as_yoctonear(),
        logs = metrics.logs.len(),
        "call metrics"
    );

    Ok(MetricsResult {
        success_value,
        metrics,
    })
}
