//! Final statuses of executed transactions
//!
//! A failure is captured as a JSON document following the RPC encoding of the
//! error tree, `{"result": {"status": {"Failure": <error>}, "logs": [..]}}`, so the
//! leaf message can be located by an [`ErrorPath`](crate::failure::ErrorPath)
//! whatever kind of error the runtime reported.
use std::fmt;

use near_primitives::errors::TxExecutionError;
use near_workspaces::result::ExecutionFinalResult;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::Result;

/// Failure of an executed transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureReport {
    document: Value,
    logs: Vec<String>,
}

impl FailureReport {
    pub fn new<I, S>(failure: Value, logs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let logs: Vec<String> = logs.into_iter().map(Into::into).collect();
        let document = json!({
            "result": {
                "status": { "Failure": failure },
                "logs": logs,
            }
        });
        Self { document, logs }
    }

    pub fn from_tx_error<I, S>(error: &TxExecutionError, logs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let failure =
            serde_json::to_value(error).unwrap_or_else(|_| Value::String(error.to_string()));
        Self::new(failure, logs)
    }

    /// Takes the first failed outcome of `result`
    ///
    /// Errors near-workspaces doesn't expose as a [`TxExecutionError`] are kept as
    /// their display string under `Failure`.
    pub fn from_result(result: &ExecutionFinalResult) -> Self {
        let error = result
            .failures()
            .into_iter()
            .find_map(|outcome| outcome.clone().into_result().err());
        let logs = result.logs();
        match error {
            Some(err) => match tx_error(&err) {
                Some(tx_error) => Self::from_tx_error(tx_error, logs),
                None => Self::new(Value::String(err.to_string()), logs),
            },
            None => Self::new(Value::Null, logs),
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Logs emitted before the failure, across all receipts
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

fn tx_error(err: &near_workspaces::error::Error) -> Option<&TxExecutionError> {
    std::error::Error::source(err)?.downcast_ref::<TxExecutionError>()
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)
    }
}

impl std::error::Error for FailureReport {}

/// Turns a failed final status into [`Error::Execution`](crate::Error::Execution)
pub fn ensure_success(result: &ExecutionFinalResult) -> Result<()> {
    if result.is_failure() {
        let report = FailureReport::from_result(result);
        tracing::debug!(%report, "transaction failed");
        return Err(report.into());
    }
    Ok(())
}

/// Parses a JSON return value; methods returning nothing read as `null`
pub fn parse_success_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}
