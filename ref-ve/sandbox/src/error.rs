use std::path::PathBuf;

use static_assertions::assert_impl_all;
use thiserror::Error;

use crate::outcome::FailureReport;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transaction was executed, but its final status is a failure
    #[error("{0}")]
    Execution(Box<FailureReport>),
    /// Sandbox, RPC or view error reported by near-workspaces
    #[error(transparent)]
    Workspaces(#[from] near_workspaces::error::Error),
    #[error("failed to read contract binary {}: {source}. Build the contracts into the contracts directory first", path.display())]
    Wasm {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: &'static str },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to read config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

assert_impl_all!(Error: Send, Sync, std::error::Error);

impl From<FailureReport> for Error {
    fn from(report: FailureReport) -> Self {
        Self::Execution(Box::new(report))
    }
}
