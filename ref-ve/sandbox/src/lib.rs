//! Integration test scaffolding for the ref-ve contract
//!
//! Provisions a workspace of accounts and contracts on a near-workspaces sandbox,
//! and provides the assertions scenarios are written with: expected failures,
//! call metrics, approximate balance comparisons and timing helpers.
mod error;

pub mod amount;
pub mod call;
pub mod compare;
pub mod config;
pub mod failure;
pub mod logging;
pub mod metrics;
pub mod outcome;
pub mod setup;
pub mod timing;
pub mod views;

pub use amount::parse_near;
pub use call::CallOptions;
pub use compare::{
    assert_no_more_than_one_yocto_diff, assert_numbers_equal, no_more_than_one_yocto_diff,
    numbers_equal,
};
pub use config::{FixtureConfig, SandboxConfig};
pub use error::*;
pub use failure::{assert_failure, expect_failure, ErrorPath, FailureAssertion, FailureAsserter};
pub use metrics::{call_with_metrics, CallMetrics, MetricsResult};
pub use outcome::FailureReport;
pub use setup::Fixture;
pub use timing::{skip, until};
