#![allow(dead_code)]

pub mod error_wrapper;

use std::fmt;
use std::future::Future;

use ref_ve_sandbox::call::view;
use ref_ve_sandbox::logging::init_test_logging;
use ref_ve_sandbox::setup::{self, Contracts, Fixture};
use ref_ve_sandbox::views::Metadata;
use ref_ve_sandbox::SandboxConfig;

pub const VERSION: &str = "0.0.1";
pub const E002_NOT_ALLOWED: &str = "E002: not allowed for the caller";
pub const ONE_YOCTO_REQUIRED: &str = "Requires attached deposit of exactly 1 yoctoNEAR";

pub struct RefVeSetup {
    pub config: SandboxConfig,
    pub fixture: Fixture,
}

impl RefVeSetup {
    pub async fn setup() -> Self {
        init_test_logging();

        let config = SandboxConfig::from_env().expect("sandbox config");
        let missing = Contracts::missing(&config.contracts_dir);
        assert!(
            missing.is_empty(),
            "Please build ref_ve, mock_ft and mock_mft into '{}' before running the tests. Missing: {missing:?}",
            config.contracts_dir.display()
        );

        let fixture = setup::start(&config).await.expect("workspace");
        RefVeSetup { config, fixture }
    }

    pub async fn metadata(&self) -> Metadata {
        view(
            &self.fixture.root,
            self.fixture.ref_ve.id(),
            "get_metadata",
            serde_json::json!({}),
        )
        .await
        .expect("get_metadata")
    }

    /// Failure Asserter reading the configured error path
    pub async fn assert_failure<F, T, E>(&self, action: F, expected: Option<&str>)
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.fixture.asserter.assert_failure(action, expected).await
    }
}

// Owner methods of the ve contract all take exactly one yocto
#[allow(unused_macros)]
macro_rules! transaction {
    ($sc_setup:ident, $caller:ident, $method:expr, $args:tt) => {{
        ref_ve_sandbox::call::call_raw(
            &$sc_setup.fixture.$caller,
            $sc_setup.fixture.ref_ve.id(),
            $method,
            serde_json::json!($args),
            ref_ve_sandbox::CallOptions::one_yocto(),
        )
        .await
        .expect("transaction is submitted")
    }};
}
