//! Provisioning of the standard ref-ve workspace
use std::path::{Path, PathBuf};

use near_workspaces::network::Sandbox;
use near_workspaces::types::{AccountId, NearToken};
use near_workspaces::{Account, Contract, Worker};
use serde::Serialize;
use serde_json::json;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::call::{call, view, CallOptions};
use crate::config::{FixtureConfig, SandboxConfig};
use crate::error::{Error, Result};
use crate::failure::FailureAsserter;
use crate::outcome::ensure_success;
use crate::views::StorageBalanceBounds;

pub const DEFAULT_REF_VE_ID: &str = "ref-ve";
pub const DEFAULT_FT_ID: &str = "mock-ft";
pub const DEFAULT_MFT_ID: &str = "mock-mft";

const TOKEN_DECIMALS: u8 = 24;

/// Contract binaries expected in the contracts directory
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Binary {
    RefVe,
    MockFt,
    MockMft,
}

impl Binary {
    pub fn path(self, contracts_dir: &Path) -> PathBuf {
        contracts_dir.join(format!("{self}.wasm"))
    }

    pub async fn load(self, contracts_dir: &Path) -> Result<Vec<u8>> {
        let path = self.path(contracts_dir);
        tokio::fs::read(&path)
            .await
            .map_err(|source| Error::Wasm { path, source })
    }
}

/// Binaries deployed by [`init_workspace`]
#[derive(Clone, Debug)]
pub struct Contracts {
    pub ref_ve: Vec<u8>,
    pub ft: Vec<u8>,
    pub mft: Vec<u8>,
}

impl Contracts {
    pub async fn load(contracts_dir: &Path) -> Result<Self> {
        Ok(Self {
            ref_ve: Binary::RefVe.load(contracts_dir).await?,
            ft: Binary::MockFt.load(contracts_dir).await?,
            mft: Binary::MockMft.load(contracts_dir).await?,
        })
    }

    /// Binaries absent from `contracts_dir`
    pub fn missing(contracts_dir: &Path) -> Vec<PathBuf> {
        Binary::iter()
            .map(|binary| binary.path(contracts_dir))
            .filter(|path| !path.is_file())
            .collect()
    }
}

/// Arguments of the ve contract's `new`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VeInitArgs {
    pub owner_id: AccountId,
    pub symbol: String,
    pub lptoken_contract_id: AccountId,
    pub lptoken_id: String,
    pub lptoken_decimals: u8,
}

/// Initialization call made right after deployment
#[derive(Clone, Debug, PartialEq)]
pub struct InitCall {
    pub method: String,
    pub args: serde_json::Value,
}

impl InitCall {
    pub fn new(method: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }
}

/// Accounts every scenario starts with
pub struct Fixture {
    pub worker: Worker<Sandbox>,
    pub root: Account,
    pub ref_ve: Contract,
    pub ft: Contract,
    pub mft: Contract,
    pub owner: Account,
    pub alice: Account,
    pub bob: Account,
    pub lpt: Account,
    /// Reads failures with the configured error path
    pub asserter: FailureAsserter,
}

/// Creates `name` under `root` with `balance`
pub async fn create_account(root: &Account, name: &str, balance: NearToken) -> Result<Account> {
    let created = root
        .create_subaccount(name)
        .initial_balance(balance)
        .transact()
        .await?;
    ensure_success(&created.details)?;
    Ok(created.result)
}

/// Creates `name` under `root`, deploys `wasm` there and runs `init` if given
pub async fn create_and_deploy(
    root: &Account,
    name: &str,
    wasm: &[u8],
    init: Option<InitCall>,
    balance: NearToken,
) -> Result<Contract> {
    let account = create_account(root, name, balance).await?;
    let deployed = account.deploy(wasm).await?;
    ensure_success(&deployed.details)?;
    let contract = deployed.result;

    if let Some(InitCall { method, args }) = init {
        call(
            contract.as_account(),
            contract.id(),
            &method,
            args,
            CallOptions::default(),
        )
        .await?;
    }
    tracing::info!(contract = %contract.id(), code_len = wasm.len(), "deployed");
    Ok(contract)
}

/// Creates `contract_id` under `root` and initializes the ve contract there
pub async fn deploy_contract(
    root: &Account,
    wasm: &[u8],
    args: &VeInitArgs,
    contract_id: &str,
    balance: NearToken,
) -> Result<Contract> {
    let init = InitCall::new("new", serde_json::to_value(args)?);
    create_and_deploy(root, contract_id, wasm, Some(init), balance).await
}

pub async fn deploy_ft(
    root: &Account,
    wasm: &[u8],
    contract_id: &str,
    balance: NearToken,
) -> Result<Contract> {
    deploy_token(root, wasm, contract_id, "mock-ft", "ft", balance).await
}

pub async fn deploy_mft(
    root: &Account,
    wasm: &[u8],
    contract_id: &str,
    balance: NearToken,
) -> Result<Contract> {
    deploy_token(root, wasm, contract_id, "mock-mft", "mft", balance).await
}

async fn deploy_token(
    root: &Account,
    wasm: &[u8],
    contract_id: &str,
    name: &str,
    symbol: &str,
    balance: NearToken,
) -> Result<Contract> {
    let init = InitCall::new(
        "new",
        json!({ "name": name, "symbol": symbol, "decimals": TOKEN_DECIMALS }),
    );
    create_and_deploy(root, contract_id, wasm, Some(init), balance).await
}

/// Registers `user` on `ft`, paying the minimal storage deposit
pub async fn register_fungible_token_user(ft: &Contract, user: &Account) -> Result<()> {
    let bounds: StorageBalanceBounds =
        view(user, ft.id(), "storage_balance_bounds", json!({})).await?;
    call(
        user,
        ft.id(),
        "storage_deposit",
        json!({ "account_id": user.id() }),
        CallOptions::deposit(bounds.min_deposit()),
    )
    .await?;
    Ok(())
}

/// Creates the named accounts under `worker`'s root and deploys the three contracts
pub async fn init_workspace(
    worker: Worker<Sandbox>,
    config: &SandboxConfig,
    contracts: &Contracts,
) -> Result<Fixture> {
    let root = worker.root_account()?;
    let FixtureConfig {
        owner,
        alice,
        bob,
        lptoken_contract,
        ref_ve_contract,
        ft_contract,
        mft_contract,
        symbol,
        lptoken_id,
        lptoken_decimals,
        ..
    } = &config.fixture;
    let balance = config.fixture.account_balance();

    let owner = create_account(&root, owner, balance).await?;
    let alice = create_account(&root, alice, balance).await?;
    let bob = create_account(&root, bob, balance).await?;
    let lpt = create_account(&root, lptoken_contract, balance).await?;

    let args = VeInitArgs {
        owner_id: owner.id().clone(),
        symbol: symbol.clone(),
        lptoken_contract_id: lpt.id().clone(),
        lptoken_id: lptoken_id.clone(),
        lptoken_decimals: *lptoken_decimals,
    };
    let ref_ve = deploy_contract(&root, &contracts.ref_ve, &args, ref_ve_contract, balance).await?;
    let ft = deploy_ft(&root, &contracts.ft, ft_contract, balance).await?;
    let mft = deploy_mft(&root, &contracts.mft, mft_contract, balance).await?;

    tracing::info!(root = %root.id(), "workspace ready");
    Ok(Fixture {
        worker,
        root,
        ref_ve,
        ft,
        mft,
        owner,
        alice,
        bob,
        lpt,
        asserter: config.failure_asserter(),
    })
}

/// Loads the binaries from the configured directory, starts a sandbox node and
/// provisions the workspace on it
pub async fn start(config: &SandboxConfig) -> Result<Fixture> {
    let contracts = Contracts::load(&config.contracts_dir).await?;
    let worker = near_workspaces::sandbox().await?;
    init_workspace(worker, config, &contracts).await
}
