#[macro_use]
mod contract_builder;

use near_sdk::json_types::U128;
use near_workspaces::types::NearToken;
use near_workspaces::Account;
use serde_json::json;

use ref_ve_sandbox::amount::near_from_decimal;
use ref_ve_sandbox::call::{balance, call, view};
use ref_ve_sandbox::compare::{assert_numbers_equal_within, numbers_equal_within};
use ref_ve_sandbox::setup::register_fungible_token_user;
use ref_ve_sandbox::views::{StorageBalance, StorageBalanceBounds};
use ref_ve_sandbox::{
    assert_no_more_than_one_yocto_diff, numbers_equal, parse_near, skip, until, CallOptions,
};

use contract_builder::RefVeSetup;

const MOCK_FT_STORAGE_MIN: NearToken = NearToken::from_yoctonear(1_250_000_000_000_000_000_000);

/// Below one storage deposit, above the gas of a single call
fn deposit_tolerance() -> NearToken {
    near_from_decimal("0.001").unwrap()
}

async fn storage_bounds(setup: &RefVeSetup) -> StorageBalanceBounds {
    let fx = &setup.fixture;
    view(&fx.root, fx.ft.id(), "storage_balance_bounds", json!({}))
        .await
        .unwrap()
}

async fn storage_balance_of(setup: &RefVeSetup, account: &Account) -> Option<StorageBalance> {
    let fx = &setup.fixture;
    view(
        &fx.root,
        fx.ft.id(),
        "storage_balance_of",
        json!({ "account_id": account.id() }),
    )
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "needs a sandbox node and the contracts in compiled-contracts/"]
async fn test_register_user() {
    let setup = RefVeSetup::setup().await;
    let fx = &setup.fixture;

    let bounds = storage_bounds(&setup).await;
    assert_eq!(bounds.min_deposit(), MOCK_FT_STORAGE_MIN);

    let alice_before = balance(&fx.alice).await.unwrap();

    register_fungible_token_user(&fx.ft, &fx.alice).await.unwrap();

    assert_eq!(
        storage_balance_of(&setup, &fx.alice).await,
        Some(StorageBalance {
            total: bounds.min,
            available: U128(0),
        })
    );

    // Alice also paid for gas
    let alice_after = balance(&fx.alice).await.unwrap();
    let expected = NearToken::from_yoctonear(
        alice_before.as_yoctonear() - bounds.min_deposit().as_yoctonear(),
    );
    assert!(!numbers_equal(alice_after, alice_before));
    assert_numbers_equal_within(alice_after, expected, deposit_tolerance());
}

#[tokio::test]
#[ignore = "needs a sandbox node and the contracts in compiled-contracts/"]
async fn test_second_deposit_is_refunded() {
    let setup = RefVeSetup::setup().await;
    let fx = &setup.fixture;
    let min = storage_bounds(&setup).await.min_deposit();
    let tolerance = deposit_tolerance();

    register_fungible_token_user(&fx.ft, &fx.alice).await.unwrap();
    let ft_before = balance(fx.ft.as_account()).await.unwrap();
    let alice_before = balance(&fx.alice).await.unwrap();

    let result = call(
        &fx.alice,
        fx.ft.id(),
        "storage_deposit",
        json!({ "account_id": fx.alice.id() }),
        CallOptions::deposit(min),
    )
    .await
    .unwrap();
    assert!(result
        .logs()
        .iter()
        .any(|log| log.contains("already registered")));

    let ft_after = balance(fx.ft.as_account()).await.unwrap();
    assert_numbers_equal_within(ft_after, ft_before, tolerance);
    let alice_after = balance(&fx.alice).await.unwrap();
    assert_numbers_equal_within(alice_after, alice_before, tolerance);
    assert_eq!(
        storage_balance_of(&setup, &fx.alice).await.map(|b| b.total),
        Some(U128(min.as_yoctonear()))
    );
}

#[tokio::test]
#[ignore = "needs a sandbox node and the contracts in compiled-contracts/"]
async fn test_registration_only_refunds_excess() {
    let setup = RefVeSetup::setup().await;
    let fx = &setup.fixture;
    let min = storage_bounds(&setup).await.min_deposit();
    let tolerance = deposit_tolerance();
    let ft_before = balance(fx.ft.as_account()).await.unwrap();

    call(
        &fx.bob,
        fx.ft.id(),
        "storage_deposit",
        json!({ "account_id": fx.bob.id(), "registration_only": true }),
        CallOptions::deposit(NearToken::from_yoctonear(min.as_yoctonear() * 2)),
    )
    .await
    .unwrap();

    // Only the minimum stays with the contract
    let ft_after = balance(fx.ft.as_account()).await.unwrap();
    let expected = NearToken::from_yoctonear(ft_before.as_yoctonear() + min.as_yoctonear());
    assert!(numbers_equal_within(ft_after, expected, tolerance));
    assert_eq!(
        storage_balance_of(&setup, &fx.bob).await,
        Some(StorageBalance {
            total: U128(min.as_yoctonear()),
            available: U128(0),
        })
    );
}

#[tokio::test]
#[ignore = "needs a sandbox node and the contracts in compiled-contracts/"]
async fn test_deposit_below_bound_fails() {
    let setup = RefVeSetup::setup().await;
    let fx = &setup.fixture;

    let short = NearToken::from_yoctonear(MOCK_FT_STORAGE_MIN.as_yoctonear() - 1);
    setup
        .assert_failure(
            call(
                &fx.bob,
                fx.ft.id(),
                "storage_deposit",
                json!({ "account_id": fx.bob.id() }),
                CallOptions::deposit(short),
            ),
            Some("less than the minimum storage balance"),
        )
        .await;

    assert_eq!(storage_balance_of(&setup, &fx.bob).await, None);
}

#[tokio::test]
async fn test_amount_helpers() {
    assert_eq!(parse_near(1e24).unwrap(), NearToken::from_near(1));
    assert_eq!(
        parse_near(1_250_000_000_000_000_000_000.0).unwrap(),
        MOCK_FT_STORAGE_MIN
    );
    assert_no_more_than_one_yocto_diff(
        near_from_decimal("0.00125").unwrap(),
        MOCK_FT_STORAGE_MIN,
    );

    let deadline = chrono::Utc::now().timestamp_millis() + 20;
    until(deadline).await;
    assert!(chrono::Utc::now().timestamp_millis() >= deadline);

    skip("test_lock_lpt");
}
