//! Calls, views and balance reads on near-workspaces accounts
use near_workspaces::result::ExecutionFinalResult;
use near_workspaces::types::{AccountId, Gas, NearToken};
use near_workspaces::Account;
use serde::de::DeserializeOwned;

use crate::amount::ONE_YOCTO;
use crate::error::Result;
use crate::outcome::ensure_success;

/// Gas and deposit attached to a call
///
/// Without gas, near-workspaces attaches its default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallOptions {
    pub gas: Option<Gas>,
    pub attached_deposit: NearToken,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            gas: None,
            attached_deposit: NearToken::from_yoctonear(0),
        }
    }
}

impl CallOptions {
    pub fn deposit(amount: NearToken) -> Self {
        Self {
            attached_deposit: amount,
            ..Self::default()
        }
    }

    /// Owner and transfer methods require exactly one yocto
    pub fn one_yocto() -> Self {
        Self::deposit(ONE_YOCTO)
    }

    pub fn with_gas(self, gas: Gas) -> Self {
        Self {
            gas: Some(gas),
            ..self
        }
    }
}

/// Submits a function call and returns its final result, failed or not
pub async fn call_raw(
    account: &Account,
    contract_id: &AccountId,
    method: &str,
    args: serde_json::Value,
    options: CallOptions,
) -> Result<ExecutionFinalResult> {
    let mut tx = account
        .call(contract_id, method)
        .args_json(args)
        .deposit(options.attached_deposit);
    if let Some(gas) = options.gas {
        tx = tx.gas(gas);
    }
    let result = tx.transact().await?;
    tracing::trace!(
        signer = %account.id(),
        contract = %contract_id,
        method,
        success = result.is_success(),
        "call"
    );
    Ok(result)
}

/// Like [`call_raw`], but a failed final status is an [`Error::Execution`](crate::Error::Execution)
pub async fn call(
    account: &Account,
    contract_id: &AccountId,
    method: &str,
    args: serde_json::Value,
    options: CallOptions,
) -> Result<ExecutionFinalResult> {
    let result = call_raw(account, contract_id, method, args, options).await?;
    ensure_success(&result)?;
    Ok(result)
}

pub async fn view<T: DeserializeOwned>(
    account: &Account,
    contract_id: &AccountId,
    method: &str,
    args: serde_json::Value,
) -> Result<T> {
    let result = account.view(contract_id, method).args_json(args).await?;
    Ok(result.json()?)
}

pub async fn balance(account: &Account) -> Result<NearToken> {
    Ok(account.view_account().await?.balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options() {
        assert_eq!(CallOptions::default().attached_deposit.as_yoctonear(), 0);
        assert_eq!(CallOptions::default().gas, None);
        assert_eq!(CallOptions::one_yocto().attached_deposit, ONE_YOCTO);

        let options =
            CallOptions::deposit(NearToken::from_millinear(5)).with_gas(Gas::from_tgas(50));
        assert_eq!(options.gas, Some(Gas::from_tgas(50)));
        assert_eq!(options.attached_deposit, NearToken::from_millinear(5));
    }
}
