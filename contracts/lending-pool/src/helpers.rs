use soroban_sdk::{log, token, Address, Env};

use crate::error::LendingError;

pub fn require_positive(amount: i128) -> Result<(), LendingError> {
    if amount <= 0 {
        return Err(LendingError::InvalidAmount);
    }
    Ok(())
}

/// Moves `amount` of `asset` from `from` into the pool.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), LendingError> {
    transfer(env, asset, from, &env.current_contract_address(), amount)
}

/// Moves `amount` of `asset` out of the pool to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), LendingError> {
    transfer(env, asset, &env.current_contract_address(), to, amount)
}

fn transfer(
    env: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), LendingError> {
    let client = token::Client::new(env, asset);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(_)) | Err(_) => {
            log!(env, "token transfer failed", asset.clone(), amount);
            Err(LendingError::TransferFailed)
        }
    }
}
