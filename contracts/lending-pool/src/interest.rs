use soroban_sdk::{Address, Env};

use crate::constants::{BASIS_POINTS, SECONDS_PER_YEAR};
use crate::error::LendingError;
use crate::events::InterestAccrued;
use crate::storage::{load_or_open_position, load_pool, write_pool, write_position, Pool, Position};

/// Simple interest on `debt` for `elapsed` seconds at `rate_bps` per year:
/// `debt * rate_bps * elapsed / (SECONDS_PER_YEAR * BASIS_POINTS)`, floored.
///
/// Common factors are divided out of the denominator first so the product
/// only overflows when the true result is out of range.
pub fn accrued_interest(debt: i128, rate_bps: u32, elapsed: u64) -> Result<i128, LendingError> {
    if debt <= 0 || rate_bps == 0 || elapsed == 0 {
        return Ok(0);
    }
    let mut denom = (SECONDS_PER_YEAR as u128) * (BASIS_POINTS as u128);
    let mut a = debt as u128;
    let mut b = rate_bps as u128;
    let mut c = elapsed as u128;

    let g1 = gcd_u128(a, denom);
    a /= g1;
    denom /= g1;
    let g2 = gcd_u128(b, denom);
    b /= g2;
    denom /= g2;
    let g3 = gcd_u128(c, denom);
    c /= g3;
    denom /= g3;

    let numerator = a
        .checked_mul(b)
        .and_then(|v| v.checked_mul(c))
        .ok_or(LendingError::MathOverflow)?;
    i128::try_from(numerator / denom).map_err(|_| LendingError::MathOverflow)
}

fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Position {
    /// Folds interest owed since the last accrual into the debt (and the
    /// pool's borrowed total) and moves the accrual stamp to `now`.
    /// The stamp moves even without debt so a later borrow starts clean.
    pub fn accrue(&mut self, pool: &mut Pool, now: u64) -> Result<i128, LendingError> {
        let elapsed = now.saturating_sub(self.last_accrual);
        let mut interest = 0;
        if elapsed > 0 && self.debt_balance > 0 {
            interest = accrued_interest(self.debt_balance, pool.interest_rate_bps, elapsed)?;
            self.debt_balance = self
                .debt_balance
                .checked_add(interest)
                .ok_or(LendingError::MathOverflow)?;
            pool.total_borrowed = pool
                .total_borrowed
                .checked_add(interest)
                .ok_or(LendingError::MathOverflow)?;
        }
        // never rewind the stamp on a clock that went backwards
        self.last_accrual = self.last_accrual.max(now);
        Ok(interest)
    }
}

/// Accrues `user`'s debt in `asset` up to `now` and persists the result, so
/// that health checks run afterwards observe post-accrual balances.
pub fn accrue(
    env: &Env,
    asset: &Address,
    user: &Address,
    now: u64,
) -> Result<(Pool, Position), LendingError> {
    let mut pool = load_pool(env, asset)?;
    let mut position = load_or_open_position(env, asset, user, now);
    let interest = position.accrue(&mut pool, now)?;
    write_pool(env, asset, &pool);
    write_position(env, asset, user, &position);
    if interest > 0 {
        InterestAccrued {
            asset: asset.clone(),
            user: user.clone(),
            interest,
            debt_balance: position.debt_balance,
        }
        .publish(env);
    }
    Ok((pool, position))
}

/// Debt `position` would carry if accrued at `now`, without touching storage.
pub fn preview_debt(pool: &Pool, position: &Position, now: u64) -> Result<i128, LendingError> {
    let mut pool = pool.clone();
    let mut position = position.clone();
    position.accrue(&mut pool, now)?;
    Ok(position.debt_balance)
}
