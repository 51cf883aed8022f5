use soroban_sdk::{log, Address, Env};

use crate::constants::{BASIS_POINTS, COLLATERAL_RATIO_BPS};
use crate::error::LendingError;
use crate::storage::{read_assets, read_position, AccountTotals};

/// `collateral * BASIS_POINTS >= debt * COLLATERAL_RATIO_BPS`.
///
/// Amounts are raw token units: every asset counts one-for-one, there is no
/// price conversion.
pub fn is_collateralized(collateral: i128, debt: i128) -> Result<bool, LendingError> {
    let lhs = collateral
        .checked_mul(BASIS_POINTS)
        .ok_or(LendingError::MathOverflow)?;
    let rhs = debt
        .checked_mul(COLLATERAL_RATIO_BPS)
        .ok_or(LendingError::MathOverflow)?;
    Ok(lhs >= rhs)
}

/// Sums `user`'s supply and debt over every registered asset. When
/// `withdrawal` is given, that amount is taken off the supply of that asset
/// first, floored at zero.
pub fn account_totals(
    env: &Env,
    user: &Address,
    withdrawal: Option<(&Address, i128)>,
) -> Result<AccountTotals, LendingError> {
    let mut totals = AccountTotals {
        collateral: 0,
        debt: 0,
    };
    for asset in read_assets(env).iter() {
        let Some(position) = read_position(env, &asset, user) else {
            continue;
        };
        let mut supply = position.supply_balance;
        if let Some((withdraw_asset, amount)) = withdrawal {
            if *withdraw_asset == asset {
                supply = supply.saturating_sub(amount).max(0);
            }
        }
        totals.collateral = totals
            .collateral
            .checked_add(supply)
            .ok_or(LendingError::MathOverflow)?;
        totals.debt = totals
            .debt
            .checked_add(position.debt_balance)
            .ok_or(LendingError::MathOverflow)?;
    }
    Ok(totals)
}

/// Would `user` stay collateralized after taking on `extra_debt` more?
pub fn can_borrow(env: &Env, user: &Address, extra_debt: i128) -> Result<bool, LendingError> {
    let totals = account_totals(env, user, None)?;
    let debt = totals
        .debt
        .checked_add(extra_debt)
        .ok_or(LendingError::MathOverflow)?;
    let ok = is_collateralized(totals.collateral, debt)?;
    if !ok {
        log!(env, "borrow refused", user.clone(), totals.collateral, debt);
    }
    Ok(ok)
}

/// Would `user` stay collateralized after pulling `amount` of `asset` out?
/// Always true for an account without debt.
pub fn can_withdraw(
    env: &Env,
    user: &Address,
    asset: &Address,
    amount: i128,
) -> Result<bool, LendingError> {
    let totals = account_totals(env, user, Some((asset, amount)))?;
    if totals.debt == 0 {
        return Ok(true);
    }
    let ok = is_collateralized(totals.collateral, totals.debt)?;
    if !ok {
        log!(env, "withdraw refused", user.clone(), totals.collateral, totals.debt);
    }
    Ok(ok)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exact_ratio_is_enough() {
        assert_eq!(is_collateralized(1_500, 1_000), Ok(true));
        assert_eq!(is_collateralized(1_499, 1_000), Ok(false));
    }

    #[test]
    fn test_borrow_scenarios() {
        // 1000 * 10000 >= 600 * 15000
        assert_eq!(is_collateralized(1_000, 600), Ok(true));
        // 1000 * 10000 < 700 * 15000
        assert_eq!(is_collateralized(1_000, 700), Ok(false));
    }

    #[test]
    fn test_zero_debt_needs_nothing() {
        assert_eq!(is_collateralized(0, 0), Ok(true));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            is_collateralized(i128::MAX, 1),
            Err(LendingError::MathOverflow)
        );
    }
}
