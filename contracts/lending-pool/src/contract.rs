use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

use crate::error::LendingError;
use crate::events::{AdminUpdated, Borrow, Initialized, Repay, Supply, Withdraw};
use crate::health::{account_totals, can_borrow, can_withdraw};
use crate::helpers::{pull, push, require_positive};
use crate::interest::{self, accrue};
use crate::registry;
use crate::storage::*;

#[contract]
pub struct LendingPool;

#[contractimpl]
impl LendingPool {
    /// One-shot setup: records the administrator allowed to register assets.
    pub fn initialize(env: Env, admin: Address) -> Result<(), LendingError> {
        if is_initialized(&env) {
            return Err(LendingError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Initialized, &true);
        write_admin(&env, &admin);
        bump_core_ttl(&env);
        Initialized { admin }.publish(&env);
        Ok(())
    }

    /// Admin: hand the administrator role to `new_admin`.
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), LendingError> {
        let current = require_admin(&env)?;
        write_admin(&env, &new_admin);
        AdminUpdated {
            previous: current.address().clone(),
            admin: new_admin,
        }
        .publish(&env);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, LendingError> {
        read_admin(&env)
    }

    /// Admin: open a pool for `asset` with a fixed yearly rate in basis
    /// points (at most 5000).
    pub fn register_asset(
        env: Env,
        asset: Address,
        interest_rate_bps: u32,
    ) -> Result<(), LendingError> {
        let admin = require_admin(&env)?;
        registry::register(&env, &admin, &asset, interest_rate_bps)
    }

    pub fn is_supported(env: Env, asset: Address) -> bool {
        registry::is_supported(&env, &asset)
    }

    /// Registered assets in registration order.
    pub fn get_supported_assets(env: Env) -> Vec<Address> {
        read_assets(&env)
    }

    /// Deposit `amount` of `asset` from `user` into its pool.
    pub fn supply(env: Env, user: Address, asset: Address, amount: i128) -> Result<(), LendingError> {
        ensure_initialized(&env)?;
        user.require_auth();
        with_operation_lock(&env, || {
            require_positive(amount)?;
            let now = env.ledger().timestamp();
            let (mut pool, mut position) = accrue(&env, &asset, &user, now)?;

            position.supply_balance = position
                .supply_balance
                .checked_add(amount)
                .ok_or(LendingError::MathOverflow)?;
            pool.total_supplied = pool
                .total_supplied
                .checked_add(amount)
                .ok_or(LendingError::MathOverflow)?;
            write_pool(&env, &asset, &pool);
            write_position(&env, &asset, &user, &position);

            pull(&env, &asset, &user, amount)?;

            Supply { asset: asset.clone(), user: user.clone(), amount }.publish(&env);
            Ok(())
        })
    }

    /// Borrow `amount` of `asset` against the user's deposits across every
    /// pool.
    pub fn borrow(env: Env, user: Address, asset: Address, amount: i128) -> Result<(), LendingError> {
        ensure_initialized(&env)?;
        user.require_auth();
        with_operation_lock(&env, || {
            require_positive(amount)?;
            let now = env.ledger().timestamp();
            let (mut pool, mut position) = accrue(&env, &asset, &user, now)?;

            let borrowed_after = pool
                .total_borrowed
                .checked_add(amount)
                .ok_or(LendingError::MathOverflow)?;
            if pool.total_supplied < borrowed_after {
                log!(&env, "not enough liquidity", asset.clone(), pool.available_liquidity(), amount);
                return Err(LendingError::InsufficientLiquidity);
            }
            if !can_borrow(&env, &user, amount)? {
                return Err(LendingError::InsufficientCollateral);
            }

            position.debt_balance = position
                .debt_balance
                .checked_add(amount)
                .ok_or(LendingError::MathOverflow)?;
            pool.total_borrowed = borrowed_after;
            write_pool(&env, &asset, &pool);
            write_position(&env, &asset, &user, &position);

            push(&env, &asset, &user, amount)?;

            Borrow { asset: asset.clone(), user: user.clone(), amount }.publish(&env);
            Ok(())
        })
    }

    /// Pay back up to `amount` of the user's `asset` debt. Returns what was
    /// actually taken, which is capped at the outstanding debt.
    pub fn repay(env: Env, user: Address, asset: Address, amount: i128) -> Result<i128, LendingError> {
        ensure_initialized(&env)?;
        user.require_auth();
        with_operation_lock(&env, || {
            require_positive(amount)?;
            let now = env.ledger().timestamp();
            let (mut pool, mut position) = accrue(&env, &asset, &user, now)?;

            if position.debt_balance <= 0 {
                return Err(LendingError::NoDebt);
            }
            let effective = amount.min(position.debt_balance);

            position.debt_balance -= effective;
            pool.total_borrowed = pool
                .total_borrowed
                .checked_sub(effective)
                .ok_or(LendingError::MathOverflow)?;
            write_pool(&env, &asset, &pool);
            write_position(&env, &asset, &user, &position);

            pull(&env, &asset, &user, effective)?;

            Repay { asset: asset.clone(), user: user.clone(), amount: effective }.publish(&env);
            Ok(effective)
        })
    }

    /// Take `amount` of `asset` back out of the user's deposit.
    pub fn withdraw(env: Env, user: Address, asset: Address, amount: i128) -> Result<(), LendingError> {
        ensure_initialized(&env)?;
        user.require_auth();
        with_operation_lock(&env, || {
            require_positive(amount)?;
            let now = env.ledger().timestamp();
            let (mut pool, mut position) = accrue(&env, &asset, &user, now)?;

            if position.supply_balance < amount {
                return Err(LendingError::InsufficientBalance);
            }
            if !can_withdraw(&env, &user, &asset, amount)? {
                return Err(LendingError::CollateralBreach);
            }
            let supplied_after = pool.total_supplied - amount;
            if supplied_after < pool.total_borrowed {
                log!(&env, "withdraw would strand borrows", asset.clone(), supplied_after, pool.total_borrowed);
                return Err(LendingError::InsufficientLiquidity);
            }

            position.supply_balance -= amount;
            pool.total_supplied = supplied_after;
            write_pool(&env, &asset, &pool);
            write_position(&env, &asset, &user, &position);

            push(&env, &asset, &user, amount)?;

            Withdraw { asset: asset.clone(), user: user.clone(), amount }.publish(&env);
            Ok(())
        })
    }

    pub fn get_user_supply(env: Env, asset: Address, user: Address) -> i128 {
        read_position(&env, &asset, &user)
            .map(|p| p.supply_balance)
            .unwrap_or(0)
    }

    /// Stored debt, as of the user's last accrual.
    pub fn get_user_borrow(env: Env, asset: Address, user: Address) -> i128 {
        read_position(&env, &asset, &user)
            .map(|p| p.debt_balance)
            .unwrap_or(0)
    }

    /// `(total_supplied, total_borrowed, interest_rate_bps)` for `asset`.
    pub fn get_pool_info(env: Env, asset: Address) -> Result<(i128, i128, u32), LendingError> {
        let pool = load_pool(&env, &asset)?;
        Ok((pool.total_supplied, pool.total_borrowed, pool.interest_rate_bps))
    }

    /// The user's position in `asset`; an untouched position reads as empty
    /// and is not persisted.
    pub fn get_position(env: Env, asset: Address, user: Address) -> Position {
        read_position(&env, &asset, &user)
            .unwrap_or_else(|| Position::open(env.ledger().timestamp()))
    }

    /// Raw-unit collateral and debt summed over every registered asset.
    pub fn get_account_totals(env: Env, user: Address) -> Result<AccountTotals, LendingError> {
        account_totals(&env, &user, None)
    }

    /// Debt including interest that would accrue if the user acted now.
    pub fn preview_debt(env: Env, asset: Address, user: Address) -> Result<i128, LendingError> {
        let pool = load_pool(&env, &asset)?;
        let Some(position) = read_position(&env, &asset, &user) else {
            return Ok(0);
        };
        interest::preview_debt(&pool, &position, env.ledger().timestamp())
    }
}
