use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::error::LendingError;

// Storage key types for the contract
#[contracttype]
pub enum DataKey {
    Admin,                     // Address
    Initialized,               // bool (instance)
    OperationLock,             // bool (instance), held for the span of one mutation
    Assets,                    // Vec<Address>, registration order
    Pool(Address),             // Pool per asset
    Position(Address, Address), // Position per (asset, user)
}

/// Aggregate ledger for one registered asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub total_supplied: i128,
    pub total_borrowed: i128,
    pub interest_rate_bps: u32,
}

impl Pool {
    pub fn empty(interest_rate_bps: u32) -> Self {
        Pool {
            total_supplied: 0,
            total_borrowed: 0,
            interest_rate_bps,
        }
    }

    /// Headroom left for new borrows.
    pub fn available_liquidity(&self) -> i128 {
        self.total_supplied.saturating_sub(self.total_borrowed)
    }
}

/// One user's balances in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub supply_balance: i128,
    pub debt_balance: i128,
    pub last_accrual: u64,
}

impl Position {
    /// A fresh position, stamped so that no interest is owed for time before
    /// it existed.
    pub fn open(now: u64) -> Self {
        Position {
            supply_balance: 0,
            debt_balance: 0,
            last_accrual: now,
        }
    }
}

/// Raw-unit sums across every registered asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountTotals {
    pub collateral: i128,
    pub debt: i128,
}

/// Proof that the stored administrator authorised the current invocation.
/// Only [`require_admin`] hands these out.
pub struct Administrator {
    address: Address,
}

impl Administrator {
    pub fn address(&self) -> &Address {
        &self.address
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn ensure_initialized(env: &Env) -> Result<(), LendingError> {
    if !is_initialized(env) {
        return Err(LendingError::NotInitialized);
    }
    bump_core_ttl(env);
    Ok(())
}

pub fn read_admin(env: &Env) -> Result<Address, LendingError> {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .ok_or(LendingError::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
}

pub fn require_admin(env: &Env) -> Result<Administrator, LendingError> {
    ensure_initialized(env)?;
    let address = read_admin(env)?;
    address.require_auth();
    Ok(Administrator { address })
}

pub fn read_assets(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Assets)
        .unwrap_or(Vec::new(env))
}

pub fn write_assets(env: &Env, assets: &Vec<Address>) {
    let persistent = env.storage().persistent();
    persistent.set(&DataKey::Assets, assets);
    persistent.extend_ttl(&DataKey::Assets, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// Reads never extend TTL; entries are bumped when an operation writes them.
pub fn read_pool(env: &Env, asset: &Address) -> Option<Pool> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(asset.clone()))
}

pub fn write_pool(env: &Env, asset: &Address, pool: &Pool) {
    let key = DataKey::Pool(asset.clone());
    let persistent = env.storage().persistent();
    persistent.set(&key, pool);
    persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Pool for `asset`, or `UnsupportedAsset` if it was never registered.
pub fn load_pool(env: &Env, asset: &Address) -> Result<Pool, LendingError> {
    read_pool(env, asset).ok_or(LendingError::UnsupportedAsset)
}

pub fn read_position(env: &Env, asset: &Address, user: &Address) -> Option<Position> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(asset.clone(), user.clone()))
}

/// Stored position, or a newly opened one stamped at `now` on first touch.
pub fn load_or_open_position(env: &Env, asset: &Address, user: &Address, now: u64) -> Position {
    read_position(env, asset, user).unwrap_or_else(|| Position::open(now))
}

pub fn write_position(env: &Env, asset: &Address, user: &Address, position: &Position) {
    let key = DataKey::Position(asset.clone(), user.clone());
    let persistent = env.storage().persistent();
    persistent.set(&key, position);
    persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Runs `op` while holding the contract-wide operation lock. A nested entry
/// (for example from a token callback) is refused with `Reentrant`.
pub fn with_operation_lock<T>(
    env: &Env,
    op: impl FnOnce() -> Result<T, LendingError>,
) -> Result<T, LendingError> {
    let instance = env.storage().instance();
    if instance
        .get::<_, bool>(&DataKey::OperationLock)
        .unwrap_or(false)
    {
        return Err(LendingError::Reentrant);
    }
    instance.set(&DataKey::OperationLock, &true);
    let result = op();
    env.storage().instance().remove(&DataKey::OperationLock);
    result
}

pub fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    if persistent.has(&DataKey::Admin) {
        persistent.extend_ttl(&DataKey::Admin, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    if persistent.has(&DataKey::Assets) {
        persistent.extend_ttl(&DataKey::Assets, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
