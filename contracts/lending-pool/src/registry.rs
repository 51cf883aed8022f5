use soroban_sdk::{Address, Env};

use crate::constants::MAX_INTEREST_RATE_BPS;
use crate::error::LendingError;
use crate::events::AssetRegistered;
use crate::storage::{read_assets, read_pool, write_assets, write_pool, Administrator, Pool};

/// Opens an empty pool for `asset` at a fixed yearly rate. Requires the
/// administrator capability.
pub fn register(
    env: &Env,
    _admin: &Administrator,
    asset: &Address,
    interest_rate_bps: u32,
) -> Result<(), LendingError> {
    if is_supported(env, asset) {
        return Err(LendingError::AlreadyRegistered);
    }
    if interest_rate_bps > MAX_INTEREST_RATE_BPS {
        return Err(LendingError::RateOutOfRange);
    }
    let mut assets = read_assets(env);
    assets.push_back(asset.clone());
    write_assets(env, &assets);
    write_pool(env, asset, &Pool::empty(interest_rate_bps));
    AssetRegistered {
        asset: asset.clone(),
        interest_rate_bps,
    }
    .publish(env);
    Ok(())
}

pub fn is_supported(env: &Env, asset: &Address) -> bool {
    read_pool(env, asset).is_some()
}
