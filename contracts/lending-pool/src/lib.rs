#![no_std]

//! Over-collateralized lending pool: per-asset supply and debt ledgers with
//! simple interest accrual and a fixed 150% collateral requirement summed
//! across every registered asset.

mod constants;
mod contract;
mod error;
mod events;
mod health;
mod helpers;
mod interest;
mod registry;
mod storage;

pub use constants::*;
pub use contract::*;
pub use error::LendingError;
pub use storage::{AccountTotals, Pool, Position};
