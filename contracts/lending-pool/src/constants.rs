pub const BASIS_POINTS: i128 = 10_000;
pub const COLLATERAL_RATIO_BPS: i128 = 15_000; // 150%
pub const MAX_INTEREST_RATE_BPS: u32 = 5_000; // 50% APR
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60; // no leap years

pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
