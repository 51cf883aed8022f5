use soroban_sdk::contracterror;

/// Every way a pool operation can be refused. A refused operation leaves no
/// trace: the host discards all storage writes and events of the invocation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LendingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    InvalidAmount = 10,
    UnsupportedAsset = 11,
    AlreadyRegistered = 12,
    RateOutOfRange = 13,

    InsufficientLiquidity = 20,
    InsufficientCollateral = 21,
    CollateralBreach = 22,
    InsufficientBalance = 23,
    NoDebt = 24,

    TransferFailed = 30,
    MathOverflow = 31,
    Reentrant = 32,
}
