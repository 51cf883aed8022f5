use soroban_sdk::{contractevent, Address};

/// Emitted once when the pool is brought up.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    #[topic]
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminUpdated {
    #[topic]
    pub previous: Address,
    #[topic]
    pub admin: Address,
}

/// A new asset pool was opened.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetRegistered {
    #[topic]
    pub asset: Address,
    pub interest_rate_bps: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Supply {
    #[topic]
    pub asset: Address,
    #[topic]
    pub user: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Borrow {
    #[topic]
    pub asset: Address,
    #[topic]
    pub user: Address,
    pub amount: i128,
}

/// `amount` is what was actually taken from the payer, after capping at the
/// outstanding debt.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Repay {
    #[topic]
    pub asset: Address,
    #[topic]
    pub user: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdraw {
    #[topic]
    pub asset: Address,
    #[topic]
    pub user: Address,
    pub amount: i128,
}

/// Interest folded into a user's debt during accrual.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestAccrued {
    #[topic]
    pub asset: Address,
    #[topic]
    pub user: Address,
    pub interest: i128,
    pub debt_balance: i128,
}
