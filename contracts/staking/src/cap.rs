//! Lifetime reward ceiling.
//!
//! `total_distributed` only ever grows, and never past [`MAX_REWARDS`].

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::plans::TOKEN_UNIT;
use crate::ContractError;

/// Ceiling on rewards ever paid out across all plans and users.
pub const MAX_REWARDS: i128 = 10_000_000 * TOKEN_UNIT;

const TOTAL_DISTRIBUTED: Symbol = symbol_short!("TOT_DIST");

pub fn total_distributed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&TOTAL_DISTRIBUTED)
        .unwrap_or(0)
}

/// New lifetime total after paying `amount` on top of `distributed`.
///
/// # Errors
/// [`ContractError::RewardCapExceeded`] if the total would pass
/// [`MAX_REWARDS`].
pub fn checked_total(distributed: i128, amount: i128) -> Result<i128, ContractError> {
    let next = distributed
        .checked_add(amount)
        .ok_or(ContractError::RewardCapExceeded)?;
    if next > MAX_REWARDS {
        return Err(ContractError::RewardCapExceeded);
    }
    Ok(next)
}

pub fn store_total(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_DISTRIBUTED, &total);
}
