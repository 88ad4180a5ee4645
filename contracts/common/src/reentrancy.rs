//! # Reentrancy Guard
//!
//! A contract-wide mutual-exclusion flag held for the whole body of a
//! mutating entry point, including any outbound token call it makes.
//!
//! The flag lives in temporary storage. A failed invocation is rolled back
//! by the host, so a guard left behind by an aborted call never outlives
//! that call.
//!
//! ## Usage pattern
//! ```ignore
//! reentrancy::enter(&env)?;
//! let result = Self::do_work(&env);
//! reentrancy::exit(&env);
//! result
//! ```

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

const ENTERED: Symbol = symbol_short!("ENTERED");

/// Returns `true` while a guarded call is in progress.
pub fn is_entered(env: &Env) -> bool {
    env.storage().temporary().has(&ENTERED)
}

/// Take the guard.
///
/// # Errors
/// [`CommonError::ReentrantCall`] if the guard is already held.
pub fn enter(env: &Env) -> Result<(), CommonError> {
    if is_entered(env) {
        return Err(CommonError::ReentrantCall);
    }
    env.storage().temporary().set(&ENTERED, &true);
    Ok(())
}

/// Release the guard. Releasing a guard that is not held is a no-op.
pub fn exit(env: &Env) {
    env.storage().temporary().remove(&ENTERED);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
