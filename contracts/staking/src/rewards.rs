use soroban_sdk::{Env, I256};

use crate::lock;
use crate::plans::Plan;
use crate::ContractError;

/// Fixed-point scaling factor.
///
/// Reward-per-unit values are multiplied by this constant before storage
/// to preserve sub-unit precision without floating-point arithmetic.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Reward-per-unit value of `plan` projected to `now`.
///
/// ```text
/// rpu = stored + (now − last_update) × emission_rate × SCALE / total_staked
/// ```
///
/// With nothing staked the stored value is returned unchanged. The whole
/// expression is evaluated in 256 bits; over the full `u64` time range at
/// the highest emission rate and a single staked unit the accumulator stays
/// below 2^190.
pub fn reward_per_unit(env: &Env, plan: &Plan, now: u64) -> I256 {
    if plan.total_staked <= 0 {
        return plan.reward_per_unit_stored.clone();
    }
    let elapsed = now.saturating_sub(plan.last_update_time);
    let delta = I256::from_i128(env, elapsed as i128)
        .mul(&I256::from_i128(env, plan.emission_rate))
        .mul(&I256::from_i128(env, SCALE))
        .div(&I256::from_i128(env, plan.total_staked));
    plan.reward_per_unit_stored.add(&delta)
}

/// Copy of `plan` with its accumulator brought forward to `now`.
///
/// Pure: nothing is written. When the interval crosses the plan's unlock
/// time while the plan has stakers, the accumulator is advanced to the
/// boundary first and that value is recorded in
/// `reward_per_unit_at_unlock`. With no stakers only `last_update_time`
/// moves, so time spent empty is dropped rather than banked.
pub fn project(env: &Env, plan: &Plan, now: u64) -> Plan {
    let mut next = plan.clone();
    if now <= plan.last_update_time {
        return next;
    }

    let unlock_at = lock::unlock_time(plan);
    if plan.total_staked > 0 && plan.last_update_time < unlock_at && unlock_at <= now {
        next.reward_per_unit_stored = reward_per_unit(env, &next, unlock_at);
        next.reward_per_unit_at_unlock = next.reward_per_unit_stored.clone();
        next.last_update_time = unlock_at;
    }

    next.reward_per_unit_stored = reward_per_unit(env, &next, now);
    next.last_update_time = now;
    next
}

/// Reward owed to `amount` units for the accumulator moving from `paid` to
/// `current`.
///
/// ```text
/// earned = amount × (current − paid) / SCALE
/// ```
///
/// `amount` was part of `total_staked` for the whole interval, so the
/// result never exceeds what the plan emitted and fits `i128` in practice;
/// a result that does not is reported rather than truncated.
pub fn earned(
    env: &Env,
    amount: i128,
    current: &I256,
    paid: &I256,
) -> Result<i128, ContractError> {
    if current <= paid || amount <= 0 {
        return Ok(0);
    }
    I256::from_i128(env, amount)
        .mul(&current.sub(paid))
        .div(&I256::from_i128(env, SCALE))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
