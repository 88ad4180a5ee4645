//! Plan registry.
//!
//! The set of plans is closed: four tracks with fixed durations and emission
//! rates, seeded once by `initialize`. Only the accrual fields of a [`Plan`]
//! change afterwards.

use soroban_sdk::{contracttype, Env, I256};

use crate::ContractError;

/// Number of seconds in a day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// One whole token expressed in base units (18 decimals).
pub const TOKEN_UNIT: i128 = 1_000_000_000_000_000_000;

/// Number of plans in the registry. Plan ids are `0..PLAN_COUNT`.
pub const PLAN_COUNT: u32 = 4;

/// `(duration_seconds, emission_rate)` per plan id.
///
/// Emission rates are base units per second, i.e. tokens/sec scaled by 1e18.
const PLAN_TABLE: [(u64, i128); PLAN_COUNT as usize] = [
    (30 * SECONDS_PER_DAY, 53_000_000_000_000_000),
    (90 * SECONDS_PER_DAY, 107_000_000_000_000_000),
    (180 * SECONDS_PER_DAY, 160_000_000_000_000_000),
    (360 * SECONDS_PER_DAY, 213_000_000_000_000_000),
];

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum PlanKey {
    Plan(u32),
}

/// Accrual state of one staking plan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    pub id: u32,
    /// Lock length in seconds.
    pub duration: u64,
    /// Base units emitted per second across all stakers of this plan.
    pub emission_rate: i128,
    /// Sum of `amount` over every active stake in this plan.
    pub total_staked: i128,
    /// Timestamp through which `reward_per_unit_stored` is settled.
    pub last_update_time: u64,
    /// Cumulative reward per staked unit, scaled by `rewards::SCALE`.
    ///
    /// Held in 256 bits: with a single base unit staked it grows by about
    /// `emission_rate × SCALE` every second.
    pub reward_per_unit_stored: I256,
    /// Accumulator value at the most recent unlock boundary.
    pub reward_per_unit_at_unlock: I256,
    /// Set when the plan goes from empty to non-empty; anchors the lock.
    pub start_time: u64,
    pub is_active: bool,
}

impl Plan {
    fn seeded(env: &Env, id: u32, duration: u64, emission_rate: i128, now: u64) -> Self {
        Self {
            id,
            duration,
            emission_rate,
            total_staked: 0,
            last_update_time: now,
            reward_per_unit_stored: I256::from_i32(env, 0),
            reward_per_unit_at_unlock: I256::from_i32(env, 0),
            start_time: 0,
            is_active: false,
        }
    }
}

/// Fixed terms for `plan_id`, or `None` if the id is outside the table.
pub fn terms(plan_id: u32) -> Option<(u64, i128)> {
    PLAN_TABLE.get(plan_id as usize).copied()
}

/// Write the initial state of every plan.
pub fn seed(env: &Env, now: u64) {
    for (id, (duration, rate)) in (0u32..).zip(PLAN_TABLE.iter()) {
        store(env, &Plan::seeded(env, id, *duration, *rate, now));
    }
}

/// Load a plan.
///
/// # Errors
/// [`ContractError::InvalidPlan`] for an id outside the registry or a plan
/// that was never seeded.
pub fn load(env: &Env, plan_id: u32) -> Result<Plan, ContractError> {
    if terms(plan_id).is_none() {
        return Err(ContractError::InvalidPlan);
    }
    let plan: Plan = env
        .storage()
        .instance()
        .get(&PlanKey::Plan(plan_id))
        .ok_or(ContractError::InvalidPlan)?;
    if plan.duration == 0 {
        return Err(ContractError::InvalidPlan);
    }
    Ok(plan)
}

pub fn store(env: &Env, plan: &Plan) {
    env.storage().instance().set(&PlanKey::Plan(plan.id), plan);
}
