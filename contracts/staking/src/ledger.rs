//! Per-(user, plan) stake records and the transitions that act on them.
//!
//! Every function here works on values held in memory. The caller loads a
//! plan and a stake, applies one transition, and writes both back only once
//! all checks have passed.

use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, Address, Env, I256};

use crate::plans::{self, Plan};
use crate::{lock, rewards, ContractError};

// ── Storage key ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum StakeKey {
    Stake(Address, u32),
}

/// A user's position in one plan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    /// Currently staked quantity; zero when inactive.
    pub amount: i128,
    pub is_active: bool,
    /// Settled rewards not yet withdrawn.
    pub rewards: i128,
    /// Plan accumulator at this stake's last settlement.
    pub reward_per_unit_paid: I256,
}

impl UserStake {
    /// A slot that has never held a position.
    pub fn empty(env: &Env) -> Self {
        Self {
            amount: 0,
            is_active: false,
            rewards: 0,
            reward_per_unit_paid: I256::from_i32(env, 0),
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// Load the stake for `(user, plan_id)`. Slots never written read as empty.
pub fn load(env: &Env, user: &Address, plan_id: u32) -> UserStake {
    env.storage()
        .persistent()
        .get(&StakeKey::Stake(user.clone(), plan_id))
        .unwrap_or_else(|| UserStake::empty(env))
}

pub fn store(env: &Env, user: &Address, plan_id: u32, stake: &UserStake) {
    let key = StakeKey::Stake(user.clone(), plan_id);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Settlement ───────────────────────────────────────────────────────────────

/// Credit `stake` with its share of accumulator growth.
///
/// `plan` must already be projected to `now`. While the plan is locked the
/// snapshot moves forward without crediting, so that growth is forfeited.
/// Once unlocked, only growth past the unlock checkpoint is credited.
pub fn settle(
    env: &Env,
    stake: &mut UserStake,
    plan: &Plan,
    now: u64,
) -> Result<(), ContractError> {
    if !stake.is_active {
        return Ok(());
    }
    if lock::is_unlocked(plan, now) {
        let from = if stake.reward_per_unit_paid > plan.reward_per_unit_at_unlock {
            &stake.reward_per_unit_paid
        } else {
            &plan.reward_per_unit_at_unlock
        };
        let credit = rewards::earned(env, stake.amount, &plan.reward_per_unit_stored, from)?;
        stake.rewards = stake
            .rewards
            .checked_add(credit)
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    stake.reward_per_unit_paid = plan.reward_per_unit_stored.clone();
    Ok(())
}

/// Plan and stake for `(user, plan_id)` settled to `now`. Nothing is written.
pub fn settle_user(
    env: &Env,
    user: &Address,
    plan_id: u32,
    now: u64,
) -> Result<(Plan, UserStake), ContractError> {
    let plan = rewards::project(env, &plans::load(env, plan_id)?, now);
    let mut stake = load(env, user, plan_id);
    settle(env, &mut stake, &plan, now)?;
    Ok((plan, stake))
}

/// Rewards `user` could withdraw from `plan_id` at `now`.
pub fn pending(env: &Env, user: &Address, plan_id: u32, now: u64) -> Result<i128, ContractError> {
    let (_, stake) = settle_user(env, user, plan_id, now)?;
    Ok(if stake.is_active { stake.rewards } else { 0 })
}

// ── Transitions ──────────────────────────────────────────────────────────────

/// Add `amount` to `stake` in `plan`.
///
/// Restarts the plan's lock if it was empty. A new slot snapshots the
/// current accumulator so it earns nothing for time before the deposit.
pub fn deposit(
    env: &Env,
    plan: &mut Plan,
    stake: &mut UserStake,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    if plan.total_staked == 0 {
        plan.start_time = now;
        plan.is_active = true;
    }
    *plan = rewards::project(env, plan, now);

    if stake.is_active {
        settle(env, stake, plan, now)?;
        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
    } else {
        *stake = UserStake {
            amount,
            is_active: true,
            rewards: 0,
            reward_per_unit_paid: plan.reward_per_unit_stored.clone(),
        };
    }

    plan.total_staked = plan
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(())
}

/// Zero the settled reward balance and return what it held.
pub fn take_rewards(stake: &mut UserStake) -> Result<i128, ContractError> {
    if !stake.is_active {
        return Err(ContractError::NoActiveStake);
    }
    if stake.rewards <= 0 {
        return Err(ContractError::NoRewardsAvailable);
    }
    let amount = stake.rewards;
    stake.rewards = 0;
    Ok(amount)
}

/// Close a settled stake, returning `(principal, rewards)`.
///
/// # Errors
/// - [`ContractError::NoActiveStake`] — the slot holds no position.
/// - [`ContractError::LockNotExpired`] — the plan is still locked.
pub fn withdraw(
    plan: &mut Plan,
    stake: &mut UserStake,
    now: u64,
) -> Result<(i128, i128), ContractError> {
    if !stake.is_active {
        return Err(ContractError::NoActiveStake);
    }
    if !lock::is_unlocked(plan, now) {
        return Err(ContractError::LockNotExpired);
    }

    let principal = stake.amount;
    let owed = stake.rewards;

    plan.total_staked = plan
        .total_staked
        .checked_sub(principal)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if plan.total_staked == 0 {
        plan.is_active = false;
    }

    stake.amount = 0;
    stake.rewards = 0;
    stake.is_active = false;
    stake.reward_per_unit_paid = plan.reward_per_unit_stored.clone();

    Ok((principal, owed))
}
