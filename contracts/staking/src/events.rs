#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub plan_count: u32,
    pub timestamp: u64,
}

/// Fired when a user deposits into a plan.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub user: Address,
    pub plan_id: u32,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when settled rewards are paid out without touching principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsPaidEvent {
    pub user: Address,
    pub plan_id: u32,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a position is closed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub user: Address,
    pub plan_id: u32,
    pub principal: i128,
    pub rewards: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address, plan_count: u32) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            plan_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    user: Address,
    plan_id: u32,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), user.clone(), plan_id),
        StakedEvent {
            user,
            plan_id,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_paid(env: &Env, user: Address, plan_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), user.clone(), plan_id),
        RewardsPaidEvent {
            user,
            plan_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_withdrawn(
    env: &Env,
    user: Address,
    plan_id: u32,
    principal: i128,
    rewards: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), user.clone(), plan_id),
        StakeWithdrawnEvent {
            user,
            plan_id,
            principal,
            rewards,
            timestamp: env.ledger().timestamp(),
        },
    );
}
