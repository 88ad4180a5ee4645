#![no_std]

pub mod cap;
pub mod events;
pub mod ledger;
pub mod lock;
pub mod plans;
pub mod rewards;

use common::{reentrancy, CommonError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Symbol};

pub use ledger::UserStake;
pub use plans::Plan;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    InvalidPlan = 4,
    NoActiveStake = 5,
    LockNotExpired = 6,
    NoRewardsAvailable = 7,
    RewardCapExceeded = 8,
    ArithmeticOverflow = 9,
    Reentrant = 10,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::ReentrantCall => ContractError::Reentrant,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `token` – SAC address of the token that is both staked and paid out
    ///   as rewards. The contract must be funded with reward tokens
    ///   separately.
    ///
    /// Seeds every plan with its fixed duration and emission rate.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        let now = env.ledger().timestamp();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        plans::seed(&env, now);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, admin, token, plans::PLAN_COUNT);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens into plan `plan_id`.
    ///
    /// The plan accumulator and the caller's existing position are settled
    /// before the deposit lands, so new tokens never earn retroactively.
    pub fn stake(env: Env, user: Address, amount: i128, plan_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        Self::guarded(&env, || Self::do_stake(&env, &user, amount, plan_id))
            .map_err(|err| Self::reject(&env, &user, plan_id, err))
    }

    /// Pay out the settled rewards of `user` in `plan_id`.
    ///
    /// Principal stays staked. Returns the amount paid.
    pub fn withdraw_rewards(env: Env, user: Address, plan_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        Self::guarded(&env, || Self::do_withdraw_rewards(&env, &user, plan_id))
            .map_err(|err| Self::reject(&env, &user, plan_id, err))
    }

    /// Close the position of `user` in `plan_id` once the plan has unlocked.
    ///
    /// Returns `(principal, rewards)`. Both are transferred to `user`.
    pub fn withdraw_stake(
        env: Env,
        user: Address,
        plan_id: u32,
    ) -> Result<(i128, i128), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        Self::guarded(&env, || Self::do_withdraw_stake(&env, &user, plan_id))
            .map_err(|err| Self::reject(&env, &user, plan_id, err))
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Rewards `user` could withdraw from `plan_id` right now.
    pub fn pending_rewards(env: Env, user: Address, plan_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        ledger::pending(&env, &user, plan_id, env.ledger().timestamp())
    }

    /// Stored state of a plan.
    pub fn get_staking_plan(env: Env, plan_id: u32) -> Result<Plan, ContractError> {
        Self::require_initialized(&env)?;
        plans::load(&env, plan_id)
    }

    /// Stored position of `user` in `plan_id`.
    pub fn get_user_stake(env: Env, user: Address, plan_id: u32) -> Result<UserStake, ContractError> {
        Self::require_initialized(&env)?;
        plans::load(&env, plan_id)?;
        Ok(ledger::load(&env, &user, plan_id))
    }

    /// Principal `user` holds across every plan.
    pub fn get_total_user_stake(env: Env, user: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        let mut total: i128 = 0;
        for plan_id in 0..plans::PLAN_COUNT {
            total = total
                .checked_add(ledger::load(&env, &user, plan_id).amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    /// Withdrawable rewards of `user` across every plan.
    pub fn get_total_pending_rewards(env: Env, user: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        let now = env.ledger().timestamp();
        let mut total: i128 = 0;
        for plan_id in 0..plans::PLAN_COUNT {
            total = total
                .checked_add(ledger::pending(&env, &user, plan_id, now)?)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    /// Moment the current lock of `plan_id` expires.
    pub fn get_unlock_time(env: Env, plan_id: u32) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        Ok(lock::unlock_time(&plans::load(&env, plan_id)?))
    }

    pub fn get_plan_count(_env: Env) -> u32 {
        plans::PLAN_COUNT
    }

    /// Rewards paid out over the contract's lifetime.
    pub fn get_total_distributed_rewards(env: Env) -> i128 {
        cap::total_distributed(&env)
    }

    pub fn get_max_rewards(_env: Env) -> i128 {
        cap::MAX_REWARDS
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

impl StakingContract {
    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Run `body` holding the reentrancy guard.
    fn guarded<T>(
        env: &Env,
        body: impl FnOnce() -> Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        reentrancy::enter(env)?;
        let result = body();
        reentrancy::exit(env);
        result
    }

    fn reject(env: &Env, user: &Address, plan_id: u32, err: ContractError) -> ContractError {
        let code = err as u32;
        log!(env, "staking call rejected", user.clone(), plan_id, code);
        err
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn token_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(token::Client::new(env, &token))
    }

    /// Pull `amount` from `from` into the contract. Aborts the call if `from`
    /// cannot cover it.
    fn transfer_inbound(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
        Self::token_client(env)?.transfer(from, &env.current_contract_address(), &amount);
        Ok(())
    }

    fn transfer_outbound(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        Self::token_client(env)?.transfer(&env.current_contract_address(), to, &amount);
        Ok(())
    }

    fn do_stake(env: &Env, user: &Address, amount: i128, plan_id: u32) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let now = env.ledger().timestamp();

        let mut plan = plans::load(env, plan_id)?;
        let mut stake = ledger::load(env, user, plan_id);
        ledger::deposit(env, &mut plan, &mut stake, amount, now)?;

        // Effects, then the token call.
        plans::store(env, &plan);
        ledger::store(env, user, plan_id, &stake);
        Self::extend_instance_ttl(env);

        Self::transfer_inbound(env, user, amount)?;

        events::publish_staked(env, user.clone(), plan_id, amount, plan.total_staked);
        Ok(())
    }

    fn do_withdraw_rewards(env: &Env, user: &Address, plan_id: u32) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();

        let (plan, mut stake) = ledger::settle_user(env, user, plan_id, now)?;
        let amount = ledger::take_rewards(&mut stake)?;
        let distributed = cap::checked_total(cap::total_distributed(env), amount)?;

        plans::store(env, &plan);
        ledger::store(env, user, plan_id, &stake);
        cap::store_total(env, distributed);
        Self::extend_instance_ttl(env);

        Self::transfer_outbound(env, user, amount)?;

        events::publish_rewards_paid(env, user.clone(), plan_id, amount);
        Ok(amount)
    }

    fn do_withdraw_stake(
        env: &Env,
        user: &Address,
        plan_id: u32,
    ) -> Result<(i128, i128), ContractError> {
        let now = env.ledger().timestamp();

        let (mut plan, mut stake) = ledger::settle_user(env, user, plan_id, now)?;
        let (principal, owed) = ledger::withdraw(&mut plan, &mut stake, now)?;
        let distributed = if owed > 0 {
            Some(cap::checked_total(cap::total_distributed(env), owed)?)
        } else {
            None
        };

        plans::store(env, &plan);
        ledger::store(env, user, plan_id, &stake);
        if let Some(total) = distributed {
            cap::store_total(env, total);
        }
        Self::extend_instance_ttl(env);

        Self::transfer_outbound(env, user, principal)?;
        if owed > 0 {
            Self::transfer_outbound(env, user, owed)?;
        }

        events::publish_stake_withdrawn(env, user.clone(), plan_id, principal, owed);
        Ok((principal, owed))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
