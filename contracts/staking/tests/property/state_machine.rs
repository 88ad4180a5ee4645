//! Property-based state machine tests for the staking ledger.
//!
//! Random sequences of stakes, withdrawals and clock advances are replayed
//! against the contract. After every step:
//! - each plan's `total_staked` equals the sum of its active positions
//! - a plan is active exactly when it holds stake
//! - no plan's accumulator has decreased
//! - lifetime distributed rewards stay within the cap

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use staking::cap::MAX_REWARDS;
use staking::plans::{PLAN_COUNT, TOKEN_UNIT};
use staking::{ContractError, StakingContractClient};
use soroban_sdk::{Address, I256};

use crate::harness::{advance, setup, DAY};

const N_USERS: usize = 3;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Stake {
        user: u8,
        plan: u8,
        #[proptest(strategy = "1i128..=5_000i128")]
        tokens: i128,
    },
    /// Stake a handful of base units rather than whole tokens.
    StakeUnits {
        user: u8,
        plan: u8,
        #[proptest(strategy = "1i128..=1_000i128")]
        units: i128,
    },
    WithdrawRewards {
        user: u8,
        plan: u8,
    },
    WithdrawStake {
        user: u8,
        plan: u8,
    },
    Advance {
        #[proptest(strategy = "0u64..=45u64")]
        days: u64,
    },
}

fn check_invariants(
    client: &StakingContractClient<'static>,
    users: &[Address],
    last_rpu: &mut [I256],
) -> Result<(), TestCaseError> {
    for plan_id in 0..PLAN_COUNT {
        let plan = client.get_staking_plan(&plan_id);

        let mut sum: i128 = 0;
        for user in users {
            let stake = client.get_user_stake(user, &plan_id);
            if stake.is_active {
                prop_assert!(stake.amount > 0);
                sum += stake.amount;
            } else {
                prop_assert_eq!(stake.amount, 0);
                prop_assert_eq!(stake.rewards, 0);
            }
        }
        prop_assert_eq!(plan.total_staked, sum);
        prop_assert_eq!(plan.is_active, plan.total_staked > 0);

        let idx = plan_id as usize;
        prop_assert!(plan.reward_per_unit_stored >= last_rpu[idx]);
        last_rpu[idx] = plan.reward_per_unit_stored;
    }
    prop_assert!(client.get_total_distributed_rewards() <= MAX_REWARDS);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_ledger_invariants_hold(actions in prop::collection::vec(any::<Action>(), 1..24)) {
        let (env, client, users) = setup(N_USERS);
        let mut last_rpu: Vec<I256> = (0..PLAN_COUNT)
            .map(|plan_id| client.get_staking_plan(&plan_id).reward_per_unit_stored)
            .collect();

        for action in actions {
            match action {
                Action::Stake { user, plan, tokens } => {
                    let user = &users[user as usize % N_USERS];
                    let plan = plan as u32 % PLAN_COUNT;
                    client.stake(user, &(tokens * TOKEN_UNIT), &plan);
                }
                Action::StakeUnits { user, plan, units } => {
                    let user = &users[user as usize % N_USERS];
                    let plan = plan as u32 % PLAN_COUNT;
                    client.stake(user, &units, &plan);
                }
                Action::WithdrawRewards { user, plan } => {
                    let user = &users[user as usize % N_USERS];
                    let plan = plan as u32 % PLAN_COUNT;
                    match client.try_withdraw_rewards(user, &plan) {
                        Ok(Ok(paid)) => prop_assert!(paid > 0),
                        Err(Ok(e)) => prop_assert!(matches!(
                            e,
                            ContractError::NoActiveStake
                                | ContractError::NoRewardsAvailable
                                | ContractError::RewardCapExceeded
                        )),
                        other => prop_assert!(false, "unexpected result {:?}", other),
                    }
                }
                Action::WithdrawStake { user, plan } => {
                    let user = &users[user as usize % N_USERS];
                    let plan = plan as u32 % PLAN_COUNT;
                    let before = client.get_staking_plan(&plan).total_staked;
                    let staked = client.get_user_stake(user, &plan).amount;
                    match client.try_withdraw_stake(user, &plan) {
                        Ok(Ok((principal, _))) => {
                            prop_assert_eq!(principal, staked);
                            prop_assert_eq!(
                                client.get_staking_plan(&plan).total_staked,
                                before - principal
                            );
                            prop_assert!(!client.get_user_stake(user, &plan).is_active);
                        }
                        Err(Ok(e)) => prop_assert!(matches!(
                            e,
                            ContractError::NoActiveStake
                                | ContractError::LockNotExpired
                                | ContractError::RewardCapExceeded
                        )),
                        other => prop_assert!(false, "unexpected result {:?}", other),
                    }
                }
                Action::Advance { days } => advance(&env, days * DAY),
            }

            check_invariants(&client, &users, &mut last_rpu)?;
        }
    }
}
