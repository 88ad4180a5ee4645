//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - Nothing is withdrawable while a plan is locked
//! - Stakers entering together share post-unlock emission pro rata
//! - `pending_rewards` is a pure read

use proptest::prelude::*;
use staking::plans::TOKEN_UNIT;

use crate::harness::{advance, setup, DAY};

/// Plan 0 emission: 0.053 tokens per second.
const RATE_30D: i128 = 53_000_000_000_000_000;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Pending rewards stay at zero for every instant inside the lock.
    #[test]
    fn prop_locked_plan_pays_nothing(
        tokens in 1i128..=10_000i128,
        seconds in 0u64..30 * DAY,
    ) {
        let (env, client, users) = setup(1);
        client.stake(&users[0], &(tokens * TOKEN_UNIT), &0);

        advance(&env, seconds);
        prop_assert_eq!(client.pending_rewards(&users[0], &0), 0);
    }

    /// Two stakers entering together split post-unlock emission by stake.
    #[test]
    fn prop_rewards_proportional_to_stake(
        a in 1i128..=10_000i128,
        b in 1i128..=10_000i128,
        extra in 1u64..=60 * DAY,
    ) {
        let (env, client, users) = setup(2);
        client.stake(&users[0], &(a * TOKEN_UNIT), &0);
        client.stake(&users[1], &(b * TOKEN_UNIT), &0);

        advance(&env, 30 * DAY + extra);
        let pa = client.pending_rewards(&users[0], &0);
        let pb = client.pending_rewards(&users[1], &0);

        let emitted = extra as i128 * RATE_30D;
        let fair_a = emitted * a / (a + b);
        let fair_b = emitted * b / (a + b);

        // Truncation only ever rounds a share down, by less than one base
        // unit per whole token staked in the plan.
        prop_assert!(pa <= fair_a && fair_a - pa < a + b);
        prop_assert!(pb <= fair_b && fair_b - pb < a + b);
        prop_assert!(pa + pb <= emitted);
    }

    /// Reading pending rewards twice at the same instant changes nothing.
    #[test]
    fn prop_pending_is_idempotent(
        tokens in 1i128..=10_000i128,
        seconds in 0u64..=90 * DAY,
    ) {
        let (env, client, users) = setup(1);
        client.stake(&users[0], &(tokens * TOKEN_UNIT), &0);
        advance(&env, seconds);

        let plan = client.get_staking_plan(&0);
        let stake = client.get_user_stake(&users[0], &0);

        let first = client.pending_rewards(&users[0], &0);
        let second = client.pending_rewards(&users[0], &0);

        prop_assert_eq!(first, second);
        prop_assert_eq!(client.get_staking_plan(&0), plan);
        prop_assert_eq!(client.get_user_stake(&users[0], &0), stake);
    }
}
