#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking::cap::MAX_REWARDS;
use staking::plans::PLAN_COUNT;
use staking::{StakingContract, StakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64, plan: u8 },
    WithdrawRewards { plan: u8 },
    WithdrawStake { plan: u8 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    client.initialize(&Address::generate(&env), &token);

    let asset = StellarAssetClient::new(&env, &token);
    asset.mint(&contract_id, &i128::from(u64::MAX));

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        asset.mint(&user, &i128::from(u64::MAX));
        users.push(user);
    }

    // Errors are expected; panics and broken ledger invariants are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount, plan } => {
                let plan = u32::from(plan) % (PLAN_COUNT + 1);
                let _ = client.try_stake(caller, &i128::from(amount), &plan);
            }
            FuzzAction::WithdrawRewards { plan } => {
                let _ = client.try_withdraw_rewards(caller, &(u32::from(plan) % PLAN_COUNT));
            }
            FuzzAction::WithdrawStake { plan } => {
                let _ = client.try_withdraw_stake(caller, &(u32::from(plan) % PLAN_COUNT));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
        }

        for plan_id in 0..PLAN_COUNT {
            let total: i128 = users
                .iter()
                .map(|u| client.get_user_stake(u, &plan_id))
                .filter(|s| s.is_active)
                .map(|s| s.amount)
                .sum();
            assert_eq!(client.get_staking_plan(&plan_id).total_staked, total);
        }
        assert!(client.get_total_distributed_rewards() <= MAX_REWARDS);
    }
});
