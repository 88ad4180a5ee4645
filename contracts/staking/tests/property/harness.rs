//! Shared environment setup for the property suites.

use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use staking::plans::TOKEN_UNIT;
use staking::{StakingContract, StakingContractClient};

pub const DAY: u64 = 86_400;

/// Deployed contract at t=0 with `n_users` funded stakers and a reward
/// reserve large enough for any payout under the cap.
pub fn setup(n_users: usize) -> (Env, StakingContractClient<'static>, Vec<Address>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = token.address();
    let asset = StellarAssetClient::new(&env, &token_id);

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    client.initialize(&Address::generate(&env), &token_id);

    asset.mint(&contract_id, &(20_000_000 * TOKEN_UNIT));

    let users = (0..n_users)
        .map(|_| {
            let user = Address::generate(&env);
            asset.mint(&user, &(1_000_000 * TOKEN_UNIT));
            user
        })
        .collect();

    (env, client, users)
}

pub fn advance(env: &Env, seconds: u64) {
    let now = env.ledger().timestamp();
    env.ledger().set_timestamp(now + seconds);
}
