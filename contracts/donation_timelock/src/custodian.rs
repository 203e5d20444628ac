//! Fund custodian: moves the supplied value through the contract to the
//! beneficiary. It performs no authorization of its own; callers only reach
//! it once every guard of `execute_transaction` has passed.

use soroban_sdk::{log, token, Address, Env};

use crate::errors::TimelockError;

/// Pulls `amount` of `token` from `payer` into custody, then pays it out to
/// `beneficiary`. A failure on either leg surfaces as `TransferFailed`; the
/// returned error aborts the invocation, which rolls back the other leg too.
pub fn release(
    env: &Env,
    token: &Address,
    payer: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<(), TimelockError> {
    let token_client = token::Client::new(env, token);
    let custody = env.current_contract_address();

    if token_client.try_transfer(payer, &custody, &amount).is_err() {
        log!(env, "custody deposit failed", payer.clone(), amount);
        return Err(TimelockError::TransferFailed);
    }

    if token_client.try_transfer(&custody, beneficiary, &amount).is_err() {
        log!(env, "beneficiary payout failed", beneficiary.clone(), amount);
        return Err(TimelockError::TransferFailed);
    }

    Ok(())
}
