//! Ledger persistence for the timelock.
//!
//! Genesis configuration, the signatory set and the counters live in instance
//! storage. Transaction records, their approval sets and the per-beneficiary
//! index live in persistent storage. Every touch bumps the entry's TTL so a
//! pending transaction never lapses out of the ledger.

use soroban_sdk::{Address, Env, Map};

use crate::errors::TimelockError;
use crate::types::{DataKey, TimelockConfig, Transaction};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// Signatory registry

pub fn set_config(env: &Env, config: &TimelockConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    for signatory in config.signatories.iter() {
        env.storage()
            .instance()
            .set(&DataKey::Signatory(signatory), &true);
    }
    env.storage().instance().set(&DataKey::TransactionCount, &0u64);
    env.storage().instance().set(&DataKey::TotalReleased, &0i128);
    bump_instance(env);
}

pub fn config(env: &Env) -> Result<TimelockConfig, TimelockError> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(TimelockError::NotInitialized)
}

pub fn is_signatory(env: &Env, identity: &Address) -> bool {
    env.storage()
        .instance()
        .has(&DataKey::Signatory(identity.clone()))
}

// Transaction ledger

pub fn transaction_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TransactionCount)
        .unwrap_or(0u64)
}

/// Reserves the next transaction id. Ids start at 1 and are never reused.
pub fn next_transaction_id(env: &Env) -> u64 {
    let id = transaction_count(env) + 1;
    env.storage().instance().set(&DataKey::TransactionCount, &id);
    bump_instance(env);
    id
}

pub fn transaction(env: &Env, id: u64) -> Result<Transaction, TimelockError> {
    let key = DataKey::Transaction(id);
    let transaction = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(TimelockError::TransactionNotFound)?;
    bump_persistent(env, &key);
    Ok(transaction)
}

pub fn set_transaction(env: &Env, transaction: &Transaction) {
    let key = DataKey::Transaction(transaction.id);
    env.storage().persistent().set(&key, transaction);
    bump_persistent(env, &key);
}

pub fn total_released(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalReleased)
        .unwrap_or(0i128)
}

pub fn add_released(env: &Env, amount: i128) {
    let total = total_released(env) + amount;
    env.storage().instance().set(&DataKey::TotalReleased, &total);
}

// Approval quorum tracker

/// Signatory -> ledger timestamp of their approval.
pub fn approvals(env: &Env, id: u64) -> Map<Address, u64> {
    let key = DataKey::Approvals(id);
    let approvals = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Map::new(env));
    if env.storage().persistent().has(&key) {
        bump_persistent(env, &key);
    }
    approvals
}

pub fn set_approvals(env: &Env, id: u64, approvals: &Map<Address, u64>) {
    let key = DataKey::Approvals(id);
    env.storage().persistent().set(&key, approvals);
    bump_persistent(env, &key);
}

pub fn clear_approvals(env: &Env, id: u64) {
    set_approvals(env, id, &Map::new(env));
}

// Beneficiary index
//
// One persistent entry per index position, so neither appending nor reading a
// page touches the rest of a charity's history. Positions are never removed:
// an id whose beneficiary was later changed stays at its old position and is
// skipped by readers.

pub fn beneficiary_index_len(env: &Env, beneficiary: &Address) -> u32 {
    let key = DataKey::BeneficiaryIndexLen(beneficiary.clone());
    let len = env.storage().persistent().get(&key).unwrap_or(0u32);
    if len > 0 {
        bump_persistent(env, &key);
    }
    len
}

pub fn beneficiary_index_at(env: &Env, beneficiary: &Address, position: u32) -> Option<u64> {
    let key = DataKey::BeneficiaryIndexEntry(beneficiary.clone(), position);
    let id = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(id)
}

/// Appends `id` to the beneficiary's index unless it was indexed there before.
pub fn index_beneficiary(env: &Env, beneficiary: &Address, id: u64) {
    let marker = DataKey::BeneficiaryIndexed(beneficiary.clone(), id);
    if env.storage().persistent().has(&marker) {
        bump_persistent(env, &marker);
        return;
    }

    let position = beneficiary_index_len(env, beneficiary);
    let entry = DataKey::BeneficiaryIndexEntry(beneficiary.clone(), position);
    env.storage().persistent().set(&entry, &id);
    bump_persistent(env, &entry);

    let len_key = DataKey::BeneficiaryIndexLen(beneficiary.clone());
    env.storage().persistent().set(&len_key, &(position + 1));
    bump_persistent(env, &len_key);

    env.storage().persistent().set(&marker, &true);
    bump_persistent(env, &marker);
}
