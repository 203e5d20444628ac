use soroban_sdk::{contractevent, Address};

use crate::types::TransactionKind;

#[contractevent(topics = ["timelock", "init"])]
pub struct TimelockInitialized {
    pub signatory_count: u32,
    pub threshold: u32,
    pub min_delay: u64,
}

#[contractevent(topics = ["timelock", "created"])]
pub struct TransactionCreated {
    pub id: u64,
    pub creator: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub kind: TransactionKind,
    pub release_time: u64,
}

#[contractevent(topics = ["timelock", "approved"])]
pub struct TransactionApproved {
    pub id: u64,
    pub signer: Address,
    pub approval_count: u32,
}

#[contractevent(topics = ["timelock", "modified"])]
pub struct TransactionModified {
    pub id: u64,
    pub beneficiary: Address,
    pub amount: i128,
    pub release_time: u64,
}

#[contractevent(topics = ["timelock", "cancelled"])]
pub struct TransactionCancelled {
    pub id: u64,
    pub cancelled_by: Address,
}

#[contractevent(topics = ["timelock", "executed"])]
pub struct TransactionExecuted {
    pub id: u64,
    pub beneficiary: Address,
    pub amount: i128,
    pub executor: Address,
}
