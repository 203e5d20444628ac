use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Env, Vec};

use crate::custodian;
use crate::errors::TimelockError;
use crate::events::{
    TimelockInitialized, TransactionApproved, TransactionCancelled, TransactionCreated,
    TransactionExecuted, TransactionModified,
};
use crate::storage;
use crate::types::{
    CharityTransaction, TimelockConfig, Transaction, TransactionApproval, TransactionKind,
    TransactionStatus, TransactionView,
};

/// Upper bound on index positions read by one `get_charity_transactions` call.
pub const MAX_CHARITY_PAGE: u32 = 50;

#[contract]
pub struct DonationTimelock;

#[contractimpl]
impl DonationTimelock {
    /// Fixes the signatory set, the approval threshold, the custodied token
    /// and the minimum scheduling delay for the lifetime of the contract.
    pub fn __constructor(
        env: Env,
        signatories: Vec<Address>,
        threshold: u32,
        token: Address,
        min_delay: u64,
    ) {
        if signatories.is_empty() {
            panic_with_error!(&env, TimelockError::EmptySignatoryList);
        }

        if threshold == 0 {
            panic_with_error!(&env, TimelockError::InvalidThreshold);
        }

        if threshold > signatories.len() {
            panic_with_error!(&env, TimelockError::ThresholdExceedsSignatories);
        }

        for i in 0..signatories.len() {
            for j in (i + 1)..signatories.len() {
                if signatories.get_unchecked(i) == signatories.get_unchecked(j) {
                    panic_with_error!(&env, TimelockError::DuplicateSignatory);
                }
            }
        }

        let signatory_count = signatories.len();
        storage::set_config(
            &env,
            &TimelockConfig {
                signatories,
                threshold,
                token,
                min_delay,
            },
        );

        log!(&env, "timelock initialized", signatory_count, threshold);
        TimelockInitialized {
            signatory_count,
            threshold,
            min_delay,
        }
        .publish(&env);
    }

    // Read-only configuration

    pub fn is_signatory(env: Env, identity: Address) -> bool {
        storage::is_signatory(&env, &identity)
    }

    pub fn signatories(env: Env) -> Result<Vec<Address>, TimelockError> {
        Ok(storage::config(&env)?.signatories)
    }

    pub fn threshold(env: Env) -> Result<u32, TimelockError> {
        Ok(storage::config(&env)?.threshold)
    }

    pub fn token(env: Env) -> Result<Address, TimelockError> {
        Ok(storage::config(&env)?.token)
    }

    pub fn min_delay(env: Env) -> Result<u64, TimelockError> {
        Ok(storage::config(&env)?.min_delay)
    }

    // Creation

    /// Queues a transfer that may not execute before `release_time`.
    pub fn queue_transaction(
        env: Env,
        creator: Address,
        beneficiary: Address,
        amount: i128,
        release_time: u64,
    ) -> Result<u64, TimelockError> {
        creator.require_auth();
        let config = storage::config(&env)?;

        Self::validate_terms(&env, &beneficiary, amount)?;
        Self::validate_schedule(&env, &config, release_time)?;

        Ok(Self::create(
            &env,
            creator,
            beneficiary,
            amount,
            TransactionKind::Scheduled,
            release_time,
        ))
    }

    /// Queues a transfer whose release gate is open from creation onwards.
    /// Quorum is still required before it can execute.
    pub fn queue_instant_transfer(
        env: Env,
        creator: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<u64, TimelockError> {
        creator.require_auth();
        storage::config(&env)?;

        Self::validate_terms(&env, &beneficiary, amount)?;

        let now = env.ledger().timestamp();
        Ok(Self::create(
            &env,
            creator,
            beneficiary,
            amount,
            TransactionKind::Instant,
            now,
        ))
    }

    // Transitions

    pub fn approve_transaction(env: Env, id: u64, signer: Address) -> Result<(), TimelockError> {
        signer.require_auth();
        Self::require_signatory(&env, &signer)?;

        let transaction = storage::transaction(&env, id)?;
        Self::require_pending(&transaction)?;

        let mut approvals = storage::approvals(&env, id);
        if approvals.contains_key(signer.clone()) {
            return Err(TimelockError::AlreadyApproved);
        }

        approvals.set(signer.clone(), env.ledger().timestamp());
        storage::set_approvals(&env, id, &approvals);

        TransactionApproved {
            id,
            signer,
            approval_count: approvals.len(),
        }
        .publish(&env);

        Ok(())
    }

    /// Rewrites the terms of a pending transaction. Every approval collected
    /// so far is discarded: signatories approved the old terms, not these.
    pub fn modify_transaction(
        env: Env,
        id: u64,
        caller: Address,
        beneficiary: Address,
        amount: i128,
        release_time: u64,
    ) -> Result<(), TimelockError> {
        caller.require_auth();
        let config = storage::config(&env)?;
        Self::require_signatory(&env, &caller)?;

        let mut transaction = storage::transaction(&env, id)?;
        Self::require_pending(&transaction)?;

        Self::validate_terms(&env, &beneficiary, amount)?;
        // An instant transfer keeps its original release time so its gate
        // stays open; the requested time only applies to scheduled ones.
        if transaction.kind == TransactionKind::Scheduled {
            Self::validate_schedule(&env, &config, release_time)?;
            transaction.release_time = release_time;
        }

        if transaction.beneficiary != beneficiary {
            storage::index_beneficiary(&env, &beneficiary, id);
        }

        transaction.beneficiary = beneficiary.clone();
        transaction.amount = amount;
        transaction.modified = true;

        storage::set_transaction(&env, &transaction);
        storage::clear_approvals(&env, id);

        TransactionModified {
            id,
            beneficiary,
            amount,
            release_time: transaction.release_time,
        }
        .publish(&env);

        Ok(())
    }

    pub fn cancel_transaction(env: Env, id: u64, caller: Address) -> Result<(), TimelockError> {
        caller.require_auth();
        Self::require_signatory(&env, &caller)?;

        let mut transaction = storage::transaction(&env, id)?;
        Self::require_pending(&transaction)?;

        transaction.status = TransactionStatus::Cancelled;
        storage::set_transaction(&env, &transaction);

        TransactionCancelled {
            id,
            cancelled_by: caller,
        }
        .publish(&env);

        Ok(())
    }

    /// Releases the funds of a pending transaction once quorum is reached and
    /// the release time has passed. The executor supplies the value, which
    /// must equal the transaction amount exactly.
    pub fn execute_transaction(
        env: Env,
        id: u64,
        executor: Address,
        supplied_amount: i128,
    ) -> Result<(), TimelockError> {
        executor.require_auth();
        let config = storage::config(&env)?;

        let mut transaction = storage::transaction(&env, id)?;
        Self::require_pending(&transaction)?;

        let approvals = storage::approvals(&env, id);
        if approvals.len() < config.threshold {
            return Err(TimelockError::InsufficientApprovals);
        }

        if !Self::release_gate_open(&env, &transaction) {
            return Err(TimelockError::ReleaseTimeNotReached);
        }

        if supplied_amount != transaction.amount {
            return Err(TimelockError::AmountMismatch);
        }

        custodian::release(
            &env,
            &config.token,
            &executor,
            &transaction.beneficiary,
            transaction.amount,
        )?;

        transaction.status = TransactionStatus::Executed;
        transaction.executed_at = Some(env.ledger().timestamp());
        storage::set_transaction(&env, &transaction);
        storage::add_released(&env, transaction.amount);

        log!(&env, "transaction executed", id, transaction.amount);
        TransactionExecuted {
            id,
            beneficiary: transaction.beneficiary,
            amount: transaction.amount,
            executor,
        }
        .publish(&env);

        Ok(())
    }

    // Queries

    pub fn view_transaction(env: Env, id: u64) -> Result<TransactionView, TimelockError> {
        let transaction = storage::transaction(&env, id)?;
        let approval_count = storage::approvals(&env, id).len();

        Ok(TransactionView {
            kind: transaction.kind,
            beneficiary: transaction.beneficiary,
            amount: transaction.amount,
            release_time: transaction.release_time,
            status: transaction.status,
            approval_count,
            modified: transaction.modified,
        })
    }

    pub fn get_transaction(env: Env, id: u64) -> Result<Transaction, TimelockError> {
        storage::transaction(&env, id)
    }

    pub fn get_transaction_approvals(
        env: Env,
        id: u64,
    ) -> Result<Vec<TransactionApproval>, TimelockError> {
        storage::transaction(&env, id)?;

        let mut approvals = Vec::new(&env);
        for (signer, approved_at) in storage::approvals(&env, id).iter() {
            approvals.push_back(TransactionApproval {
                signer,
                approved_at,
            });
        }
        Ok(approvals)
    }

    pub fn has_approved(env: Env, id: u64, signer: Address) -> Result<bool, TimelockError> {
        storage::transaction(&env, id)?;
        Ok(storage::approvals(&env, id).contains_key(signer))
    }

    pub fn transaction_count(env: Env) -> u64 {
        storage::transaction_count(&env)
    }

    pub fn total_released(env: Env) -> i128 {
        storage::total_released(&env)
    }

    /// Number of index positions recorded for `beneficiary`. Paging through
    /// `get_charity_transactions` covers `0..charity_index_size`.
    pub fn charity_index_size(env: Env, beneficiary: Address) -> u32 {
        storage::beneficiary_index_len(&env, &beneficiary)
    }

    /// Transactions currently addressed to `beneficiary`, in the order they
    /// were first addressed to it. Reads index positions `start..start + limit`
    /// with `limit` capped at `MAX_CHARITY_PAGE`; positions whose transaction
    /// has since been redirected elsewhere are skipped, so a page may hold
    /// fewer rows than positions read.
    pub fn get_charity_transactions(
        env: Env,
        beneficiary: Address,
        start: u32,
        limit: u32,
    ) -> Vec<CharityTransaction> {
        let len = storage::beneficiary_index_len(&env, &beneficiary);
        let end = start
            .saturating_add(limit.min(MAX_CHARITY_PAGE))
            .min(len);

        let mut rows = Vec::new(&env);
        for position in start..end {
            let Some(id) = storage::beneficiary_index_at(&env, &beneficiary, position) else {
                continue;
            };
            let Ok(transaction) = storage::transaction(&env, id) else {
                continue;
            };
            if transaction.beneficiary != beneficiary {
                continue;
            }
            rows.push_back(CharityTransaction {
                id,
                amount: transaction.amount,
                creator: transaction.creator,
                release_time: transaction.release_time,
                executed: transaction.status == TransactionStatus::Executed,
            });
        }
        rows
    }

    // Guards

    fn require_signatory(env: &Env, identity: &Address) -> Result<(), TimelockError> {
        if !storage::is_signatory(env, identity) {
            return Err(TimelockError::NotASignatory);
        }
        Ok(())
    }

    fn require_pending(transaction: &Transaction) -> Result<(), TimelockError> {
        match transaction.status {
            TransactionStatus::Pending => Ok(()),
            TransactionStatus::Executed => Err(TimelockError::TransactionAlreadyExecuted),
            TransactionStatus::Cancelled => Err(TimelockError::TransactionCancelled),
        }
    }

    fn validate_terms(env: &Env, beneficiary: &Address, amount: i128) -> Result<(), TimelockError> {
        if amount <= 0 {
            return Err(TimelockError::InvalidAmount);
        }

        if *beneficiary == env.current_contract_address() {
            return Err(TimelockError::InvalidBeneficiary);
        }

        Ok(())
    }

    fn validate_schedule(
        env: &Env,
        config: &TimelockConfig,
        release_time: u64,
    ) -> Result<(), TimelockError> {
        let now = env.ledger().timestamp();
        if release_time <= now {
            return Err(TimelockError::ReleaseTimeNotInFuture);
        }

        if release_time - now < config.min_delay {
            return Err(TimelockError::ReleaseDelayTooShort);
        }

        Ok(())
    }

    /// Time and quorum are independent gates; approvals never open this one.
    fn release_gate_open(env: &Env, transaction: &Transaction) -> bool {
        env.ledger().timestamp() >= transaction.release_time
    }

    fn create(
        env: &Env,
        creator: Address,
        beneficiary: Address,
        amount: i128,
        kind: TransactionKind,
        release_time: u64,
    ) -> u64 {
        let id = storage::next_transaction_id(env);

        let transaction = Transaction {
            id,
            creator: creator.clone(),
            beneficiary: beneficiary.clone(),
            amount,
            kind,
            release_time,
            created_at: env.ledger().timestamp(),
            status: TransactionStatus::Pending,
            modified: false,
            executed_at: None,
        };

        storage::set_transaction(env, &transaction);
        storage::clear_approvals(env, id);
        storage::index_beneficiary(env, &beneficiary, id);

        TransactionCreated {
            id,
            creator,
            beneficiary,
            amount,
            kind,
            release_time,
        }
        .publish(env);

        id
    }
}
