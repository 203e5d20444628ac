#![no_std]

mod custodian;
mod errors;
mod events;
mod storage;
mod timelock;
mod types;


pub use crate::errors::{ErrorCategory, TimelockError};
pub use crate::events::{
    TimelockInitialized, TransactionApproved, TransactionCancelled, TransactionCreated,
    TransactionExecuted, TransactionModified,
};
pub use crate::timelock::{DonationTimelock, DonationTimelockClient};
pub use crate::types::{
    CharityTransaction, TimelockConfig, Transaction, TransactionApproval, TransactionKind,
    TransactionStatus, TransactionView,
};
