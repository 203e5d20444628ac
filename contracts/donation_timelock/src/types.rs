use soroban_sdk::{contracttype, Address, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Signatory(Address),
    TransactionCount,
    TotalReleased,
    Transaction(u64),
    Approvals(u64),
    BeneficiaryIndexLen(Address),
    BeneficiaryIndexEntry(Address, u32),
    BeneficiaryIndexed(Address, u64),
}

/// Genesis configuration. Written once by the constructor, never updated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimelockConfig {
    pub signatories: Vec<Address>,
    pub threshold: u32,
    pub token: Address,
    /// Minimum distance between "now" and the release time of a scheduled
    /// transaction, in seconds.
    pub min_delay: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TransactionKind {
    Scheduled = 0,
    Instant = 1,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TransactionStatus {
    Pending = 0,
    Executed = 1,
    Cancelled = 2,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub creator: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub kind: TransactionKind,
    pub release_time: u64,
    pub created_at: u64,
    pub status: TransactionStatus,
    pub modified: bool,
    pub executed_at: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionApproval {
    pub signer: Address,
    pub approved_at: u64,
}

/// Read-only projection returned by `view_transaction`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionView {
    pub kind: TransactionKind,
    pub beneficiary: Address,
    pub amount: i128,
    pub release_time: u64,
    pub status: TransactionStatus,
    pub approval_count: u32,
    pub modified: bool,
}

/// One row of the per-beneficiary listing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharityTransaction {
    pub id: u64,
    pub amount: i128,
    pub creator: Address,
    pub release_time: u64,
    pub executed: bool,
}
