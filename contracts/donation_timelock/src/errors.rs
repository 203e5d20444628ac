use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TimelockError {
    /// The instance holds no genesis config, e.g. the config entry is missing
    /// or was removed from storage.
    NotInitialized = 1,
    EmptySignatoryList = 2,
    InvalidThreshold = 3,
    ThresholdExceedsSignatories = 4,
    DuplicateSignatory = 5,

    InvalidAmount = 10,
    InvalidBeneficiary = 11,
    ReleaseTimeNotInFuture = 12,
    ReleaseDelayTooShort = 13,

    NotASignatory = 20,

    TransactionAlreadyExecuted = 30,
    TransactionCancelled = 31,
    AlreadyApproved = 32,
    InsufficientApprovals = 33,
    ReleaseTimeNotReached = 34,

    AmountMismatch = 40,
    TransferFailed = 41,

    TransactionNotFound = 50,
}

/// Coarse grouping of [`TimelockError`] codes, one per failure class a
/// caller may want to react to differently.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Authorization,
    State,
    Funds,
    NotFound,
}

impl TimelockError {
    pub fn category(&self) -> ErrorCategory {
        match *self as u32 {
            0..=9 => ErrorCategory::Configuration,
            10..=19 => ErrorCategory::Validation,
            20..=29 => ErrorCategory::Authorization,
            30..=39 => ErrorCategory::State,
            40..=49 => ErrorCategory::Funds,
            _ => ErrorCategory::NotFound,
        }
    }
}
