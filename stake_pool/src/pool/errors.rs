//! Pool error types.

use super::entities::{AccountId, Amount};
use crate::ledger::TransferError;
use thiserror::Error;

/// Errors returned by pool operations
///
/// Every variant is a rejection: the pool state is exactly as it was
/// before the call.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PoolError {
    /// Stake below the pool's floor
    #[error("Insufficient stake: got {stake}, minimum {minimum}")]
    InsufficientStake { stake: Amount, minimum: Amount },

    /// Privileged call from someone other than the coordinator
    #[error("Unauthorized: {caller} is not the coordinator")]
    Unauthorized { caller: AccountId },

    /// Value could not be moved into or out of custody
    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// Winner selection requested with no participants
    #[error("No participants in the current round")]
    EmptyRound,

    /// Accepting the stake would overflow the pooled balance
    #[error("Pool balance overflow")]
    BalanceOverflow,

    /// The pool actor has stopped
    #[error("Pool is closed")]
    PoolClosed,
}

impl PoolError {
    /// Get a client-safe error message that doesn't echo account ids
    pub fn client_message(&self) -> String {
        match self {
            PoolError::Unauthorized { .. } => "Only the coordinator can do that".to_string(),
            PoolError::TransferFailed(e) => format!("Transfer failed: {}", e.client_message()),
            _ => self.to_string(),
        }
    }

    /// Whether retrying the same call may succeed later
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PoolError::InsufficientStake { .. }
                | PoolError::TransferFailed(_)
                | PoolError::EmptyRound
        )
    }
}

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;
