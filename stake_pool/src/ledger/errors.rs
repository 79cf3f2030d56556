//! Ledger error types.

use crate::pool::{AccountId, Amount};
use thiserror::Error;

/// Value transfer errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TransferError {
    /// Source account cannot cover the amount
    #[error("Insufficient funds in {account}: available {available}, required {required}")]
    InsufficientFunds {
        account: AccountId,
        available: Amount,
        required: Amount,
    },

    /// Pool custody cannot cover the amount
    #[error("Insufficient custody: available {available}, required {required}")]
    InsufficientCustody { available: Amount, required: Amount },

    /// Account is frozen and can neither send nor receive
    #[error("Account {0} is frozen")]
    AccountFrozen(AccountId),

    /// Crediting would overflow the destination balance
    #[error("Balance overflow")]
    BalanceOverflow,
}

impl TransferError {
    /// Get a client-safe error message that doesn't echo account ids
    pub fn client_message(&self) -> String {
        match self {
            TransferError::InsufficientFunds { .. } => "Insufficient funds".to_string(),
            TransferError::AccountFrozen(_) => "Account is frozen".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for ledger operations
pub type TransferResult<T> = Result<T, TransferError>;
