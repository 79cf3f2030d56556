//! The value-transfer capability the pool is built on.

use super::errors::TransferResult;
use crate::pool::{AccountId, Amount};

/// Moves value between external accounts and the pool's custody.
///
/// Both moves must be all-or-nothing: on `Err` no balance anywhere has
/// changed. The pool relies on this to roll back a failed payout.
pub trait Custody {
    /// Debit `from` and credit pool custody.
    fn deposit(&mut self, from: &AccountId, amount: Amount) -> TransferResult<()>;

    /// Debit pool custody and credit `to`.
    fn withdraw(&mut self, to: &AccountId, amount: Amount) -> TransferResult<()>;

    /// Value currently held in custody.
    fn custody_balance(&self) -> Amount;
}
