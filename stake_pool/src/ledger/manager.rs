//! In-memory ledger implementation with custody and an entry journal.

use super::{
    custody::Custody,
    errors::{TransferError, TransferResult},
    models::{EntryDirection, EntryType, LedgerEntry},
};
use crate::pool::{AccountId, Amount};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// In-memory ledger
///
/// Holds external account balances alongside the pool's custody. Every
/// balance change is journaled as a [`LedgerEntry`].
///
/// The journal is never pruned. This backend is meant for tests and for
/// embedding in short-lived hosts, not for long-running services.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    accounts: HashMap<AccountId, Amount>,
    frozen: HashSet<AccountId>,
    custody: Amount,
    entries: Vec<LedgerEntry>,
}

impl InMemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an external account from outside the pool
    ///
    /// # Arguments
    ///
    /// * `account` - Account to credit
    /// * `amount` - Amount to add
    ///
    /// # Returns
    ///
    /// * `TransferResult<Amount>` - New account balance or error
    pub fn fund(&mut self, account: &AccountId, amount: Amount) -> TransferResult<Amount> {
        let new_balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;

        self.accounts.insert(account.clone(), new_balance);
        self.record(
            account,
            amount,
            new_balance,
            EntryDirection::Credit,
            EntryType::Funding,
        );

        Ok(new_balance)
    }

    /// External balance of an account (zero if never seen)
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    /// Freeze an account so it can neither pay nor receive
    pub fn freeze(&mut self, account: &AccountId) {
        log::warn!("Freezing account {account}");
        self.frozen.insert(account.clone());
    }

    /// Lift a freeze
    pub fn unfreeze(&mut self, account: &AccountId) {
        self.frozen.remove(account);
    }

    pub fn is_frozen(&self, account: &AccountId) -> bool {
        self.frozen.contains(account)
    }

    /// Full journal in application order
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Journal entries touching one account
    pub fn entries_for<'a>(
        &'a self,
        account: &'a AccountId,
    ) -> impl Iterator<Item = &'a LedgerEntry> + 'a {
        self.entries.iter().filter(move |e| &e.account == account)
    }

    fn record(
        &mut self,
        account: &AccountId,
        amount: Amount,
        balance_after: Amount,
        direction: EntryDirection,
        entry_type: EntryType,
    ) {
        self.entries.push(LedgerEntry {
            id: Uuid::new_v4(),
            account: account.clone(),
            amount,
            balance_after,
            direction,
            entry_type,
            recorded_at: Utc::now(),
        });
    }
}

impl Custody for InMemoryLedger {
    /// Transfer value from an account into custody
    ///
    /// # Errors
    ///
    /// * `TransferError::AccountFrozen` - Source is frozen
    /// * `TransferError::InsufficientFunds` - Source balance too low
    /// * `TransferError::BalanceOverflow` - Custody would overflow
    fn deposit(&mut self, from: &AccountId, amount: Amount) -> TransferResult<()> {
        if self.is_frozen(from) {
            return Err(TransferError::AccountFrozen(from.clone()));
        }

        let available = self.balance_of(from);
        let new_balance =
            available
                .checked_sub(amount)
                .ok_or_else(|| TransferError::InsufficientFunds {
                    account: from.clone(),
                    available,
                    required: amount,
                })?;
        let new_custody = self
            .custody
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;

        // All checks passed, apply both sides
        self.accounts.insert(from.clone(), new_balance);
        self.custody = new_custody;
        self.record(
            from,
            amount,
            new_balance,
            EntryDirection::Debit,
            EntryType::Stake,
        );

        Ok(())
    }

    /// Transfer value out of custody to an account
    ///
    /// # Errors
    ///
    /// * `TransferError::AccountFrozen` - Destination is frozen
    /// * `TransferError::InsufficientCustody` - Custody too low
    /// * `TransferError::BalanceOverflow` - Destination would overflow
    fn withdraw(&mut self, to: &AccountId, amount: Amount) -> TransferResult<()> {
        if self.is_frozen(to) {
            return Err(TransferError::AccountFrozen(to.clone()));
        }

        let new_custody =
            self.custody
                .checked_sub(amount)
                .ok_or(TransferError::InsufficientCustody {
                    available: self.custody,
                    required: amount,
                })?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;

        self.custody = new_custody;
        self.accounts.insert(to.clone(), new_balance);
        self.record(
            to,
            amount,
            new_balance,
            EntryDirection::Credit,
            EntryType::Payout,
        );

        Ok(())
    }

    fn custody_balance(&self) -> Amount {
        self.custody
    }
}
