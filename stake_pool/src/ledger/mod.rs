//! Ledger module providing the value-transfer primitive behind the pool.
//!
//! This module implements:
//! - The [`Custody`] trait: all-or-nothing moves between accounts and pool custody
//! - An in-memory double-entry ledger with a journal of every balance change
//! - Frozen accounts, which refuse both debits and credits
//!
//! ## Example
//!
//! ```
//! use stake_pool::ledger::{Custody, InMemoryLedger};
//! use stake_pool::AccountId;
//!
//! let mut ledger = InMemoryLedger::new();
//! let alice = AccountId::new("alice");
//! ledger.fund(&alice, 1_000).unwrap();
//!
//! ledger.deposit(&alice, 400).unwrap();
//! assert_eq!(ledger.balance_of(&alice), 600);
//! assert_eq!(ledger.custody_balance(), 400);
//! ```

pub mod custody;
pub mod errors;
pub mod manager;
pub mod models;

pub use custody::Custody;
pub use errors::{TransferError, TransferResult};
pub use manager::InMemoryLedger;
pub use models::{EntryDirection, EntryType, LedgerEntry};
