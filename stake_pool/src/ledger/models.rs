//! Ledger data models.

use crate::pool::{AccountId, Amount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Journal entry (double-entry ledger)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub account: AccountId,
    pub amount: Amount,
    /// External balance of `account` after the entry was applied
    pub balance_after: Amount,
    pub direction: EntryDirection,
    pub entry_type: EntryType,
    pub recorded_at: DateTime<Utc>,
}

/// Entry direction, seen from the account's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Debit,
    Credit,
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryDirection::Debit => write!(f, "debit"),
            EntryDirection::Credit => write!(f, "credit"),
        }
    }
}

/// Entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// External funding of an account
    Funding,
    /// Account to custody
    Stake,
    /// Custody to account
    Payout,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::Funding => write!(f, "funding"),
            EntryType::Stake => write!(f, "stake"),
            EntryType::Payout => write!(f, "payout"),
        }
    }
}
