//! Pool entities: accounts, amounts, round outcomes, events and views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Value in indivisible base units.
pub type Amount = u128;

/// Sequential round number, starting at 1.
pub type RoundId = u64;

/// Opaque account identifier resolved by the host for every call.
///
/// The pool never creates these itself; whatever hosts the pool is
/// responsible for mapping the caller of an operation to an id that
/// other accounts cannot forge.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl AccountId {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Record of a resolved round.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub round: RoundId,
    pub winner: AccountId,
    /// Entire pooled balance paid to the winner.
    pub amount: Amount,
    /// Slot of the winner in the round's participant sequence.
    pub winning_index: usize,
    pub participants: Vec<AccountId>,
    pub resolved_at: DateTime<Utc>,
}

/// Events queued by the pool as calls are accepted.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum PoolEvent {
    Entered {
        round: RoundId,
        account: AccountId,
        stake: Amount,
    },
    WinnerPaid {
        round: RoundId,
        winner: AccountId,
        amount: Amount,
    },
}

impl fmt::Display for PoolEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Entered {
                round,
                account,
                stake,
            } => format!("{account} entered round {round} with {stake}"),
            Self::WinnerPaid {
                round,
                winner,
                amount,
            } => format!("{winner} won round {round} and was paid {amount}"),
        };
        write!(f, "{repr}")
    }
}

/// Read-only snapshot of the pool.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct PoolView {
    pub round: RoundId,
    pub coordinator: AccountId,
    pub minimum_stake: Amount,
    pub balance: Amount,
    pub players: Vec<AccountId>,
    pub last_outcome: Option<RoundOutcome>,
}
