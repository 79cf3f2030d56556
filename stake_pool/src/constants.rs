//! Unit and default constants.

use crate::pool::Amount;

/// Base units in one whole coin (18 decimals).
pub const WEI_PER_ETHER: Amount = 1_000_000_000_000_000_000;

/// Default entry floor: 0.01 of a whole coin.
pub const DEFAULT_MINIMUM_STAKE: Amount = WEI_PER_ETHER / 100;

/// Default coordinator account used by [`crate::PoolConfig::default`].
pub const DEFAULT_COORDINATOR: &str = "coordinator";

/// Number of resolved rounds kept in memory.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Undrained pool events kept before the oldest are dropped.
pub const DEFAULT_EVENT_LIMIT: usize = 256;

/// Pool actor inbox size.
pub const DEFAULT_INBOX_CAPACITY: usize = 100;
