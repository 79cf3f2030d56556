//! Stake pool core: entry admission, coordinator-triggered winner
//! selection, payout and round reset.
//!
//! Invariants held by [`PoolState`] across every call:
//! - the pooled balance is the sum of stakes accepted since the last payout
//! - each accepted entry appends exactly one participant slot
//! - only the coordinator can resolve a round
//! - a resolved round pays its whole balance to one listed participant and
//!   leaves the pool empty; a failed resolution changes nothing

pub mod entities;
pub mod errors;
pub mod state;

pub use entities::{AccountId, Amount, PoolEvent, PoolView, RoundId, RoundOutcome};
pub use errors::{PoolError, PoolResult};
pub use state::PoolState;
