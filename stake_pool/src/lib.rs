//! # Stake Pool
//!
//! A winner-takes-all participation pool. Accounts enter a round by staking
//! at least a fixed minimum; a single coordinator account triggers the draw,
//! the whole pooled balance goes to one participant, and the next round
//! starts empty.
//!
//! The pool owns no ambient state. Everything it depends on is injected:
//! - a [`ledger::Custody`] backend that moves value in and out of the pool
//! - an [`entropy::EntropySource`] that seeds each winner draw
//! - the caller's [`AccountId`], resolved by the host on every call
//!
//! ## Core Modules
//!
//! - [`pool`]: State machine, entities and errors
//! - [`ledger`]: Value-transfer trait and an in-memory ledger
//! - [`entropy`]: Seed sources and index selection
//! - [`config`]: Defaults, validation and environment loading
//! - [`actor`]: Tokio actor for pools shared across tasks
//!
//! ## Example
//!
//! ```
//! use stake_pool::entropy::FixedEntropy;
//! use stake_pool::ledger::InMemoryLedger;
//! use stake_pool::{AccountId, PoolError, PoolState};
//!
//! let manager = AccountId::new("manager");
//! let alice = AccountId::new("alice");
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.fund(&alice, 1_000).unwrap();
//!
//! let mut pool = PoolState::new(manager.clone(), 10, ledger, FixedEntropy([0; 32]));
//! pool.enter(&alice, 200).unwrap();
//! assert_eq!(pool.get_players(), &[alice.clone()]);
//!
//! assert!(matches!(pool.pick_winner(&alice), Err(PoolError::Unauthorized { .. })));
//!
//! let outcome = pool.pick_winner(&manager).unwrap();
//! assert_eq!(outcome.winner, alice);
//! assert_eq!(outcome.amount, 200);
//! assert_eq!(pool.balance(), 0);
//! assert!(pool.get_players().is_empty());
//! ```

/// Tokio actor serializing calls to a shared pool.
pub mod actor;

/// Pool configuration.
pub mod config;

pub mod constants;

/// Winner draw entropy.
pub mod entropy;

/// Value transfer between accounts and pool custody.
pub mod ledger;

/// Core pool state machine.
pub mod pool;

pub use config::{ConfigError, ConfigResult, PoolConfig};
pub use constants::{DEFAULT_MINIMUM_STAKE, WEI_PER_ETHER};
pub use pool::{
    AccountId, Amount, PoolError, PoolEvent, PoolResult, PoolState, PoolView, RoundId,
    RoundOutcome,
};
