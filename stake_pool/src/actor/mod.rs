//! Actor wrapper serializing access to a pool shared between tasks.
//!
//! The [`PoolActor`] runs in its own Tokio task with an mpsc inbox and owns
//! the [`crate::PoolState`]. Cloneable [`PoolHandle`]s send requests and
//! await the reply on a oneshot channel.
//!
//! ## Example
//!
//! ```
//! use stake_pool::actor::PoolActor;
//! use stake_pool::entropy::OsEntropy;
//! use stake_pool::ledger::InMemoryLedger;
//! use stake_pool::{AccountId, PoolState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let alice = AccountId::new("alice");
//!     let mut ledger = InMemoryLedger::new();
//!     ledger.fund(&alice, 100).unwrap();
//!
//!     let pool = PoolState::new(AccountId::new("manager"), 10, ledger, OsEntropy::new());
//!     let (actor, handle) = PoolActor::new(pool, 16);
//!     let task = tokio::spawn(actor.run());
//!
//!     handle.enter(alice.clone(), 20).await.unwrap();
//!     let outcome = handle.pick_winner(AccountId::new("manager")).await.unwrap();
//!     assert_eq!(outcome.winner, alice);
//!
//!     handle.close().await.unwrap();
//!     let pool = task.await.unwrap();
//!     assert_eq!(pool.custody().balance_of(&alice), 100);
//! }
//! ```

#[allow(clippy::module_inception)]
pub mod actor;
pub mod messages;

pub use actor::{PoolActor, PoolHandle};
pub use messages::PoolMessage;
