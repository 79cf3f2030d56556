//! Pool actor message types.

use crate::pool::{AccountId, Amount, PoolEvent, PoolResult, PoolView, RoundOutcome};
use tokio::sync::oneshot;

/// Messages that can be sent to a PoolActor
#[derive(Debug)]
pub enum PoolMessage {
    /// Enter the current round
    Enter {
        caller: AccountId,
        stake: Amount,
        response: oneshot::Sender<PoolResult<()>>,
    },

    /// Resolve the round (coordinator only)
    PickWinner {
        caller: AccountId,
        response: oneshot::Sender<PoolResult<RoundOutcome>>,
    },

    /// Current participants
    GetPlayers {
        response: oneshot::Sender<Vec<AccountId>>,
    },

    /// Full snapshot
    GetView {
        response: oneshot::Sender<PoolView>,
    },

    /// Take queued pool events
    DrainEvents {
        response: oneshot::Sender<Vec<PoolEvent>>,
    },

    /// Stop the actor after replying
    Close { response: oneshot::Sender<()> },
}
