//! Pool actor implementation with async message handling.

use super::messages::PoolMessage;
use crate::{
    entropy::EntropySource,
    ledger::Custody,
    pool::{AccountId, Amount, PoolError, PoolEvent, PoolResult, PoolState, PoolView, RoundOutcome},
};
use tokio::sync::{mpsc, oneshot};

/// Pool actor handle for sending messages
#[derive(Clone, Debug)]
pub struct PoolHandle {
    sender: mpsc::Sender<PoolMessage>,
}

impl PoolHandle {
    /// Create a new pool handle
    pub fn new(sender: mpsc::Sender<PoolMessage>) -> Self {
        Self { sender }
    }

    /// Send a raw message to the pool
    pub async fn send(&self, message: PoolMessage) -> PoolResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| PoolError::PoolClosed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> PoolMessage,
    ) -> PoolResult<T> {
        let (response, reply) = oneshot::channel();
        self.send(build(response)).await?;
        reply.await.map_err(|_| PoolError::PoolClosed)
    }

    pub async fn enter(&self, caller: AccountId, stake: Amount) -> PoolResult<()> {
        self.request(|response| PoolMessage::Enter {
            caller,
            stake,
            response,
        })
        .await?
    }

    pub async fn pick_winner(&self, caller: AccountId) -> PoolResult<RoundOutcome> {
        self.request(|response| PoolMessage::PickWinner { caller, response })
            .await?
    }

    pub async fn get_players(&self) -> PoolResult<Vec<AccountId>> {
        self.request(|response| PoolMessage::GetPlayers { response })
            .await
    }

    pub async fn view(&self) -> PoolResult<PoolView> {
        self.request(|response| PoolMessage::GetView { response })
            .await
    }

    pub async fn drain_events(&self) -> PoolResult<Vec<PoolEvent>> {
        self.request(|response| PoolMessage::DrainEvents { response })
            .await
    }

    /// Ask the actor to stop; queued messages behind this one are dropped
    pub async fn close(&self) -> PoolResult<()> {
        self.request(|response| PoolMessage::Close { response })
            .await
    }
}

/// Pool actor owning a single pool
///
/// Messages are handled one at a time, so every call observes the complete
/// effect of the previous one.
pub struct PoolActor<C, E> {
    state: PoolState<C, E>,
    inbox: mpsc::Receiver<PoolMessage>,
    is_closed: bool,
}

impl<C, E> PoolActor<C, E>
where
    C: Custody + Send + 'static,
    E: EntropySource + Send + 'static,
{
    /// Create a new pool actor
    ///
    /// # Arguments
    ///
    /// * `state` - Pool to own
    /// * `capacity` - Inbox size (at least 1)
    ///
    /// # Returns
    ///
    /// * `(PoolActor, PoolHandle)` - Actor and handle for sending messages
    pub fn new(state: PoolState<C, E>, capacity: usize) -> (Self, PoolHandle) {
        let (sender, inbox) = mpsc::channel(capacity.max(1));

        let actor = Self {
            state,
            inbox,
            is_closed: false,
        };

        (actor, PoolHandle::new(sender))
    }

    /// Run the actor until closed or every handle is dropped
    ///
    /// Returns the pool so its final state can be inspected.
    pub async fn run(mut self) -> PoolState<C, E> {
        log::info!("Pool actor starting at round {}", self.state.round());

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!("Pool actor stopped at round {}", self.state.round());
        self.state
    }

    fn handle_message(&mut self, message: PoolMessage) {
        match message {
            PoolMessage::Enter {
                caller,
                stake,
                response,
            } => {
                let result = self.state.enter(&caller, stake);
                let _ = response.send(result);
            }

            PoolMessage::PickWinner { caller, response } => {
                let result = self.state.pick_winner(&caller);
                let _ = response.send(result);
            }

            PoolMessage::GetPlayers { response } => {
                let _ = response.send(self.state.get_players().to_vec());
            }

            PoolMessage::GetView { response } => {
                let _ = response.send(self.state.view());
            }

            PoolMessage::DrainEvents { response } => {
                let events = self.state.drain_events().into_iter().collect();
                let _ = response.send(events);
            }

            PoolMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }
}
