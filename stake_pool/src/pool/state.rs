//! Pool state machine implementation.

use super::{
    entities::{AccountId, Amount, PoolEvent, PoolView, RoundId, RoundOutcome},
    errors::{PoolError, PoolResult},
};
use crate::{
    config::{ConfigResult, PoolConfig},
    constants::{DEFAULT_EVENT_LIMIT, DEFAULT_HISTORY_LIMIT},
    entropy::{DrawContext, EntropySource, select_index},
    ledger::Custody,
};
use chrono::Utc;
use std::collections::VecDeque;

/// A winner-takes-all stake pool.
///
/// The pool is always open for entries. A successful [`PoolState::pick_winner`]
/// pays the whole balance to one participant and starts the next round in
/// the same call; a failed one leaves every field untouched.
///
/// Mutating calls take `&mut self`, so a single owner serializes them. Hosts
/// that share a pool between tasks should go through
/// [`crate::actor::PoolActor`].
#[derive(Debug)]
pub struct PoolState<C, E> {
    coordinator: AccountId,
    minimum_stake: Amount,
    /// Current round's entries in call order, one slot per accepted entry.
    players: Vec<AccountId>,
    /// Sum of every stake accepted since the last payout.
    balance: Amount,
    round: RoundId,
    history: VecDeque<RoundOutcome>,
    history_limit: usize,
    /// Undrained events, oldest dropped first once `event_limit` is reached.
    events: VecDeque<PoolEvent>,
    event_limit: usize,
    custody: C,
    entropy: E,
}

impl<C: Custody, E: EntropySource> PoolState<C, E> {
    /// Create a pool with a fixed coordinator and minimum stake
    ///
    /// # Arguments
    ///
    /// * `coordinator` - The only account allowed to pick a winner
    /// * `minimum_stake` - Smallest accepted stake
    /// * `custody` - Value-transfer capability holding pooled funds
    /// * `entropy` - Seed source for winner draws
    pub fn new(coordinator: AccountId, minimum_stake: Amount, custody: C, entropy: E) -> Self {
        log::info!(
            "Pool created: coordinator {}, minimum stake {}",
            coordinator,
            minimum_stake
        );

        Self {
            coordinator,
            minimum_stake,
            players: Vec::new(),
            balance: 0,
            round: 1,
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            events: VecDeque::new(),
            event_limit: DEFAULT_EVENT_LIMIT,
            custody,
            entropy,
        }
    }

    /// Create a pool from a validated configuration
    pub fn from_config(config: &PoolConfig, custody: C, entropy: E) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self::new(
            AccountId::new(&config.coordinator),
            config.minimum_stake,
            custody,
            entropy,
        )
        .with_history_limit(config.history_limit)
        .with_event_limit(config.event_limit))
    }

    /// Set how many resolved rounds are kept
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Set how many undrained events are kept
    pub fn with_event_limit(mut self, event_limit: usize) -> Self {
        self.event_limit = event_limit;
        self
    }

    /// Enter the current round
    ///
    /// # Arguments
    ///
    /// * `caller` - Account entering, as resolved by the host
    /// * `stake` - Value attached to the entry
    ///
    /// # Errors
    ///
    /// * `PoolError::InsufficientStake` - `stake` is below the minimum
    /// * `PoolError::BalanceOverflow` - Pooled balance would overflow
    /// * `PoolError::TransferFailed` - Stake could not be moved into custody
    pub fn enter(&mut self, caller: &AccountId, stake: Amount) -> PoolResult<()> {
        if stake < self.minimum_stake {
            log::debug!(
                "Round {}: rejected entry from {} ({} < {})",
                self.round,
                caller,
                stake,
                self.minimum_stake
            );
            return Err(PoolError::InsufficientStake {
                stake,
                minimum: self.minimum_stake,
            });
        }

        let new_balance = self
            .balance
            .checked_add(stake)
            .ok_or(PoolError::BalanceOverflow)?;

        // Custody moves are all-or-nothing, nothing to undo on failure
        self.custody.deposit(caller, stake)?;

        self.players.push(caller.clone());
        self.balance = new_balance;
        self.push_event(PoolEvent::Entered {
            round: self.round,
            account: caller.clone(),
            stake,
        });

        log::info!(
            "Round {}: {} entered with {} (pool {}, {} entries)",
            self.round,
            caller,
            stake,
            self.balance,
            self.players.len()
        );

        Ok(())
    }

    /// Draw a winner, pay out the whole balance and start a new round
    ///
    /// # Arguments
    ///
    /// * `caller` - Account requesting the draw, as resolved by the host
    ///
    /// # Returns
    ///
    /// * `PoolResult<RoundOutcome>` - The resolved round or error
    ///
    /// # Errors
    ///
    /// * `PoolError::Unauthorized` - `caller` is not the coordinator
    /// * `PoolError::EmptyRound` - Nobody entered this round
    /// * `PoolError::TransferFailed` - Payout failed, round left as it was
    pub fn pick_winner(&mut self, caller: &AccountId) -> PoolResult<RoundOutcome> {
        if caller != &self.coordinator {
            log::warn!("Round {}: pick_winner denied for {}", self.round, caller);
            return Err(PoolError::Unauthorized {
                caller: caller.clone(),
            });
        }

        if self.players.is_empty() {
            return Err(PoolError::EmptyRound);
        }

        let draw = DrawContext {
            round: self.round,
            participants: &self.players,
            balance: self.balance,
        };
        let seed = self.entropy.seed(&draw);
        let winning_index =
            select_index(seed, self.players.len()).ok_or(PoolError::EmptyRound)?;
        let winner = self.players[winning_index].clone();
        let amount = self.balance;

        if let Err(e) = self.custody.withdraw(&winner, amount) {
            log::error!(
                "Round {}: payout of {} to {} failed: {}. Round left open",
                self.round,
                amount,
                winner,
                e
            );
            return Err(e.into());
        }

        let outcome = RoundOutcome {
            round: self.round,
            winner: winner.clone(),
            amount,
            winning_index,
            participants: std::mem::take(&mut self.players),
            resolved_at: Utc::now(),
        };

        self.balance = 0;
        self.round = self.round.saturating_add(1);
        self.push_event(PoolEvent::WinnerPaid {
            round: outcome.round,
            winner,
            amount,
        });
        self.remember(outcome.clone());

        log::info!(
            "Round {}: {} won {} from {} entries",
            outcome.round,
            outcome.winner,
            outcome.amount,
            outcome.participants.len()
        );

        Ok(outcome)
    }

    fn push_event(&mut self, event: PoolEvent) {
        if self.event_limit == 0 {
            return;
        }
        while self.events.len() >= self.event_limit {
            if let Some(dropped) = self.events.pop_front() {
                log::debug!("Event queue full, dropping: {dropped}");
            }
        }
        self.events.push_back(event);
    }

    fn remember(&mut self, outcome: RoundOutcome) {
        if self.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(outcome);
    }
}

impl<C, E> PoolState<C, E> {
    /// Current round's participants in entry order, duplicates included
    pub fn get_players(&self) -> &[AccountId] {
        &self.players
    }

    pub fn coordinator(&self) -> &AccountId {
        &self.coordinator
    }

    pub fn minimum_stake(&self) -> Amount {
        self.minimum_stake
    }

    /// Pooled balance of the current round
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Number of the round currently accepting entries
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Most recent resolved rounds, oldest first
    pub fn history(&self) -> impl Iterator<Item = &RoundOutcome> {
        self.history.iter()
    }

    pub fn drain_events(&mut self) -> VecDeque<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Mutable access to the custody backend.
    ///
    /// Meant for hosts that share the backend with other accounts (funding,
    /// freezing). Moving custody funds through it breaks the pool's
    /// balance accounting.
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    pub fn view(&self) -> PoolView {
        PoolView {
            round: self.round,
            coordinator: self.coordinator.clone(),
            minimum_stake: self.minimum_stake,
            balance: self.balance,
            players: self.players.clone(),
            last_outcome: self.history.back().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entropy::FixedEntropy,
        ledger::{InMemoryLedger, TransferError},
    };

    type TestPool = PoolState<InMemoryLedger, FixedEntropy>;

    fn pool_with(accounts: &[&str]) -> TestPool {
        let mut ledger = InMemoryLedger::new();
        for account in accounts {
            ledger.fund(&AccountId::new(account), 1_000).unwrap();
        }
        PoolState::new(
            AccountId::new("manager"),
            10,
            ledger,
            FixedEntropy([3; 32]),
        )
    }

    #[test]
    fn test_new_pool_is_empty() {
        let pool = pool_with(&[]);
        assert!(pool.get_players().is_empty());
        assert_eq!(pool.balance(), 0);
        assert_eq!(pool.round(), 1);
        assert_eq!(pool.coordinator(), &AccountId::new("manager"));
        assert_eq!(pool.minimum_stake(), 10);
    }

    #[test]
    fn test_enter_at_exact_minimum() {
        let mut pool = pool_with(&["alice"]);
        pool.enter(&AccountId::new("alice"), 10).unwrap();
        assert_eq!(pool.balance(), 10);
    }

    #[test]
    fn test_enter_below_minimum_leaves_no_trace() {
        let mut pool = pool_with(&["alice"]);
        let alice = AccountId::new("alice");

        let err = pool.enter(&alice, 9).unwrap_err();

        assert_eq!(
            err,
            PoolError::InsufficientStake {
                stake: 9,
                minimum: 10
            }
        );
        assert_eq!(pool.custody().balance_of(&alice), 1_000);
        assert_eq!(pool.custody().entries().len(), 1);
        assert!(pool.drain_events().is_empty());
    }

    #[test]
    fn test_enter_unfunded_account() {
        let mut pool = pool_with(&[]);
        let ghost = AccountId::new("ghost");

        let err = pool.enter(&ghost, 10).unwrap_err();

        assert!(matches!(
            err,
            PoolError::TransferFailed(TransferError::InsufficientFunds { .. })
        ));
        assert!(pool.get_players().is_empty());
        assert_eq!(pool.balance(), 0);
    }

    #[test]
    fn test_enter_overflow_rejected_before_transfer() {
        let mut ledger = InMemoryLedger::new();
        let whale = AccountId::new("whale");
        ledger.fund(&whale, Amount::MAX).unwrap();
        let mut pool = PoolState::new(AccountId::new("manager"), 0, ledger, FixedEntropy([0; 32]));

        pool.enter(&whale, Amount::MAX - 1).unwrap();
        let err = pool.enter(&whale, 2).unwrap_err();

        assert_eq!(err, PoolError::BalanceOverflow);
        assert_eq!(pool.balance(), Amount::MAX - 1);
        assert_eq!(pool.custody().balance_of(&whale), 1);
    }

    #[test]
    fn test_pick_winner_empty_round() {
        let mut pool = pool_with(&[]);
        let err = pool.pick_winner(&AccountId::new("manager")).unwrap_err();
        assert_eq!(err, PoolError::EmptyRound);
        assert_eq!(pool.round(), 1);
    }

    #[test]
    fn test_pick_winner_matches_seeded_index() {
        let mut pool = pool_with(&["a", "b", "c"]);
        for name in ["a", "b", "c"] {
            pool.enter(&AccountId::new(name), 10).unwrap();
        }
        let expected = select_index([3; 32], 3).unwrap();

        let outcome = pool.pick_winner(&AccountId::new("manager")).unwrap();

        assert_eq!(outcome.winning_index, expected);
        assert_eq!(outcome.winner, outcome.participants[expected]);
        assert_eq!(outcome.amount, 30);
        assert_eq!(pool.round(), 2);
    }

    #[test]
    fn test_history_limit() {
        let mut pool = pool_with(&["alice"]).with_history_limit(2);
        let alice = AccountId::new("alice");
        let manager = AccountId::new("manager");

        for _ in 0..3 {
            pool.enter(&alice, 10).unwrap();
            pool.pick_winner(&manager).unwrap();
        }

        let rounds: Vec<RoundId> = pool.history().map(|o| o.round).collect();
        assert_eq!(rounds, vec![2, 3]);
        assert_eq!(pool.view().last_outcome.map(|o| o.round), Some(3));
    }

    #[test]
    fn test_history_disabled() {
        let mut pool = pool_with(&["alice"]).with_history_limit(0);
        pool.enter(&AccountId::new("alice"), 10).unwrap();
        pool.pick_winner(&AccountId::new("manager")).unwrap();
        assert_eq!(pool.history().count(), 0);
    }

    #[test]
    fn test_event_queue_bounded_without_drain() {
        let mut pool = pool_with(&["alice"]).with_event_limit(4);
        let alice = AccountId::new("alice");
        let manager = AccountId::new("manager");

        for _ in 0..50 {
            pool.enter(&alice, 10).unwrap();
            pool.pick_winner(&manager).unwrap();
        }

        let events = pool.drain_events();
        assert_eq!(events.len(), 4);
        // Newest events survive
        assert_eq!(
            events.back(),
            Some(&PoolEvent::WinnerPaid {
                round: 50,
                winner: alice,
                amount: 10
            })
        );
    }

    #[test]
    fn test_round_counter_saturates() {
        let mut pool = pool_with(&["alice"]);
        pool.round = RoundId::MAX;
        pool.enter(&AccountId::new("alice"), 10).unwrap();

        let outcome = pool.pick_winner(&AccountId::new("manager")).unwrap();

        assert_eq!(outcome.round, RoundId::MAX);
        assert_eq!(pool.round(), RoundId::MAX);
        assert_eq!(pool.balance(), 0);
    }

    #[test]
    fn test_events_in_order() {
        let mut pool = pool_with(&["alice"]);
        let alice = AccountId::new("alice");
        pool.enter(&alice, 25).unwrap();
        pool.pick_winner(&AccountId::new("manager")).unwrap();

        let events: Vec<PoolEvent> = pool.drain_events().into_iter().collect();
        assert_eq!(
            events,
            vec![
                PoolEvent::Entered {
                    round: 1,
                    account: alice.clone(),
                    stake: 25
                },
                PoolEvent::WinnerPaid {
                    round: 1,
                    winner: alice,
                    amount: 25
                },
            ]
        );
        assert!(pool.drain_events().is_empty());
    }
}
