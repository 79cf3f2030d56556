//! Entropy sources and winner index selection.
//!
//! The draw is only as fair as the seed. A production source must produce
//! seeds that no participant can predict or influence at the time they
//! enter. [`OsEntropy`] mixes fresh OS-seeded randomness with the round
//! data; [`FixedEntropy`] exists for replays and tests and must never guard
//! real value.

use crate::pool::{AccountId, Amount, RoundId};
use chrono::Utc;
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use sha2::{Digest, Sha256};

/// 32-byte seed for the winner draw.
pub type Seed = [u8; 32];

/// Round data visible to the entropy source at draw time.
#[derive(Clone, Copy, Debug)]
pub struct DrawContext<'a> {
    pub round: RoundId,
    pub participants: &'a [AccountId],
    pub balance: Amount,
}

/// Supplies the seed for one winner draw.
pub trait EntropySource {
    fn seed(&mut self, draw: &DrawContext<'_>) -> Seed;
}

/// Pick a uniformly distributed index in `[0, len)` from a seed.
///
/// Returns `None` for an empty participant sequence.
pub fn select_index(seed: Seed, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let mut rng = StdRng::from_seed(seed);
    Some(rng.random_range(0..len))
}

/// Production entropy source
///
/// Each seed is SHA-256 over 32 fresh bytes from the thread-local CSPRNG,
/// the round number, the draw timestamp, every participant and the
/// pooled balance.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropy {
    fn seed(&mut self, draw: &DrawContext<'_>) -> Seed {
        let mut nonce = [0u8; 32];
        rand::rng().fill_bytes(&mut nonce);

        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(draw.round.to_le_bytes());
        hasher.update(
            Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_default()
                .to_le_bytes(),
        );
        for participant in draw.participants {
            hasher.update(participant.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(draw.balance.to_le_bytes());

        hasher.finalize().into()
    }
}

/// Deterministic entropy source returning the same seed every draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedEntropy(pub Seed);

impl EntropySource for FixedEntropy {
    fn seed(&mut self, _draw: &DrawContext<'_>) -> Seed {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(n: usize) -> Vec<AccountId> {
        (0..n)
            .map(|i| AccountId::new(&format!("player{i}")))
            .collect()
    }

    #[test]
    fn test_select_index_empty() {
        assert_eq!(select_index([7; 32], 0), None);
    }

    #[test]
    fn test_select_index_in_range() {
        for byte in 0..=255u8 {
            let idx = select_index([byte; 32], 5).unwrap();
            assert!(idx < 5);
        }
    }

    #[test]
    fn test_select_index_deterministic_per_seed() {
        assert_eq!(select_index([9; 32], 1000), select_index([9; 32], 1000));
        assert_eq!(select_index([9; 32], 1), Some(0));
    }

    #[test]
    fn test_fixed_entropy_ignores_round_data() {
        let players = accounts(3);
        let mut entropy = FixedEntropy([1; 32]);
        let a = entropy.seed(&DrawContext {
            round: 1,
            participants: &players,
            balance: 10,
        });
        let b = entropy.seed(&DrawContext {
            round: 2,
            participants: &players[..1],
            balance: 99,
        });
        assert_eq!(a, b);
    }

    #[test]
    fn test_os_entropy_seeds_differ() {
        let players = accounts(2);
        let draw = DrawContext {
            round: 1,
            participants: &players,
            balance: 2,
        };
        let mut entropy = OsEntropy::new();
        assert_ne!(entropy.seed(&draw), entropy.seed(&draw));
    }

    #[test]
    fn test_os_entropy_reaches_every_slot() {
        let players = accounts(4);
        let draw = DrawContext {
            round: 1,
            participants: &players,
            balance: 4,
        };
        let mut entropy = OsEntropy::new();
        let mut hits = [0usize; 4];

        for _ in 0..400 {
            let idx = select_index(entropy.seed(&draw), players.len()).unwrap();
            hits[idx] += 1;
        }

        assert!(hits.iter().all(|&h| h > 0), "Every slot should win sometimes: {hits:?}");
    }
}
