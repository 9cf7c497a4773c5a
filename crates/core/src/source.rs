//! Shape sources - where the next piece comes from
//!
//! [`RandomSource`] draws each kind uniformly and independently (no bag),
//! seeded so a game can be replayed. [`SequenceSource`] cycles a fixed list and
//! is what tests and scripted runs use.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::shapes::random_kind;
use crate::types::ShapeKind;

/// Supplies the kind of every newly spawned piece.
pub trait ShapeSource {
    fn next_kind(&mut self) -> ShapeKind;
}

/// Uniform random kinds from a seeded RNG.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: u64,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this source started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ShapeSource for RandomSource {
    fn next_kind(&mut self) -> ShapeKind {
        random_kind(&mut self.rng)
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<ShapeKind>,
    next: usize,
}

impl SequenceSource {
    /// Returns `None` for an empty list.
    pub fn new(kinds: &[ShapeKind]) -> Option<Self> {
        if kinds.is_empty() {
            return None;
        }
        Some(Self {
            kinds: kinds.to_vec(),
            next: 0,
        })
    }

    /// Always the same kind.
    pub fn repeat(kind: ShapeKind) -> Self {
        Self {
            kinds: vec![kind],
            next: 0,
        }
    }
}

impl ShapeSource for SequenceSource {
    fn next_kind(&mut self) -> ShapeKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}
