//! Deterministic random number generation.
//!
//! RULE: The engine never calls a platform RNG. All randomness flows
//! through a `RandomSource`, which is either derived from the session's
//! master seed or injected by the caller (tests, replays, demos).
//!
//! Each slot gets its own stream, seeded from (master_seed XOR slot
//! index). Adding a slot never changes an existing slot's stream.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Anything the engine can draw random numbers from.
pub trait RandomSource: Send {
    /// Draw a raw u64 (full range).
    fn next_u64(&mut self) -> u64;

    /// Roll a u64 in [0, n).
    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.next_u64() % n
    }

    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Pick an index in [0, len).
    fn next_index(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }
}

/// A named, seeded PCG stream for a single slot.
pub struct SeededRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SeededRng {
    /// The slot index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for SeededRng {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// `next_u64_below(n)` yields `value % n`, so a script of `[2]` always
/// picks the third catalog entry.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws:  Vec<u64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: Vec<u64>) -> Self {
        assert!(!draws.is_empty(), "scripted rng needs at least one draw");
        Self { draws, cursor: 0 }
    }

    /// Always draws the same value.
    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

/// Stream factory for a single session.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_slot(&self, slot: RngSlot) -> SeededRng {
        SeededRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    LifeShock = 0,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LifeShock => "life_shock",
        }
    }
}
