//! RNG module - piece randomizers
//!
//! The classic game draws every piece independently and uniformly from the seven
//! kinds. A 7-bag randomizer is also available: each bag holds one of each kind,
//! shuffled, and is drawn until empty before a new bag is made.
//!
//! Both are driven by a small seeded LCG so a game can be replayed from its seed.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits (multiply-shift); the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Every kind equally likely on every draw
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds
    Bag7,
}

/// Seeded source of piece kinds
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    randomizer: Randomizer,
    seed: u32,
    rng: SimpleRng,
    bag: [PieceKind; 7],
    /// Index into current bag (Bag7 only); 7 means "empty"
    bag_index: usize,
}

impl PieceGenerator {
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        Self {
            randomizer,
            seed,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn uniform(seed: u32) -> Self {
        Self::new(seed, Randomizer::Uniform)
    }

    pub fn bag7(seed: u32) -> Self {
        Self::new(seed, Randomizer::Bag7)
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => PieceKind::ALL[self.rng.next_range(7) as usize],
            Randomizer::Bag7 => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// The seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::uniform(1)
    }
}
