use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Source of randomness for generation.
///
/// Injected into the generation session so tests and replays can substitute
/// a deterministic sequence.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform index in `[0, bound)`. Returns 0 when `bound` is 0.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// ChaCha-backed random source, seeded for reproducible buildings.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

/// Replays fixed sequences of values, cycling when exhausted.
///
/// Indices are reduced modulo the requested bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    floats: Vec<f32>,
    indices: Vec<usize>,
    float_cursor: usize,
    index_cursor: usize,
}

impl ScriptedRandom {
    pub fn new(floats: Vec<f32>, indices: Vec<usize>) -> Self {
        Self {
            floats,
            indices,
            float_cursor: 0,
            index_cursor: 0,
        }
    }

    /// Every trial returns `value`; every index draw returns 0.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value], vec![0])
    }

    /// Number of index draws made so far.
    pub fn index_draws(&self) -> usize {
        self.index_cursor
    }

    /// Number of float draws made so far.
    pub fn float_draws(&self) -> usize {
        self.float_cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let value = if self.floats.is_empty() {
            0.0
        } else {
            self.floats[self.float_cursor % self.floats.len()]
        };
        self.float_cursor += 1;
        value
    }

    fn next_index(&mut self, bound: usize) -> usize {
        let raw = if self.indices.is_empty() {
            0
        } else {
            self.indices[self.index_cursor % self.indices.len()]
        };
        self.index_cursor += 1;
        if bound == 0 {
            0
        } else {
            raw % bound
        }
    }
}
