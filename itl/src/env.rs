//! The variable environment: the 27 named cells and the single growable
//! numeric array.

use crate::definitions::variables;
use crate::error::Diagnostic;
use crate::value::Value;

/// The 27 user-addressable cells, `A`..`Z` and `_`.
#[derive(Debug, Clone)]
pub struct Variables {
    cells: [Value; variables::SIZE],
}

impl Default for Variables {
    fn default() -> Self {
        Self {
            cells: std::array::from_fn(|_| Value::Undefined),
        }
    }
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, letter: char) -> &Value {
        let idx = variables::index_of(letter).expect("caller must pass a valid variable letter");
        &self.cells[idx]
    }

    pub fn set(&mut self, letter: char, value: Value) {
        let idx = variables::index_of(letter).expect("caller must pass a valid variable letter");
        self.cells[idx] = value;
    }

    pub fn clear(&mut self, letter: char) {
        self.set(letter, Value::Undefined);
    }

    pub fn clear_all(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Value::Undefined;
        }
    }

    /// Iterates over all 27 cells as `(letter, value)` pairs, in `A..Z, _`
    /// order — used by the `:vars` meta-command and by tests.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Value)> {
        (0..variables::SIZE).map(move |i| (variables::letter_of(i), &self.cells[i]))
    }
}

/// The single process-wide growable numeric array.
#[derive(Debug, Clone)]
pub struct Array {
    data: Vec<f64>,
    cap: usize,
}

impl Array {
    pub fn new(cap: usize) -> Self {
        Self {
            data: Vec::new(),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads beyond the current length return `0` without growing.
    /// Negative indices are clamped to `0`.
    pub fn get(&self, index: i64) -> f64 {
        let index = index.max(0) as usize;
        self.data.get(index).copied().unwrap_or(0.0)
    }

    /// Auto-extends with zeros up to the written index, capped at
    /// `self.cap`. Negative indices clamp to `0`. Returns a diagnostic if
    /// the cap was hit (the write is then clamped to the last writable
    /// slot instead of silently dropped).
    pub fn set(&mut self, index: i64, value: f64) -> Option<Diagnostic> {
        let mut index = index.max(0) as usize;
        let mut diag = None;
        if index >= self.cap {
            index = self.cap.saturating_sub(1);
            diag = Some(Diagnostic::ArrayCapExceeded { cap: self.cap });
        }
        if index >= self.data.len() {
            self.data.resize(index + 1, 0.0);
        }
        self.data[index] = value;
        diag
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }
}

/// The seedable uniform random source ( "RNG").
pub struct Rng {
    inner: Box<dyn rand::RngCore + Send>,
}

impl Rng {
    /// Seeds from the operating system's entropy source, matching the
    /// spec's "seeded from a wall-clock source at startup" (the OS RNG is
    /// itself typically seeded from system entropy including the clock).
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self {
            inner: Box::new(rand::rngs::StdRng::from_entropy()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }

    /// Reseeds in place — used by the `'` primary's seeding form.
    pub fn seed(&mut self, seed: i64) {
        use rand::SeedableRng;
        self.inner = Box::new(rand::rngs::StdRng::seed_from_u64(seed as u64));
    }

    /// A uniform real in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        use rand::Rng as _;
        self.inner.gen_range(0.0..1.0)
    }
}

impl std::fmt::Debug for Rng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Rng(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_variable_is_undefined() {
        let vars = Variables::new();
        assert!(vars.get('A').is_undefined());
    }

    #[test]
    fn array_read_beyond_length_is_zero_without_growing() {
        let array = Array::new(1_000_000);
        assert_eq!(array.get(5), 0.0);
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn array_write_autoextends() {
        let mut array = Array::new(1_000_000);
        array.set(3, 42.0);
        assert_eq!(array.len(), 4);
        assert_eq!(array.get(3), 42.0);
        assert_eq!(array.get(0), 0.0);
    }

    #[test]
    fn negative_index_clamps_to_zero() {
        let mut array = Array::new(1_000_000);
        array.set(-5, 9.0);
        assert_eq!(array.get(-100), 9.0);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = Rng::from_seed(42);
        let mut b = Rng::from_seed(42);
        assert_eq!(a.next_uniform(), b.next_uniform());
    }
}
