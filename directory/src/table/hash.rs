//! Modulo-sum hashing and linear probing.
//!
//! `hash(key) = (sum of code points) mod size` and
//! `probe(base, attempt) = (base + attempt) mod size`. Keys with equal code
//! point sums collide regardless of character order; recorded hash and probe
//! values depend on that, so the function must stay exactly this.

/// Hash `key` into `[0, size)`. Empty keys and a zero size hash to 0.
pub fn hash(key: &str, size: usize) -> usize {
    if key.is_empty() || size == 0 {
        return 0;
    }
    let sum: u64 = key.chars().map(|c| c as u64).sum();
    (sum % size as u64) as usize
}

/// Slot index visited on the given 0-based probe attempt.
pub fn probe(base: usize, attempt: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    (base + attempt) % size
}
