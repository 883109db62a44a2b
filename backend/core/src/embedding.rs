//! Deterministic pseudo-embeddings.
//!
//! The seed is the first 8 bytes (big-endian) of SHA-256 over the UTF-8 text,
//! which keeps vectors stable across platforms and processes. Values are drawn
//! from `StdRng`, so exact components are only stable for a given `rand`
//! major version; the norm and determinism properties hold regardless.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Output dimension, matching `text-embedding-ada-002`.
pub const EMBEDDING_DIM: usize = 1536;

/// Derive the generator seed for `text`.
pub fn seed_for(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(seed)
}

/// Generate a unit-norm vector of [`EMBEDDING_DIM`] components for `text`.
pub fn embedding_of(text: &str) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed_for(text));
    let mut vector: Vec<f32> = (0..EMBEDDING_DIM)
        .map(|_| rng.gen::<f32>() * 2.0 - 1.0)
        .collect();

    let norm = vector
        .iter()
        .map(|v| f64::from(*v) * f64::from(*v))
        .sum::<f64>()
        .sqrt();

    // Unreachable for 1536 uniform draws, but never divide by zero.
    if norm <= f64::EPSILON {
        let mut unit = vec![0.0; EMBEDDING_DIM];
        unit[0] = 1.0;
        return unit;
    }

    for v in &mut vector {
        *v = (f64::from(*v) / norm) as f32;
    }
    vector
}
