//! Deterministic RNG utilities for reproducible tests and demos.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test and demo randomization should go through this to ensure
/// reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate a deterministic position jitter in `[-scale, scale]` per axis.
///
/// Useful for scattering scene targets without hand-picking coordinates.
pub fn jitter(rng: &mut ChaCha8Rng, scale: f32) -> [f32; 3] {
    use rand::Rng;
    let mut sample = || (rng.r#gen::<f32>() * 2.0 - 1.0) * scale;
    [sample(), sample(), sample()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
