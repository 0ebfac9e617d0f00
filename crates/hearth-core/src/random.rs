#![forbid(unsafe_code)]

//! Random sources for the effects.
//!
//! Every effect draws from an injectable generator so tests can fix a seed
//! and replay a run exactly. Production callers pass `None` and get an
//! entropy-seeded generator.
//!
//! Particle respawns use [`respawn_stream`]: a generator derived only from
//! `(seed, particle index, generation)`. That keeps each particle's update a
//! function of its own state, so the iteration order of a step cannot change
//! the outcome.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator used by every effect.
pub type FxRng = ChaCha8Rng;

/// Boxed generator for callers that want to inject their own source.
pub type BoxedRng = Box<dyn RngCore + Send>;

/// Words consumed per respawn; streams are spaced this far apart.
const RESPAWN_WORDS: u128 = 16;

/// Deterministic generator for a fixed seed.
#[inline]
pub fn seeded(seed: u64) -> FxRng {
    FxRng::seed_from_u64(seed)
}

/// Generator seeded from OS entropy.
#[inline]
pub fn from_entropy() -> FxRng {
    FxRng::from_entropy()
}

/// `Some(seed)` gives a reproducible generator, `None` an entropy-seeded one.
pub fn rng_for(seed: Option<u64>) -> FxRng {
    match seed {
        Some(seed) => seeded(seed),
        None => from_entropy(),
    }
}

/// Generator for the `generation`-th respawn of particle `index`.
///
/// The same triple always yields the same sequence.
pub fn respawn_stream(seed: u64, index: u64, generation: u32) -> FxRng {
    let mut rng = FxRng::seed_from_u64(seed);
    rng.set_stream(index);
    rng.set_word_pos(u128::from(generation) * RESPAWN_WORDS);
    rng
}

/// Uniform sample in `[lo, hi)`. Returns `lo` for an empty or inverted range.
#[inline]
pub fn between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

/// Returns `true` with probability `p` (clamped to `[0, 1]`).
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() {
        return false;
    }
    rng.gen_bool(p.clamp(0.0, 1.0))
}
