//! Placeholder numbers behind the display model.
//!
//! The scorer only returns a label, so score and confidence are synthesized
//! here. Swapping in a real probability output means providing another
//! [`ScoreSource`]; the normalizer does not change.

use crate::classification::QualityTier;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Probability that a fallback result is marked accepted.
pub const FALLBACK_ACCEPTANCE_RATE: f64 = 0.7;

pub trait ScoreSource: Send + Sync {
    /// Score consistent with `tier`: High in [0.8, 1.0], Medium in [0.6, 0.8),
    /// Low in [0.0, 0.6).
    fn quality_score(&self, tier: QualityTier) -> f64;

    /// Confidence in [0.8, 1.0], independent of the tier.
    fn confidence(&self) -> f64;

    /// Score for a fallback result, in [0.6, 1.0).
    fn fallback_score(&self) -> f64;

    /// Acceptance for a fallback result, true roughly 70% of the time.
    fn fallback_accepted(&self) -> bool;

    /// Label for a fallback result, High or Low with equal odds.
    fn fallback_tier(&self) -> QualityTier;
}

/// Uniform draws from a standard RNG.
pub struct RandomScoreSource {
    rng: Mutex<StdRng>,
}

impl RandomScoreSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence, used by tests and `SCORE_SEED`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // a panic mid-draw leaves the RNG state valid
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Default for RandomScoreSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ScoreSource for RandomScoreSource {
    fn quality_score(&self, tier: QualityTier) -> f64 {
        self.with_rng(|rng| match tier {
            QualityTier::High => rng.gen_range(0.8..=1.0),
            QualityTier::Medium => rng.gen_range(0.6..0.8),
            QualityTier::Low => rng.gen_range(0.0..0.6),
        })
    }

    fn confidence(&self) -> f64 {
        self.with_rng(|rng| rng.gen_range(0.8..=1.0))
    }

    fn fallback_score(&self) -> f64 {
        self.with_rng(|rng| rng.gen_range(0.6..1.0))
    }

    fn fallback_accepted(&self) -> bool {
        self.with_rng(|rng| rng.gen_bool(FALLBACK_ACCEPTANCE_RATE))
    }

    fn fallback_tier(&self) -> QualityTier {
        if self.with_rng(|rng| rng.gen_bool(0.5)) {
            QualityTier::High
        } else {
            QualityTier::Low
        }
    }
}
