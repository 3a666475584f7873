//! Reading Generator Implementation

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use reading_model::{Reading, ReadingBatch, Region, RepairStatus};
use tracing::debug;

/// Spacing between consecutive readings in a batch
pub const READING_INTERVAL_MINUTES: i64 = 10;

const CRACK_RANGE: (f64, f64) = (0.5, 1.5);
const SCORE_RANGE: (f64, f64) = (0.0, 1.0);

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn uniform2<R: Rng + ?Sized>(rng: &mut R, range: (f64, f64)) -> f64 {
    round2(rng.gen_range(range.0..=range.1)).clamp(range.0, range.1)
}

/// Generate `n` readings ending at `now`.
///
/// Reading `i` is stamped `now - i * 10 minutes` (with `now` truncated to the
/// whole second), so the batch runs newest to oldest.
pub fn generate<R: Rng + ?Sized>(n: usize, now: NaiveDateTime, rng: &mut R) -> ReadingBatch {
    let now = now.with_nanosecond(0).unwrap_or(now);

    let batch: ReadingBatch = (0..n)
        .map(|index| Reading {
            timestamp: now - Duration::minutes(index as i64 * READING_INTERVAL_MINUTES),
            region: *Region::ALL.choose(rng).unwrap_or(&Region::Nave),
            crack_sensitivity: uniform2(rng, CRACK_RANGE),
            stress_score: uniform2(rng, SCORE_RANGE),
            load_path_risk: uniform2(rng, SCORE_RANGE),
            repair_status: *RepairStatus::ALL.choose(rng).unwrap_or(&RepairStatus::Ok),
        })
        .collect();

    debug!("Generated {} readings ending at {}", batch.len(), now);
    batch
}

/// Generator owning its random source
pub struct ReadingGenerator {
    rng: StdRng,
}

impl ReadingGenerator {
    /// Reproducible generator for tests and replays
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the OS
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Produce the next batch
    pub fn next_batch(&mut self, n: usize, now: NaiveDateTime) -> ReadingBatch {
        generate(n, now, &mut self.rng)
    }
}
