//! Per-Region Statistics

use reading_model::{Reading, Region, RepairStatus};
use serde::Serialize;

/// Summary statistics for one region's readings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub region: Region,
    /// Number of readings
    pub count: usize,
    /// Mean stress score
    pub mean_stress: f64,
    /// Minimum stress score
    pub min_stress: f64,
    /// Maximum stress score
    pub max_stress: f64,
    /// Mean crack sensitivity
    pub mean_crack: f64,
    /// Mean load path risk
    pub mean_load_path: f64,
}

impl RegionStats {
    /// Compute statistics for `region`; `None` when it has no readings
    pub fn compute(region: Region, readings: &[&Reading]) -> Option<Self> {
        let own: Vec<&Reading> = readings.iter().copied().filter(|r| r.region == region).collect();
        if own.is_empty() {
            return None;
        }

        let n = own.len() as f64;
        let mean = |f: fn(&Reading) -> f64| own.iter().map(|r| f(r)).sum::<f64>() / n;

        Some(Self {
            region,
            count: own.len(),
            mean_stress: mean(|r| r.stress_score),
            min_stress: own.iter().map(|r| r.stress_score).fold(f64::MAX, f64::min),
            max_stress: own.iter().map(|r| r.stress_score).fold(f64::MIN, f64::max),
            mean_crack: mean(|r| r.crack_sensitivity),
            mean_load_path: mean(|r| r.load_path_risk),
        })
    }

    /// Statistics for every region present, in [`Region::ALL`] order
    pub fn per_region(readings: &[&Reading]) -> Vec<Self> {
        Region::ALL
            .into_iter()
            .filter_map(|region| Self::compute(region, readings))
            .collect()
    }
}

/// Repair status distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub ok: usize,
    pub needs_inspection: usize,
    pub critical: usize,
}

impl StatusCounts {
    pub fn tally(readings: &[&Reading]) -> Self {
        readings.iter().fold(Self::default(), |mut acc, r| {
            match r.repair_status {
                RepairStatus::Ok => acc.ok += 1,
                RepairStatus::NeedsInspection => acc.needs_inspection += 1,
                RepairStatus::Critical => acc.critical += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.ok + self.needs_inspection + self.critical
    }
}
