//! Single Structural Reading

use crate::{Region, RepairStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One synthetic structural-sensor sample for a region at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reading {
    /// When the sample was taken
    #[serde(with = "crate::timestamp")]
    pub timestamp: NaiveDateTime,
    /// Structural zone
    pub region: Region,
    /// Crack sensitivity index (generated in [0.5, 1.5])
    pub crack_sensitivity: f64,
    /// Stress score (generated in [0.0, 1.0])
    pub stress_score: f64,
    /// Load path risk (generated in [0.0, 1.0])
    pub load_path_risk: f64,
    /// Maintenance state
    pub repair_status: RepairStatus,
}
