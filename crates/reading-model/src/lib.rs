//! Structural Reading Model
//!
//! Value types shared by the generator, loader, view and dashboard: a single
//! [`Reading`], the [`Region`] and [`RepairStatus`] enumerations, and the
//! [`ReadingBatch`] that is replaced on every telemetry poll.

mod batch;
mod error;
mod reading;
mod region;
pub mod timestamp;

pub use batch::ReadingBatch;
pub use error::ModelError;
pub use reading::Reading;
pub use region::{Region, RepairStatus};

/// Column/field names of the external file format, in export order
pub const FIELD_NAMES: [&str; 6] = [
    "Timestamp",
    "Region",
    "CrackSensitivity",
    "StressScore",
    "LoadPathRisk",
    "RepairStatus",
];
