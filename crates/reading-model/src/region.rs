//! Region and Repair Status Enumerations

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural zone of the cathedral a reading was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Region {
    Nave,
    Transept,
    Apse,
    Buttress,
}

impl Region {
    /// Every region, in display order
    pub const ALL: [Region; 4] = [Region::Nave, Region::Transept, Region::Apse, Region::Buttress];

    /// Name used in files and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Nave => "Nave",
            Region::Transept => "Transept",
            Region::Apse => "Apse",
            Region::Buttress => "Buttress",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownRegion(trimmed.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for &'static str {
    fn from(region: Region) -> Self {
        region.as_str()
    }
}

/// Maintenance state attached to a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RepairStatus {
    Ok,
    NeedsInspection,
    Critical,
}

impl RepairStatus {
    /// Every status, from least to most severe
    pub const ALL: [RepairStatus; 3] = [
        RepairStatus::Ok,
        RepairStatus::NeedsInspection,
        RepairStatus::Critical,
    ];

    /// Label used in files and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Ok => "OK",
            RepairStatus::NeedsInspection => "Needs Inspection",
            RepairStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Needs Inspection", "NeedsInspection" and "needs_inspection" all match
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "ok" => Ok(RepairStatus::Ok),
            "needsinspection" => Ok(RepairStatus::NeedsInspection),
            "critical" => Ok(RepairStatus::Critical),
            _ => Err(ModelError::UnknownRepairStatus(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for RepairStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepairStatus> for &'static str {
    fn from(status: RepairStatus) -> Self {
        status.as_str()
    }
}
