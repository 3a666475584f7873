//! View Parameters and Risk Thresholds

use crate::ViewError;
use reading_model::{Reading, Region};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accepted crack-sensitivity threshold range (the slider bounds)
pub const CRACK_THRESHOLD_RANGE: (f64, f64) = (0.5, 1.5);

/// Limits above which a reading counts as high-risk (strict comparison)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Stress score limit (default: 0.8)
    pub stress: f64,
    /// Crack sensitivity limit (default: 1.2)
    pub crack: f64,
    /// Load path risk limit (default: 0.9)
    pub load_path: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            stress: 0.8,
            crack: 1.2,
            load_path: 0.9,
        }
    }
}

impl RiskThresholds {
    /// Whether any one of the three limits is exceeded
    pub fn is_high_risk(&self, reading: &Reading) -> bool {
        reading.stress_score > self.stress
            || reading.crack_sensitivity > self.crack
            || reading.load_path_risk > self.load_path
    }
}

/// Region selector: every region or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(&self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(r) => *r == region,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("All"),
            RegionFilter::Only(r) => write!(f, "{}", r),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }
        s.parse::<Region>()
            .map(RegionFilter::Only)
            .map_err(|_| ViewError::UnknownRegion(s.trim().to_string()))
    }
}

impl TryFrom<String> for RegionFilter {
    type Error = ViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegionFilter> for String {
    fn from(filter: RegionFilter) -> Self {
        filter.to_string()
    }
}

/// User-controlled view parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    /// Region selector
    pub region_filter: RegionFilter,
    /// Minimum crack sensitivity to include (inclusive)
    pub crack_threshold: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            region_filter: RegionFilter::All,
            crack_threshold: CRACK_THRESHOLD_RANGE.0,
        }
    }
}

impl ViewParams {
    /// Build params, rejecting a threshold outside the slider range
    pub fn new(region_filter: RegionFilter, crack_threshold: f64) -> Result<Self, ViewError> {
        let (min, max) = CRACK_THRESHOLD_RANGE;
        if !(min..=max).contains(&crack_threshold) {
            return Err(ViewError::ThresholdOutOfRange(crack_threshold));
        }
        Ok(Self {
            region_filter,
            crack_threshold,
        })
    }

    /// Whether a reading passes the region and threshold filters
    pub fn admits(&self, reading: &Reading) -> bool {
        self.region_filter.matches(reading.region) && reading.crack_sensitivity >= self.crack_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_filter_parse() {
        assert_eq!("All".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!("all".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!(
            "Apse".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Apse)
        );
        assert!("Crypt".parse::<RegionFilter>().is_err());
    }

    #[test]
    fn test_region_filter_serde() {
        let json = serde_json::to_string(&RegionFilter::Only(Region::Nave)).unwrap();
        assert_eq!(json, "\"Nave\"");
        let parsed: RegionFilter = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(parsed, RegionFilter::All);
    }

    #[test]
    fn test_threshold_range() {
        assert!(ViewParams::new(RegionFilter::All, 0.5).is_ok());
        assert!(ViewParams::new(RegionFilter::All, 1.5).is_ok());
        assert_eq!(
            ViewParams::new(RegionFilter::All, 1.6),
            Err(ViewError::ThresholdOutOfRange(1.6))
        );
        assert!(ViewParams::new(RegionFilter::All, f64::NAN).is_err());
    }
}
