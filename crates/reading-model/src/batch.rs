//! Reading Batch

use crate::Reading;
use serde::{Deserialize, Serialize};

/// Ordered readings from one telemetry poll or one uploaded file.
///
/// Insertion order is kept. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingBatch {
    readings: Vec<Reading>,
}

impl ReadingBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading
    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// Readings as a slice, insertion order
    pub fn as_slice(&self) -> &[Reading] {
        &self.readings
    }

    /// The reading with the greatest timestamp (earliest inserted on ties)
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.iter().reduce(|best, r| {
            if r.timestamp > best.timestamp {
                r
            } else {
                best
            }
        })
    }

    /// Copy of the readings sorted by timestamp, newest first (stable)
    pub fn sorted_newest_first(&self) -> Vec<Reading> {
        let mut sorted = self.readings.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    /// Consume the batch
    pub fn into_vec(self) -> Vec<Reading> {
        self.readings
    }
}

impl From<Vec<Reading>> for ReadingBatch {
    fn from(readings: Vec<Reading>) -> Self {
        Self { readings }
    }
}

impl FromIterator<Reading> for ReadingBatch {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ReadingBatch {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_timestamp;
    use crate::{Region, RepairStatus};

    fn reading_at(ts: &str, region: Region) -> Reading {
        Reading {
            timestamp: parse_timestamp(ts).unwrap(),
            region,
            crack_sensitivity: 1.0,
            stress_score: 0.5,
            load_path_risk: 0.5,
            repair_status: RepairStatus::Ok,
        }
    }

    #[test]
    fn test_latest_picks_max_timestamp() {
        let batch: ReadingBatch = vec![
            reading_at("2024-01-01 10:00:00", Region::Nave),
            reading_at("2024-01-01 12:00:00", Region::Apse),
            reading_at("2024-01-01 11:00:00", Region::Transept),
        ]
        .into();

        assert_eq!(batch.latest().unwrap().region, Region::Apse);
    }

    #[test]
    fn test_latest_tie_keeps_first() {
        let batch: ReadingBatch = vec![
            reading_at("2024-01-01 10:00:00", Region::Nave),
            reading_at("2024-01-01 10:00:00", Region::Buttress),
        ]
        .into();

        assert_eq!(batch.latest().unwrap().region, Region::Nave);
    }

    #[test]
    fn test_empty_batch() {
        let batch = ReadingBatch::new();
        assert!(batch.is_empty());
        assert!(batch.latest().is_none());
        assert_eq!(serde_json::to_string(&batch).unwrap(), "[]");
    }

    #[test]
    fn test_sorted_newest_first() {
        let batch: ReadingBatch = vec![
            reading_at("2024-01-01 09:00:00", Region::Nave),
            reading_at("2024-01-01 11:00:00", Region::Apse),
            reading_at("2024-01-01 10:00:00", Region::Transept),
        ]
        .into();

        let regions: Vec<_> = batch.sorted_newest_first().iter().map(|r| r.region).collect();
        assert_eq!(regions, vec![Region::Apse, Region::Transept, Region::Nave]);
        // original order untouched
        assert_eq!(batch.as_slice()[0].region, Region::Nave);
    }
}
