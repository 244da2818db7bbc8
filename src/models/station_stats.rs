use std::collections::HashMap;

/// Station name bytes to running statistics.
pub type StationMap = HashMap<Vec<u8>, StationStats>;

/// Running statistics for one station, in tenths of a degree.
///
/// `sum` is wider than a single reading so that adding any `i64` readings
/// cannot overflow before `count` itself does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationStats {
    pub min: i64,
    pub max: i64,
    pub sum: i128,
    pub count: u64,
}

impl StationStats {
    /// Statistics for a station seen exactly once.
    pub fn new(tenths: i64) -> Self {
        Self {
            min: tenths,
            max: tenths,
            sum: i128::from(tenths),
            count: 1,
        }
    }

    pub fn record(&mut self, tenths: i64) {
        self.min = self.min.min(tenths);
        self.max = self.max.max(tenths);
        self.sum += i128::from(tenths);
        self.count += 1;
    }

    pub fn merge(&mut self, other: &StationStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in tenths using plain division.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Insert a fresh entry for an unseen station, otherwise update it in place.
pub fn accumulate(stations: &mut StationMap, station: &[u8], tenths: i64) {
    match stations.get_mut(station) {
        Some(stats) => stats.record(tenths),
        None => {
            stations.insert(station.to_vec(), StationStats::new(tenths));
        }
    }
}
