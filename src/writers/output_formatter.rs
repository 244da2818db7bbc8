use crate::models::{StationMap, StationStats};
use crate::utils::constants::FIXED_POINT_SCALE;

/// Renders merged statistics as `{name=min/mean/max, ...}`.
pub struct OutputFormatter;

impl OutputFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Names are sorted by raw byte value; every number gets one fractional digit.
    pub fn format(&self, stations: &StationMap) -> String {
        let mut entries: Vec<(&Vec<u8>, &StationStats)> = stations.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut output = String::with_capacity(2 + entries.len() * 24);
        output.push('{');
        for (i, (name, stats)) in entries.into_iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            self.format_entry(&mut output, name, stats);
        }
        output.push('}');

        output
    }

    fn format_entry(&self, output: &mut String, name: &[u8], stats: &StationStats) {
        output.push_str(&format!(
            "{}={:.1}/{:.1}/{:.1}",
            String::from_utf8_lossy(name),
            stats.min as f64 / FIXED_POINT_SCALE,
            stats.mean() / FIXED_POINT_SCALE,
            stats.max as f64 / FIXED_POINT_SCALE,
        ));
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accumulate;

    fn stations(readings: &[(&str, i64)]) -> StationMap {
        let mut stations = StationMap::new();
        for (station, tenths) in readings {
            accumulate(&mut stations, station.as_bytes(), *tenths);
        }
        stations
    }

    #[test]
    fn test_format_example() {
        let stations = stations(&[("A", 50), ("B", 100), ("A", 30)]);
        assert_eq!(
            OutputFormatter::new().format(&stations),
            "{A=3.0/4.0/5.0, B=10.0/10.0/10.0}"
        );
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(OutputFormatter::new().format(&StationMap::new()), "{}");
    }

    #[test]
    fn test_keys_sorted_by_bytes() {
        let stations = stations(&[("b", 10), ("Zürich", 10), ("Z", 10), ("A", 10), ("a", 10)]);
        assert_eq!(
            OutputFormatter::new().format(&stations),
            "{A=1.0/1.0/1.0, Z=1.0/1.0/1.0, Zürich=1.0/1.0/1.0, a=1.0/1.0/1.0, b=1.0/1.0/1.0}"
        );
    }

    #[test]
    fn test_mean_uses_plain_division() {
        // 1.0 + 2.0 + 5.0 + 7.0 = 15.0 over 4 readings
        let stations = stations(&[("S", 10), ("S", 20), ("S", 50), ("S", 70)]);
        assert_eq!(OutputFormatter::new().format(&stations), "{S=1.0/3.8/7.0}");

        // Ceiling division would round 0.01 up to 0.1
        let mut readings = vec![("T", 1)];
        readings.extend(std::iter::repeat(("T", 0)).take(9));
        let stations = self::stations(&readings);
        assert_eq!(OutputFormatter::new().format(&stations), "{T=0.0/0.0/0.1}");
    }

    #[test]
    fn test_large_readings_keep_exact_mean() {
        let huge = 9_000_000_000_000_000_000;
        let stations = stations(&[("A", huge), ("A", huge)]);
        assert_eq!(
            OutputFormatter::new().format(&stations),
            "{A=900000000000000000.0/900000000000000000.0/900000000000000000.0}"
        );
    }

    #[test]
    fn test_negative_values() {
        let stations = stations(&[("Vostok", -893), ("Vostok", -123)]);
        assert_eq!(
            OutputFormatter::new().format(&stations),
            "{Vostok=-89.3/-50.8/-12.3}"
        );
    }
}
