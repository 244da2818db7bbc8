use crate::error::{ProcessingError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// One per-station disagreement between two result files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    MissingInSecond { station: String, first: String },
    MissingInFirst { station: String, second: String },
    Mismatch {
        station: String,
        first: String,
        second: String,
    },
}

impl Difference {
    pub fn station(&self) -> &str {
        match self {
            Difference::MissingInSecond { station, .. }
            | Difference::MissingInFirst { station, .. }
            | Difference::Mismatch { station, .. } => station,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::MissingInSecond { station, first } => {
                write!(f, "{}: MISSING in second (first has {})", station, first)
            }
            Difference::MissingInFirst { station, second } => {
                write!(f, "{}: MISSING in first (second has {})", station, second)
            }
            Difference::Mismatch {
                station,
                first,
                second,
            } => write!(f, "{}: {}  →  {}", station, first, second),
        }
    }
}

/// Compares two files in the `{name=min/mean/max, ...}` format.
pub struct OutputComparator;

impl OutputComparator {
    pub fn new() -> Self {
        Self
    }

    /// Parse an output line into station name → `min/mean/max` text
    pub fn parse(&self, text: &str) -> Result<BTreeMap<String, String>> {
        let inner = text
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| {
                ProcessingError::InvalidFormat("Output is not enclosed in braces".to_string())
            })?;

        let mut entries = BTreeMap::new();
        if inner.is_empty() {
            return Ok(entries);
        }

        for item in inner.split(", ") {
            let (station, values) = item.split_once('=').ok_or_else(|| {
                ProcessingError::InvalidFormat(format!("Entry without '=': {:?}", item))
            })?;
            entries.insert(station.trim().to_string(), values.trim().to_string());
        }

        Ok(entries)
    }

    /// Differences ordered by station name
    pub fn compare(&self, first: &str, second: &str) -> Result<Vec<Difference>> {
        let first = self.parse(first)?;
        let mut second = self.parse(second)?;
        let mut differences = Vec::new();

        for (station, first_values) in first {
            match second.remove(&station) {
                None => differences.push(Difference::MissingInSecond {
                    station,
                    first: first_values,
                }),
                Some(second_values) if second_values != first_values => {
                    differences.push(Difference::Mismatch {
                        station,
                        first: first_values,
                        second: second_values,
                    })
                }
                Some(_) => {}
            }
        }

        for (station, second_values) in second {
            differences.push(Difference::MissingInFirst {
                station,
                second: second_values,
            });
        }

        differences.sort_by(|a, b| a.station().cmp(b.station()));
        Ok(differences)
    }

    pub fn compare_files(&self, first: &Path, second: &Path) -> Result<Vec<Difference>> {
        let first = std::fs::read_to_string(first)?;
        let second = std::fs::read_to_string(second)?;
        self.compare(&first, &second)
    }
}

impl Default for OutputComparator {
    fn default() -> Self {
        Self::new()
    }
}
