use crate::error::{ProcessingError, Result};
use crate::models::{accumulate, parse_line, ParsedLine, StationMap};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, LINE_TERMINATOR};
use crate::writers::OutputFormatter;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Single-threaded, single-pass aggregation used to produce oracle files.
pub struct ReferenceProcessor;

impl ReferenceProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, path: &Path) -> Result<StationMap> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut stations = StationMap::new();
        let mut line = Vec::new();
        let mut offset = 0u64;
        let mut skipped = 0u64;

        loop {
            line.clear();
            let read = reader.read_until(LINE_TERMINATOR, &mut line)?;
            if read == 0 {
                break;
            }

            match parse_line(&line) {
                ParsedLine::Reading { station, tenths } => {
                    accumulate(&mut stations, station, tenths)
                }
                ParsedLine::MissingSeparator => skipped += 1,
                ParsedLine::MalformedValue(value) => {
                    return Err(ProcessingError::MalformedValue {
                        path: path.to_path_buf(),
                        offset,
                        value: String::from_utf8_lossy(value).into_owned(),
                    })
                }
            }
            offset += read as u64;
        }

        if skipped > 0 {
            warn!(skipped, "Skipped lines without a separator");
        }
        info!(stations = stations.len(), bytes = offset, "Reference pass complete");

        Ok(stations)
    }

    pub fn run(&self, path: &Path) -> Result<String> {
        let stations = self.process(path)?;
        Ok(OutputFormatter::new().format(&stations))
    }
}

impl Default for ReferenceProcessor {
    fn default() -> Self {
        Self::new()
    }
}
