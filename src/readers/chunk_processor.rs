use crate::error::{ProcessingError, Result};
use crate::models::{accumulate, parse_line, ChunkDescriptor, ChunkSummary, ParsedLine, StationMap};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, LINE_TERMINATOR};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// Partial statistics for one chunk, owned by the worker that produced them.
#[derive(Debug, Default)]
pub struct ChunkResult {
    pub stations: StationMap,
    pub summary: ChunkSummary,
}

/// Scans a single chunk of a measurements file.
///
/// Each call opens its own handle on the source file, so instances can be
/// shared freely between workers.
#[derive(Debug, Clone)]
pub struct ChunkProcessor {
    buffer_size: usize,
    use_mmap: bool,
}

impl ChunkProcessor {
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            use_mmap: false,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Accumulate per-station statistics for every record inside `chunk`.
    ///
    /// Lines without a separator are skipped and counted. A value that is not
    /// a decimal aborts the scan with [`ProcessingError::MalformedValue`].
    pub fn process(&self, chunk: &ChunkDescriptor) -> Result<ChunkResult> {
        let result = if self.use_mmap {
            self.process_mmap(chunk)?
        } else {
            self.process_buffered(chunk)?
        };

        if result.summary.skipped > 0 {
            warn!(
                path = %chunk.path().display(),
                start = chunk.start_offset,
                skipped = result.summary.skipped,
                "Skipped lines without a separator"
            );
        }
        debug!(
            start = chunk.start_offset,
            end = chunk.end_offset,
            lines = result.summary.lines,
            stations = result.stations.len(),
            "Chunk processed"
        );

        Ok(result)
    }

    /// Read the chunk through a buffered reader limited to the chunk length
    fn process_buffered(&self, chunk: &ChunkDescriptor) -> Result<ChunkResult> {
        let mut file = File::open(chunk.path())?;
        file.seek(SeekFrom::Start(chunk.start_offset))?;
        let mut reader = BufReader::with_capacity(self.buffer_size, file).take(chunk.len());

        let mut result = ChunkResult::default();
        let mut line = Vec::with_capacity(128);
        let mut offset = chunk.start_offset;

        loop {
            line.clear();
            let read = reader.read_until(LINE_TERMINATOR, &mut line)?;
            if read == 0 {
                break;
            }
            scan_line(chunk, &mut result, &line, offset)?;
            offset += read as u64;
        }

        Ok(result)
    }

    /// Read the chunk from a private memory map of the whole file
    fn process_mmap(&self, chunk: &ChunkDescriptor) -> Result<ChunkResult> {
        let mut result = ChunkResult::default();
        if chunk.is_empty() {
            return Ok(result);
        }

        let file = File::open(chunk.path())?;
        let mmap = unsafe { Mmap::map(&file)? };

        let bytes = usize::try_from(chunk.start_offset)
            .ok()
            .zip(usize::try_from(chunk.end_offset).ok())
            .and_then(|(start, end)| mmap.get(start..end))
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Chunk {}..{} lies outside {} ({} bytes)",
                    chunk.start_offset,
                    chunk.end_offset,
                    chunk.path().display(),
                    mmap.len()
                ))
            })?;

        let mut offset = chunk.start_offset;
        for line in bytes.split_inclusive(|&b| b == LINE_TERMINATOR) {
            scan_line(chunk, &mut result, line, offset)?;
            offset += line.len() as u64;
        }

        Ok(result)
    }
}

impl Default for ChunkProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn scan_line(
    chunk: &ChunkDescriptor,
    result: &mut ChunkResult,
    line: &[u8],
    offset: u64,
) -> Result<()> {
    result.summary.lines += 1;

    match parse_line(line) {
        ParsedLine::Reading { station, tenths } => {
            accumulate(&mut result.stations, station, tenths);
            Ok(())
        }
        ParsedLine::MissingSeparator => {
            result.summary.skipped += 1;
            debug!(offset, "Line has no separator, skipping");
            Ok(())
        }
        ParsedLine::MalformedValue(value) => Err(ProcessingError::MalformedValue {
            path: chunk.path().to_path_buf(),
            offset,
            value: String::from_utf8_lossy(value).into_owned(),
        }),
    }
}
