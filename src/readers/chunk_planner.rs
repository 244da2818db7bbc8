use crate::error::Result;
use crate::models::ChunkDescriptor;
use crate::utils::constants::{LINE_TERMINATOR, PLANNER_SCAN_WINDOW};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, info};

/// Splits a measurements file into line-aligned byte ranges, one per worker.
pub struct ChunkPlanner {
    requested_workers: usize,
    available_parallelism: usize,
}

impl ChunkPlanner {
    pub fn new(requested_workers: usize) -> Self {
        Self {
            requested_workers,
            available_parallelism: num_cpus::get(),
        }
    }

    pub fn with_available_parallelism(mut self, available_parallelism: usize) -> Self {
        self.available_parallelism = available_parallelism;
        self
    }

    /// Effective worker count: the request capped by hardware parallelism, never zero.
    pub fn worker_count(&self) -> usize {
        self.requested_workers
            .max(1)
            .min(self.available_parallelism.max(1))
    }

    /// Plan the chunks for `path`.
    ///
    /// The returned ranges are contiguous, ordered and cover `[0, file_size)`.
    /// Every range starts at offset 0 or right after a line terminator, so no
    /// record is ever split between two workers. There are at most
    /// [`worker_count`](Self::worker_count) ranges and at least one for a
    /// non-empty file; an empty file yields none.
    pub fn plan(&self, path: &Path) -> Result<Vec<ChunkDescriptor>> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let workers = self.worker_count() as u64;

        if file_size == 0 {
            info!(path = %path.display(), "Input file is empty, nothing to plan");
            return Ok(Vec::new());
        }

        let nominal_size = file_size / workers;
        let mut aligner = LineAligner::new(file, file_size);
        let mut boundaries = vec![0u64];

        for index in 1..workers {
            let previous = boundaries[boundaries.len() - 1];
            let mut boundary = aligner.align_backward(index * nominal_size, previous)?;

            // Backing up landed on the previous boundary: take the next line instead
            if boundary <= previous {
                boundary = aligner.next_line_start(previous)?;
            }

            if boundary >= file_size {
                break;
            }
            debug!(index, nominal = index * nominal_size, boundary, "Placed chunk boundary");
            boundaries.push(boundary);
        }
        boundaries.push(file_size);

        let chunks: Vec<ChunkDescriptor> = boundaries
            .windows(2)
            .map(|pair| ChunkDescriptor::new(path, pair[0], pair[1]))
            .collect();

        info!(
            path = %path.display(),
            file_size,
            workers,
            chunks = chunks.len(),
            "Planned chunks"
        );

        Ok(chunks)
    }
}

impl Default for ChunkPlanner {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

/// Finds line starts around arbitrary offsets by reading small windows of the file.
struct LineAligner {
    file: File,
    file_size: u64,
    window: Vec<u8>,
}

impl LineAligner {
    fn new(file: File, file_size: u64) -> Self {
        Self {
            file,
            file_size,
            window: vec![0; PLANNER_SCAN_WINDOW],
        }
    }

    /// Largest line start in `(floor, position]`, or `floor` when there is none.
    /// `floor` must itself be a line start.
    fn align_backward(&mut self, position: u64, floor: u64) -> Result<u64> {
        let mut end = position.min(self.file_size);

        while end > floor {
            let start = end.saturating_sub(PLANNER_SCAN_WINDOW as u64).max(floor);
            let bytes = self.read_range(start, end)?;

            if let Some(index) = bytes.iter().rposition(|&b| b == LINE_TERMINATOR) {
                return Ok(start + index as u64 + 1);
            }
            end = start;
        }

        Ok(floor)
    }

    /// Start of the line following the one that contains `position`, or the
    /// file size when that line is the last one.
    fn next_line_start(&mut self, position: u64) -> Result<u64> {
        let mut start = position;

        while start < self.file_size {
            let end = (start + PLANNER_SCAN_WINDOW as u64).min(self.file_size);
            let bytes = self.read_range(start, end)?;

            if let Some(index) = bytes.iter().position(|&b| b == LINE_TERMINATOR) {
                return Ok(start + index as u64 + 1);
            }
            start = end;
        }

        Ok(self.file_size)
    }

    fn read_range(&mut self, start: u64, end: u64) -> Result<&[u8]> {
        let len = (end - start) as usize;
        self.file.seek(SeekFrom::Start(start))?;
        self.file.read_exact(&mut self.window[..len])?;
        Ok(&self.window[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_input(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn assert_partition(contents: &[u8], chunks: &[ChunkDescriptor]) {
        let mut expected_start = 0;
        for chunk in chunks {
            assert_eq!(chunk.start_offset, expected_start, "gap or overlap in {:?}", chunks);
            assert!(chunk.end_offset > chunk.start_offset, "empty chunk in {:?}", chunks);
            if chunk.start_offset > 0 {
                assert_eq!(contents[chunk.start_offset as usize - 1], b'\n');
            }
            expected_start = chunk.end_offset;
        }
        assert_eq!(expected_start, contents.len() as u64);
    }

    fn sample_inputs() -> Vec<Vec<u8>> {
        let mut long_names = Vec::new();
        for i in 0..40 {
            long_names.extend_from_slice(format!("{};{}.{}\n", "X".repeat(i * 7 % 300 + 1), i, i % 10).as_bytes());
        }

        vec![
            b"A;1.0\n".to_vec(),
            b"A;1.0".to_vec(),
            b"A;5.0\nB;10.0\nA;3.0\n".to_vec(),
            b"A;5.0\nB;10.0\nA;3.0".to_vec(),
            b"Hamburg;12.0\nBulawayo;8.9\nPalembang;38.8\nSt. John's;15.2\nCracow;12.6\n".repeat(37),
            b"\n\n\nA;1.0\n\n".to_vec(),
            long_names,
            format!("{};1.0\nB;2.0\n", "Y".repeat(PLANNER_SCAN_WINDOW * 3)).into_bytes(),
        ]
    }

    #[test]
    fn test_chunks_partition_file_for_all_worker_counts() {
        for contents in sample_inputs() {
            let input = write_input(&contents);
            for workers in 1..=24 {
                let planner = ChunkPlanner::new(workers).with_available_parallelism(64);
                let chunks = planner.plan(input.path()).unwrap();

                assert!(!chunks.is_empty());
                assert!(chunks.len() <= workers);
                assert_partition(&contents, &chunks);
            }
        }
    }

    #[test]
    fn test_fewer_lines_than_workers() {
        let contents = b"A;5.0\nB;10.0\nA;3.0\n";
        let input = write_input(contents);

        let planner = ChunkPlanner::new(16).with_available_parallelism(16);
        let chunks = planner.plan(input.path()).unwrap();

        assert!((1..=3).contains(&chunks.len()));
        assert_partition(contents, &chunks);
    }

    #[test]
    fn test_worker_count_is_capped_by_parallelism() {
        let planner = ChunkPlanner::new(32).with_available_parallelism(4);
        assert_eq!(planner.worker_count(), 4);

        let planner = ChunkPlanner::new(0).with_available_parallelism(4);
        assert_eq!(planner.worker_count(), 1);

        let contents = b"A;1.0\n".repeat(100);
        let input = write_input(&contents);
        let chunks = ChunkPlanner::new(32)
            .with_available_parallelism(4)
            .plan(input.path())
            .unwrap();
        assert_eq!(chunks.len(), 4);
        assert_partition(&contents, &chunks);
    }

    #[test]
    fn test_single_worker_covers_whole_file() {
        let contents = b"A;5.0\nB;10.0\n";
        let input = write_input(contents);

        let chunks = ChunkPlanner::new(1).plan(input.path()).unwrap();
        assert_eq!(
            chunks,
            vec![ChunkDescriptor::new(input.path(), 0, contents.len() as u64)]
        );
    }

    #[test]
    fn test_empty_file_yields_no_chunks() {
        let input = write_input(b"");
        let chunks = ChunkPlanner::new(4)
            .with_available_parallelism(4)
            .plan(input.path())
            .unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ChunkPlanner::new(2).plan(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
