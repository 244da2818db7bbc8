use std::path::{Path, PathBuf};

/// A line-aligned byte range `[start_offset, end_offset)` of a measurements file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDescriptor {
    pub source_path: PathBuf,
    pub start_offset: u64,
    pub end_offset: u64,
}

impl ChunkDescriptor {
    pub fn new(source_path: impl Into<PathBuf>, start_offset: u64, end_offset: u64) -> Self {
        debug_assert!(end_offset >= start_offset);
        Self {
            source_path: source_path.into(),
            start_offset,
            end_offset,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source_path
    }

    pub fn len(&self) -> u64 {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

/// Line counters reported by a single chunk scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkSummary {
    pub lines: u64,
    pub skipped: u64,
}

impl ChunkSummary {
    pub fn absorb(&mut self, other: &ChunkSummary) {
        self.lines += other.lines;
        self.skipped += other.skipped;
    }
}
