use crate::error::Result;
use crate::models::{ChunkDescriptor, ChunkSummary, StationMap};
use crate::processors::{ResultMerger, WorkerPool};
use crate::readers::{ChunkPlanner, ChunkProcessor};
use crate::settings::ProcessorConfig;
use crate::utils::progress::ProgressReporter;
use crate::writers::OutputFormatter;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Merged statistics for a whole file plus run counters.
#[derive(Debug)]
pub struct PipelineOutput {
    pub stations: StationMap,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub chunks: usize,
    pub workers: usize,
    pub lines: u64,
    pub skipped_lines: u64,
    pub stations: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Run Summary ===\n");
        summary.push_str(&format!("Workers: {}\n", self.workers));
        summary.push_str(&format!("Chunks: {}\n", self.chunks));
        summary.push_str(&format!("Lines: {}\n", self.lines));
        summary.push_str(&format!("Skipped Lines: {}\n", self.skipped_lines));
        summary.push_str(&format!("Stations: {}\n", self.stations));
        summary.push_str(&format!("Elapsed: {:.3}s", self.elapsed.as_secs_f64()));

        summary
    }
}

/// Plan → scan chunks in parallel → merge.
pub struct ParallelProcessor {
    max_workers: usize,
    available_parallelism: usize,
    chunk_processor: ChunkProcessor,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            available_parallelism: num_cpus::get(),
            chunk_processor: ChunkProcessor::new(),
        }
    }

    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self::new(config.workers)
            .with_buffer_size(config.buffer_size)
            .with_mmap(config.use_mmap)
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.chunk_processor = self.chunk_processor.with_buffer_size(buffer_size);
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.chunk_processor = self.chunk_processor.with_mmap(use_mmap);
        self
    }

    /// Override the detected hardware parallelism that caps the worker count
    pub fn with_available_parallelism(mut self, available_parallelism: usize) -> Self {
        self.available_parallelism = available_parallelism;
        self
    }

    /// Compute merged per-station statistics for `path`.
    ///
    /// Any failing chunk fails the whole run; partial results are never returned.
    pub fn process_file(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        let started = Instant::now();

        let planner = ChunkPlanner::new(self.max_workers)
            .with_available_parallelism(self.available_parallelism);
        let chunks = planner.plan(path)?;
        let chunk_count = chunks.len();

        if let Some(p) = progress {
            p.set_total(chunk_count as u64);
            p.set_message(&format!("Scanning {} chunks...", chunk_count));
        }

        let pool = WorkerPool::new(planner.worker_count());
        info!(
            workers = pool.workers(),
            chunks = chunk_count,
            "Dispatching chunks"
        );

        let partials = pool.run(chunks, |chunk: ChunkDescriptor| {
            let result = self.chunk_processor.process(&chunk);
            if let Some(p) = progress {
                p.increment(1);
            }
            result
        })?;

        if let Some(p) = progress {
            p.set_message("Merging partial results...");
        }

        let mut totals = ChunkSummary::default();
        let mut partial_maps = Vec::with_capacity(partials.len());
        for partial in partials {
            totals.absorb(&partial.summary);
            partial_maps.push(partial.stations);
        }

        let stations = ResultMerger::new().merge(partial_maps);

        let summary = RunSummary {
            chunks: chunk_count,
            workers: pool.workers(),
            lines: totals.lines,
            skipped_lines: totals.skipped,
            stations: stations.len(),
            elapsed: started.elapsed(),
        };

        info!(
            stations = summary.stations,
            lines = summary.lines,
            skipped = summary.skipped_lines,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Merged partial results"
        );

        if let Some(p) = progress {
            p.finish_with_message(&format!("Processed {} chunks", chunk_count));
        }

        Ok(PipelineOutput { stations, summary })
    }

    /// Run the full pipeline and render the canonical output line
    pub fn run(&self, path: &Path) -> Result<String> {
        let output = self.process_file(path, None)?;
        Ok(OutputFormatter::new().format(&output.stations))
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
