pub mod parallel_processor;
pub mod reference_processor;
pub mod result_merger;
pub mod worker_pool;

pub use parallel_processor::{ParallelProcessor, PipelineOutput, RunSummary};
pub use reference_processor::ReferenceProcessor;
pub use result_merger::ResultMerger;
pub use worker_pool::WorkerPool;
