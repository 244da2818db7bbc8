pub mod chunk_planner;
pub mod chunk_processor;

pub use chunk_planner::ChunkPlanner;
pub use chunk_processor::{ChunkProcessor, ChunkResult};
