pub mod chunk;
pub mod measurement;
pub mod station_stats;

pub use chunk::{ChunkDescriptor, ChunkSummary};
pub use measurement::{parse_fixed_point, parse_line, ParsedLine};
pub use station_stats::{accumulate, StationMap, StationStats};
