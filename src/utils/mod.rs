pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use filename::generate_default_output_filename;
pub use logging::init_logging;
pub use progress::ProgressReporter;
