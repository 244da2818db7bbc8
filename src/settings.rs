use crate::error::Result;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, ENV_PREFIX, MIN_BUFFER_SIZE};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Runtime settings for a processing run.
///
/// Layered as defaults, then an optional config file, then `BRC_*`
/// environment variables. CLI flags are applied on top by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ProcessorConfig {
    #[validate(range(min = 1))]
    pub workers: usize,

    #[validate(range(min = MIN_BUFFER_SIZE))]
    pub buffer_size: usize,

    pub use_mmap: bool,

    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            use_mmap: false,
            show_progress: true,
        }
    }
}

impl ProcessorConfig {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(config_file: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("workers", defaults.workers as i64)?
            .set_default("buffer_size", defaults.buffer_size as i64)?
            .set_default("use_mmap", defaults.use_mmap)?
            .set_default("show_progress", defaults.show_progress)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}
