use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Writes a rendered result to disk atomically.
///
/// The text is staged in a temporary file next to the destination and renamed
/// into place, so a failed run never leaves a truncated output file behind.
pub struct OutputWriter;

impl OutputWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, output: &str, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(output.as_bytes())?;
        staged.write_all(b"\n")?;
        staged.flush()?;
        staged.persist(path)?;

        info!(path = %path.display(), bytes = output.len() + 1, "Output written");
        Ok(())
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}
