use anyhow::{bail, Context, Result};
use std::fs;

pub struct LogLoader;

impl LogLoader {
    /// Read a backtrace log into memory, refusing files larger than
    /// `max_bytes`. The size cap runs before the core ever sees the text.
    pub fn load(path: &str, max_bytes: u64) -> Result<String> {
        let meta =
            fs::metadata(path).with_context(|| format!("Failed to stat log file {}", path))?;
        if meta.len() > max_bytes {
            bail!(
                "Log file {} is {} bytes, over the {} byte limit",
                path,
                meta.len(),
                max_bytes
            );
        }
        fs::read_to_string(path).with_context(|| format!("Failed to read log file {}", path))
    }
}
