//! Reading raw model output from a file or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the whole of `path`, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
