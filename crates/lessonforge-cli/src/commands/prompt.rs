//! The `lessonforge prompt` command.

use std::path::PathBuf;

use anyhow::Result;

use lessonforge_core::config::load_config_from;
use lessonforge_core::generator::{quiz_prompt, slides_prompt};

use crate::Kind;

pub fn execute(
    kind: Kind,
    topic: String,
    count: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let count = count.unwrap_or(config.question_count);
    anyhow::ensure!(count >= 1, "--count must be at least 1");

    let prompt = match kind {
        Kind::Quiz => quiz_prompt(&topic, count, &config.audience),
        Kind::Slides => slides_prompt(&topic, &config.audience),
    };
    println!("{prompt}");

    Ok(())
}
