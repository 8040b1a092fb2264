//! The `lessonforge generate` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use lessonforge_core::config::load_config_from;
use lessonforge_core::engine::{EngineConfig, LessonEngine};

use crate::commands::{quiz::print_quiz, slides::print_deck};
use crate::external::CommandGenerator;
use crate::Kind;

pub async fn execute(
    kind: Kind,
    topic: String,
    command: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let generator = Arc::new(CommandGenerator::new(
        command,
        Duration::from_secs(config.generation_timeout_secs),
    ));
    let engine = LessonEngine::new(generator, EngineConfig::from(&config));

    tracing::info!(
        "generating {:?} about '{}' (up to {} attempt(s))",
        kind,
        topic,
        engine.config().max_generation_attempts
    );

    match kind {
        Kind::Quiz => {
            let set = engine.generate_quiz(&topic).await?;
            if let Some(path) = &output {
                set.save_json(path)?;
                eprintln!("Quiz saved to {}", path.display());
            }
            print_quiz(&set);
        }
        Kind::Slides => {
            let deck = engine.generate_deck(&topic).await?;
            if let Some(path) = &output {
                let json = serde_json::to_string_pretty(&deck)?;
                std::fs::write(path, json)
                    .with_context(|| format!("failed to write deck to {}", path.display()))?;
                eprintln!("Deck saved to {}", path.display());
            }
            print_deck(&deck);
        }
    }

    Ok(())
}
