//! Lesson engine orchestrator.
//!
//! Drives a [`TextGenerator`] through prompt, generation and extraction, with
//! retries when the generator fails or its output yields no questions.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::LessonforgeConfig;
use crate::error::ExtractionError;
use crate::generator::{quiz_prompt, slides_prompt, strip_markdown_fences, TextGenerator};
use crate::model::{Deck, QuestionSet};
use crate::question::QuestionParser;
use crate::slides::parse_slides;

/// Upper bound on the delay between two attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Configuration for the lesson engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Total generation attempts per request, including the first.
    pub max_generation_attempts: u32,
    /// Delay before the first retry; doubled after each retry.
    pub retry_delay: Duration,
    /// Questions requested per quiz.
    pub question_count: usize,
    /// Audience named in the prompts.
    pub audience: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&LessonforgeConfig::default())
    }
}

impl From<&LessonforgeConfig> for EngineConfig {
    fn from(config: &LessonforgeConfig) -> Self {
        Self {
            max_generation_attempts: config.max_generation_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            question_count: config.question_count,
            audience: config.audience.clone(),
        }
    }
}

/// Generates quizzes and slide decks for a topic.
pub struct LessonEngine {
    generator: Arc<dyn TextGenerator>,
    parser: QuestionParser,
    config: EngineConfig,
}

impl LessonEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, config: EngineConfig) -> Self {
        Self {
            generator,
            parser: QuestionParser::default(),
            config,
        }
    }

    /// Replace the question parser (e.g. with a strict validator).
    pub fn with_parser(mut self, parser: QuestionParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate and extract a quiz for `topic`.
    ///
    /// Generator errors and outputs with no parseable question are retried up
    /// to the configured attempt count. The last failure is returned.
    pub async fn generate_quiz(&self, topic: &str) -> Result<QuestionSet> {
        let prompt = quiz_prompt(topic, self.config.question_count, &self.config.audience);
        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;

        for attempt in 1..=self.config.max_generation_attempts {
            if attempt > 1 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }

            let raw = match self.generator.generate(&prompt).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(
                        "{} failed on attempt {}/{}: {e:#}",
                        self.generator.name(),
                        attempt,
                        self.config.max_generation_attempts
                    );
                    last_error = Some(e);
                    continue;
                }
            };

            match self.parser.parse(&strip_markdown_fences(&raw)) {
                Ok(set) => {
                    if set.len() != self.config.question_count {
                        tracing::info!(
                            "asked for {} question(s), extracted {}",
                            self.config.question_count,
                            set.len()
                        );
                    }
                    return Ok(set);
                }
                Err(e @ ExtractionError::NoQuestionsParsed { .. }) => {
                    tracing::warn!(
                        "attempt {}/{} for '{}': {}",
                        attempt,
                        self.config.max_generation_attempts,
                        topic,
                        e
                    );
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("no generation attempts configured"))
            .context(format!("failed to generate a quiz about '{topic}'")))
    }

    /// Generate a slide deck for `topic`.
    ///
    /// Extraction cannot fail, so only generator errors are retried.
    pub async fn generate_deck(&self, topic: &str) -> Result<Deck> {
        let prompt = slides_prompt(topic, &self.config.audience);
        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;

        for attempt in 1..=self.config.max_generation_attempts {
            if attempt > 1 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }

            match self.generator.generate(&prompt).await {
                Ok(raw) => return Ok(parse_slides(&strip_markdown_fences(&raw), topic)),
                Err(e) => {
                    tracing::warn!(
                        "{} failed on attempt {}/{}: {e:#}",
                        self.generator.name(),
                        attempt,
                        self.config.max_generation_attempts
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("no generation attempts configured"))
            .context(format!("failed to generate slides about '{topic}'")))
    }
}
