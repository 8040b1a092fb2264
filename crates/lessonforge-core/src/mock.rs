//! Mock generator for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::generator::TextGenerator;

/// A scripted [`TextGenerator`] for exercising the engine without a real model.
///
/// Queued responses are served first, in order. After that, the first
/// prompt-substring match wins, then the default response.
pub struct MockGenerator {
    /// Map of prompt substring → response text.
    responses: HashMap<String, String>,
    /// One-shot responses served before anything else; `Err` simulates a failure.
    script: Mutex<VecDeque<Result<String, String>>>,
    /// Default response if nothing else applies.
    default_response: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last prompt received.
    last_prompt: Mutex<Option<String>>,
}

impl MockGenerator {
    /// Create a mock with the given prompt→response mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            script: Mutex::new(VecDeque::new()),
            default_response: String::new(),
            call_count: AtomicU32::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same text.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock that serves `script` in order, then `fallback` forever.
    pub fn with_script(script: Vec<Result<String, String>>, fallback: &str) -> Self {
        Self {
            script: Mutex::new(script.into()),
            default_response: fallback.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Get the number of calls made to this generator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last prompt sent to this generator.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_prompt.lock().unwrap_or_else(|e| e.into_inner()) = Some(prompt.to_string());

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(next) = scripted {
            return next.map_err(|message| anyhow::anyhow!(message));
        }

        let text = self
            .responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_response() {
        let generator = MockGenerator::with_fixed_response("1. Q?\nAnswer: A");
        let text = generator.generate("anything").await.unwrap();
        assert_eq!(text, "1. Q?\nAnswer: A");
        assert_eq!(generator.call_count(), 1);
        assert_eq!(generator.last_prompt().as_deref(), Some("anything"));
    }

    #[tokio::test]
    async fn prompt_matching() {
        let mut responses = HashMap::new();
        responses.insert("multiple choice".to_string(), "quiz text".to_string());
        responses.insert("presentation".to_string(), "slide text".to_string());
        let generator = MockGenerator::new(responses);

        let quiz = generator.generate("Generate 5 multiple choice questions").await.unwrap();
        assert_eq!(quiz, "quiz text");
        let slides = generator.generate("Create a presentation").await.unwrap();
        assert_eq!(slides, "slide text");
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn script_then_fallback() {
        let generator = MockGenerator::with_script(
            vec![Err("service unavailable".into()), Ok("first".into())],
            "later",
        );
        let err = generator.generate("p").await.unwrap_err();
        assert!(err.to_string().contains("service unavailable"));
        assert_eq!(generator.generate("p").await.unwrap(), "first");
        assert_eq!(generator.generate("p").await.unwrap(), "later");
        assert_eq!(generator.call_count(), 3);
    }
}
