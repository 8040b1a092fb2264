//! The seam to the generative text service, and the prompts sent through it.
//!
//! lessonforge does no network I/O itself. Callers supply a [`TextGenerator`]
//! and the core only ever sees the text it returns.

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Text generator trait
// ---------------------------------------------------------------------------

/// A backend that turns a prompt into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable generator name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate text for a prompt.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Prompt asking for `count` multiple-choice questions in the parseable format.
pub fn quiz_prompt(topic: &str, count: usize, audience: &str) -> String {
    format!(
        r#"Generate {count} multiple choice questions for {audience} on the topic of "{topic}". Each question must follow this exact format:

1. What is 2 + 2?
A. 2
B. 3
C. 4
D. 5
Answer: C

Repeat for all {count} questions."#
    )
}

/// Prompt asking for a short paragraph-per-slide presentation.
pub fn slides_prompt(topic: &str, audience: &str) -> String {
    format!(
        r#"Create an engaging educational presentation about "{topic}" for {audience}. Generate exactly 4-5 slides with:
- Slide 1: Introduction with a fun hook
- Slides 2-4: Core concepts broken down simply
- Final slide: Fun summary or conclusion
Format each slide with:
- A catchy, emoji-enhanced title
- 3-4 clear bullet points
- Simple language appropriate for {audience}
Separate slides with a blank line.
Make it educational but exciting!"#
    )
}

// ---------------------------------------------------------------------------
// Markdown fence stripping
// ---------------------------------------------------------------------------

/// Unwrap text that a model returned inside markdown code fences.
///
/// Handles:
/// - One or more fenced blocks (contents joined with a blank line)
/// - A truncated, unclosed fence
/// - No fences at all (returned as-is)
pub fn strip_markdown_fences(response: &str) -> String {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            if in_block {
                blocks.push(std::mem::take(&mut current_block));
            }
            in_block = !in_block;
            continue;
        }

        if in_block {
            if !current_block.is_empty() {
                current_block.push('\n');
            }
            current_block.push_str(line);
        }
    }

    // Truncated (unclosed) fence: keep what was accumulated
    if in_block && !current_block.is_empty() {
        blocks.push(current_block);
    }

    let blocks: Vec<String> = blocks.into_iter().filter(|b| !b.trim().is_empty()).collect();
    if blocks.is_empty() {
        return response.to_string();
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_prompt_carries_format_example() {
        let prompt = quiz_prompt("Volcanoes", 5, "children");
        assert!(prompt.contains("Generate 5 multiple choice questions for children"));
        assert!(prompt.contains("\"Volcanoes\""));
        assert!(prompt.contains("Answer: C"));
        assert!(prompt.ends_with("Repeat for all 5 questions."));
    }

    #[test]
    fn slides_prompt_mentions_topic_and_audience() {
        let prompt = slides_prompt("Space", "primary school students");
        assert!(prompt.contains("about \"Space\" for primary school students"));
        assert!(prompt.contains("blank line"));
    }

    #[test]
    fn strips_single_fence() {
        let input = "Here you go:\n\n```\n1. Q?\nAnswer: A\n```\nEnjoy!";
        assert_eq!(strip_markdown_fences(input), "1. Q?\nAnswer: A");
    }

    #[test]
    fn strips_language_tagged_fence() {
        let input = "```text\nSlide one\n- point\n```";
        assert_eq!(strip_markdown_fences(input), "Slide one\n- point");
    }

    #[test]
    fn joins_multiple_fences() {
        let input = "```\n1. A?\nAnswer: A\n```\n\n```\n2. B?\nAnswer: B\n```";
        assert_eq!(
            strip_markdown_fences(input),
            "1. A?\nAnswer: A\n\n2. B?\nAnswer: B"
        );
    }

    #[test]
    fn unfenced_text_is_unchanged() {
        let input = "1. Q?\nA. x\nAnswer: A";
        assert_eq!(strip_markdown_fences(input), input);
    }

    #[test]
    fn keeps_truncated_fence() {
        let input = "```\n1. Q?\nAnswer: A";
        assert_eq!(strip_markdown_fences(input), "1. Q?\nAnswer: A");
    }

    #[test]
    fn empty_fence_falls_back_to_raw() {
        let input = "```\n```\nplain text";
        assert_eq!(strip_markdown_fences(input), input);
    }
}
