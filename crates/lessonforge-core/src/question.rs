//! Question extraction from generated text.
//!
//! Model output rarely honours the requested format exactly, so extraction
//! runs an ordered list of segmentation strategies and keeps the first one
//! that yields at least one valid question. Blocks that cannot be parsed are
//! dropped and recorded, never treated as fatal.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::model::{OptionLetter, QuestionSet};
use crate::segment::{segment, RawBlock, SegmentMode};
use crate::validate::{BlockDrop, DropReason, QuestionSetValidator};

/// Identifies which strategy produced a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Numbered-marker segmentation with index-prefixed question text.
    Primary,
    /// Blank-line segmentation, used when the primary strategy finds nothing.
    Fallback,
}

/// One way of turning raw text into candidate questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub mode: SegmentMode,
    /// Prefix each question's text with `"{index}. "`.
    pub prefix_index: bool,
}

/// Strategies in the order they are tried.
pub const DEFAULT_STRATEGIES: [Strategy; 2] = [
    Strategy {
        kind: StrategyKind::Primary,
        mode: SegmentMode::Numbered,
        prefix_index: true,
    },
    Strategy {
        kind: StrategyKind::Fallback,
        mode: SegmentMode::BlankLine,
        prefix_index: false,
    },
];

/// A block that carried a usable answer line, before set-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the source block within its segmentation run.
    pub position: usize,
    /// Non-blank lines before the answer line, newline joined, indentation kept.
    pub body: String,
    pub correct_letter: OptionLetter,
}

/// Result of parsing a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Parsed(Candidate),
    Missed(DropReason),
}

/// Returns the text after `Answer:` if `line` is an answer line.
///
/// Matching ignores case, surrounding whitespace, and markdown emphasis
/// (`**Answer:** C`).
fn answer_value(line: &str) -> Option<&str> {
    let line = line.trim().trim_start_matches(['*', '_']);
    let prefix = line.get(..7)?;
    if !prefix.eq_ignore_ascii_case("answer:") {
        return None;
    }
    Some(&line[7..])
}

/// Parse the value of an answer line into a letter. `C`, `c`, `C.`, and `**C**` are accepted.
fn parse_answer_letter(value: &str) -> Option<OptionLetter> {
    let value = value
        .trim()
        .trim_matches(['*', '_'])
        .trim_end_matches(['.', ')']);
    value.parse().ok()
}

/// Extract the answer key and question body from one block.
pub fn parse_block(block: &RawBlock<'_>) -> BlockOutcome {
    // Lines keep their indentation; blank lines are skipped.
    let lines: Vec<&str> = block
        .text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((answer_at, value)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| answer_value(line).map(|v| (i, v)))
    else {
        return BlockOutcome::Missed(DropReason::MissingAnswerLine);
    };

    let Some(correct_letter) = parse_answer_letter(value) else {
        return BlockOutcome::Missed(DropReason::InvalidAnswerLetter(value.trim().to_string()));
    };

    BlockOutcome::Parsed(Candidate {
        position: block.position,
        body: lines[..answer_at].join("\n"),
        correct_letter,
    })
}

/// Runs the strategy list over raw text and validates the result.
#[derive(Debug, Clone)]
pub struct QuestionParser {
    strategies: Vec<Strategy>,
    validator: QuestionSetValidator,
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new(DEFAULT_STRATEGIES.to_vec(), QuestionSetValidator::default())
    }
}

impl QuestionParser {
    pub fn new(strategies: Vec<Strategy>, validator: QuestionSetValidator) -> Self {
        Self {
            strategies,
            validator,
        }
    }

    /// Extract questions, trying each strategy until one yields a non-empty set.
    pub fn parse(&self, raw: &str) -> Result<QuestionSet, ExtractionError> {
        let mut dropped = Vec::new();

        for (attempt, strategy) in self.strategies.iter().enumerate() {
            if attempt > 0 {
                tracing::info!(
                    "no questions from previous strategy, trying {:?} segmentation",
                    strategy.mode
                );
            }

            let mut candidates = Vec::new();
            for block in segment(raw, strategy.mode) {
                match parse_block(&block) {
                    BlockOutcome::Parsed(candidate) => candidates.push(candidate),
                    BlockOutcome::Missed(reason) => {
                        tracing::debug!(
                            "dropping block {} ({:?}): {}",
                            block.position,
                            strategy.kind,
                            reason
                        );
                        dropped.push(BlockDrop {
                            strategy: strategy.kind,
                            position: block.position,
                            reason,
                        });
                    }
                }
            }

            let questions = self.validator.finalize(strategy, candidates, &mut dropped);
            if !questions.is_empty() {
                tracing::debug!(
                    "parsed {} question(s) with {:?} strategy, {} block(s) dropped",
                    questions.len(),
                    strategy.kind,
                    dropped.len()
                );
                return Ok(QuestionSet {
                    questions,
                    strategy: strategy.kind,
                    dropped,
                });
            }
        }

        Err(ExtractionError::NoQuestionsParsed { dropped })
    }
}

/// Extract questions with the default strategies and validation.
pub fn parse_questions(raw: &str) -> Result<QuestionSet, ExtractionError> {
    QuestionParser::default().parse(raw)
}
