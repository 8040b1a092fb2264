//! Error types for extraction and answer submission.
//!
//! Per-block parse misses are not errors; they are recorded as
//! [`BlockDrop`] diagnostics. Only set-level and submission-level failures
//! surface here.

use thiserror::Error;

use crate::validate::BlockDrop;

/// Failure to extract a usable question set from generated text.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// Every segmentation strategy produced zero usable questions.
    #[error("no questions could be parsed ({} block(s) dropped)", .dropped.len())]
    NoQuestionsParsed { dropped: Vec<BlockDrop> },
}

impl ExtractionError {
    /// Diagnostics for every block that was discarded.
    pub fn dropped(&self) -> &[BlockDrop] {
        match self {
            ExtractionError::NoQuestionsParsed { dropped } => dropped,
        }
    }
}

/// A learner submission rejected before it reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Not every question has exactly one answer. `answered` counts the
    /// answers supplied, or the non-blank ones when the count itself matches.
    #[error("incomplete submission: expected {expected} answers, got {answered}")]
    IncompleteSubmission { expected: usize, answered: usize },

    /// An answer outside A-D.
    #[error("invalid answer for question {question_index}: '{value}' (expected A, B, C, or D)")]
    InvalidAnswerLetter { question_index: usize, value: String },
}
