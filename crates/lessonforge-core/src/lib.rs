//! lessonforge-core: extraction, validation, and scoring of generated lessons.
//!
//! Turns free-form text from a generative model into typed quiz questions and
//! slide decks, and scores a learner's answers against the extracted key.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod mock;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod question;
pub mod report;
pub mod scoring;
pub mod segment;
pub mod slides;
pub mod validate;

pub use error::{ExtractionError, SubmissionError};
pub use model::{
    AnswerOption, AnswerSubmission, Deck, OptionLetter, Question, QuestionScore, QuestionSet,
    ScoreResult, Slide, SlideKind,
};
pub use pipeline::Pipeline;
