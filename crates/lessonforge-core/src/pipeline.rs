//! One entry point for the synchronous extraction and scoring steps.

use crate::error::{ExtractionError, SubmissionError};
use crate::model::{AnswerSubmission, Deck, QuestionSet, ScoreResult};
use crate::question::{QuestionParser, DEFAULT_STRATEGIES};
use crate::scoring;
use crate::slides;
use crate::validate::QuestionSetValidator;

/// Parses generated text and scores learner answers.
///
/// Holds no state between calls; every method is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    parser: QuestionParser,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom validator with the default strategy list.
    pub fn with_validator(validator: QuestionSetValidator) -> Self {
        Self {
            parser: QuestionParser::new(DEFAULT_STRATEGIES.to_vec(), validator),
        }
    }

    pub fn parse_questions(&self, raw: &str) -> Result<QuestionSet, ExtractionError> {
        self.parser.parse(raw)
    }

    pub fn parse_slides(&self, raw: &str, topic: &str) -> Deck {
        slides::parse_slides(raw, topic)
    }

    pub fn collect_submission<S: AsRef<str>>(
        &self,
        set: &QuestionSet,
        raw_answers: &[S],
    ) -> Result<Vec<AnswerSubmission>, SubmissionError> {
        scoring::collect_submission(set, raw_answers)
    }

    pub fn score(&self, set: &QuestionSet, submission: &[AnswerSubmission]) -> ScoreResult {
        scoring::score(set, submission)
    }

    /// Validate raw answers and score them in one step.
    pub fn grade<S: AsRef<str>>(
        &self,
        set: &QuestionSet,
        raw_answers: &[S],
    ) -> Result<ScoreResult, SubmissionError> {
        let submission = self.collect_submission(set, raw_answers)?;
        Ok(self.score(set, &submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionLetter;
    use crate::scoring::Grade;

    #[test]
    fn quiz_round_trip() {
        let pipeline = Pipeline::new();
        let set = pipeline
            .parse_questions("1. Sky colour?\nA. Green\nB. Blue\nAnswer: B\n\n2. Grass colour?\nA. Green\nB. Blue\nAnswer: A")
            .unwrap();
        let result = pipeline.grade(&set, &["b", "a"]).unwrap();
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.grade(), Grade::Perfect);
    }

    #[test]
    fn grade_rejects_before_scoring() {
        let pipeline = Pipeline::new();
        let set = pipeline.parse_questions("1. Q?\nA. x\nAnswer: A").unwrap();
        assert_eq!(
            pipeline.grade(&set, &["Z"]),
            Err(SubmissionError::InvalidAnswerLetter {
                question_index: 1,
                value: "Z".into()
            })
        );
    }

    #[test]
    fn unlisted_answers_are_kept_unless_strict() {
        let raw = "1. Pick one\nA. x\nB. y\nAnswer: D";
        let set = Pipeline::new().parse_questions(raw).unwrap();
        assert_eq!(set.answer_key(), vec![OptionLetter::D]);

        let strict = Pipeline::with_validator(QuestionSetValidator::strict());
        assert!(strict.parse_questions(raw).is_err());
    }

    #[test]
    fn slides_via_pipeline() {
        let deck = Pipeline::new().parse_slides("Intro\n- hello", "Birds");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides()[0].title, "🌟 Intro");
    }
}
