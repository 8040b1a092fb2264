//! Question set validation and drop diagnostics.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerOption, OptionLetter, Question, QuestionSet};
use crate::options::extract_options;
use crate::question::{Candidate, Strategy, StrategyKind};

/// Why a block was discarded during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
    /// No `Answer:` line in the block.
    MissingAnswerLine,
    /// The answer line's value is not a single letter A-D.
    InvalidAnswerLetter(String),
    /// Nothing precedes the answer line.
    EmptyQuestion,
    /// The block lists options but none carries the declared answer letter.
    AnswerNotAmongOptions(OptionLetter),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingAnswerLine => write!(f, "no answer line"),
            DropReason::InvalidAnswerLetter(value) => write!(f, "invalid answer letter '{value}'"),
            DropReason::EmptyQuestion => write!(f, "empty question text"),
            DropReason::AnswerNotAmongOptions(letter) => {
                write!(f, "answer {letter} is not among the listed options")
            }
        }
    }
}

/// A discarded block, kept as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDrop {
    pub strategy: StrategyKind,
    /// Position of the block within its segmentation run.
    pub position: usize,
    pub reason: DropReason,
}

/// Checks candidates and assembles the surviving questions.
///
/// By default only an empty stem drops a candidate; option lines stay part of
/// the text and are not checked against the answer key. Use
/// [`audit_question_set`] to warn about keys missing from their options.
#[derive(Debug, Clone, Default)]
pub struct QuestionSetValidator {
    /// Drop candidates whose answer letter is missing from their own option list.
    pub require_answer_among_options: bool,
}

impl QuestionSetValidator {
    /// A validator that also drops candidates whose key is not a listed option.
    pub fn strict() -> Self {
        Self {
            require_answer_among_options: true,
        }
    }
}

impl QuestionSetValidator {
    /// Validate one candidate, returning its recovered options.
    pub fn check(&self, candidate: &Candidate) -> Result<Vec<AnswerOption>, DropReason> {
        let (stem, options) = extract_options(&candidate.body);
        if stem.is_empty() {
            return Err(DropReason::EmptyQuestion);
        }

        let answer_listed = options.iter().any(|o| o.letter == candidate.correct_letter);
        if self.require_answer_among_options && !options.is_empty() && !answer_listed {
            return Err(DropReason::AnswerNotAmongOptions(candidate.correct_letter));
        }

        Ok(options)
    }

    /// Turn the candidates of one strategy run into numbered questions.
    ///
    /// Survivors keep their order and are numbered from 1. Rejected candidates
    /// are appended to `dropped`.
    pub fn finalize(
        &self,
        strategy: &Strategy,
        candidates: Vec<Candidate>,
        dropped: &mut Vec<BlockDrop>,
    ) -> Vec<Question> {
        let mut questions = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self.check(&candidate) {
                Ok(options) => {
                    let index = questions.len() + 1;
                    let text = if strategy.prefix_index {
                        format!("{index}. {}", candidate.body)
                    } else {
                        candidate.body
                    };
                    questions.push(Question {
                        index,
                        text,
                        options,
                        correct_letter: candidate.correct_letter,
                    });
                }
                Err(reason) => {
                    tracing::debug!(
                        "rejecting block {} ({:?}): {}",
                        candidate.position,
                        strategy.kind,
                        reason
                    );
                    dropped.push(BlockDrop {
                        strategy: strategy.kind,
                        position: candidate.position,
                        reason,
                    });
                }
            }
        }

        questions
    }
}

/// A problem found when auditing a question set loaded from elsewhere.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question index (if applicable).
    pub question_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Audit a question set for broken invariants, e.g. after loading it from JSON.
pub fn audit_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            question_index: None,
            message: "question set is empty".into(),
        });
    }

    for (position, question) in set.iter().enumerate() {
        let warn = |message: String| ValidationWarning {
            question_index: Some(question.index),
            message,
        };

        if question.index != position + 1 {
            warnings.push(warn(format!(
                "question at position {} has index {}",
                position + 1,
                question.index
            )));
        }

        if question.text.trim().is_empty() {
            warnings.push(warn("question text is empty".into()));
        }

        if question.options.len() > OptionLetter::ALL.len() {
            warnings.push(warn(format!(
                "{} options listed, at most 4 allowed",
                question.options.len()
            )));
        }

        let mut seen = HashSet::new();
        for option in &question.options {
            if !seen.insert(option.letter) {
                warnings.push(warn(format!("duplicate option letter {}", option.letter)));
            }
        }

        if !question.options.is_empty() && question.option(question.correct_letter).is_none() {
            warnings.push(warn(format!(
                "answer {} is not among the listed options",
                question.correct_letter
            )));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::DEFAULT_STRATEGIES;

    fn candidate(body: &str, letter: OptionLetter) -> Candidate {
        Candidate {
            position: 1,
            body: body.into(),
            correct_letter: letter,
        }
    }

    #[test]
    fn rejects_empty_question() {
        let v = QuestionSetValidator::default();
        assert_eq!(
            v.check(&candidate("", OptionLetter::A)),
            Err(DropReason::EmptyQuestion)
        );
    }

    #[test]
    fn answer_missing_from_options_is_kept_by_default() {
        let c = candidate("Pick\nA. one\nB. two", OptionLetter::D);
        let options = QuestionSetValidator::default().check(&c).unwrap();
        assert_eq!(options.len(), 2);

        assert_eq!(
            QuestionSetValidator::strict().check(&c),
            Err(DropReason::AnswerNotAmongOptions(OptionLetter::D))
        );
    }

    #[test]
    fn inline_options_do_not_drop_the_question() {
        let c = candidate("What is 2 + 2?\nA. 2  B. 3  C. 4  D. 5", OptionLetter::C);
        assert!(QuestionSetValidator::default().check(&c).is_ok());
    }

    #[test]
    fn keeps_questions_without_options() {
        let v = QuestionSetValidator::default();
        let options = v.check(&candidate("True or false: fish swim", OptionLetter::A)).unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn finalize_numbers_survivors_and_records_drops() {
        let v = QuestionSetValidator::strict();
        let candidates = vec![
            candidate("First?\nA. x\nB. y", OptionLetter::B),
            Candidate {
                position: 2,
                ..candidate("Second?\nA. x", OptionLetter::C)
            },
            Candidate {
                position: 3,
                ..candidate("Third?\nA. x\nC. z", OptionLetter::C)
            },
        ];
        let mut dropped = Vec::new();
        let questions = v.finalize(&DEFAULT_STRATEGIES[0], candidates, &mut dropped);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].index, 2);
        assert_eq!(questions[1].text, "2. Third?\nA. x\nC. z");
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].position, 2);
    }

    #[test]
    fn finalize_without_prefix_keeps_body() {
        let v = QuestionSetValidator::default();
        let mut dropped = Vec::new();
        let questions = v.finalize(
            &DEFAULT_STRATEGIES[1],
            vec![candidate("Plain?\nA. x", OptionLetter::A)],
            &mut dropped,
        );
        assert_eq!(questions[0].text, "Plain?\nA. x");
        assert_eq!(questions[0].index, 1);
    }

    #[test]
    fn audit_flags_broken_sets() {
        let set = QuestionSet {
            questions: vec![Question {
                index: 3,
                text: "Q".into(),
                options: vec![
                    AnswerOption {
                        letter: OptionLetter::A,
                        text: "x".into(),
                    },
                    AnswerOption {
                        letter: OptionLetter::A,
                        text: "y".into(),
                    },
                ],
                correct_letter: OptionLetter::B,
            }],
            strategy: StrategyKind::Primary,
            dropped: vec![],
        };
        let warnings = audit_question_set(&set);
        assert!(warnings.iter().any(|w| w.message.contains("has index 3")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate option")));
        assert!(warnings.iter().any(|w| w.message.contains("not among")));
    }

    #[test]
    fn audit_accepts_parsed_sets() {
        let set = crate::question::parse_questions("1. Q?\nA. x\nB. y\nAnswer: B").unwrap();
        assert!(audit_question_set(&set).is_empty());
    }

    #[test]
    fn drop_reason_serializes_tagged() {
        let json = serde_json::to_string(&DropReason::InvalidAnswerLetter("E".into())).unwrap();
        assert_eq!(json, r#"{"kind":"invalid_answer_letter","detail":"E"}"#);
    }
}
