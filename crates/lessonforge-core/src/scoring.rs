//! Answer scoring and grading.
//!
//! [`collect_submission`] is the boundary check for raw learner input; once a
//! submission passes it, [`score`] is a total, pure function.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;
use crate::model::{AnswerSubmission, OptionLetter, QuestionScore, QuestionSet, ScoreResult};

/// Validate raw answers (one per question, in set order) into a submission.
///
/// Rejects a wrong number of answers or any blank answer as incomplete, and any
/// value other than a single A-D letter as invalid. Case and surrounding
/// whitespace are ignored.
pub fn collect_submission<S: AsRef<str>>(
    set: &QuestionSet,
    raw_answers: &[S],
) -> Result<Vec<AnswerSubmission>, SubmissionError> {
    // A wrong answer count is reported as supplied, blanks included.
    let answered = if raw_answers.len() == set.len() {
        raw_answers
            .iter()
            .filter(|a| !a.as_ref().trim().is_empty())
            .count()
    } else {
        raw_answers.len()
    };
    if answered != set.len() {
        return Err(SubmissionError::IncompleteSubmission {
            expected: set.len(),
            answered,
        });
    }

    set.iter()
        .zip(raw_answers)
        .map(|(question, raw)| {
            let raw = raw.as_ref();
            raw.parse::<OptionLetter>()
                .map(|letter| AnswerSubmission {
                    question_index: question.index,
                    letter,
                })
                .map_err(|_| SubmissionError::InvalidAnswerLetter {
                    question_index: question.index,
                    value: raw.trim().to_string(),
                })
        })
        .collect()
}

/// Score a submission against a question set.
///
/// Answers are matched to questions by index, so submission order does not
/// matter; the result follows the set's order. A question with no matching
/// answer (only possible if the caller skipped [`collect_submission`]) counts
/// as incorrect.
pub fn score(set: &QuestionSet, submission: &[AnswerSubmission]) -> ScoreResult {
    let per_question: Vec<QuestionScore> = set
        .iter()
        .map(|question| {
            let submitted_letter = submission
                .iter()
                .find(|s| s.question_index == question.index)
                .map(|s| s.letter);
            QuestionScore {
                question_index: question.index,
                submitted_letter,
                correct_letter: question.correct_letter,
                is_correct: submitted_letter == Some(question.correct_letter),
            }
        })
        .collect();

    let correct_count = per_question.iter().filter(|q| q.is_correct).count();

    ScoreResult {
        per_question,
        correct_count,
    }
}

/// Performance tier for a scored quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Perfect,
    Good,
    KeepPracticing,
}

impl Grade {
    /// All correct is perfect, at least 60% is good.
    pub fn from_score(correct: usize, total: usize) -> Self {
        if total > 0 && correct >= total {
            Grade::Perfect
        } else if total > 0 && correct * 5 >= total * 3 {
            Grade::Good
        } else {
            Grade::KeepPracticing
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Grade::Perfect => "🏆 Perfect Score",
            Grade::Good => "👍 Good Job",
            Grade::KeepPracticing => "📚 Keep Practicing",
        }
    }

    pub fn feedback(self) -> &'static str {
        match self {
            Grade::Perfect => "Outstanding! You've mastered this topic!",
            Grade::Good => "Well done! A bit more practice and you'll be perfect.",
            Grade::KeepPracticing => "You're getting there! Keep learning and try again.",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge())
    }
}
