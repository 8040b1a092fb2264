//! Quiz summaries with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{OptionLetter, QuestionSet, ScoreResult};
use crate::scoring::Grade;

/// One row of a quiz summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub question_index: usize,
    pub stem: String,
    pub submitted_letter: Option<OptionLetter>,
    pub correct_letter: OptionLetter,
    pub is_correct: bool,
}

/// The review shown after a learner submits a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub topic: String,
    pub lines: Vec<SummaryLine>,
    pub correct_count: usize,
    pub total: usize,
    pub grade: Grade,
}

impl QuizSummary {
    /// Pair every scored question with its stem.
    pub fn new(topic: &str, set: &QuestionSet, score: &ScoreResult) -> Self {
        let lines = score
            .per_question
            .iter()
            .map(|s| SummaryLine {
                question_index: s.question_index,
                stem: set
                    .iter()
                    .find(|q| q.index == s.question_index)
                    .map(|q| q.stem().to_string())
                    .unwrap_or_default(),
                submitted_letter: s.submitted_letter,
                correct_letter: s.correct_letter,
                is_correct: s.is_correct,
            })
            .collect();

        Self {
            topic: topic.to_string(),
            lines,
            correct_count: score.correct_count,
            total: score.total(),
            grade: score.grade(),
        }
    }

    /// Fraction of correct answers in `[0.0, 1.0]`.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.total as f64
    }

    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path, "summary")
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path, "summary")
    }
}

impl QuestionSet {
    /// Save the question set (answer key included) as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path, "question set")
    }

    /// Load a question set from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path, "question set")
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path, what: &str) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).with_context(|| format!("failed to serialize {what}"))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {what} to {}", path.display()))?;
    Ok(())
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {what} JSON"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::parse_questions;
    use crate::scoring::{collect_submission, score};

    const QUIZ: &str = "1. What is 2 + 2?\nA. 2\nB. 3\nC. 4\nD. 5\nAnswer: C\n\n2. What is 3 + 3?\nA. 5\nB. 6\nC. 7\nD. 8\nAnswer: B";

    fn summary() -> QuizSummary {
        let set = parse_questions(QUIZ).unwrap();
        let submission = collect_submission(&set, &["C", "A"]).unwrap();
        QuizSummary::new("Arithmetic", &set, &score(&set, &submission))
    }

    #[test]
    fn summary_pairs_stems_with_scores() {
        let summary = summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.lines[0].stem, "1. What is 2 + 2?");
        assert!(summary.lines[0].is_correct);
        assert_eq!(summary.lines[1].submitted_letter, Some(OptionLetter::A));
        assert_eq!(summary.grade, Grade::KeepPracticing);
        assert_eq!(summary.percentage(), 0.5);
    }

    #[test]
    fn summary_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("summary.json");

        summary().save_json(&path).unwrap();
        let loaded = QuizSummary::load_json(&path).unwrap();
        assert_eq!(loaded.topic, "Arithmetic");
        assert_eq!(loaded.lines, summary().lines);
        assert_eq!(loaded.grade, Grade::KeepPracticing);
    }

    #[test]
    fn question_set_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        let set = parse_questions(QUIZ).unwrap();

        set.save_json(&path).unwrap();
        assert_eq!(QuestionSet::load_json(&path).unwrap(), set);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = QuestionSet::load_json(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse question set JSON"));
    }
}
