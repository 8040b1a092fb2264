//! Core data model types for lessonforge.
//!
//! Every value here is produced fresh by a single pipeline run and owns its
//! data; nothing points back at the raw text it was extracted from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::question::StrategyKind;
use crate::scoring::Grade;
use crate::validate::BlockDrop;

/// One of the four answer letters a multiple-choice question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// All letters in presentation order.
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    /// Map a single character (either case) to a letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    /// Accepts exactly one letter A-D, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                OptionLetter::from_char(c).ok_or_else(|| format!("invalid answer letter: {trimmed}"))
            }
            _ => Err(format!("invalid answer letter: {trimmed}")),
        }
    }
}

/// A labeled answer choice recovered from a question's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: OptionLetter,
    pub text: String,
}

/// A single multiple-choice question with its answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position within its set.
    pub index: usize,
    /// Stem followed by the raw option lines, newline separated.
    pub text: String,
    /// Options recovered from `text`, in the order they appeared.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    /// The declared correct option.
    pub correct_letter: OptionLetter,
}

impl Question {
    /// The first line of the question text.
    pub fn stem(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }

    /// Look up the option labeled `letter`.
    pub fn option(&self, letter: OptionLetter) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.letter == letter)
    }
}

/// An ordered set of questions extracted from one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// The segmentation strategy that produced these questions.
    pub strategy: StrategyKind,
    /// Blocks discarded while extracting, across every strategy that ran.
    #[serde(default)]
    pub dropped: Vec<BlockDrop>,
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// The correct letters in presentation order.
    pub fn answer_key(&self) -> Vec<OptionLetter> {
        self.questions.iter().map(|q| q.correct_letter).collect()
    }
}

/// Where a slide came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Parsed from a block of model text.
    Parsed,
    /// The synthetic closing slide appended to every deck.
    Closing,
}

/// A single slide: a non-empty title and its bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    pub kind: SlideKind,
}

/// A slide deck that always ends with exactly one closing slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    topic: String,
    slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck from parsed slides, appending the closing slide for `topic`.
    pub(crate) fn new(topic: &str, mut parsed: Vec<Slide>, closing: Slide) -> Self {
        parsed.push(closing);
        Self {
            topic: topic.to_string(),
            slides: parsed,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// All slides, closing slide last.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// The slides parsed from model text.
    pub fn parsed(&self) -> &[Slide] {
        &self.slides[..self.slides.len() - 1]
    }

    pub fn closing(&self) -> &Slide {
        &self.slides[self.slides.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: a deck holds at least its closing slide.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// A learner's answer to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_index: usize,
    pub letter: OptionLetter,
}

/// Correctness of one question in a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_index: usize,
    /// `None` only when the submission had no answer for this question.
    pub submitted_letter: Option<OptionLetter>,
    pub correct_letter: OptionLetter,
    pub is_correct: bool,
}

/// The outcome of scoring a full submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// One entry per question, in the set's order.
    pub per_question: Vec<QuestionScore>,
    pub correct_count: usize,
}

impl ScoreResult {
    pub fn total(&self) -> usize {
        self.per_question.len()
    }

    /// Fraction of correct answers in `[0.0, 1.0]`.
    pub fn percentage(&self) -> f64 {
        if self.per_question.is_empty() {
            return 0.0;
        }
        self.correct_count as f64 / self.per_question.len() as f64
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.correct_count, self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_display_and_parse() {
        assert_eq!(OptionLetter::C.to_string(), "C");
        assert_eq!("c".parse::<OptionLetter>().unwrap(), OptionLetter::C);
        assert_eq!(" B \n".parse::<OptionLetter>().unwrap(), OptionLetter::B);
        assert!("E".parse::<OptionLetter>().is_err());
        assert!("AB".parse::<OptionLetter>().is_err());
        assert!("".parse::<OptionLetter>().is_err());
    }

    #[test]
    fn letter_serializes_verbatim() {
        let json = serde_json::to_string(&OptionLetter::D).unwrap();
        assert_eq!(json, "\"D\"");
        let back: OptionLetter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OptionLetter::D);
    }

    #[test]
    fn question_stem_is_first_line() {
        let q = Question {
            index: 1,
            text: "1. What is 2 + 2?\nA. 2\nB. 4".into(),
            options: vec![],
            correct_letter: OptionLetter::B,
        };
        assert_eq!(q.stem(), "1. What is 2 + 2?");
    }

    #[test]
    fn score_percentage_handles_empty() {
        let score = ScoreResult {
            per_question: vec![],
            correct_count: 0,
        };
        assert_eq!(score.percentage(), 0.0);
        assert_eq!(score.total(), 0);
    }
}
