//! Recovering labeled options from question text.

use crate::model::{AnswerOption, OptionLetter};

/// Parse a line of the form `A. body` (or `A) body`) into an option.
pub fn parse_option_line(line: &str) -> Option<AnswerOption> {
    let line = line.trim();
    let mut chars = line.chars();
    let letter = chars.next().filter(char::is_ascii_uppercase)?;
    let letter = OptionLetter::from_char(letter)?;
    if !matches!(chars.next(), Some('.') | Some(')')) {
        return None;
    }

    Some(AnswerOption {
        letter,
        text: chars.as_str().trim().to_string(),
    })
}

/// Split question text into its stem (first line) and options.
///
/// Lines after the stem that do not look like options are ignored. A letter
/// that appears twice keeps its first occurrence, so at most four options come
/// back.
pub fn extract_options(text: &str) -> (&str, Vec<AnswerOption>) {
    let mut lines = text.lines();
    let stem = lines.next().unwrap_or_default().trim();

    let mut options: Vec<AnswerOption> = Vec::with_capacity(OptionLetter::ALL.len());
    for option in lines.filter_map(parse_option_line) {
        if options.iter().all(|o| o.letter != option.letter) {
            options.push(option);
        }
    }

    (stem, options)
}
