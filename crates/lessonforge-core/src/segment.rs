//! Splitting raw model output into candidate blocks.
//!
//! Two modes are supported: numbered markers (`1.`, `2)`) at the start of a
//! line, and blank-line separated paragraphs. Blocks borrow from the input and
//! are produced lazily; empty blocks never come out of the iterator.
//!
//! In numbered mode, unnumbered text (a chatty preamble, or a whole response
//! that ignored the numbering) produces no blocks at all.

use serde::{Deserialize, Serialize};

/// How a raw text blob is split into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentMode {
    /// A new block begins at every line that starts with `<digits>.` or `<digits>)`.
    Numbered,
    /// Blocks are separated by one or more whitespace-only lines.
    BlankLine,
}

/// One trimmed, non-empty candidate unit of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// 1-based position among the non-empty blocks of this run.
    pub position: usize,
    pub text: &'a str,
}

/// Lazily split `raw` into blocks using `mode`.
///
/// Never fails: input with no usable content yields an empty iterator.
pub fn segment(raw: &str, mode: SegmentMode) -> Segments<'_> {
    Segments {
        rest: raw,
        mode,
        position: 0,
    }
}

/// Iterator over the blocks of a raw text. A clone continues from the same point.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    mode: SegmentMode,
    position: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let (block, consumed) = match self.mode {
                SegmentMode::Numbered => next_numbered(self.rest),
                SegmentMode::BlankLine => next_paragraph(self.rest),
            };
            self.rest = &self.rest[consumed..];

            let block = block.trim();
            if !block.is_empty() {
                self.position += 1;
                return Some(RawBlock {
                    position: self.position,
                    text: block,
                });
            }
        }
        None
    }
}

/// Lines of `s` paired with their byte offset; each line keeps its terminator.
fn lines_with_offsets(s: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    s.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line)
    })
}

/// Byte length of a leading `<digits>.` / `<digits>)` marker, including indentation.
fn numbered_marker_len(line: &str) -> Option<usize> {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = line.len() - body.len();

    let digits = body.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut after = body[digits..].chars();
    if !matches!(after.next(), Some('.') | Some(')')) {
        return None;
    }
    match after.next() {
        None => {}
        Some(c) if c.is_whitespace() => {}
        Some(_) => return None,
    }

    Some(indent + digits + 1)
}

/// Take one numbered block from the front of `rest`: the first line minus its
/// marker through the line before the next marker. Text ahead of the first
/// marker belongs to no block and comes back empty.
fn next_numbered(rest: &str) -> (&str, usize) {
    let mut lines = lines_with_offsets(rest);
    let Some((_, first)) = lines.next() else {
        return ("", rest.len());
    };
    let marker = numbered_marker_len(first);

    let end = lines
        .find(|(_, line)| numbered_marker_len(line).is_some())
        .map(|(offset, _)| offset)
        .unwrap_or(rest.len());

    match marker {
        Some(body_start) => (&rest[body_start..end], end),
        None => ("", end),
    }
}

/// Take one paragraph from the front of `rest`, consuming the blank line that ends it.
fn next_paragraph(rest: &str) -> (&str, usize) {
    let mut start = None;
    for (offset, line) in lines_with_offsets(rest) {
        let blank = line.trim().is_empty();
        match (start, blank) {
            (None, true) => {}
            (None, false) => start = Some(offset),
            (Some(s), true) => return (&rest[s..offset], offset + line.len()),
            (Some(_), false) => {}
        }
    }

    match start {
        Some(s) => (&rest[s..], rest.len()),
        None => ("", rest.len()),
    }
}
