//! Slide deck extraction from generated text.
//!
//! Slides are always paragraph separated. Each paragraph becomes one slide:
//! its first line is the title, the remaining lines are bullets. Every deck
//! ends with a closing slide built from the topic rather than model text.

use crate::model::{Deck, Slide, SlideKind};
use crate::segment::{segment, SegmentMode};

/// Emoji prepended to undecorated titles, chosen by slide position.
pub const EMOJI_PALETTE: [&str; 8] = ["🌟", "🚀", "💡", "🎯", "⭐", "🔥", "💫", "🎉"];

/// Title of the closing slide.
pub const CLOSING_TITLE: &str = "🎉 Amazing! You've Learned So Much!";

/// Whether `c` is a pictograph, emoticon, transport symbol or regional indicator.
///
/// Dingbats such as `★` or `✔` do not count, so titles led by them still get
/// a palette emoji.
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F5FF | 0x1F600..=0x1F64F | 0x1F680..=0x1F6FF | 0x1F1E0..=0x1F1FF
    )
}

pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// The palette entry for a 1-based slide position.
pub fn palette_emoji(position: usize) -> &'static str {
    EMOJI_PALETTE[position.saturating_sub(1) % EMOJI_PALETTE.len()]
}

/// Strip heading and bullet markers from a title line, plus closing bold markers.
fn normalize_title(line: &str) -> &str {
    line.trim_start_matches(|c: char| matches!(c, '*' | '-' | '#') || c.is_whitespace())
        .trim_end_matches(|c: char| c == '*' || c.is_whitespace())
}

/// Strip leading bullet markers from a bullet line.
fn normalize_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| matches!(c, '*' | '-' | '•') || c.is_whitespace())
        .trim_end()
}

/// Build one slide from a paragraph at 1-based `position`.
pub fn parse_slide(block: &str, position: usize) -> Slide {
    let mut lines = block.lines().map(str::trim).filter(|line| !line.is_empty());

    let title = lines
        .next()
        .map(normalize_title)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Slide {position}"));

    let title = if contains_emoji(&title) {
        title
    } else {
        format!("{} {title}", palette_emoji(position))
    };

    let bullets = lines
        .map(normalize_bullet)
        .filter(|bullet| !bullet.is_empty())
        .map(str::to_string)
        .collect();

    Slide {
        title,
        bullets,
        kind: SlideKind::Parsed,
    }
}

/// The synthetic last slide of every deck.
pub fn closing_slide(topic: &str) -> Slide {
    Slide {
        title: CLOSING_TITLE.to_string(),
        bullets: vec![
            format!("🏆 You're now a {} expert!", topic.trim()),
            "🌟 Keep exploring and learning".to_string(),
            "🚀 Ready for your next adventure?".to_string(),
        ],
        kind: SlideKind::Closing,
    }
}

/// Parse a deck from raw text. Never fails; empty input yields just the closing slide.
pub fn parse_slides(raw: &str, topic: &str) -> Deck {
    let parsed: Vec<Slide> = segment(raw, SegmentMode::BlankLine)
        .map(|block| parse_slide(block.text, block.position))
        .collect();

    tracing::debug!("parsed {} slide(s) for topic '{}'", parsed.len(), topic);
    Deck::new(topic, parsed, closing_slide(topic))
}
