//! The `lessonforge slides` command.

use std::path::PathBuf;

use anyhow::Result;

use lessonforge_core::generator::strip_markdown_fences;
use lessonforge_core::{Deck, Pipeline};

use crate::input::read_input;
use crate::OutputFormat;

pub fn execute(input: PathBuf, topic: String, format: OutputFormat) -> Result<()> {
    let raw = read_input(&input)?;
    let deck = Pipeline::new().parse_slides(&strip_markdown_fences(&raw), &topic);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Text => print_deck(&deck),
    }

    Ok(())
}

pub(crate) fn print_deck(deck: &Deck) {
    for (i, slide) in deck.slides().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("[{}/{}] {}", i + 1, deck.len(), slide.title);
        for bullet in &slide.bullets {
            println!("  • {bullet}");
        }
    }
}
