//! The `lessonforge quiz` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lessonforge_core::generator::strip_markdown_fences;
use lessonforge_core::{Pipeline, QuestionSet};

use crate::input::read_input;
use crate::OutputFormat;

pub fn execute(input: PathBuf, output: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let raw = read_input(&input)?;
    let set = Pipeline::new().parse_questions(&strip_markdown_fences(&raw))?;

    if let Some(path) = &output {
        set.save_json(path)?;
        eprintln!("Quiz saved to {}", path.display());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
        OutputFormat::Text => print_quiz(&set),
    }

    Ok(())
}

pub(crate) fn print_quiz(set: &QuestionSet) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options", "Answer"]);

    for q in set.iter() {
        let options = q
            .options
            .iter()
            .map(|o| format!("{}. {}", o.letter, o.text))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(q.index),
            Cell::new(q.stem()),
            Cell::new(options),
            Cell::new(q.correct_letter),
        ]);
    }

    println!("{table}");
    println!(
        "{} question(s) parsed ({:?} strategy), {} block(s) dropped",
        set.len(),
        set.strategy,
        set.dropped.len()
    );
    for drop in &set.dropped {
        println!(
            "  dropped block {} ({:?}): {}",
            drop.position, drop.strategy, drop.reason
        );
    }
}
