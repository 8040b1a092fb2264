//! The `lessonforge score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use lessonforge_core::report::QuizSummary;
use lessonforge_core::validate::audit_question_set;
use lessonforge_core::{Pipeline, QuestionSet};

use crate::OutputFormat;

pub fn execute(
    quiz_path: PathBuf,
    answers: String,
    topic: String,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let set = QuestionSet::load_json(&quiz_path)?;

    for w in audit_question_set(&set) {
        let prefix = w
            .question_index
            .map(|i| format!("[question {i}] "))
            .unwrap_or_default();
        eprintln!("WARNING: {prefix}{}", w.message);
    }

    let raw_answers: Vec<&str> = answers.split(',').collect();
    let result = Pipeline::new()
        .grade(&set, &raw_answers)
        .context("answers rejected")?;
    let summary = QuizSummary::new(&topic, &set, &result);

    if let Some(path) = &output {
        summary.save_json(path)?;
        eprintln!("Summary saved to {}", path.display());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &QuizSummary) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct", "Result"]);

    for line in &summary.lines {
        table.add_row(vec![
            Cell::new(line.question_index),
            Cell::new(&line.stem),
            Cell::new(
                line.submitted_letter
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(line.correct_letter),
            Cell::new(if line.is_correct { "✅" } else { "❌" }),
        ]);
    }

    println!("{}", summary.topic);
    println!("{table}");
    println!(
        "Score: {}/{} ({:.0}%) {}",
        summary.correct_count,
        summary.total,
        summary.percentage() * 100.0,
        summary.grade
    );
    println!("{}", summary.grade.feedback());
}
