//! The `lessonforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("lessonforge.toml");
    if path.exists() {
        println!("lessonforge.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Created lessonforge.toml");

    println!("\nNext steps:");
    println!("  1. Run: lessonforge prompt --kind quiz --topic \"Volcanoes\"");
    println!("  2. Paste the prompt into your model and save its reply to reply.txt");
    println!("  3. Run: lessonforge quiz --input reply.txt --output quiz.json");
    println!("  4. Run: lessonforge score --quiz quiz.json --answers A,B,C,D,A");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lessonforge configuration

# Questions requested per quiz
question_count = 5

# Who the material is written for
audience = "children"

# Generation attempts before giving up (lessonforge generate)
max_generation_attempts = 3
retry_delay_ms = 1000
generation_timeout_secs = 120
"#;
