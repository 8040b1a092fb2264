//! lessonforge CLI: turns generated text into quizzes and slide decks.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod external;
mod input;

#[derive(Parser)]
#[command(
    name = "lessonforge",
    version,
    about = "Extract quizzes and slide decks from LLM output"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// What kind of lesson material to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Quiz,
    Slides,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prompt that would be sent to a model
    Prompt {
        /// quiz or slides
        #[arg(long, value_enum)]
        kind: Kind,

        /// Lesson topic
        #[arg(long)]
        topic: String,

        /// Number of questions (quiz only; overrides config)
        #[arg(long)]
        count: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Extract a quiz from raw model output
    Quiz {
        /// File with model output, or "-" for stdin
        #[arg(long)]
        input: PathBuf,

        /// Save the parsed quiz (with answer key) as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Extract a slide deck from raw model output
    Slides {
        /// File with model output, or "-" for stdin
        #[arg(long)]
        input: PathBuf,

        /// Lesson topic (used for the closing slide)
        #[arg(long)]
        topic: String,

        /// Output format: text, json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Score answers against a saved quiz
    Score {
        /// Quiz JSON written by `lessonforge quiz --output`
        #[arg(long)]
        quiz: PathBuf,

        /// Answers in question order (e.g. "C,A,B")
        #[arg(long)]
        answers: String,

        /// Topic shown in the summary
        #[arg(long, default_value = "Quiz")]
        topic: String,

        /// Save the summary as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate a quiz or deck by piping the prompt through an external command
    Generate {
        /// quiz or slides
        #[arg(long, value_enum)]
        kind: Kind,

        /// Lesson topic
        #[arg(long)]
        topic: String,

        /// Shell command that reads a prompt on stdin and prints the model's reply
        #[arg(long)]
        command: String,

        /// Save the result as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter lessonforge.toml
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lessonforge=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Prompt {
            kind,
            topic,
            count,
            config,
        } => commands::prompt::execute(kind, topic, count, config),
        Commands::Quiz {
            input,
            output,
            format,
        } => commands::quiz::execute(input, output, format),
        Commands::Slides {
            input,
            topic,
            format,
        } => commands::slides::execute(input, topic, format),
        Commands::Score {
            quiz,
            answers,
            topic,
            output,
            format,
        } => commands::score::execute(quiz, answers, topic, output, format),
        Commands::Generate {
            kind,
            topic,
            command,
            output,
            config,
        } => commands::generate::execute(kind, topic, command, output, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
