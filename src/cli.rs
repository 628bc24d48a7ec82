use clap::{Parser, ValueEnum};
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Turn a meal description into a grocery list using a local model.
#[derive(Debug, Parser)]
#[command(name = "grocerygen", version)]
pub struct Args {
    /// What you are cooking, e.g. "Chicken Biryani".
    pub meal: Option<String>,

    /// Number of servings.
    #[arg(short, long, default_value = "2")]
    pub servings: NonZeroU32,

    /// How to print the list on stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also save the list as a CSV file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// GGUF weights file (overrides GROCERY_MODEL_PATH).
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Pass the meal description to the model exactly as typed.
    #[arg(long)]
    pub raw_input: bool,

    /// Read one meal per line from stdin, reusing the loaded model.
    #[arg(short, long, conflicts_with = "meal")]
    pub interactive: bool,

    /// Print build information and exit.
    #[arg(long)]
    pub info: bool,
}

/// Trimmed meal text, or `None` when there is nothing to send to the model.
pub fn validate_meal(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
