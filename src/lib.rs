use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

pub mod ai;
pub mod cli;
mod config;
pub mod context;
pub mod handlers;
mod messages;
pub mod pipeline;
pub mod render;
mod system_info;
pub mod table;
mod text_utils;

pub use ai::{build_prompt, sanitize_meal_description, AiError, GenerationParams, TextGenerator};
pub use config::Config;
pub use context::AppContext;
pub use handlers::{handle_meal, run_interactive, MealStatus, RunOptions};
pub use pipeline::{run_pipeline, PipelineOutcome};
pub use render::{format_csv, format_json, format_table, write_csv};
pub use system_info::get_system_info;
pub use table::{GroceryRequest, GroceryRow, GroceryTable, DEFAULT_CATEGORY};
pub use text_utils::{parse_grocery_line, parse_grocery_output};

use ai::LocalModel;
use cli::Args;
use messages::{model_download_hint, powered_by, APP_TITLE, MODEL_NOT_FOUND};

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub fn run() -> Result<ExitCode> {
    let args = Args::parse();

    // Load .env file if it exists (for local development)
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for logging; stdout is kept for the list
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut config = Config::from_env();

    if let Some(path) = args.model.clone() {
        config.model.model_path = path;
    }
    let model_name = config.model.model_name();

    if args.info {
        println!("{}\n{}", get_system_info(), powered_by(&model_name));
        return Ok(ExitCode::SUCCESS);
    }

    tracing::info!(model = %model_name, "Starting {APP_TITLE}...");

    // The input check is cheap; do it before spending time on the model.
    if !args.interactive && args.meal.as_deref().and_then(cli::validate_meal).is_none() {
        eprintln!("{}", messages::ENTER_MEAL);
        return Ok(ExitCode::FAILURE);
    }

    // --- Model ---
    // Loaded once and shared by every request of this process.
    let ctx = match AppContext::<LocalModel>::load(&config.model, config.generation.clone()) {
        Ok(ctx) => ctx,
        Err(AiError::ModelUnavailable { path }) => {
            tracing::error!(path = %path.display(), "Model file not found");
            eprintln!("{MODEL_NOT_FOUND}");
            eprintln!("{}", model_download_hint(&model_name));
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    let opts = RunOptions {
        servings: args.servings,
        format: args.format,
        output: args.output.clone(),
        sanitize: config.sanitize_input && !args.raw_input,
        model_name,
    };

    let mut out = io::stdout().lock();
    let mut status = io::stderr().lock();

    if args.interactive {
        let mut input = io::stdin().lock();
        run_interactive(&ctx, &opts, &mut input, &mut out, &mut status)?;
        return Ok(ExitCode::SUCCESS);
    }

    let meal = args.meal.as_deref().unwrap_or_default();
    match handle_meal(&ctx, meal, &opts, &mut out, &mut status)? {
        MealStatus::Listed => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}
