use anyhow::Result;
use std::io::{BufRead, Write};
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::ai::{sanitize_meal_description, TextGenerator};
use crate::cli::{validate_meal, OutputFormat};
use crate::context::AppContext;
use crate::messages::{
    csv_saved, error_text, thinking, ENTER_MEAL, LIST_GENERATED, MEAL_PROMPT, RAW_OUTPUT_HEADER,
    WRONG_FORMAT,
};
use crate::render::{format_csv, format_json, format_table, write_csv};
use crate::table::GroceryRequest;

/// Per-session settings for turning meals into lists.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub servings: NonZeroU32,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub sanitize: bool,
    pub model_name: String,
}

/// Result of handling one meal from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealStatus {
    /// Rows were rendered.
    Listed,
    /// Blank input; the model was not called.
    Skipped,
    /// The model replied without any usable rows.
    Unparseable,
    /// Generation failed.
    Failed,
}

/// Run one meal through the pipeline and report the outcome.
///
/// The rendered list goes to `out`; status messages, raw model text for
/// unusable replies and errors go to `status`. Generation failures are
/// reported and turned into [`MealStatus::Failed`]; only I/O errors are
/// returned.
pub fn handle_meal<G: TextGenerator>(
    ctx: &AppContext<G>,
    input: &str,
    opts: &RunOptions,
    out: &mut dyn Write,
    status: &mut dyn Write,
) -> Result<MealStatus> {
    let Some(meal) = validate_meal(input) else {
        writeln!(status, "{ENTER_MEAL}")?;
        return Ok(MealStatus::Skipped);
    };

    let meal = if opts.sanitize {
        sanitize_meal_description(meal)
    } else {
        meal.to_string()
    };
    if meal.is_empty() {
        writeln!(status, "{ENTER_MEAL}")?;
        return Ok(MealStatus::Skipped);
    }

    writeln!(status, "{}", thinking(&opts.model_name))?;
    let request = GroceryRequest::new(meal, opts.servings);
    let outcome = match ctx.run(&request) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, "Generation failed");
            writeln!(status, "{}", error_text(&err.into()))?;
            return Ok(MealStatus::Failed);
        }
    };

    if outcome.table.is_empty() {
        tracing::debug!(blank = outcome.is_blank(), "No rows recognised");
        writeln!(status, "{WRONG_FORMAT}")?;
        writeln!(status, "{RAW_OUTPUT_HEADER}")?;
        writeln!(status, "{}", outcome.raw_text)?;
        return Ok(MealStatus::Unparseable);
    }

    writeln!(status, "{LIST_GENERATED}")?;
    let rendered = match opts.format {
        OutputFormat::Table => format_table(&outcome.table),
        OutputFormat::Csv => format_csv(&outcome.table),
        OutputFormat::Json => format_json(&outcome.table)? + "\n",
    };
    out.write_all(rendered.as_bytes())?;

    if let Some(path) = &opts.output {
        write_csv(path, &outcome.table)?;
        writeln!(status, "{}", csv_saved(&path.display().to_string()))?;
    }
    Ok(MealStatus::Listed)
}

/// Read meals line by line until EOF or `quit`, handling each in turn with
/// the same context. Returns how many lists were produced.
pub fn run_interactive<G: TextGenerator>(
    ctx: &AppContext<G>,
    opts: &RunOptions,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    status: &mut dyn Write,
) -> Result<usize> {
    let mut listed = 0;
    loop {
        writeln!(status, "{MEAL_PROMPT}")?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if handle_meal(ctx, line, opts, out, status)? == MealStatus::Listed {
            listed += 1;
        }
        out.flush()?;
    }
    tracing::debug!(listed, "Interactive session finished");
    Ok(listed)
}
