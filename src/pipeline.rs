use tracing::{debug, info, instrument};

use crate::ai::error::Result;
use crate::ai::{build_prompt, generate, GenerationParams, TextGenerator};
use crate::table::{GroceryRequest, GroceryTable};
use crate::text_utils::parse_grocery_output;

/// What one pipeline run produced: the model's text exactly as returned and
/// the rows recognised in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub raw_text: String,
    pub table: GroceryTable,
}

impl PipelineOutcome {
    /// The model answered but no line matched the row format.
    pub fn is_unparseable(&self) -> bool {
        self.table.is_empty() && !self.is_blank()
    }

    /// The model produced nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// Build the prompt, run the model once and parse the reply.
///
/// Generation errors are returned as-is. An empty table is a normal outcome.
/// The meal description is expected to be non-empty; callers check that.
#[instrument(level = "debug", skip_all, fields(servings = request.servings().get()))]
pub fn run_pipeline<G: TextGenerator + ?Sized>(
    generator: &G,
    request: &GroceryRequest,
    params: &GenerationParams,
) -> Result<PipelineOutcome> {
    let prompt = build_prompt(request.meal_description(), request.servings().get());
    let raw_text = generate(generator, &prompt, params)?;
    debug!(raw_len = raw_text.len(), "Model replied");

    let table = parse_grocery_output(&raw_text);
    info!(rows = table.len(), "Grocery list parsed");
    Ok(PipelineOutcome { raw_text, table })
}
