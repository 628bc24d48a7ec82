//! Prompt text sent to the instruction-tuned model.
//!
//! The model only answers in the expected row format when the instructions
//! and the worked example stay exactly as written here.

use tracing::trace;

/// System instruction: strict persona, the row grammar, one worked example
/// and a ban on commentary.
pub const SYSTEM_PROMPT: &str = "You are a strict grocery list assistant. \
Extract ingredients for the meal. \
Format EXACTLY as: - Item | Category | Quantity\n\
Example:\n\
- Rice | Grains | 500g\n\
- Chicken | Protein | 1kg\n\
Do NOT speak. Do NOT explain. Just list items.";

/// Opening and closing instruction markers expected by Mistral Instruct.
/// BOS is added by the tokenizer, so no `<s>` here.
pub const INST_OPEN: &str = "[INST]";
pub const INST_CLOSE: &str = "[/INST]";

/// Markup the model treats as turn structure.
const CONTROL_MARKUP: [&str; 4] = ["[/inst]", "[inst]", "</s>", "<s>"];

pub fn user_prompt(meal_description: &str, servings: u32) -> String {
    format!("Make a grocery list for: {meal_description} ({servings} servings).")
}

/// Build the full model prompt for a meal.
///
/// `meal_description` is inserted verbatim. It is untrusted text and can carry
/// its own instructions; run it through [`sanitize_meal_description`] first
/// when that matters.
pub fn build_prompt(meal_description: &str, servings: u32) -> String {
    let user = user_prompt(meal_description, servings);
    let prompt = format!("{INST_OPEN} {SYSTEM_PROMPT}\n{user} {INST_CLOSE}");
    trace!(len = prompt.len(), "Built prompt");
    prompt
}

/// Strip instruction markup and line structure from a meal description.
///
/// Removes `[INST]`, `[/INST]`, `<s>` and `</s>` in any letter case, turns
/// control characters into spaces, collapses whitespace runs and trims.
pub fn sanitize_meal_description(text: &str) -> String {
    let mut out = text.to_string();
    // ASCII lowercasing keeps byte offsets aligned with `out`.
    while let Some((start, len)) = CONTROL_MARKUP
        .iter()
        .filter_map(|m| out.to_ascii_lowercase().find(m).map(|i| (i, m.len())))
        .min()
    {
        out.replace_range(start..start + len, " ");
    }

    let spaced: String = out
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let cleaned = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned != text {
        tracing::debug!("Sanitized meal description");
    }
    cleaned
}
