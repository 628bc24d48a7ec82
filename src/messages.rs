//! Shared text shown to the user.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const APP_TITLE: &str = "Smart Grocery List Generator";

pub const ENTER_MEAL: &str = "Please enter a meal.";
pub const MEAL_PROMPT: &str = "What are you cooking? (empty line to skip, 'quit' to exit)";

pub const MODEL_NOT_FOUND: &str = "Model file not found!";
pub fn model_download_hint(model_name: &str) -> String {
    format!("Please download '{model_name}' and place it at the configured model path.")
}

pub fn powered_by(model_name: &str) -> String {
    format!("Powered by {model_name} (Local)")
}

pub fn thinking(model_name: &str) -> String {
    format!("{model_name} is thinking...")
}

pub const LIST_GENERATED: &str = "List Generated Successfully!";
pub const WRONG_FORMAT: &str = "AI output was not in the correct format.";
pub const RAW_OUTPUT_HEADER: &str = "Raw Output (Debug):";

pub fn csv_saved(path: &str) -> String {
    format!("Saved CSV to {path}")
}

pub fn error_text(err: &anyhow::Error) -> String {
    format!("Error: {err:#}")
}
