//! Local language model access: prompts, model loading and generation.

pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod prompts;

pub use config::ModelConfig;
pub use error::AiError;
pub use generate::{
    generate, Completion, CompletionChoice, FinishReason, GenerationParams, SamplingParams,
    TextGenerator,
};
pub use model::{load_model, LocalModel};
pub use prompts::{build_prompt, sanitize_meal_description};
