use crate::ai::config::{env_opt, env_or, ModelConfig};
use crate::ai::{GenerationParams, SamplingParams};

#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub generation: GenerationParams,
    /// Strip instruction markup from meal descriptions before prompting.
    pub sanitize_input: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let model = ModelConfig::from_env();

        let defaults = GenerationParams::default();
        let sampling = SamplingParams {
            temperature: env_or("GROCERY_TEMPERATURE", defaults.sampling.temperature),
            seed: env_opt("GROCERY_SEED"),
            ..defaults.sampling.clone()
        };
        let generation = GenerationParams {
            max_tokens: env_or("GROCERY_MAX_TOKENS", defaults.max_tokens),
            sampling,
            ..defaults
        };

        let sanitize_input = env_or("GROCERY_SANITIZE_INPUT", true);
        Self {
            model,
            generation,
            sanitize_input,
        }
    }
}
