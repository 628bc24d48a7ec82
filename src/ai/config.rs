use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Weights file looked up in the working directory when nothing else is set.
pub const DEFAULT_MODEL_PATH: &str = "mistral-7b-instruct-v0.2.Q4_K_M.gguf";
pub const DEFAULT_N_CTX: u32 = 2048;
pub const DEFAULT_N_THREADS: u32 = 6;

/// Load-time runtime parameters for the local model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    /// Context window in tokens, prompt and completion together.
    pub n_ctx: u32,
    pub n_threads: u32,
    /// Let llama.cpp print its own diagnostics.
    pub verbose: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            n_ctx: DEFAULT_N_CTX,
            n_threads: DEFAULT_N_THREADS,
            verbose: false,
        }
    }
}

impl ModelConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model_path: env::var("GROCERY_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            n_ctx: env_or("GROCERY_N_CTX", defaults.n_ctx),
            n_threads: env_or("GROCERY_N_THREADS", defaults.n_threads),
            verbose: env_or("GROCERY_VERBOSE", defaults.verbose),
        }
    }

    /// File name of the weights, for display.
    pub fn model_name(&self) -> String {
        self.model_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.model_path.display().to_string())
    }
}

/// Read and parse an environment variable, keeping `default` when it is unset
/// or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).unwrap_or(default)
}

/// Read and parse an optional environment variable. An unparseable value is
/// logged and treated as unset.
pub(crate) fn env_opt<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}
