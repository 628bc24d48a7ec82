//! Local GGUF model served through llama.cpp.

use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel};
use llama_cpp_2::sampling::LlamaSampler;
use std::num::NonZeroU32;
use std::sync::OnceLock;
use tracing::{debug, info, instrument, trace, warn};

use super::config::ModelConfig;
use super::error::{AiError, Result};
use super::generate::{
    find_stop, finish_text, token_budget, Completion, CompletionChoice, FinishReason,
    GenerationParams, SamplingParams, TextGenerator,
};

/// llama.cpp refuses a second backend initialisation, so it lives for the
/// whole process.
static LLAMA_BACKEND: OnceLock<std::result::Result<LlamaBackend, String>> = OnceLock::new();

/// llama.cpp seed value that asks for a random seed.
const RANDOM_SEED: u32 = u32::MAX;

const PIECE_BUFFER: usize = 64;

fn get_backend(verbose: bool) -> Result<&'static LlamaBackend> {
    let result = LLAMA_BACKEND.get_or_init(|| {
        let mut backend = LlamaBackend::init().map_err(|e| e.to_string())?;
        if !verbose {
            backend.void_logs();
        }
        Ok(backend)
    });
    match result {
        Ok(backend) => Ok(backend),
        Err(e) => Err(AiError::ModelLoad(
            format!("failed to initialize llama.cpp backend: {e}").into(),
        )),
    }
}

/// A loaded weights file plus the runtime settings it was loaded with.
pub struct LocalModel {
    model: LlamaModel,
    config: ModelConfig,
}

impl std::fmt::Debug for LocalModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalModel")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Load the model described by `config`.
///
/// A missing weights file is not an error: it returns `Ok(None)` so the
/// caller can report it and stop before any generation is attempted.
#[instrument(level = "debug", skip_all, fields(path = %config.model_path.display()))]
pub fn load_model(config: &ModelConfig) -> Result<Option<LocalModel>> {
    if !config.model_path.is_file() {
        warn!("Model file not found");
        return Ok(None);
    }

    let backend = get_backend(config.verbose)?;
    let params = LlamaModelParams::default();
    let model = LlamaModel::load_from_file(backend, &config.model_path, &params)
        .map_err(|e| AiError::ModelLoad(e.into()))?;
    info!(
        n_ctx = config.n_ctx,
        n_threads = config.n_threads,
        "Model loaded"
    );

    Ok(Some(LocalModel {
        model,
        config: config.clone(),
    }))
}

impl LocalModel {
    fn context_params(&self) -> LlamaContextParams {
        let params = LlamaContextParams::default()
            .with_n_ctx(NonZeroU32::new(self.config.n_ctx))
            .with_n_batch(self.config.n_ctx);
        if self.config.n_threads > 0 {
            params
                .with_n_threads(self.config.n_threads as i32)
                .with_n_threads_batch(self.config.n_threads as i32)
        } else {
            params
        }
    }

    fn sampler(params: &SamplingParams) -> LlamaSampler {
        if params.temperature <= 0.0 {
            return LlamaSampler::greedy();
        }
        LlamaSampler::chain_simple([
            LlamaSampler::top_k(params.top_k),
            LlamaSampler::top_p(params.top_p, 1),
            LlamaSampler::min_p(params.min_p, 1),
            LlamaSampler::temp(params.temperature),
            LlamaSampler::dist(params.seed.unwrap_or(RANDOM_SEED)),
        ])
    }
}

impl TextGenerator for LocalModel {
    #[instrument(level = "debug", skip_all, fields(max_tokens = params.max_tokens))]
    fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<Completion> {
        let backend = get_backend(self.config.verbose)?;

        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Always)
            .map_err(AiError::generation)?;
        let n_prompt = tokens.len();
        let budget = token_budget(params.max_tokens, self.config.n_ctx as usize, n_prompt)?;
        debug!(n_prompt, budget, "Prompt tokenized");

        let mut ctx = self
            .model
            .new_context(backend, self.context_params())
            .map_err(AiError::generation)?;

        let mut batch = LlamaBatch::new(n_prompt, 1);
        let last_index = n_prompt as i32 - 1;
        for (i, token) in (0_i32..).zip(tokens) {
            batch
                .add(token, i, &[0], i == last_index)
                .map_err(AiError::generation)?;
        }
        ctx.decode(&mut batch).map_err(AiError::generation)?;

        let mut sampler = Self::sampler(&params.sampling);
        let mut output: Vec<u8> = Vec::new();
        let mut finish_reason = FinishReason::Length;
        let mut n_cur = n_prompt as i32;

        for _ in 0..budget {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(token);
            if self.model.is_eog_token(token) {
                finish_reason = FinishReason::Stop;
                break;
            }

            let piece = self
                .model
                .token_to_piece_bytes(token, PIECE_BUFFER, false, None)
                .map_err(AiError::generation)?;
            output.extend_from_slice(&piece);
            if let Some(at) = find_stop(&output, &params.stop) {
                trace!(at, "Stop sequence reached");
                output.truncate(at);
                finish_reason = FinishReason::Stop;
                break;
            }

            batch.clear();
            batch
                .add(token, n_cur, &[0], true)
                .map_err(AiError::generation)?;
            n_cur += 1;
            ctx.decode(&mut batch).map_err(AiError::generation)?;
        }

        let text = finish_text(&output, prompt, params.echo);
        debug!(len = text.len(), ?finish_reason, "Completion done");

        Ok(Completion {
            choices: vec![CompletionChoice {
                text,
                finish_reason,
            }],
        })
    }
}
