//! Process-wide owner of the loaded model.
//!
//! The context is built once at start-up and handed out by reference for the
//! rest of the process. It is never torn down explicitly; the model is freed
//! when the process exits.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::ai::error::{AiError, Result};
use crate::ai::{load_model, GenerationParams, LocalModel, ModelConfig, TextGenerator};
use crate::pipeline::{run_pipeline, PipelineOutcome};
use crate::table::GroceryRequest;

pub struct AppContext<G = LocalModel> {
    /// Held for the whole of a generation, so at most one runs at a time.
    generator: Mutex<G>,
    params: GenerationParams,
}

impl AppContext<LocalModel> {
    /// Load the weights named by `config`.
    ///
    /// Fails with [`AiError::ModelUnavailable`] when the file is missing, so no
    /// pipeline run can start without a model.
    pub fn load(config: &ModelConfig, params: GenerationParams) -> Result<Self> {
        match load_model(config)? {
            Some(model) => Ok(Self::new(model, params)),
            None => Err(AiError::ModelUnavailable {
                path: config.model_path.clone(),
            }),
        }
    }
}

impl<G: TextGenerator> AppContext<G> {
    pub fn new(generator: G, params: GenerationParams) -> Self {
        Self {
            generator: Mutex::new(generator),
            params,
        }
    }

    /// Run one request through the pipeline. Concurrent callers queue on the
    /// model lock.
    pub fn run(&self, request: &GroceryRequest) -> Result<PipelineOutcome> {
        let generator = self.lock();
        run_pipeline(&*generator, request, &self.params)
    }

    fn lock(&self) -> MutexGuard<'_, G> {
        // Generation keeps no state between calls.
        self.generator.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            debug!("Recovering model lock after panic");
            poisoned.into_inner()
        })
    }
}
