//! Generation adapter: one prompt in, one completion text out.

use tracing::{debug, instrument};

use super::error::{AiError, Result};

/// End-of-turn marker of Mistral Instruct.
pub const END_OF_TURN: &str = "</s>";
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Sampler settings. A temperature of zero or below means greedy decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: i32,
    pub top_p: f32,
    pub min_p: f32,
    /// Fixed seed for reproducible output; random when `None`.
    pub seed: Option<u32>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            min_p: 0.05,
            seed: None,
        }
    }
}

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Output is cut at the first occurrence of any of these.
    pub stop: Vec<String>,
    /// Prepend the prompt to the returned text.
    pub echo: bool,
    pub sampling: SamplingParams,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            stop: vec![END_OF_TURN.to_string()],
            echo: false,
            sampling: SamplingParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// End-of-generation token or a stop sequence.
    Stop,
    /// Token budget exhausted.
    Length,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionChoice {
    pub text: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub choices: Vec<CompletionChoice>,
}

/// Something that can complete a prompt: the local llama.cpp model in
/// production, a scripted stand-in in tests.
pub trait TextGenerator {
    fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<Completion>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<Completion> {
        (**self).complete(prompt, params)
    }
}

/// Run the model once and return the first choice's text unmodified.
///
/// Failures from the generator are passed through untouched; nothing is
/// retried.
#[instrument(level = "debug", skip_all, fields(prompt_len = prompt.len()))]
pub fn generate<G: TextGenerator + ?Sized>(
    generator: &G,
    prompt: &str,
    params: &GenerationParams,
) -> Result<String> {
    let completion = generator.complete(prompt, params)?;
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiError::generation("completion returned no choices"))?;
    debug!(
        finish_reason = ?choice.finish_reason,
        len = choice.text.len(),
        "Generation finished"
    );
    Ok(choice.text)
}

/// Byte offset of the earliest stop sequence in `text`, if any.
pub fn find_stop(text: &[u8], stop: &[String]) -> Option<usize> {
    stop.iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            let needle = s.as_bytes();
            text.windows(needle.len()).position(|w| w == needle)
        })
        .min()
}

/// Tokens left for the completion once the prompt is in the context window.
///
/// An empty prompt, or one that already fills the window, cannot be completed.
pub fn token_budget(max_tokens: u32, n_ctx: usize, n_prompt: usize) -> Result<usize> {
    if n_prompt == 0 || n_prompt >= n_ctx {
        return Err(AiError::generation(format!(
            "prompt of {n_prompt} tokens does not fit the context window of {n_ctx}"
        )));
    }
    Ok((max_tokens as usize).min(n_ctx - n_prompt))
}

/// Decode the generated bytes, with the prompt in front when `echo` is set.
///
/// Pieces are collected as raw bytes so a character split across two tokens
/// decodes whole; only a truncated tail is replaced.
pub fn finish_text(output: &[u8], prompt: &str, echo: bool) -> String {
    let text = String::from_utf8_lossy(output);
    if echo {
        format!("{prompt}{text}")
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<CompletionChoice>);

    impl TextGenerator for Fixed {
        fn complete(&self, _prompt: &str, _params: &GenerationParams) -> Result<Completion> {
            Ok(Completion {
                choices: self.0.clone(),
            })
        }
    }

    #[test]
    fn defaults_match_mistral_setup() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 512);
        assert_eq!(params.stop, vec!["</s>".to_string()]);
        assert!(!params.echo);
    }

    #[test]
    fn generate_returns_first_choice_untrimmed() {
        let gen = Fixed(vec![
            CompletionChoice {
                text: "  - Rice | Grains | 500g\n".into(),
                finish_reason: FinishReason::Stop,
            },
            CompletionChoice {
                text: "second".into(),
                finish_reason: FinishReason::Length,
            },
        ]);
        let text = generate(&gen, "p", &GenerationParams::default()).unwrap();
        assert_eq!(text, "  - Rice | Grains | 500g\n");
    }

    #[test]
    fn generate_without_choices_fails() {
        let err = generate(&Fixed(vec![]), "p", &GenerationParams::default()).unwrap_err();
        assert!(matches!(err, AiError::Generation(_)));
    }

    #[test]
    fn find_stop_picks_earliest() {
        let stops = vec!["</s>".to_string(), "[INST]".to_string()];
        assert_eq!(find_stop(b"abc[INST]x</s>", &stops), Some(3));
        assert_eq!(find_stop(b"abc</s>", &stops), Some(3));
        assert_eq!(find_stop(b"abc</", &stops), None);
    }

    #[test]
    fn find_stop_ignores_empty_sequences() {
        assert_eq!(find_stop(b"abc", &[String::new()]), None);
    }

    #[test]
    fn budget_is_clamped_by_context() {
        assert_eq!(token_budget(512, 2048, 100).unwrap(), 512);
        assert_eq!(token_budget(512, 2048, 1800).unwrap(), 248);
        assert_eq!(token_budget(512, 2048, 2047).unwrap(), 1);
    }

    #[test]
    fn prompt_filling_context_fails() {
        let err = token_budget(512, 2048, 2048).unwrap_err();
        assert!(matches!(err, AiError::Generation(_)));
        assert!(token_budget(512, 2048, 4096).is_err());
    }

    #[test]
    fn empty_prompt_fails() {
        assert!(matches!(
            token_budget(512, 2048, 0),
            Err(AiError::Generation(_))
        ));
    }

    #[test]
    fn finish_text_echo_off_and_on() {
        let output = b"- Rice | Grains | 500g";
        assert_eq!(finish_text(output, "[INST] x [/INST]", false), "- Rice | Grains | 500g");
        assert_eq!(
            finish_text(output, "[INST] x [/INST]", true),
            "[INST] x [/INST]- Rice | Grains | 500g"
        );
    }

    #[test]
    fn finish_text_joins_character_split_across_pieces() {
        let bytes = "Jalapeño | Produce | 2".as_bytes();
        let split = "Jalape".len() + 1;
        let mut output = Vec::new();
        output.extend_from_slice(&bytes[..split]);
        output.extend_from_slice(&bytes[split..]);
        assert_eq!(finish_text(&output, "", false), "Jalapeño | Produce | 2");
    }

    #[test]
    fn finish_text_replaces_truncated_tail() {
        let bytes = "ñ".as_bytes();
        assert_eq!(finish_text(&bytes[..1], "", false), "\u{FFFD}");
    }
}
