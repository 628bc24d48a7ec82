use grocerygen::ai::config::{ModelConfig, DEFAULT_MODEL_PATH};
use grocerygen::Config;
use serial_test::serial;
use std::path::PathBuf;

const VARS: [&str; 8] = [
    "GROCERY_MODEL_PATH",
    "GROCERY_N_CTX",
    "GROCERY_N_THREADS",
    "GROCERY_VERBOSE",
    "GROCERY_MAX_TOKENS",
    "GROCERY_TEMPERATURE",
    "GROCERY_SEED",
    "GROCERY_SANITIZE_INPUT",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn model_config_defaults() {
    clear_env();
    let cfg = ModelConfig::from_env();
    assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    assert_eq!(cfg.n_ctx, 2048);
    assert_eq!(cfg.n_threads, 6);
    assert!(!cfg.verbose);
    assert_eq!(cfg.model_name(), "mistral-7b-instruct-v0.2.Q4_K_M.gguf");
}

#[test]
#[serial]
fn model_config_custom_values() {
    clear_env();
    std::env::set_var("GROCERY_MODEL_PATH", "/models/other.gguf");
    std::env::set_var("GROCERY_N_CTX", "4096");
    std::env::set_var("GROCERY_N_THREADS", "2");
    std::env::set_var("GROCERY_VERBOSE", "true");
    let cfg = ModelConfig::from_env();
    assert_eq!(cfg.model_path, PathBuf::from("/models/other.gguf"));
    assert_eq!(cfg.model_name(), "other.gguf");
    assert_eq!(cfg.n_ctx, 4096);
    assert_eq!(cfg.n_threads, 2);
    assert!(cfg.verbose);
    clear_env();
}

#[test]
#[serial]
fn unparseable_values_fall_back_to_defaults() {
    clear_env();
    std::env::set_var("GROCERY_N_CTX", "lots");
    std::env::set_var("GROCERY_MAX_TOKENS", "-1");
    std::env::set_var("GROCERY_SANITIZE_INPUT", "maybe");
    std::env::set_var("GROCERY_SEED", "random");
    let cfg = Config::from_env();
    assert_eq!(cfg.model.n_ctx, 2048);
    assert_eq!(cfg.generation.sampling.seed, None);
    assert_eq!(cfg.generation.max_tokens, 512);
    assert!(cfg.sanitize_input);
    clear_env();
}

#[test]
#[serial]
fn config_from_env_generation_settings() {
    clear_env();
    std::env::set_var("GROCERY_MAX_TOKENS", "256");
    std::env::set_var("GROCERY_TEMPERATURE", "0");
    std::env::set_var("GROCERY_SEED", "42");
    std::env::set_var("GROCERY_SANITIZE_INPUT", "false");
    let cfg = Config::from_env();
    assert_eq!(cfg.generation.max_tokens, 256);
    assert_eq!(cfg.generation.sampling.temperature, 0.0);
    assert_eq!(cfg.generation.sampling.seed, Some(42));
    assert_eq!(cfg.generation.stop, vec!["</s>".to_string()]);
    assert!(!cfg.generation.echo);
    assert!(!cfg.sanitize_input);
    clear_env();
}
