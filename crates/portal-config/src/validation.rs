//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` instead of stopping
//! at the first one.

use crate::schema::PortalConfig;
use portal_common::ConfigError;

const MAX_TIMEOUT_SECS: u64 = 600;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PortalConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_gemini(&mut errors, config);
    validate_chat(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_gemini(errors: &mut Vec<String>, config: &PortalConfig) {
    let gemini = &config.gemini;

    if gemini.model.trim().is_empty() {
        errors.push("gemini.model must not be empty".into());
    } else if gemini.model.contains('/') || gemini.model.contains(char::is_whitespace) {
        errors.push(format!(
            "gemini.model = {:?} must not contain '/' or whitespace",
            gemini.model
        ));
    }

    if !(gemini.base_url.starts_with("https://") || gemini.base_url.starts_with("http://")) {
        errors.push(format!(
            "gemini.base_url = {:?} must start with http:// or https://",
            gemini.base_url
        ));
    }

    validate_max(errors, "gemini.timeout_secs", gemini.timeout_secs, MAX_TIMEOUT_SECS);
    validate_max(
        errors,
        "gemini.connect_timeout_secs",
        gemini.connect_timeout_secs,
        MAX_TIMEOUT_SECS,
    );
}

fn validate_chat(errors: &mut Vec<String>, config: &PortalConfig) {
    if config.chat.greeting.trim().is_empty() {
        errors.push("chat.greeting must not be empty".into());
    }
    if config.chat.fallback_reply.trim().is_empty() {
        errors.push("chat.fallback_reply must not be empty".into());
    }
}

fn validate_max(errors: &mut Vec<String>, name: &str, value: u64, max: u64) {
    if value > max {
        errors.push(format!("{name} = {value} is out of range [0, {max}]"));
    }
}
