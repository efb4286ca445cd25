//! Validation for the provider, session, and generation sections.

use crate::schema::{ParleyConfig, CONFIG_SCHEMA_VERSION};

use super::helpers::{validate_not_blank, validate_range, validate_range_f64};

/// Reject files written for a newer schema than this build understands.
pub(crate) fn validate_schema_version(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_range(
        errors,
        "schema_version",
        config.schema_version,
        1,
        CONFIG_SCHEMA_VERSION,
    );
}

/// Validate provider constraints.
pub(crate) fn validate_provider(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_range(
        errors,
        "provider.max_tokens",
        config.provider.max_tokens,
        1,
        32_768,
    );
    validate_range_f64(
        errors,
        "provider.temperature",
        config.provider.temperature,
        0.0,
        2.0,
    );
    if let Some(ref model) = config.provider.model {
        validate_not_blank(errors, "provider.model", model);
    }
    if let Some(ref prompt) = config.provider.system_prompt {
        validate_not_blank(errors, "provider.system_prompt", prompt);
    }
}

/// Validate session constraints.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_not_blank(errors, "session.default_id", &config.session.default_id);
    validate_not_blank(
        errors,
        "session.exit_sentinel",
        &config.session.exit_sentinel,
    );
}

/// Validate generation constraints.
pub(crate) fn validate_generation(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_range(
        errors,
        "generation.timeout_secs",
        config.generation.timeout_secs,
        0,
        600,
    );
    if let Some(ref template) = config.generation.prompt_template {
        for placeholder in ["{history}", "{question}"] {
            if !template.contains(placeholder) {
                errors.push(format!(
                    "generation.prompt_template is missing the {placeholder} placeholder"
                ));
            }
        }
    }
}
