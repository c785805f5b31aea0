//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_waits(config, &mut result);
        Self::validate_pipeline(config, &mut result);
        Self::validate_profile(config, &mut result);
        Self::validate_server(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }
    }

    fn validate_waits(config: &Config, result: &mut ValidationResult) {
        if config.waits.element_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "waits.element_timeout_ms",
                "element_timeout_ms must be greater than 0",
            ));
        }

        if config.waits.apply_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "waits.apply_timeout_ms",
                "apply_timeout_ms must be greater than 0",
            ));
        }

        if config.waits.apply_timeout_ms > config.waits.element_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "waits.apply_timeout_ms",
                "apply_timeout_ms is longer than element_timeout_ms",
            ));
        }
    }

    fn validate_pipeline(config: &Config, result: &mut ValidationResult) {
        if config.pipeline.max_passes == 0 {
            result.add_error(ValidationError::new(
                "pipeline.max_passes",
                "max_passes must be greater than 0",
            ));
        }

        if config.pipeline.max_passes > 5 {
            result.add_warning(ValidationWarning::new(
                "pipeline.max_passes",
                "max_passes is high (>5), repeated passes re-fill the same form",
            ));
        }
    }

    fn validate_profile(config: &Config, result: &mut ValidationResult) {
        if !config.profile.source.uses_supabase() {
            return;
        }

        match config.supabase.url.as_deref() {
            None => result.add_error(ValidationError::new(
                "supabase.url",
                "url is required when the profile source uses Supabase",
            )),
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                result.add_error(ValidationError::new(
                    "supabase.url",
                    "url must start with http:// or https://",
                ))
            }
            Some(_) => {}
        }

        if config.supabase.anon_key.is_none() {
            result.add_error(ValidationError::new(
                "supabase.anon_key",
                "anon_key is required when the profile source uses Supabase",
            ));
        }

        if config.supabase.access_token.is_none() {
            result.add_warning(ValidationWarning::new(
                "supabase.access_token",
                "access_token is not set, row-level security may hide the profile row",
            ));
        }
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
