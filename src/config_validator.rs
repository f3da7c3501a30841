// Configuration validation module for Media Gateway
//
// This module validates every configuration parameter sourced from the environment
// and turns them into a typed GatewayConfig. Errors are collected rather than
// returned on first failure, so a misconfigured deployment reports everything at once.
//
// The validation is schema-driven: CONFIG_PARAMS is the single registry of names,
// types, defaults and ranges for all configuration options.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;

use log::{error, info, warn};

use crate::config::{defaults, BackendEndpoint, GatewayConfig};

/// Configuration parameter types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigType {
    UnsignedInteger,
    IpAddress,
    Port,
    HttpUrl,
    UrlPath,
}

/// Validation severity levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationLevel {
    Critical, // Must be valid for application to start
    Warning,  // Tuning knob; an invalid value is reported and the default kept
}

/// Configuration parameter definition
#[derive(Debug, Clone)]
pub struct ConfigParam {
    pub name: &'static str,
    pub description: &'static str,
    pub param_type: ConfigType,
    pub default_value: &'static str,
    pub validation_level: ValidationLevel,
    pub min_value: Option<u64>,
    pub max_value: Option<u64>,
}

const fn param(
    name: &'static str,
    description: &'static str,
    param_type: ConfigType,
    default_value: &'static str,
    validation_level: ValidationLevel,
) -> ConfigParam {
    ConfigParam {
        name,
        description,
        param_type,
        default_value,
        validation_level,
        min_value: None,
        max_value: None,
    }
}

/// Centralized configuration parameter registry
pub const CONFIG_PARAMS: &[ConfigParam] = &[
    // Server Configuration
    param(
        "GATEWAY_HOST",
        "Host IP address the gateway listens on",
        ConfigType::IpAddress,
        defaults::HOST,
        ValidationLevel::Critical,
    ),
    param(
        "GATEWAY_PORT",
        "Port the gateway listens on",
        ConfigType::Port,
        "3000",
        ValidationLevel::Critical,
    ),
    ConfigParam {
        name: "GATEWAY_WORKERS",
        description: "Number of HTTP workers (0 = one per CPU)",
        param_type: ConfigType::UnsignedInteger,
        default_value: "0",
        validation_level: ValidationLevel::Warning,
        min_value: Some(0),
        max_value: Some(1024),
    },
    param(
        "GATEWAY_KEEPALIVE",
        "Keep-alive duration for client connections in seconds",
        ConfigType::UnsignedInteger,
        "75",
        ValidationLevel::Warning,
    ),
    param(
        "GATEWAY_CLIENT_TIMEOUT",
        "Client disconnect timeout in seconds",
        ConfigType::UnsignedInteger,
        "5",
        ValidationLevel::Warning,
    ),
    param(
        "GATEWAY_UPSTREAM_TIMEOUT",
        "Timeout for each upstream call in seconds (0 = no timeout)",
        ConfigType::UnsignedInteger,
        "300",
        ValidationLevel::Critical,
    ),
    param(
        "GATEWAY_MAX_BODY_SIZE",
        "Maximum accepted request body in bytes (0 = unlimited)",
        ConfigType::UnsignedInteger,
        "0",
        ValidationLevel::Critical,
    ),
    // Conversion service
    param(
        "CONVERSION_API_URL",
        "Base URL (scheme and host) of the conversion service",
        ConfigType::HttpUrl,
        defaults::CONVERSION_API_URL,
        ValidationLevel::Critical,
    ),
    param(
        "CONVERSION_API_PORT",
        "Port of the conversion service",
        ConfigType::Port,
        "7382",
        ValidationLevel::Critical,
    ),
    param(
        "CONVERSION_SUBMIT_PATH",
        "Path of the conversion job creation endpoint",
        ConfigType::UrlPath,
        defaults::CONVERSION_SUBMIT_PATH,
        ValidationLevel::Critical,
    ),
    param(
        "CONVERSION_STATUS_PATH",
        "Path of the conversion job status endpoint",
        ConfigType::UrlPath,
        defaults::CONVERSION_STATUS_PATH,
        ValidationLevel::Critical,
    ),
    param(
        "CONVERSION_RESULT_PATH",
        "Path of the conversion result endpoint",
        ConfigType::UrlPath,
        defaults::CONVERSION_RESULT_PATH,
        ValidationLevel::Critical,
    ),
    // Subtitling service
    param(
        "SUBTITLES_API_URL",
        "Base URL (scheme and host) of the subtitling service",
        ConfigType::HttpUrl,
        defaults::SUBTITLES_API_URL,
        ValidationLevel::Critical,
    ),
    param(
        "SUBTITLES_API_PORT",
        "Port of the subtitling service",
        ConfigType::Port,
        "7380",
        ValidationLevel::Critical,
    ),
    param(
        "SUBTITLES_SUBMIT_PATH",
        "Path of the subtitling project creation endpoint",
        ConfigType::UrlPath,
        defaults::SUBTITLES_SUBMIT_PATH,
        ValidationLevel::Critical,
    ),
    param(
        "SUBTITLES_STATUS_PATH",
        "Path of the subtitling project state endpoint",
        ConfigType::UrlPath,
        defaults::SUBTITLES_STATUS_PATH,
        ValidationLevel::Critical,
    ),
    param(
        "SUBTITLES_RESULT_PATH",
        "Path of the subtitling result endpoint",
        ConfigType::UrlPath,
        defaults::SUBTITLES_RESULT_PATH,
        ValidationLevel::Critical,
    ),
];

/// Configuration validation errors with detailed context
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub value: String,
    pub error_type: ConfigErrorType,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigErrorType {
    InvalidValue,
    InvalidFormat,
    InvalidRange,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration error in '{}' ({:?}): {} (value: '{}')",
            self.field, self.error_type, self.message, self.value
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " - Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result type for configuration validation
pub type ValidationResult<T> = Result<T, ConfigValidationError>;

/// Configuration validation results
#[derive(Debug, Default)]
pub struct ValidationResults {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ConfigValidationError) {
        self.warnings.push(warning);
    }

    fn add(&mut self, level: ValidationLevel, error: ConfigValidationError) {
        match level {
            ValidationLevel::Critical => self.add_error(error),
            ValidationLevel::Warning => self.add_warning(error),
        }
    }

    pub fn print_summary(&self) {
        if !self.errors.is_empty() {
            error!(
                "Configuration validation found {} error(s):",
                self.errors.len()
            );
            for (i, err) in self.errors.iter().enumerate() {
                error!("  {}. {}", i + 1, err);
            }
        }

        if !self.warnings.is_empty() {
            warn!(
                "Configuration validation found {} warning(s):",
                self.warnings.len()
            );
            for (i, warn) in self.warnings.iter().enumerate() {
                warn!("  {}. {}", i + 1, warn);
            }
        }

        if self.is_valid() && self.warnings.is_empty() {
            info!("Configuration validation passed successfully");
        } else if self.is_valid() {
            info!(
                "Configuration validation passed with {} warning(s)",
                self.warnings.len()
            );
        }
    }
}

/// Helper functions for common validation patterns
pub mod validators {
    use super::*;

    /// Validate unsigned integer values with optional range
    pub fn validate_unsigned(
        field: &str,
        value: &str,
        min: Option<u64>,
        max: Option<u64>,
    ) -> ValidationResult<u64> {
        let parsed = value.parse::<u64>().map_err(|_| ConfigValidationError {
            field: field.to_string(),
            value: value.to_string(),
            error_type: ConfigErrorType::InvalidFormat,
            message: "Invalid unsigned integer format".to_string(),
            suggestion: Some("Use a non-negative whole number".to_string()),
        })?;

        if let Some(min) = min {
            if parsed < min {
                return Err(ConfigValidationError {
                    field: field.to_string(),
                    value: value.to_string(),
                    error_type: ConfigErrorType::InvalidRange,
                    message: format!("Value {} is below minimum {}", parsed, min),
                    suggestion: Some(format!("Use a value >= {}", min)),
                });
            }
        }

        if let Some(max) = max {
            if parsed > max {
                return Err(ConfigValidationError {
                    field: field.to_string(),
                    value: value.to_string(),
                    error_type: ConfigErrorType::InvalidRange,
                    message: format!("Value {} is above maximum {}", parsed, max),
                    suggestion: Some(format!("Use a value <= {}", max)),
                });
            }
        }

        Ok(parsed)
    }

    /// Validate IP address
    pub fn validate_ip_address(field: &str, value: &str) -> ValidationResult<IpAddr> {
        IpAddr::from_str(value).map_err(|_| ConfigValidationError {
            field: field.to_string(),
            value: value.to_string(),
            error_type: ConfigErrorType::InvalidFormat,
            message: "Invalid IP address format".to_string(),
            suggestion: Some(
                "Use a valid IPv4 or IPv6 address (e.g., 127.0.0.1 or ::1)".to_string(),
            ),
        })
    }

    /// Validate port number
    pub fn validate_port(field: &str, value: &str) -> ValidationResult<u16> {
        let port = value.parse::<u16>().map_err(|_| ConfigValidationError {
            field: field.to_string(),
            value: value.to_string(),
            error_type: ConfigErrorType::InvalidFormat,
            message: "Invalid port number format".to_string(),
            suggestion: Some("Use a number between 1 and 65535".to_string()),
        })?;

        if port == 0 {
            return Err(ConfigValidationError {
                field: field.to_string(),
                value: value.to_string(),
                error_type: ConfigErrorType::InvalidRange,
                message: "Port number cannot be 0".to_string(),
                suggestion: Some("Use a port between 1 and 65535".to_string()),
            });
        }

        Ok(port)
    }

    /// Validate an upstream base URL: http(s), a host, and nothing else
    pub fn validate_http_url(field: &str, value: &str) -> ValidationResult<String> {
        let invalid = |error_type, message: &str, suggestion: &str| ConfigValidationError {
            field: field.to_string(),
            value: value.to_string(),
            error_type,
            message: message.to_string(),
            suggestion: Some(suggestion.to_string()),
        };

        let url = reqwest::Url::parse(value).map_err(|_| {
            invalid(
                ConfigErrorType::InvalidFormat,
                "Invalid URL format",
                "Use a URL such as http://upstream.example.org",
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                ConfigErrorType::InvalidValue,
                "Unsupported URL scheme",
                "Use http:// or https://",
            ));
        }
        if url.host_str().is_none() {
            return Err(invalid(
                ConfigErrorType::InvalidFormat,
                "URL has no host",
                "Use a URL such as http://upstream.example.org",
            ));
        }
        if url.port().is_some() || has_explicit_port(value) {
            return Err(invalid(
                ConfigErrorType::InvalidValue,
                "URL must not carry a port",
                "Move the port to the matching *_API_PORT parameter",
            ));
        }
        if url.path() != "/" || url.query().is_some() {
            return Err(invalid(
                ConfigErrorType::InvalidValue,
                "URL must not carry a path or query",
                "Move the path to the matching *_PATH parameter",
            ));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// True when the authority of `value` spells out a port, even the scheme's default
    fn has_explicit_port(value: &str) -> bool {
        let rest = value.split_once("://").map_or(value, |(_, rest)| rest);
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        let after_host = match host_port.rfind(']') {
            Some(end) => &host_port[end + 1..],
            None => host_port,
        };
        after_host.contains(':')
    }

    /// Validate an absolute URL path such as `/conversion-start`
    pub fn validate_url_path(field: &str, value: &str) -> ValidationResult<String> {
        if !value.starts_with('/') {
            return Err(ConfigValidationError {
                field: field.to_string(),
                value: value.to_string(),
                error_type: ConfigErrorType::InvalidFormat,
                message: "Path must start with '/'".to_string(),
                suggestion: Some(format!("Use '/{}'", value)),
            });
        }
        if value.contains(['?', '#']) || value.chars().any(char::is_whitespace) {
            return Err(ConfigValidationError {
                field: field.to_string(),
                value: value.to_string(),
                error_type: ConfigErrorType::InvalidValue,
                message: "Path must not contain a query, fragment or whitespace".to_string(),
                suggestion: None,
            });
        }
        Ok(value.to_string())
    }
}

/// Helper function to get optional environment variable
pub fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Comprehensive configuration validator for the gateway
pub struct GatewayConfigValidator;

impl GatewayConfigValidator {
    /// Validate all parameters from the process environment
    pub fn validate_and_load() -> Result<GatewayConfig, ValidationResults> {
        info!("Starting configuration validation...");
        let (config, results) = Self::validate_with(get_env_optional);
        results.print_summary();

        if results.is_valid() {
            Ok(config)
        } else {
            Err(results)
        }
    }

    /// Validate all parameters read through `lookup`, falling back to registry defaults
    pub fn validate_with<F>(lookup: F) -> (GatewayConfig, ValidationResults)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut results = ValidationResults::new();
        let mut config = GatewayConfig::default();

        for param in CONFIG_PARAMS {
            let value = lookup(param.name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| param.default_value.to_string());

            if let Err(error) = Self::validate_and_store_parameter(param, &value, &mut config) {
                results.add(param.validation_level, error);
            }
        }

        Self::validate_cross_dependencies(&mut results, &config);

        (config, results)
    }

    /// Validate a single parameter and store its value in the config struct
    fn validate_and_store_parameter(
        param: &ConfigParam,
        value: &str,
        config: &mut GatewayConfig,
    ) -> ValidationResult<()> {
        match param.param_type {
            ConfigType::UnsignedInteger => {
                let parsed = validators::validate_unsigned(
                    param.name,
                    value,
                    param.min_value,
                    param.max_value,
                )?;
                match param.name {
                    "GATEWAY_WORKERS" => config.workers = parsed as usize,
                    "GATEWAY_KEEPALIVE" => config.keepalive = parsed,
                    "GATEWAY_CLIENT_TIMEOUT" => config.client_timeout = parsed,
                    "GATEWAY_UPSTREAM_TIMEOUT" => config.upstream_timeout = parsed,
                    "GATEWAY_MAX_BODY_SIZE" => {
                        config.max_body_size = usize::try_from(parsed).unwrap_or(usize::MAX)
                    }
                    _ => {}
                }
            }
            ConfigType::IpAddress => {
                let parsed = validators::validate_ip_address(param.name, value)?;
                if param.name == "GATEWAY_HOST" {
                    config.host = parsed;
                }
            }
            ConfigType::Port => {
                let parsed = validators::validate_port(param.name, value)?;
                match param.name {
                    "GATEWAY_PORT" => config.port = parsed,
                    "CONVERSION_API_PORT" => config.conversion.port = parsed,
                    "SUBTITLES_API_PORT" => config.subtitles.port = parsed,
                    _ => {}
                }
            }
            ConfigType::HttpUrl => {
                let parsed = validators::validate_http_url(param.name, value)?;
                match param.name {
                    "CONVERSION_API_URL" => config.conversion.base_url = parsed,
                    "SUBTITLES_API_URL" => config.subtitles.base_url = parsed,
                    _ => {}
                }
            }
            ConfigType::UrlPath => {
                let parsed = validators::validate_url_path(param.name, value)?;
                match param.name {
                    "CONVERSION_SUBMIT_PATH" => config.conversion.submit_path = parsed,
                    "CONVERSION_STATUS_PATH" => config.conversion.status_path = parsed,
                    "CONVERSION_RESULT_PATH" => config.conversion.result_path = parsed,
                    "SUBTITLES_SUBMIT_PATH" => config.subtitles.submit_path = parsed,
                    "SUBTITLES_STATUS_PATH" => config.subtitles.status_path = parsed,
                    "SUBTITLES_RESULT_PATH" => config.subtitles.result_path = parsed,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Validate cross-parameter dependencies
    fn validate_cross_dependencies(results: &mut ValidationResults, config: &GatewayConfig) {
        if config.upstream_timeout == 0 {
            results.add_warning(ConfigValidationError {
                field: "GATEWAY_UPSTREAM_TIMEOUT".to_string(),
                value: "0".to_string(),
                error_type: ConfigErrorType::InvalidValue,
                message: "Upstream calls have no timeout; a stalled upstream holds the request open"
                    .to_string(),
                suggestion: Some("Set a timeout in seconds, e.g. 300".to_string()),
            });
        }

        for (name, endpoint) in [
            ("CONVERSION", &config.conversion),
            ("SUBTITLES", &config.subtitles),
        ] {
            if Self::has_duplicate_paths(endpoint) {
                results.add_warning(ConfigValidationError {
                    field: format!("{}_*_PATH", name),
                    value: endpoint.submit_path.clone(),
                    error_type: ConfigErrorType::InvalidValue,
                    message: "Two operations of the same service share one path".to_string(),
                    suggestion: Some("Check the submit, status and result paths".to_string()),
                });
            }
        }
    }

    fn has_duplicate_paths(endpoint: &BackendEndpoint) -> bool {
        endpoint.submit_path == endpoint.status_path
            || endpoint.submit_path == endpoint.result_path
            || endpoint.status_path == endpoint.result_path
    }
}

/// Documentation and configuration generation utilities
impl GatewayConfigValidator {
    /// Generate a sample configuration file with all parameters and descriptions
    pub fn generate_sample_config() -> String {
        let mut output = String::new();
        output.push_str("# Media Gateway Configuration File\n");
        output.push_str("# This file contains all available configuration parameters\n\n");

        let mut current_category = "";
        for param in CONFIG_PARAMS {
            let category = if param.name.starts_with("GATEWAY_") {
                "Server Configuration"
            } else if param.name.starts_with("CONVERSION_") {
                "Conversion Service"
            } else if param.name.starts_with("SUBTITLES_") {
                "Subtitling Service"
            } else {
                "General Configuration"
            };

            if category != current_category {
                output.push_str(&format!("\n# ======== {} ========\n", category));
                current_category = category;
            }

            output.push_str(&format!("# {}\n", param.description));
            let rendered = match param.param_type {
                ConfigType::UnsignedInteger | ConfigType::Port => param.default_value.to_string(),
                _ => format!("\"{}\"", param.default_value),
            };
            output.push_str(&format!("{} = {}\n\n", param.name, rendered));
        }
        output
    }

    /// Generate markdown documentation for all configuration parameters
    pub fn generate_config_documentation() -> String {
        let mut output = String::new();
        output.push_str("# Media Gateway Configuration Reference\n\n");
        output.push_str(
            "Every parameter can be set as an environment variable or in the configuration file.\n\n",
        );

        output.push_str("| Parameter | Type | If invalid | Default | Description |\n");
        output.push_str("|-----------|------|------------|---------|-------------|\n");

        for param in CONFIG_PARAMS {
            output.push_str(&format!(
                "| `{}` | {:?} | {} | `{}` | {} |\n",
                param.name,
                param.param_type,
                match param.validation_level {
                    ValidationLevel::Critical => "refuse to start",
                    ValidationLevel::Warning => "warn, keep default",
                },
                param.default_value,
                param.description
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let (config, results) = GatewayConfigValidator::validate_with(|_| None);
        assert!(results.is_valid(), "{:?}", results.errors);
        assert_eq!(config.port, 3000);
        assert_eq!(config.conversion.port, 7382);
        assert_eq!(config.subtitles.port, 7380);
        assert_eq!(config.upstream_timeout, 300);
    }

    #[test]
    fn overrides_are_applied() {
        let (config, results) = GatewayConfigValidator::validate_with(lookup(&[
            ("GATEWAY_PORT", "8080"),
            ("GATEWAY_HOST", "0.0.0.0"),
            ("CONVERSION_API_URL", "https://convert.internal/"),
            ("CONVERSION_API_PORT", "9000"),
            ("SUBTITLES_STATUS_PATH", "/state"),
            ("GATEWAY_MAX_BODY_SIZE", "1048576"),
        ]));
        assert!(results.is_valid(), "{:?}", results.errors);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.conversion.base_url, "https://convert.internal");
        assert_eq!(config.conversion.port, 9000);
        assert_eq!(config.subtitles.status_path, "/state");
        assert_eq!(config.max_body_size(), Some(1_048_576));
        assert_eq!(
            config.upstreams().conversion.submit.url(),
            "https://convert.internal:9000/conversion-start"
        );
    }

    #[test]
    fn all_errors_are_collected() {
        let (_, results) = GatewayConfigValidator::validate_with(lookup(&[
            ("GATEWAY_PORT", "0"),
            ("GATEWAY_HOST", "localhost"),
            ("SUBTITLES_API_URL", "ftp://subs"),
            ("CONVERSION_STATUS_PATH", "status"),
        ]));
        assert!(!results.is_valid());
        let fields: Vec<_> = results.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "GATEWAY_HOST",
                "GATEWAY_PORT",
                "CONVERSION_STATUS_PATH",
                "SUBTITLES_API_URL"
            ]
        );
    }

    #[test]
    fn base_url_must_not_carry_port_or_path() {
        let err = validators::validate_http_url("X", "http://host:8080").unwrap_err();
        assert_eq!(err.error_type, ConfigErrorType::InvalidValue);
        let err = validators::validate_http_url("X", "http://host:80").unwrap_err();
        assert_eq!(err.error_type, ConfigErrorType::InvalidValue);
        let err = validators::validate_http_url("X", "https://[::1]:443/").unwrap_err();
        assert_eq!(err.error_type, ConfigErrorType::InvalidValue);
        let err = validators::validate_http_url("X", "http://host/api").unwrap_err();
        assert_eq!(err.error_type, ConfigErrorType::InvalidValue);
        assert!(validators::validate_http_url("X", "not a url").is_err());
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(
            validators::validate_http_url("X", "HTTP://Convert.Internal/").unwrap(),
            "http://convert.internal"
        );
        assert_eq!(
            validators::validate_http_url("X", "http://[::1]").unwrap(),
            "http://[::1]"
        );
    }

    #[test]
    fn invalid_tuning_knob_keeps_default_with_a_warning() {
        let (config, results) = GatewayConfigValidator::validate_with(lookup(&[
            ("GATEWAY_KEEPALIVE", "soon"),
            ("GATEWAY_WORKERS", "5000"),
        ]));
        assert!(results.is_valid(), "{:?}", results.errors);
        let fields: Vec<_> = results.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["GATEWAY_WORKERS", "GATEWAY_KEEPALIVE"]);
        assert_eq!(config.keepalive, 75);
        assert_eq!(config.workers, 0);
    }

    #[test]
    fn disabled_timeout_is_a_warning() {
        let (_, results) =
            GatewayConfigValidator::validate_with(lookup(&[("GATEWAY_UPSTREAM_TIMEOUT", "0")]));
        assert!(results.is_valid());
        assert_eq!(results.warnings.len(), 1);
        assert_eq!(results.warnings[0].field, "GATEWAY_UPSTREAM_TIMEOUT");
    }

    #[test]
    fn sample_config_lists_every_parameter() {
        let sample = GatewayConfigValidator::generate_sample_config();
        for param in CONFIG_PARAMS {
            assert!(sample.contains(param.name), "missing {}", param.name);
        }
        assert!(sample.contains("GATEWAY_PORT = 3000"));
        assert!(sample.contains("CONVERSION_API_URL = \"http://dh-server.fbk.eu\""));

        let parsed: toml::Table = sample.parse().expect("sample config must be valid TOML");
        assert!(parsed.contains_key("SUBTITLES_RESULT_PATH"));
    }
}
