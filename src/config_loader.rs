// Configuration loader for Media Gateway
//
// This module loads the flat TOML configuration file and exposes its values as
// environment variables, so that the validator sees a single source.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use toml::{Table, Value};

const CONFIG_FILE_PATH: &str = "media_gateway.conf";
const CONFIG_FILE_ENV: &str = "GATEWAY_CONFIG_FILE";

/// Loads configuration from the TOML file into the environment
///
/// Configuration precedence (highest to lowest):
/// 1. Environment variables
/// 2. Configuration file values
/// 3. Default values (applied by the validator)
///
/// The file path is `media_gateway.conf` unless `GATEWAY_CONFIG_FILE` points elsewhere.
///
/// # Returns
///
/// Returns true if the config file was successfully loaded, false otherwise
pub fn load_config() -> bool {
    let path = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| CONFIG_FILE_PATH.to_string());
    load_config_from(Path::new(&path))
}

/// Loads a specific configuration file into the environment
pub fn load_config_from(config_path: &Path) -> bool {
    if !config_path.exists() {
        debug!("Configuration file not found at: {}", config_path.display());
        return false;
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read configuration file: {}", e);
            return false;
        }
    };

    let config_map = match parse_config(&config_content) {
        Ok(map) => map,
        Err(e) => {
            warn!("Failed to parse configuration file: {}", e);
            return false;
        }
    };

    // Only set if the environment variable doesn't already exist
    for (key, value) in config_map {
        if env::var(&key).is_err() {
            debug!("Setting env var from config file: {} = {}", key, value);
            env::set_var(key, value);
        } else {
            debug!("Env var already exists, skipping: {}", key);
        }
    }

    info!("Configuration loaded from {}", config_path.display());
    true
}

/// Converts a flat TOML document into key-value pairs
///
/// Nested tables and arrays are skipped with a warning.
pub fn parse_config(content: &str) -> Result<HashMap<String, String>, toml::de::Error> {
    let table: Table = content.parse()?;
    let mut config_map = HashMap::new();

    for (key, value) in table {
        match value {
            Value::String(s) => {
                config_map.insert(key, s);
            }
            Value::Integer(i) => {
                config_map.insert(key, i.to_string());
            }
            Value::Float(f) => {
                config_map.insert(key, f.to_string());
            }
            Value::Boolean(b) => {
                config_map.insert(key, b.to_string());
            }
            _ => {
                warn!("Skipping unsupported TOML value type for key: {}", key);
            }
        }
    }

    Ok(config_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_values_become_strings() {
        let map = parse_config(
            r#"
            GATEWAY_PORT = 8080
            CONVERSION_API_URL = "http://convert.local"
            RATIO = 0.5
            ENABLED = true
            "#,
        )
        .unwrap();
        assert_eq!(map["GATEWAY_PORT"], "8080");
        assert_eq!(map["CONVERSION_API_URL"], "http://convert.local");
        assert_eq!(map["RATIO"], "0.5");
        assert_eq!(map["ENABLED"], "true");
    }

    #[test]
    fn nested_values_are_skipped() {
        let map = parse_config(
            r#"
            PORTS = [1, 2]
            GATEWAY_HOST = "0.0.0.0"

            [section]
            key = "value"
            "#,
        )
        .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["GATEWAY_HOST"], "0.0.0.0");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("GATEWAY_PORT = = 1").is_err());
    }

    #[test]
    fn file_values_do_not_override_the_environment() {
        let suffix = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        let preset = format!("MG_LOADER_PRESET_{}", suffix);
        let fresh = format!("MG_LOADER_FRESH_{}", suffix);
        let path = env::temp_dir().join(format!("media_gateway_{}.conf", suffix));
        fs::write(
            &path,
            format!("{} = \"from-file\"\n{} = 4242\n", preset, fresh),
        )
        .unwrap();
        env::set_var(&preset, "from-env");

        assert!(load_config_from(&path));
        assert_eq!(env::var(&preset).unwrap(), "from-env");
        assert_eq!(env::var(&fresh).unwrap(), "4242");

        env::remove_var(&preset);
        env::remove_var(&fresh);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_not_loaded() {
        assert!(!load_config_from(Path::new("/nonexistent/media_gateway.conf")));
    }
}
