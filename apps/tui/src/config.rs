use crate::error::Result;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_EXPORT_DIR: &str = "./exports";
pub const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub export_dir: PathBuf,
    pub log_dir: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            debug: false,
        }
    }
}

/// Loads `.env` and reads the configuration from the environment.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    let config = AppConfig::from_lookup(|key| env::var(key).ok());

    // Relative directories resolve against the working directory.
    let base_dir = env::current_dir()?;
    Ok(AppConfig {
        export_dir: base_dir.join(&config.export_dir),
        log_dir: base_dir.join(&config.log_dir),
        ..config
    })
}

impl AppConfig {
    /// Builds a configuration from any key lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            export_dir: lookup("EXPORT_DIR").map_or(defaults.export_dir, PathBuf::from),
            log_dir: lookup("LOG_DIR").map_or(defaults.log_dir, PathBuf::from),
            debug: lookup("DEBUG").is_some_and(|value| is_truthy(&value)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = HashMap::from([
            ("EXPORT_DIR", "/tmp/out"),
            ("LOG_DIR", "var/log"),
            ("DEBUG", "1"),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(ToString::to_string));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.log_dir, PathBuf::from("var/log"));
        assert!(config.debug);
    }

    #[test]
    fn debug_needs_a_truthy_value() {
        let config = AppConfig::from_lookup(|key| (key == "DEBUG").then(|| "0".to_string()));
        assert!(!config.debug);
    }
}
