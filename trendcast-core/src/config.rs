use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_USER_AGENT: &str = "YouTube-Automation/1.0";
/// Longest accepted schedule interval: one year.
pub const MAX_SCHEDULE_HOURS: u64 = 24 * 365;

/// Every option the pipeline recognises. Built once and handed to each
/// component constructor; nothing reads the process environment later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(skip_serializing)]
    pub groq_api_key: Option<String>,
    pub model_name: String,
    pub api_base: String,
    pub output_dir: PathBuf,
    pub idea_count: usize,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub item_timeout_secs: u64,
    pub schedule_hours: u64,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("output"),
            idea_count: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 10,
            item_timeout_secs: 5,
            schedule_hours: 24,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional TOML file, then process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overrides fields from environment-style lookups.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GROQ_API_KEY") {
            self.groq_api_key = Some(key);
        }
        if let Some(model) = lookup("GROQ_MODEL") {
            self.model_name = model;
        }
        if let Some(api_base) = lookup("GROQ_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(output_dir) = lookup("TRENDCAST_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(count) = lookup("TRENDCAST_IDEA_COUNT") {
            self.idea_count = count.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "idea_count".to_string(),
                value: count.clone(),
            })?;
        }
        Ok(self)
    }

    /// Model access is enabled only when a non-blank key is present.
    pub fn use_ai(&self) -> bool {
        self.groq_api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "model_name must not be empty".to_string(),
            });
        }
        if url::Url::parse(&self.api_base).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "api_base".to_string(),
                value: self.api_base.clone(),
            });
        }
        if self.request_timeout_secs == 0 || self.item_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "timeouts must be at least one second".to_string(),
            });
        }
        if self.schedule_hours == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "schedule_hours must be at least one".to_string(),
            });
        }
        if self.schedule_hours > MAX_SCHEDULE_HOURS {
            return Err(ConfigError::ValidationFailed {
                reason: format!("schedule_hours must be at most {}", MAX_SCHEDULE_HOURS),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model_name, DEFAULT_MODEL);
        assert!(!config.use_ai());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_use_ai_derived_from_key() {
        let config = AppConfig::default()
            .apply_env(lookup(&[("GROQ_API_KEY", "gsk_test")]))
            .unwrap();
        assert!(config.use_ai());

        let blank = AppConfig::default()
            .apply_env(lookup(&[("GROQ_API_KEY", "   ")]))
            .unwrap();
        assert!(!blank.use_ai());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .apply_env(lookup(&[
                ("GROQ_MODEL", "llama-3.1-8b-instant"),
                ("TRENDCAST_OUTPUT_DIR", "/tmp/trendcast"),
                ("TRENDCAST_IDEA_COUNT", "3"),
            ]))
            .unwrap();
        assert_eq!(config.model_name, "llama-3.1-8b-instant");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/trendcast"));
        assert_eq!(config.idea_count, 3);
    }

    #[test]
    fn test_invalid_idea_count() {
        let result = AppConfig::default().apply_env(lookup(&[("TRENDCAST_IDEA_COUNT", "many")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_toml_partial_file() {
        let config = AppConfig::from_toml(
            r#"
            model_name = "mixtral"
            idea_count = 2
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.model_name, "mixtral");
        assert_eq!(config.idea_count, 2);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "schedule_hours = 12").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.schedule_hours, 12);

        let missing = AppConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.api_base = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.item_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.model_name = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_schedule_hours_bounded() {
        let mut config = AppConfig::default();
        config.schedule_hours = MAX_SCHEDULE_HOURS;
        assert!(config.validate().is_ok());

        config.schedule_hours = MAX_SCHEDULE_HOURS + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));

        config.schedule_hours = u64::MAX / 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = AppConfig::default();
        config.groq_api_key = Some("secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
