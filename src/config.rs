//! Environment-driven configuration.
//!
//! | Variable                             | Default          |
//! |--------------------------------------|------------------|
//! | `RISKSCOPE_MODEL_PATH`               | `models`         |
//! | `RISKSCOPE_ARTIFACT_POLICY`          | `preloaded`      |
//! | `RISKSCOPE_REQUIRE_ARTIFACT_DIGESTS` | `false`          |
//! | `RISKSCOPE_LOG_MODE`                 | `auto`           |
//! | `RISKSCOPE_LOG_FILE`                 | `riskscope.log`  |

use std::path::PathBuf;

use crate::application::ArtifactPolicy;
use crate::RiskscopeError;

pub const MODEL_PATH_ENV: &str = "RISKSCOPE_MODEL_PATH";
pub const ARTIFACT_POLICY_ENV: &str = "RISKSCOPE_ARTIFACT_POLICY";
pub const REQUIRE_DIGESTS_ENV: &str = "RISKSCOPE_REQUIRE_ARTIFACT_DIGESTS";
pub const LOG_MODE_ENV: &str = "RISKSCOPE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "RISKSCOPE_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when attached to a terminal (the TUI owns the screen), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub artifact_policy: ArtifactPolicy,
    pub require_artifact_digests: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `RiskscopeError::Validation` for an unknown artifact policy.
    pub fn from_env() -> Result<Self, RiskscopeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `RiskscopeError::Validation` for an unknown artifact policy.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RiskscopeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let artifact_policy = match lookup(ARTIFACT_POLICY_ENV) {
            Some(value) => value.parse()?,
            None => ArtifactPolicy::default(),
        };

        Ok(Self {
            model_path: lookup(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("models")),
            artifact_policy,
            require_artifact_digests: lookup(REQUIRE_DIGESTS_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(LogMode::Auto),
            log_file: lookup(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("riskscope.log")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, RiskscopeError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).expect("Defaults are valid");
        assert_eq!(cfg.model_path, PathBuf::from("models"));
        assert_eq!(cfg.artifact_policy, ArtifactPolicy::Preloaded);
        assert!(!cfg.require_artifact_digests);
        assert_eq!(cfg.log_mode, LogMode::Auto);
        assert_eq!(cfg.log_file, PathBuf::from("riskscope.log"));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (MODEL_PATH_ENV, "/srv/artifacts"),
            (ARTIFACT_POLICY_ENV, "reload_per_call"),
            (REQUIRE_DIGESTS_ENV, "YES"),
            (LOG_MODE_ENV, "stdout"),
        ])
        .expect("Should parse");

        assert_eq!(cfg.model_path, PathBuf::from("/srv/artifacts"));
        assert_eq!(cfg.artifact_policy, ArtifactPolicy::ReloadPerCall);
        assert!(cfg.require_artifact_digests);
        assert!(!cfg.log_mode.use_file(true));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(matches!(
            config(&[(ARTIFACT_POLICY_ENV, "lazy")]),
            Err(RiskscopeError::Validation(_))
        ));
    }

    #[test]
    fn test_auto_log_mode_follows_terminal() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
    }
}
