//! Configuration loading and validation for the save editor.

use std::path::PathBuf;

use anyhow::{Context, Result};
use es3::{WrapperPolicy, DEFAULT_PASSWORD};
use serde::Deserialize;

/// Validated save-editor configuration, read from environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Save file to open. Unset means the selection was cancelled.
    #[serde(default)]
    pub save_path: Option<PathBuf>,

    /// Password the saves were encrypted with.
    #[serde(default = "default_es3_password")]
    pub es3_password: String,

    /// `null` or `keep`: handling of `__type` wrappers without a `value`.
    #[serde(default = "default_unrecognized_wrappers")]
    pub unrecognized_wrappers: String,

    /// Steam ID to look up after the save has been decoded.
    #[serde(default)]
    pub steam_id: Option<String>,

    /// Base URL of the public Steam community profile pages.
    #[serde(default = "default_steam_profile_base_url")]
    pub steam_profile_base_url: String,

    /// Where to write the decoded JSON. Unset means stdout.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Re-encrypt the decoded JSON into this path after opening.
    #[serde(default)]
    pub save_target: Option<PathBuf>,

    /// Pretty-print the decoded JSON.
    #[serde(default)]
    pub pretty: bool,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_es3_password() -> String {
    DEFAULT_PASSWORD.into()
}
fn default_unrecognized_wrappers() -> String {
    "null".into()
}
fn default_steam_profile_base_url() -> String {
    "https://steamcommunity.com/profiles".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build save-editor configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise save-editor configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The parsed `UNRECOGNIZED_WRAPPERS` policy.
    pub fn wrapper_policy(&self) -> Result<WrapperPolicy> {
        self.unrecognized_wrappers
            .parse()
            .context("UNRECOGNIZED_WRAPPERS is invalid")
    }

    fn validate(&self) -> Result<()> {
        if self.es3_password.is_empty() {
            anyhow::bail!("ES3_PASSWORD must not be empty");
        }
        self.wrapper_policy()?;
        if self.steam_profile_base_url.trim().is_empty() {
            anyhow::bail!("STEAM_PROFILE_BASE_URL must not be empty");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("save_path", &self.save_path)
            .field("es3_password", &"[REDACTED]")
            .field("unrecognized_wrappers", &self.unrecognized_wrappers)
            .field("steam_id", &self.steam_id)
            .field("steam_profile_base_url", &self.steam_profile_base_url)
            .field("output_path", &self.output_path)
            .field("save_target", &self.save_target)
            .field("pretty", &self.pretty)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            save_path: Some("saves/REPO_SAVE_2025.es3".into()),
            es3_password: default_es3_password(),
            unrecognized_wrappers: default_unrecognized_wrappers(),
            steam_id: None,
            steam_profile_base_url: default_steam_profile_base_url(),
            output_path: None,
            save_target: None,
            pretty: false,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_es3_password(), DEFAULT_PASSWORD);
        assert_eq!(default_unrecognized_wrappers(), "null");
        assert_eq!(
            default_steam_profile_base_url(),
            "https://steamcommunity.com/profiles"
        );
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_accepts_missing_save_path() {
        let cfg = Config {
            save_path: None,
            ..valid()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_password() {
        let cfg = Config {
            es3_password: String::new(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_wrapper_policy() {
        let cfg = Config {
            unrecognized_wrappers: "drop".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_base_url() {
        let cfg = Config {
            steam_profile_base_url: "   ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn wrapper_policy_parses() {
        let cfg = Config {
            unrecognized_wrappers: "keep".into(),
            ..valid()
        };
        assert_eq!(cfg.wrapper_policy().unwrap(), WrapperPolicy::Keep);
        assert_eq!(valid().wrapper_policy().unwrap(), WrapperPolicy::CollapseToNull);
    }

    #[test]
    fn debug_redacts_password() {
        let dbg = format!("{:?}", valid());
        assert!(!dbg.contains(DEFAULT_PASSWORD));
        assert!(dbg.contains("REDACTED"));
    }
}
