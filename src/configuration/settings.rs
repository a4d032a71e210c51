use crate::configuration::constants::common::{DEFAULT_COMMENT_TEMPLATE, DEFAULT_RESULTS_LOG};
use crate::configuration::constants::jira::CLOUD_DOMAIN_SUFFIX;
use config::{Config, ConfigError, Environment, File, FileFormat};
use derivative::*;
use regex::Regex;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// What to do with tests that finished as skipped.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Every skip is reported as an expected failure.
    AsXfail,
    /// Only skips raised by an expected-failure marker are reported.
    XfailOnly,
}

/// Tracker credentials and reporting behaviour.
///
/// Keys come from, in increasing priority: built-in defaults, an optional
/// `.env` file of `KEY=VALUE` lines, the optional settings file, then the
/// process environment (`AUTH_TOKEN`, `JIRA_DOMAIN`,
/// `PREFIX_TICKET_VALUE`, `PASS_STATUS_TRANSITION`, `FAIL_STATUS_TRANSITION`, ...).
#[derive(Deserialize, Derivative, Clone)]
#[derivative(Debug)]
pub struct Settings {
    #[derivative(Debug = "ignore")]
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub jira_user: Option<String>,
    #[derivative(Debug = "ignore")]
    #[serde(default)]
    pub jira_api_token: Option<String>,
    pub jira_domain: String,
    #[serde(default)]
    pub prefix_ticket_value: String,
    #[serde(default, with = "serde_regex")]
    pub ticket_pattern: Option<Regex>,
    pub pass_status_transition: String,
    pub fail_status_transition: String,
    pub results_log: PathBuf,
    pub skip_policy: SkipPolicy,
    pub comment_template: String,
    #[serde(default, with = "crate::configuration::deserialize::optional_duration")]
    pub request_timeout: Option<Duration>,
}

impl Settings {
    pub fn load(file: Option<&Path>, env_file: &Path) -> Result<Self, SettingsError> {
        let mut config = Self::layered(file, env_file)?;
        config.merge(Environment::new())?;
        Self::from_config(config)
    }

    /// Defaults with the env file and settings file merged over them.
    /// A missing env file is skipped.
    pub fn layered(file: Option<&Path>, env_file: &Path) -> Result<Config, ConfigError> {
        let mut config = Self::defaults()?;
        config.merge(File::from(env_file).format(FileFormat::Ini).required(false))?;
        if let Some(file) = file {
            config.merge(File::from(file))?;
        }
        Ok(config)
    }

    pub fn defaults() -> Result<Config, ConfigError> {
        let mut config = Config::new();
        config
            .set_default("results_log", DEFAULT_RESULTS_LOG)?
            .set_default("skip_policy", "as_xfail")?
            .set_default("comment_template", DEFAULT_COMMENT_TEMPLATE)?;
        Ok(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_into()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.jira_domain.trim().is_empty() {
            return Err(SettingsError::Invalid("jira_domain is empty".to_owned()));
        }
        if self.pass_status_transition.trim().is_empty()
            || self.fail_status_transition.trim().is_empty()
        {
            return Err(SettingsError::Invalid(
                "both pass_status_transition and fail_status_transition are required".to_owned(),
            ));
        }
        if self.prefix_ticket_value.is_empty() && self.ticket_pattern.is_none() {
            return Err(SettingsError::Invalid(
                "either prefix_ticket_value or ticket_pattern is required".to_owned(),
            ));
        }
        if self.basic_token().is_none() {
            return Err(SettingsError::Invalid(
                "no credentials, set auth_token or jira_user with jira_api_token".to_owned(),
            ));
        }
        Ok(())
    }

    /// Value sent after `Authorization: Basic`.
    pub fn basic_token(&self) -> Option<String> {
        match (&self.auth_token, &self.jira_user, &self.jira_api_token) {
            (Some(token), _, _) if !token.is_empty() => Some(token.clone()),
            (_, Some(user), Some(token)) => Some(base64::encode(format!("{}:{}", user, token))),
            _ => None,
        }
    }

    /// Host of the tracker. A bare site name is expanded to an Atlassian Cloud
    /// host. Dotted names, `localhost` and values with a port are kept.
    pub fn jira_host(&self) -> String {
        let domain = self.jira_domain.trim();
        let domain = domain
            .strip_prefix("https://")
            .or_else(|| domain.strip_prefix("http://"))
            .unwrap_or(domain)
            .trim_end_matches('/');
        if domain.contains('.')
            || domain.contains(':')
            || domain.eq_ignore_ascii_case("localhost")
        {
            domain.to_owned()
        } else {
            format!("{}.{}", domain, CLOUD_DOMAIN_SUFFIX)
        }
    }
}
