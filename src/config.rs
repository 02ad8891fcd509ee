use std::env;
use std::time::Duration;

use chrono::FixedOffset;
use url::Url;

use crate::error::ConfigError;
use crate::util::time::offset_from_hours;

const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Process-wide settings, built once at startup and passed by reference.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub token: String,
    /// Raw query fragment appended verbatim to every activity query,
    /// e.g. `streams=key+NOT+CONF`.
    pub exclude_filter: String,
    pub watch_users: Vec<String>,
    pub utc_offset_hours: i32,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            exclude_filter: String::new(),
            watch_users: Vec::new(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; values that are set but do
    /// not parse are rejected instead of falling back to the default.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(url) = var("J_JIRA_URL") {
            cfg.base_url = url;
        }
        if let Some(token) = var("J_JIRA_TOKEN") {
            cfg.token = token;
        }
        if let Some(filter) = var("J_EXCLUDE_CONFLUENCE") {
            cfg.exclude_filter = filter;
        }
        if let Some(users) = var("J_WATCH_USERS") {
            cfg.watch_users = split_users(&users);
        }
        if let Some(offset) = var("J_UTC_OFFSET_HOURS") {
            cfg.utc_offset_hours = parse_setting("J_UTC_OFFSET_HOURS", &offset)?;
        }
        if let Some(timeout) = var("TALLY_HTTP_TIMEOUT_SECS") {
            cfg.timeout = Duration::from_secs(parse_setting("TALLY_HTTP_TIMEOUT_SECS", &timeout)?);
        }
        Ok(cfg)
    }

    pub fn with_users(mut self, users: Option<&str>) -> Self {
        if let Some(users) = users {
            self.watch_users = split_users(users);
        }
        self
    }

    /// Checked once before any request; the first missing setting wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watch_users.is_empty() { return Err(ConfigError::MissingUsers); }
        // the activity stream splits user lists on spaces
        if let Some(name) = self.watch_users.iter().find(|u| u.chars().any(char::is_whitespace)) {
            return Err(ConfigError::InvalidUsername(name.clone()));
        }
        if self.token.trim().is_empty() { return Err(ConfigError::MissingToken); }
        if self.exclude_filter.trim().is_empty() { return Err(ConfigError::MissingExclusion); }
        if self.base_url.trim().is_empty() { return Err(ConfigError::MissingBaseUrl); }
        if Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        self.utc_offset()?;
        if self.timeout.is_zero() { return Err(ConfigError::InvalidTimeout); }
        Ok(())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        offset_from_hours(self.utc_offset_hours)
    }

    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn parse_setting<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSetting { var, value: raw.to_string() })
}

// "alice, bob,,carol" -> ["alice", "bob", "carol"]; duplicates keep the first occurrence.
pub fn split_users(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|u| u == name) { out.push(name.to_string()); }
    }
    out
}

#[cfg(test)]
pub(crate) fn test_config(users: &[&str]) -> Config {
    Config {
        base_url: "https://jira.example.com".into(),
        token: "Basic dGVzdDp0ZXN0".into(),
        exclude_filter: "streams=key+NOT+CONF".into(),
        watch_users: users.iter().map(|u| u.to_string()).collect(),
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn env_values_are_parsed() {
        let cfg = from_pairs(&[
            ("J_JIRA_URL", "https://jira.example.com"),
            ("J_WATCH_USERS", "alice,bob"),
            ("J_UTC_OFFSET_HOURS", " -3 "),
            ("TALLY_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(cfg.watch_users, vec!["alice", "bob"]);
        assert_eq!(cfg.utc_offset_hours, -3);
        assert_eq!(cfg.timeout, Duration::from_secs(5));

        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.utc_offset_hours, 7);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unparsable_offset_is_rejected() {
        for raw in ["5.5", "7h", ""] {
            let err = from_pairs(&[("J_UTC_OFFSET_HOURS", raw)]).unwrap_err();
            assert_eq!(err, ConfigError::InvalidSetting { var: "J_UTC_OFFSET_HOURS", value: raw.into() });
        }
    }

    #[test]
    fn unparsable_timeout_is_rejected() {
        let err = from_pairs(&[("TALLY_HTTP_TIMEOUT_SECS", "-1")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSetting { var: "TALLY_HTTP_TIMEOUT_SECS", value: "-1".into() });
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut cfg = from_pairs(&[("TALLY_HTTP_TIMEOUT_SECS", "0")]).unwrap();
        cfg.base_url = "https://jira.example.com".into();
        cfg.token = "Basic dGVzdDp0ZXN0".into();
        cfg.exclude_filter = "streams=key+NOT+CONF".into();
        let cfg = cfg.with_users(Some("alice"));
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn usernames_with_spaces_are_rejected() {
        let cfg = test_config(&["alice"]).with_users(Some("bob, alice smith"));
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidUsername("alice smith".into())));
        let cfg = test_config(&["alice\tsmith"]);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidUsername("alice\tsmith".into())));
    }

    #[test]
    fn split_users_trims_and_dedups() {
        assert_eq!(split_users(" alice, bob,,alice ,carol"), vec!["alice", "bob", "carol"]);
        assert!(split_users(" , ").is_empty());
    }

    #[test]
    fn validate_reports_first_missing_setting() {
        assert_eq!(test_config(&[]).validate(), Err(ConfigError::MissingUsers));

        let mut cfg = test_config(&["alice"]);
        cfg.token.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::MissingToken));

        let mut cfg = test_config(&["alice"]);
        cfg.exclude_filter = "  ".into();
        assert_eq!(cfg.validate(), Err(ConfigError::MissingExclusion));

        let mut cfg = test_config(&["alice"]);
        cfg.base_url.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::MissingBaseUrl));

        let mut cfg = test_config(&["alice"]);
        cfg.base_url = "not a url".into();
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidBaseUrl("not a url".into())));
    }

    #[test]
    fn cli_users_override_env_users() {
        let cfg = test_config(&["alice"]).with_users(Some("bob,carol"));
        assert_eq!(cfg.watch_users, vec!["bob", "carol"]);
        let cfg = test_config(&["alice"]).with_users(None);
        assert_eq!(cfg.watch_users, vec!["alice"]);
    }

    #[test]
    fn base_strips_trailing_slash() {
        let mut cfg = test_config(&["alice"]);
        cfg.base_url = "https://jira.example.com/".into();
        assert_eq!(cfg.base(), "https://jira.example.com");
    }
}
