use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;

/// Missing or unusable configuration. Raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingUsers,
    MissingToken,
    MissingExclusion,
    MissingBaseUrl,
    InvalidBaseUrl(String),
    InvalidDate(String),
    InvalidOffset(i32),
    InvalidUsername(String),
    InvalidTimeout,
    /// An environment variable is set but does not parse.
    InvalidSetting { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingUsers => write!(f, "list username can't be empty"),
            ConfigError::MissingToken => write!(f, "jira token can't be empty (J_JIRA_TOKEN)"),
            ConfigError::MissingExclusion => {
                write!(f, "exclude filter can't be empty (J_EXCLUDE_CONFLUENCE)")
            }
            ConfigError::MissingBaseUrl => write!(f, "jira URL can't be empty (J_JIRA_URL)"),
            ConfigError::InvalidBaseUrl(url) => write!(f, "invalid jira URL: {url}"),
            ConfigError::InvalidDate(s) => {
                write!(f, "invalid date {s:?}, expected DD-MM or DD-MM-YYYY")
            }
            ConfigError::InvalidOffset(h) => write!(f, "utc offset out of range: {h}h"),
            ConfigError::InvalidUsername(name) => {
                write!(f, "username {name:?} contains whitespace")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "http timeout must be at least 1s (TALLY_HTTP_TIMEOUT_SECS)")
            }
            ConfigError::InvalidSetting { var, value } => write!(f, "invalid value {value:?} for {var}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The activity query could not be completed.
#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Timeout,
    Status(StatusCode),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { FetchError::Timeout } else { FetchError::Http(err) }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "http error: {err}"),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Status(status) => write!(f, "activity query returned {status}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(err) => Some(err),
            _ => None,
        }
    }
}

/// The response body is not a well-formed activity feed.
#[derive(Debug)]
pub enum DecodeError {
    Xml(quick_xml::Error),
    Empty,
    UnexpectedRoot(String),
    Truncated,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Xml(err) => write!(f, "malformed feed: {err}"),
            DecodeError::Empty => write!(f, "document has no root element"),
            DecodeError::UnexpectedRoot(name) => {
                write!(f, "expected element type <feed> but have <{name}>")
            }
            DecodeError::Truncated => write!(f, "feed document ended before all elements were closed"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Xml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for DecodeError {
    fn from(err: quick_xml::Error) -> Self { DecodeError::Xml(err) }
}

/// Display name lookup failed; callers fall back to the raw username.
#[derive(Debug)]
pub enum LookupError {
    Http(reqwest::Error),
    Timeout,
    Status(StatusCode),
    Json(serde_json::Error),
}

impl LookupError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { LookupError::Timeout } else { LookupError::Http(err) }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Http(err) => write!(f, "http error: {err}"),
            LookupError::Timeout => write!(f, "request timed out"),
            LookupError::Status(status) => write!(f, "user lookup returned {status}"),
            LookupError::Json(err) => write!(f, "malformed user response: {err}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Http(err) => Some(err),
            LookupError::Json(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure of one user's unit of work. Never affects other users.
#[derive(Debug)]
pub enum ActivityError {
    Fetch(FetchError),
    Decode(DecodeError),
    /// The task running this unit panicked or was cancelled.
    Task(String),
    /// A combined query shared by several users failed.
    Combined(Arc<ActivityError>),
}

impl fmt::Display for ActivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityError::Fetch(err) => write!(f, "fetch failed: {err}"),
            ActivityError::Decode(err) => write!(f, "decode failed: {err}"),
            ActivityError::Task(msg) => write!(f, "task aborted: {msg}"),
            ActivityError::Combined(err) => write!(f, "combined query: {err}"),
        }
    }
}

impl std::error::Error for ActivityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActivityError::Fetch(err) => Some(err),
            ActivityError::Decode(err) => Some(err),
            ActivityError::Combined(err) => Some(err.as_ref()),
            ActivityError::Task(_) => None,
        }
    }
}

impl From<FetchError> for ActivityError {
    fn from(err: FetchError) -> Self { ActivityError::Fetch(err) }
}

impl From<DecodeError> for ActivityError {
    fn from(err: DecodeError) -> Self { ActivityError::Decode(err) }
}
