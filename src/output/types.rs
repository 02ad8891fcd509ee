use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::activity::UserOutcome;
use crate::feed::Entry;
use crate::util::time::{DateWindow, format_day};

use super::text::markup_to_text;

pub const SCHEMA_VERSION: &str = "tally.v1";

#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_out: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        let res_val = serde_json::to_value(result)?;
        Ok(Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            result: res_val,
            meta,
        })
    }
}

/// Everything the presenters need, detached from the fetch types.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Target day as `DD-MM-YYYY`.
    pub date: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub users: Vec<UserRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub username: String,
    /// Display name, or the username when it could not be resolved.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CommentRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRow {
    pub id: String,
    pub issue: String,
    pub published: String,
    pub text: String,
}

impl From<&Entry> for CommentRow {
    fn from(e: &Entry) -> Self {
        CommentRow {
            id: e.id.clone(),
            issue: e.target.title.clone(),
            published: e.published.clone(),
            text: markup_to_text(&e.content),
        }
    }
}

impl Report {
    /// Comment bodies are only rendered when `with_comments` is set.
    pub fn build(day: NaiveDate, window: DateWindow, outcomes: &[UserOutcome], with_comments: bool) -> Self {
        let users = outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(act) => UserRow {
                    username: act.username.clone(),
                    label: act.label().to_string(),
                    count: Some(act.count()),
                    error: None,
                    comments: if with_comments { act.entries.iter().map(CommentRow::from).collect() } else { Vec::new() },
                },
                Err(e) => UserRow {
                    username: o.username.clone(),
                    label: o.username.clone(),
                    count: None,
                    error: Some(e.to_string()),
                    comments: Vec::new(),
                },
            })
            .collect();
        Report { date: format_day(day), from: window.from(), to: window.to(), users }
    }

    pub fn failed(&self) -> usize { self.users.iter().filter(|u| u.error.is_some()).count() }

    pub fn total_comments(&self) -> usize { self.users.iter().filter_map(|u| u.count).sum() }
}
