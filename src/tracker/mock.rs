use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use crate::error::{FetchError, LookupError};

use super::{ActivityQuery, Tracker};

#[derive(Clone, Debug)]
pub enum Reply {
    Body(Bytes),
    Status(StatusCode),
    Timeout,
    Panic,
}

/// Scripted tracker keyed by the users of a query (joined with `+`) and by
/// lookup username. Unscripted calls answer 404.
#[derive(Debug, Default)]
pub struct MockTracker {
    activity: Mutex<HashMap<String, Reply>>,
    users: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_activity(self, users: &str, reply: Reply) -> Self {
        self.activity.lock().unwrap().insert(users.to_string(), reply);
        self
    }

    pub fn on_lookup(self, username: &str, reply: Reply) -> Self {
        self.users.lock().unwrap().insert(username.to_string(), reply);
        self
    }

    /// `activity:<users>` and `lookup:<username>`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tracker for MockTracker {
    async fn fetch_activity(&self, query: &ActivityQuery) -> Result<Bytes, FetchError> {
        let key = query.users().join("+");
        self.calls.lock().unwrap().push(format!("activity:{key}"));
        let reply = self.activity.lock().unwrap().get(&key).cloned();
        match reply.unwrap_or(Reply::Status(StatusCode::NOT_FOUND)) {
            Reply::Body(b) => Ok(b),
            Reply::Status(s) => Err(FetchError::Status(s)),
            Reply::Timeout => Err(FetchError::Timeout),
            Reply::Panic => panic!("scripted panic for {key}"),
        }
    }

    async fn lookup_user(&self, username: &str) -> Result<Bytes, LookupError> {
        self.calls.lock().unwrap().push(format!("lookup:{username}"));
        let reply = self.users.lock().unwrap().get(username).cloned();
        match reply.unwrap_or(Reply::Status(StatusCode::NOT_FOUND)) {
            Reply::Body(b) => Ok(b),
            Reply::Status(s) => Err(LookupError::Status(s)),
            Reply::Timeout => Err(LookupError::Timeout),
            Reply::Panic => panic!("scripted panic for {username}"),
        }
    }
}
