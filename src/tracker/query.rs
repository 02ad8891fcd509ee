use url::form_urlencoded::byte_serialize;

use crate::config::Config;
use crate::util::time::DateWindow;

pub const MAX_RESULTS: usize = 1000;
const COMMENT_FILTER: &str = "issues=activity+IS+comment:post";

/// One bounded activity-stream query: comments by `users` inside `window`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityQuery {
    base: String,
    users: Vec<String>,
    window: DateWindow,
    exclude_filter: String,
}

impl ActivityQuery {
    pub fn for_user(cfg: &Config, username: &str, window: DateWindow) -> Self {
        Self::for_users(cfg, &[username.to_string()], window)
    }

    pub fn for_users(cfg: &Config, users: &[String], window: DateWindow) -> Self {
        ActivityQuery {
            base: cfg.base().to_string(),
            users: users.to_vec(),
            window,
            exclude_filter: cfg.exclude_filter.clone(),
        }
    }

    pub fn users(&self) -> &[String] { &self.users }

    /// The query string is assembled by hand: the stream filters use literal
    /// `+` separators and the exclusion fragment must pass through untouched.
    pub fn url(&self) -> String {
        let users: Vec<String> = self.users.iter().map(|u| encode(u)).collect();
        format!(
            "{}/activity?streams=user+IS+{}&streams=update-date+BETWEEN+{}+{}&maxResults={}&{}&{}",
            self.base,
            users.join("+"),
            self.window.from_millis(),
            self.window.to_millis(),
            MAX_RESULTS,
            self.exclude_filter,
            COMMENT_FILTER,
        )
    }
}

pub fn user_lookup_url(base: &str, username: &str) -> String {
    format!("{}/rest/api/latest/user?username={}", base.trim_end_matches('/'), encode(username))
}

fn encode(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}
