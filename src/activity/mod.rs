use crate::error::ActivityError;
use crate::feed::Entry;

pub mod coordinator;
pub mod fetch;
pub mod group;
pub mod names;

pub use coordinator::{FanOut, collect};
pub use group::GroupedActivity;

/// One watched user's comments for the day.
#[derive(Debug, Clone, PartialEq)]
pub struct UserActivity {
    pub username: String,
    /// Empty when the lookup failed or the tracker has no display name.
    pub display_name: String,
    pub entries: Vec<Entry>,
}

impl UserActivity {
    /// Name to print: the display name, or the username when there is none.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() { &self.username } else { &self.display_name }
    }

    pub fn count(&self) -> usize { self.entries.len() }
}

/// Result of one unit of work, attributable to exactly one username.
#[derive(Debug)]
pub struct UserOutcome {
    pub username: String,
    pub result: Result<UserActivity, ActivityError>,
}
