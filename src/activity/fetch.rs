use tracing::Instrument;

use crate::config::Config;
use crate::error::ActivityError;
use crate::feed::{decode_feed, Entry};
use crate::telemetry::{self};
use crate::telemetry::ops::report::Phase as ReportPhase;
use crate::tracker::{ActivityQuery, Tracker};
use crate::util::time::DateWindow;

use super::names::resolve_display_name;
use super::{GroupedActivity, UserActivity};

/// Run one activity query and decode the response.
pub async fn fetch_entries(tracker: &dyn Tracker, query: &ActivityQuery) -> Result<Vec<Entry>, ActivityError> {
    let log = telemetry::report();
    let span = log.span_kv(&ReportPhase::Fetch, [("users", query.users().join(","))]);
    let body = tracker.fetch_activity(query).instrument(span).await?;
    let feed = { let _s = log.span(&ReportPhase::Decode).entered(); decode_feed(&body)? };
    log.debug(format!("decoded {} entries ({} bytes)", feed.entries.len(), body.len()));
    Ok(feed.entries)
}

/// Fetch, decode and group one user's day, then attach the display name.
pub async fn fetch_user_activity(
    tracker: &dyn Tracker,
    cfg: &Config,
    username: &str,
    window: DateWindow,
) -> Result<UserActivity, ActivityError> {
    let query = ActivityQuery::for_user(cfg, username, window);
    let entries = fetch_entries(tracker, &query).await?;
    let entries = {
        let _s = telemetry::report().span(&ReportPhase::Group).entered();
        GroupedActivity::group_by_author(entries).take(username)
    };
    let display_name = display_name_or_empty(tracker, username).await;
    Ok(UserActivity { username: username.to_string(), display_name, entries })
}

/// Lookup failures degrade to an empty name; the report then prints the username.
pub async fn display_name_or_empty(tracker: &dyn Tracker, username: &str) -> String {
    let log = telemetry::report();
    let span = log.span_kv(&ReportPhase::Lookup, [("username", username.to_string())]);
    match resolve_display_name(tracker, username).instrument(span).await {
        Ok(name) => name,
        Err(e) => {
            log.warn_kv("display name lookup failed", [("username", username.to_string()), ("error", e.to_string())]);
            String::new()
        }
    }
}
