use std::sync::Arc;

use clap::ValueEnum;
use futures::future::join_all;
use tokio::task::JoinError;
use tracing::Instrument;

use crate::config::Config;
use crate::error::{ActivityError, ConfigError};
use crate::telemetry::{self};
use crate::telemetry::ops::report::Phase as ReportPhase;
use crate::tracker::{ActivityQuery, Tracker};
use crate::util::time::DateWindow;

use super::fetch::{display_name_or_empty, fetch_entries, fetch_user_activity};
use super::{GroupedActivity, UserActivity, UserOutcome};

/// How the activity queries are shaped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FanOut {
    /// One query per watched user, run as parallel tasks.
    #[default]
    PerUser,
    /// One query covering every watched user, grouped once.
    Combined,
}

/// Run every watched user's unit of work and wait for all of them.
///
/// The configuration is validated first; nothing is sent when it is
/// incomplete. Outcomes come back in watched-user order and each carries
/// its own result, so one failing user never hides the others.
pub async fn collect(
    tracker: Arc<dyn Tracker>,
    cfg: Arc<Config>,
    window: DateWindow,
    fan_out: FanOut,
) -> Result<Vec<UserOutcome>, ConfigError> {
    cfg.validate()?;
    let outcomes = match fan_out {
        FanOut::PerUser => per_user(tracker, cfg, window).await,
        FanOut::Combined => combined(tracker, cfg, window).await,
    };
    Ok(outcomes)
}

async fn per_user(tracker: Arc<dyn Tracker>, cfg: Arc<Config>, window: DateWindow) -> Vec<UserOutcome> {
    let log = telemetry::report();
    let handles: Vec<_> = cfg
        .watch_users
        .iter()
        .map(|username| {
            let tracker = Arc::clone(&tracker);
            let cfg = Arc::clone(&cfg);
            let username = username.clone();
            let span = log.span_kv(&ReportPhase::User, [("username", username.clone())]);
            tokio::spawn(
                async move { fetch_user_activity(tracker.as_ref(), &cfg, &username, window).await }
                    .instrument(span),
            )
        })
        .collect();

    let joined = join_all(handles).await;
    cfg.watch_users
        .iter()
        .zip(joined)
        .map(|(username, res)| UserOutcome { username: username.clone(), result: flatten(res) })
        .collect()
}

async fn combined(tracker: Arc<dyn Tracker>, cfg: Arc<Config>, window: DateWindow) -> Vec<UserOutcome> {
    let log = telemetry::report();
    let query = ActivityQuery::for_users(&cfg, &cfg.watch_users, window);
    let entries = match fetch_entries(tracker.as_ref(), &query).await {
        Ok(entries) => entries,
        Err(e) => {
            let shared = Arc::new(e);
            return cfg
                .watch_users
                .iter()
                .map(|username| UserOutcome {
                    username: username.clone(),
                    result: Err(ActivityError::Combined(Arc::clone(&shared))),
                })
                .collect();
        }
    };

    let mut grouped = { let _s = log.span(&ReportPhase::Group).entered(); GroupedActivity::group_by_author(entries) };
    log.debug(format!("grouped {} entries across {} authors", grouped.total_entries(), grouped.user_count()));
    let handles: Vec<_> = cfg
        .watch_users
        .iter()
        .map(|username| {
            let tracker = Arc::clone(&tracker);
            let username = username.clone();
            let entries = grouped.take(&username);
            let span = log.span_kv(&ReportPhase::User, [("username", username.clone())]);
            tokio::spawn(
                async move {
                    let display_name = display_name_or_empty(tracker.as_ref(), &username).await;
                    Ok::<_, ActivityError>(UserActivity { username, display_name, entries })
                }
                .instrument(span),
            )
        })
        .collect();

    let others: Vec<String> = grouped.iter().map(|(u, es)| format!("{u}({})", es.len())).collect();
    if !others.is_empty() {
        log.debug(format!("ignoring activity from unwatched authors: {}", others.join(",")));
    }

    let joined = join_all(handles).await;
    cfg.watch_users
        .iter()
        .zip(joined)
        .map(|(username, res)| UserOutcome { username: username.clone(), result: flatten(res) })
        .collect()
}

fn flatten(res: Result<Result<UserActivity, ActivityError>, JoinError>) -> Result<UserActivity, ActivityError> {
    match res {
        Ok(inner) => inner,
        Err(e) => Err(ActivityError::Task(e.to_string())),
    }
}
