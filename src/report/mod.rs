use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::Instrument;

use crate::activity::{FanOut, collect};
use crate::config::Config;
use crate::output::Emitter;
use crate::output::config::OutputConfig;
use crate::output::types::{Meta, Report};
use crate::telemetry::{self};
use crate::telemetry::ops::report::Phase as ReportPhase;
use crate::tracker::{HttpTracker, Tracker};
use crate::util::time::{DateWindow, format_day, parse_day_opt};

/// tally [-u users] [-d date] [-v]
#[derive(Args, Debug)]
pub struct ReportCmd {
    /// Comma-separated usernames; defaults to J_WATCH_USERS
    #[arg(short, long)]
    pub users: Option<String>,
    /// Day to report, DD-MM or DD-MM-YYYY; defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Print every comment body under its user
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
    #[arg(long, value_enum, default_value_t = FanOut::PerUser)]
    pub fan_out: FanOut,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    pub json: bool,
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

pub async fn run(cfg: Config, args: ReportCmd) -> Result<()> {
    let log = telemetry::report();
    let cfg = cfg.with_users(args.users.as_deref());
    let offset = cfg.utc_offset()?;
    let day = parse_day_opt(&args.date, offset)?;
    let window = DateWindow::for_day(day, offset);

    let span = log.root_span_kv([
        ("users", cfg.watch_users.join(",")),
        ("date", format_day(day)),
        ("from", window.from().to_rfc3339()),
        ("to", window.to().to_rfc3339()),
        ("fan_out", format!("{:?}", args.fan_out)),
    ]);
    run_report(cfg, args, day, window).instrument(span).await
}

async fn run_report(cfg: Config, args: ReportCmd, day: chrono::NaiveDate, window: DateWindow) -> Result<()> {
    let log = telemetry::report();
    // nothing may go out over the network with an incomplete config
    cfg.validate()?;

    let t0 = Instant::now();
    let tracker: Arc<dyn Tracker> = Arc::new(HttpTracker::new(&cfg)?);
    let outcomes = collect(tracker, Arc::new(cfg), window, args.fan_out).await?;

    let out_cfg = OutputConfig::from_env().with_flags(args.json, args.pretty, args.verbose);
    let report = Report::build(day, window, &outcomes, out_cfg.verbose);
    for user in &report.users {
        match (&user.count, &user.error) {
            (Some(n), _) => log.user_summary(&user.username, *n),
            (None, Some(e)) => log.warn_kv("user failed", [("username", user.username.clone()), ("error", e.clone())]),
            (None, None) => {}
        }
    }
    log.totals(report.users.len(), report.failed(), report.total_comments());

    let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()), fan_out: Some(format!("{:?}", args.fan_out)) };
    let _s = log.span(&ReportPhase::Render).entered();
    Emitter::new(out_cfg).emit(&report, Some(meta))?;
    Ok(())
}
