use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

mod activity;
mod config;
mod error;
mod feed;
mod output;
mod report;
mod telemetry;
mod tracker;
mod util;

#[derive(Parser)]
#[command(name = "tally", about = "Count comments per watched Jira user for one day")]
struct Cli {
    #[command(flatten)]
    report: report::ReportCmd,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and TALLY_LOG_FORMAT
    telemetry::config::init_tracing();
    let cfg = config::Config::from_env()?;

    report::run(cfg, cli.report).await
}
