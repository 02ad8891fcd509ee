pub fn logs_are_json() -> bool {
    matches!(std::env::var("TALLY_LOG_FORMAT").as_deref(), Ok("json"))
}

/// Install the global subscriber for `tally`.
///
/// Stdout is reserved for the report (text lines or the JSON envelope), so
/// every event goes to stderr. Per-user summaries and totals are logged at
/// `info` and only show up with `RUST_LOG=info`; failed users surface at the
/// default `warn`. `TALLY_LOG_FORMAT=json` flattens events for log shippers.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    match std::env::var("TALLY_LOG_FORMAT").as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}
