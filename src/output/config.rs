use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Print every comment body, not just the counts.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn from_env() -> Self {
        let format = match env::var("TALLY_OUTPUT_FORMAT").ok().as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let pretty = match env::var("TALLY_OUTPUT_PRETTY").ok().as_deref() {
            Some(v) if v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            _ => false,
        };
        OutputConfig { format, pretty, verbose: false }
    }

    // CLI switches only ever turn things on.
    pub fn with_flags(mut self, json: bool, pretty: bool, verbose: bool) -> Self {
        if json { self.format = OutputFormat::Json; }
        self.pretty |= pretty;
        self.verbose |= verbose;
        self
    }
}
