use std::io::{self, Write};

use super::config::{OutputConfig, OutputFormat};
use super::types::{Envelope, Meta, Report};

const COMMENT_RULE: &str = "----------------------------------------------------------------";
const USER_RULE: &str = "================================================================";

pub trait Presenter: Send + Sync {
    fn emit(&self, report: &Report, meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, report: &Report, meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()> {
        let env = Envelope::result("report", report, meta).map_err(to_io)?;
        if self.pretty { serde_json::to_writer_pretty(&mut *w, &env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, &env).map_err(to_io)? }
        writeln!(w)
    }
}

/// `[name] make [n] comments on DD-MM-YYYY`, one line per user; verbose mode
/// follows each line with the comment bodies.
pub struct TextPresenter { pub verbose: bool }
impl Presenter for TextPresenter {
    fn emit(&self, report: &Report, _meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()> {
        for user in &report.users {
            let Some(count) = user.count else {
                writeln!(w, "[{}] failed: {}", user.username, user.error.as_deref().unwrap_or("unknown error"))?;
                continue;
            };
            writeln!(w, "[{}] make [{}] comments on {}", user.label, count, report.date)?;
            if self.verbose {
                for comment in &user.comments {
                    writeln!(w, "{COMMENT_RULE}")?;
                    writeln!(w, "{}", comment.text)?;
                }
                writeln!(w, "{USER_RULE}")?;
            }
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { verbose: cfg.verbose }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, report: &Report, meta: Option<Meta>) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.emit_to(report, meta, &mut out)?;
        out.flush()
    }

    pub fn emit_to(&self, report: &Report, meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()> {
        self.presenter.emit(report, meta, w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
