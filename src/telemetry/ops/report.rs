use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Report;

#[derive(Copy, Clone, Debug)]
pub enum Phase { User, Fetch, Decode, Group, Lookup, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::User => "user",
        Phase::Fetch => "fetch",
        Phase::Decode => "decode",
        Phase::Group => "group",
        Phase::Lookup => "lookup",
        Phase::Render => "render",
    }}
    fn span(&self) -> Span { match self {
        Phase::User => info_span!("user"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Decode => info_span!("decode"),
        Phase::Group => info_span!("group"),
        Phase::Lookup => info_span!("lookup"),
        Phase::Render => info_span!("render"),
    }}
}

impl OpMarker for Report {
    const NAME: &'static str = "report";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("report") }
}
