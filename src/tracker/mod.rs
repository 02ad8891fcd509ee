use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{FetchError, LookupError};

mod http;
#[cfg(test)]
pub mod mock;
pub mod query;

pub use http::HttpTracker;
pub use query::ActivityQuery;

/// Transport to the issue tracker. Both calls return the raw body on a 2xx
/// response; decoding is left to the caller.
#[async_trait]
pub trait Tracker: Send + Sync {
    async fn fetch_activity(&self, query: &ActivityQuery) -> Result<Bytes, FetchError>;

    async fn lookup_user(&self, username: &str) -> Result<Bytes, LookupError>;
}
