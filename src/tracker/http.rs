use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client as HttpClient;
use reqwest::header::AUTHORIZATION;

use crate::config::Config;
use crate::error::{FetchError, LookupError};

use super::Tracker;
use super::query::{ActivityQuery, user_lookup_url};

#[derive(Clone)]
pub struct HttpTracker {
    http: HttpClient,
    base: String,
    token: String,
}

impl HttpTracker {
    pub fn new(cfg: &Config) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { http, base: cfg.base().to_string(), token: cfg.token.clone() })
    }
}

#[async_trait]
impl Tracker for HttpTracker {
    async fn fetch_activity(&self, query: &ActivityQuery) -> Result<Bytes, FetchError> {
        let response = self
            .http
            .get(query.url())
            .header(AUTHORIZATION, &self.token)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        // an error page is not a feed; never hand it to the decoder
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        response.bytes().await.map_err(FetchError::from_reqwest)
    }

    async fn lookup_user(&self, username: &str) -> Result<Bytes, LookupError> {
        let response = self
            .http
            .get(user_lookup_url(&self.base, username))
            .header(AUTHORIZATION, &self.token)
            .send()
            .await
            .map_err(LookupError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }
        response.bytes().await.map_err(LookupError::from_reqwest)
    }
}
