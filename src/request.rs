use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{CollectorConfig, Result};

/// Anything that can produce the raw response body for a round.
#[async_trait]
pub trait RoundFetcher: Send + Sync {
    async fn fetch_round(&self, round: u32) -> Result<Value>;
}

/// Requests the winning stores of a round from the lottery site.
pub struct HttpFetcher {
    client: Client,
    endpoint: String,
    rank_filter: String,
}

impl HttpFetcher {
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            rank_filter: config.rank_filter.clone(),
        })
    }
}

#[async_trait]
impl RoundFetcher for HttpFetcher {
    /// Requests a round and returns the response body parsed as JSON.
    /// Non-2xx responses are errors.
    async fn fetch_round(&self, round: u32) -> Result<Value> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("srchWnShpRnk", self.rank_filter.as_str())])
            .query(&[("srchLtEpsd", round)])
            .send()
            .await?
            .error_for_status()?;
        let body = res.json::<Value>().await?;
        Ok(body)
    }
}
