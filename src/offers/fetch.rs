//! Offers API client

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::offers::api::{parse_offers, RawOffer};
use crate::offers::criteria::SearchCriteria;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info};

/// Trait for sources of raw offers
pub trait OfferSource: Send + Sync {
    /// Fetch the offers matching `criteria`
    fn fetch(&self, criteria: &SearchCriteria)
        -> impl Future<Output = Result<Vec<RawOffer>>> + Send;
}

/// Client for the holiday finder offers endpoint
///
/// One GET per search, no retries.
#[derive(Debug, Clone)]
pub struct OfferFetcher {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
    destination_ids: HashMap<String, u32>,
}

impl OfferFetcher {
    /// Create a fetcher
    ///
    /// `destination_ids` maps city names to the numeric ids the offers API
    /// needs for some destinations.
    pub fn new(config: &UpstreamConfig, destination_ids: HashMap<String, u32>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build offers HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
            destination_ids,
        })
    }

    /// Full request URL for `criteria`
    pub fn query_url(&self, criteria: &SearchCriteria) -> Result<String> {
        let query = criteria.upstream_query(&self.destination_ids, self.limit)?;
        Ok(format!(
            "{}/?data={}",
            self.base_url,
            urlencoding::encode(&query.to_string())
        ))
    }
}

impl OfferSource for OfferFetcher {
    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<RawOffer>> {
        let url = self.query_url(criteria)?;
        debug!(%url, "fetching offers");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "offers API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("failed to read response: {}", e)))?;

        let offers = parse_offers(&body)?;
        info!(count = offers.len(), "fetched offers");
        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SearchConfig};

    fn fetcher() -> OfferFetcher {
        let config = Config::default();
        OfferFetcher::new(&config.upstream, config.destinations.ids).unwrap()
    }

    fn decode_data_param(url: &str) -> serde_json::Value {
        let (_, encoded) = url.split_once("?data=").unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        serde_json::from_str(&decoded).unwrap()
    }

    #[test]
    fn test_query_url_targets_offers_endpoint() {
        let criteria = SearchCriteria::from_config(&SearchConfig::default());
        let url = fetcher().query_url(&criteria).unwrap();

        assert!(url.starts_with(
            "https://www.holidayfinder.co.il/api_no_auth/holiday_finder/offers/?data="
        ));
        assert!(!url.contains('{'), "JSON must be percent-encoded: {}", url);
    }

    #[test]
    fn test_query_url_carries_criteria() {
        let criteria = SearchCriteria::from_config(&SearchConfig::default());
        let data = decode_data_param(&fetcher().query_url(&criteria).unwrap());

        assert_eq!(data["engine"]["whereTxt"][0], "Rome");
        assert_eq!(data["engine"]["where"][0], 19);
        assert_eq!(data["limit"], 1000);
        assert_eq!(data["offset"], 0);
    }

    #[test]
    fn test_configured_limit_is_used() {
        let mut config = Config::default();
        config.upstream.limit = 50;
        let fetcher = OfferFetcher::new(&config.upstream, HashMap::new()).unwrap();

        let criteria = SearchCriteria::from_config(&SearchConfig::default());
        let data = decode_data_param(&fetcher.query_url(&criteria).unwrap());

        assert_eq!(data["limit"], 50);
        assert!(data["engine"]["where"].is_null());
    }
}
