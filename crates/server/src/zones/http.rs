//! Remote zone matching service client.
//!
//! Queries `GET {url}?postcode=..&country=BR&state=MG` and expects
//! `{ "zone_id": 24 }` or `{ "zone_id": null }`. Matches (including "no
//! zone") are cached with `moka` for the configured TTL; failures are not.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use store_decision_core::{Cep, ZoneId};
use tracing::{debug, instrument};
use url::Url;

use super::{ZoneLookupError, ZoneMatcher};
use crate::config::ZoneServiceConfig;

const COUNTRY: &str = "BR";
const STATE: &str = "MG";

#[derive(Debug, Deserialize)]
struct ZoneServiceResponse {
    zone_id: Option<ZoneId>,
}

/// Client for the remote zone matching service.
#[derive(Clone)]
pub struct HttpZoneMatcher {
    inner: Arc<HttpZoneMatcherInner>,
}

struct HttpZoneMatcherInner {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
    cache: Cache<String, Option<ZoneId>>,
}

impl HttpZoneMatcher {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to build.
    pub fn new(config: &ZoneServiceConfig) -> Result<Self, ZoneLookupError> {
        let endpoint = Url::parse(&config.url)?;
        let client = reqwest::Client::builder().build()?;
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(HttpZoneMatcherInner {
                client,
                endpoint,
                token: config.token.clone(),
                cache,
            }),
        })
    }

    fn request_url(&self, cep: &Cep) -> Url {
        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("postcode", cep.as_str())
            .append_pair("country", COUNTRY)
            .append_pair("state", STATE);
        url
    }

    async fn fetch(&self, cep: &Cep) -> Result<Option<ZoneId>, ZoneLookupError> {
        let mut request = self.inner.client.get(self.request_url(cep));
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ZoneLookupError::Status(status.as_u16()));
        }

        let body: ZoneServiceResponse = response.json().await?;
        Ok(body.zone_id)
    }
}

#[async_trait]
impl ZoneMatcher for HttpZoneMatcher {
    #[instrument(skip(self, cep), fields(cep = %cep))]
    async fn match_zone(&self, cep: &Cep) -> Result<Option<ZoneId>, ZoneLookupError> {
        if let Some(zone) = self.inner.cache.get(cep.as_str()).await {
            debug!("Cache hit for zone lookup");
            return Ok(zone);
        }

        let zone = self.fetch(cep).await?;
        self.inner
            .cache
            .insert(cep.as_str().to_owned(), zone)
            .await;
        Ok(zone)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn matcher(url: &str) -> HttpZoneMatcher {
        HttpZoneMatcher::new(&ZoneServiceConfig {
            url: url.to_string(),
            token: None,
            cache_ttl: Duration::from_secs(300),
        })
        .unwrap()
    }

    #[test]
    fn test_request_url_carries_postcode_and_region() {
        let matcher = matcher("https://zones.example.com/match?key=abc");
        let url = matcher.request_url(&Cep::parse("30140-000").unwrap());
        assert_eq!(
            url.as_str(),
            "https://zones.example.com/match?key=abc&postcode=30140000&country=BR&state=MG"
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = HttpZoneMatcher::new(&ZoneServiceConfig {
            url: "not a url".to_string(),
            token: None,
            cache_ttl: Duration::from_secs(1),
        });
        assert!(matches!(result, Err(ZoneLookupError::Url(_))));
    }

    #[test]
    fn test_response_body_shapes() {
        let matched: ZoneServiceResponse = serde_json::from_str(r#"{"zone_id": 24}"#).unwrap();
        assert_eq!(matched.zone_id, Some(ZoneId::new(24)));

        let unmatched: ZoneServiceResponse = serde_json::from_str(r#"{"zone_id": null}"#).unwrap();
        assert_eq!(unmatched.zone_id, None);
    }

    #[tokio::test]
    async fn test_cached_zone_skips_the_network() {
        // Port 9 (discard) would fail the request if it were sent.
        let matcher = matcher("http://127.0.0.1:9/match");
        let cep = Cep::parse("30140000").unwrap();
        matcher
            .inner
            .cache
            .insert(cep.as_str().to_owned(), Some(ZoneId::new(24)))
            .await;

        assert_eq!(matcher.match_zone(&cep).await.unwrap(), Some(ZoneId::new(24)));
    }
}
