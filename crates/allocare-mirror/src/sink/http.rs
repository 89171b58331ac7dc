//! REST store sink
//!
//! Posts each event as JSON to the store's endpoint for its kind:
//!
//! | event          | path                     |
//! |----------------|--------------------------|
//! | households     | `/households/bulk-sync`  |
//! | bid            | `/bids`                  |
//! | transfer       | `/transfers`             |
//! | log            | `/logs`                  |
//! | trend point    | `/trends`                |
//! | shock          | `/shock`                 |
//! | tokenization   | `/tokenize`              |

use std::time::Duration;

use allocare_common::{AllocareError, MirrorEvent};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::{MirrorSink, SinkError};

/// HTTP sink for the REST store
pub struct HttpSink {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSink {
    /// Create a sink posting under `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AllocareError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AllocareError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path and JSON body for an event
    pub fn request_parts(event: &MirrorEvent) -> Result<(&'static str, Value), SinkError> {
        let body = match event {
            MirrorEvent::Households(households) => Ok(json!({ "households": households })),
            MirrorEvent::Bid(record) => serde_json::to_value(record),
            MirrorEvent::Transfer(record) => serde_json::to_value(record),
            MirrorEvent::Log(record) => serde_json::to_value(record),
            MirrorEvent::TrendPoint(point) => serde_json::to_value(point),
            MirrorEvent::Shock(record) => serde_json::to_value(record),
            MirrorEvent::Tokenization(record) => serde_json::to_value(record),
        }
        .map_err(|e| SinkError::Serialization(e.to_string()))?;

        Ok((Self::path_for(event), body))
    }

    fn path_for(event: &MirrorEvent) -> &'static str {
        match event {
            MirrorEvent::Households(_) => "/households/bulk-sync",
            MirrorEvent::Bid(_) => "/bids",
            MirrorEvent::Transfer(_) => "/transfers",
            MirrorEvent::Log(_) => "/logs",
            MirrorEvent::TrendPoint(_) => "/trends",
            MirrorEvent::Shock(_) => "/shock",
            MirrorEvent::Tokenization(_) => "/tokenize",
        }
    }
}

#[async_trait]
impl MirrorSink for HttpSink {
    #[instrument(skip(self, event), fields(kind = event.kind()))]
    async fn deliver(&self, event: &MirrorEvent) -> Result<(), SinkError> {
        let (path, body) = Self::request_parts(event)?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected {
                kind: event.kind(),
                status: status.as_u16(),
            });
        }

        debug!(%url, "Delivered mirror event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocare_common::{Household, PovertyTrendPoint, ShockRecord};

    #[test]
    fn test_households_body_is_wrapped() {
        let households = vec![Household::new("h1", "Priya Sharma", "Sector-A1").with_credits(45.0)];
        let (path, body) = HttpSink::request_parts(&MirrorEvent::households(&households)).unwrap();

        assert_eq!(path, "/households/bulk-sync");
        assert_eq!(body["households"][0]["id"], "h1");
        assert_eq!(body["households"][0]["credits"], 45.0);
    }

    #[test]
    fn test_shock_body_uses_camel_case() {
        let event = MirrorEvent::Shock(ShockRecord {
            household_id: "h5".into(),
            credit_loss: 15.0,
            new_credits: 60.0,
            new_shock_risk: 0.95,
            new_poverty_index: 0.7,
        });
        let (path, body) = HttpSink::request_parts(&event).unwrap();

        assert_eq!(path, "/shock");
        assert_eq!(body["creditLoss"], 15.0);
        assert_eq!(body["householdId"], "h5");
    }

    #[test]
    fn test_trend_path() {
        let event = MirrorEvent::TrendPoint(PovertyTrendPoint {
            cycle: 3,
            poverty_rate: 40.0,
            extreme_poverty_count: 1,
            resilience_score: 52,
            avg_poverty_index: 0.48,
        });
        let (path, body) = HttpSink::request_parts(&event).unwrap();
        assert_eq!(path, "/trends");
        assert_eq!(body["extremePovertyCount"], 1);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let sink = HttpSink::new("http://localhost:4000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(sink.base_url(), "http://localhost:4000/api");
    }
}
