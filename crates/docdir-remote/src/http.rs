//! reqwest-backed implementations of the two remote sources.
//!
//! Both sources report transport, status, and decoding failures as
//! `DirectoryError`; they do not retry and do not swallow errors. Degrading a
//! failure into an empty result is the caller's decision.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use docdir_contracts::{
    config::DirectoryConfig,
    doctor::Doctor,
    error::{DirectoryError, DirectoryResult},
};
use docdir_core::traits::{DoctorSource, SymptomSource};

/// Build the shared HTTP client with the configured timeouts.
pub fn build_client(cfg: &DirectoryConfig) -> DirectoryResult<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.request_timeout_ms))
        .build()
        .map_err(|e| DirectoryError::ConfigError {
            reason: format!("failed to build HTTP client: {e}"),
        })
}

fn fetch_error(url: &str, e: reqwest::Error) -> DirectoryError {
    DirectoryError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

// ── Doctor feed ───────────────────────────────────────────────────────────────

/// GETs a static JSON array of doctors.
#[derive(Debug, Clone)]
pub struct HttpDoctorSource {
    url: String,
    client: reqwest::Client,
}

impl HttpDoctorSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn from_config(cfg: &DirectoryConfig) -> DirectoryResult<Self> {
        Ok(Self::new(cfg.doctors_url.clone(), build_client(cfg)?))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_doctors(&self) -> DirectoryResult<Vec<Doctor>> {
        debug!(url = %self.url, "fetching doctor list");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| fetch_error(&self.url, e))?;

        response
            .json::<Vec<Doctor>>()
            .await
            .map_err(|e| DirectoryError::Decode {
                reason: format!("doctor list from '{}': {e}", self.url),
            })
    }
}

// ── Symptom search ────────────────────────────────────────────────────────────

/// Queries a clinical-tables style symptom search endpoint.
///
/// Request: `GET <url>?terms=<query>&maxList=<n>`.
/// Response: `[success, codes, extra, terms]`; see [`parse_symptom_response`].
#[derive(Debug, Clone)]
pub struct HttpSymptomSource {
    url: String,
    max_list: usize,
    client: reqwest::Client,
}

impl HttpSymptomSource {
    pub fn new(url: impl Into<String>, max_list: usize, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            max_list,
            client,
        }
    }

    pub fn from_config(cfg: &DirectoryConfig) -> DirectoryResult<Self> {
        Ok(Self::new(
            cfg.symptoms_url.clone(),
            cfg.symptom_max_list,
            build_client(cfg)?,
        ))
    }
}

#[async_trait]
impl SymptomSource for HttpSymptomSource {
    async fn search_symptoms(&self, query: &str) -> DirectoryResult<Vec<String>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!(url = %self.url, query, "searching symptom terms");

        let max_list = self.max_list.to_string();
        let response = self
            .client
            .get(&self.url)
            .query(&[("terms", query), ("maxList", max_list.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| fetch_error(&self.url, e))?;

        let body: Value = response.json().await.map_err(|e| DirectoryError::Decode {
            reason: format!("symptom response from '{}': {e}", self.url),
        })?;

        parse_symptom_response(&body)
    }
}

/// Extract the matched terms from a four-element symptom search response.
///
/// The first element is the success flag: `true` or a positive match count.
/// Anything else means "no success" and yields an empty list. The fourth
/// element lists the terms, either as plain strings or as arrays whose first
/// element is the display string.
pub fn parse_symptom_response(body: &Value) -> DirectoryResult<Vec<String>> {
    let items = body.as_array().ok_or_else(|| DirectoryError::Decode {
        reason: "symptom response is not an array".to_string(),
    })?;

    let success = match items.first() {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(count)) => count.as_f64().is_some_and(|n| n > 0.0),
        _ => false,
    };
    if !success {
        return Ok(Vec::new());
    }

    let terms = items
        .get(3)
        .and_then(Value::as_array)
        .ok_or_else(|| DirectoryError::Decode {
            reason: "symptom response has no term list at index 3".to_string(),
        })?;

    Ok(terms
        .iter()
        .filter_map(|term| match term {
            Value::String(s) => Some(s.clone()),
            Value::Array(parts) => parts.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect())
}
