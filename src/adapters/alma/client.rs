//! Alma Bibs API client
//!
//! Fetches one bibliographic record per MMS ID from
//! `{base_url}/almaws/v1/bibs/{mms_id}`. No retries: a failed request is a
//! failed record.

use super::BibSource;
use crate::config::AlmaConfig;
use crate::domain::ids::MmsId;
use crate::domain::{AlmaError, BibExportError, BibliographicRecord, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT_SECONDS: u64 = 30;

/// Alma Bibs API client
///
/// # Example
///
/// ```no_run
/// use bibexport::adapters::alma::{AlmaClient, BibSource};
/// use bibexport::config::{secret_string, AlmaConfig};
/// use bibexport::domain::ids::MmsId;
/// use bibexport::domain::BibExportError;
///
/// # async fn example() -> bibexport::domain::Result<()> {
/// let config = AlmaConfig {
///     api_key: Some(secret_string("l8xx-key".to_string())),
///     ..Default::default()
/// };
/// let client = AlmaClient::new(&config)?;
/// let mms_id = MmsId::new("991234567890104641").map_err(BibExportError::Validation)?;
/// let record = client.fetch_record(&mms_id).await?;
/// println!("{:?}", record.mms_id());
/// # Ok(())
/// # }
/// ```
pub struct AlmaClient {
    base_url: Url,
    client: Client,
}

impl AlmaClient {
    /// Create a client from the `[alma]` configuration section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is missing, the base URL
    /// does not parse, or the HTTP client cannot be built.
    pub fn new(config: &AlmaConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| BibExportError::Configuration("alma.api_key is not set".to_string()))?;

        let base = config.effective_base_url();
        let base_url = Url::parse(&base).map_err(|e| {
            BibExportError::Configuration(format!("Invalid Alma base URL '{base}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BibExportError::Configuration(format!(
                "Alma base URL '{base}' cannot carry a path"
            )));
        }

        let mut authorization =
            HeaderValue::from_str(&format!("apikey {}", api_key.expose_secret().as_ref()))
                .map_err(|e| {
                    BibExportError::Configuration(format!("Invalid characters in API key: {e}"))
                })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECONDS.min(config.timeout_seconds),
            ))
            .build()
            .map_err(|e| {
                BibExportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        tracing::debug!(base_url = %base_url, timeout_seconds = config.timeout_seconds, "Alma client created");

        Ok(Self { base_url, client })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// URL of one record: `{base}/almaws/v1/bibs/{mms_id}`
    pub fn record_url(&self, mms_id: &MmsId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["almaws", "v1", "bibs", mms_id.as_str()]);
        }
        url
    }
}

#[async_trait]
impl BibSource for AlmaClient {
    async fn fetch_record(&self, mms_id: &MmsId) -> Result<BibliographicRecord> {
        let url = self.record_url(mms_id);
        tracing::debug!(url = %url, mms_id = %mms_id, "Fetching bibliographic record");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, mms_id, body).into());
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AlmaError::InvalidResponse(format!("{mms_id}: {e}")))?;

        record_from_response(body, mms_id)
    }

    fn describe(&self) -> String {
        self.base_url().to_string()
    }
}

/// Turn a decoded API response into a record
///
/// An object carrying `mms_id` is the record itself; an object with a `bib`
/// array yields its first element.
///
/// # Errors
///
/// `RecordNotFound` for an empty `bib` array, `InvalidResponse` for anything
/// else.
pub fn record_from_response(body: Value, mms_id: &MmsId) -> Result<BibliographicRecord> {
    let Value::Object(mut fields) = body else {
        return Err(AlmaError::InvalidResponse(format!("{mms_id}: response is not an object")).into());
    };

    if fields.contains_key("mms_id") {
        return Ok(BibliographicRecord::from(fields));
    }

    match fields.remove("bib") {
        Some(Value::Array(bibs)) => match bibs.into_iter().next() {
            Some(first) => BibliographicRecord::from_value(first).ok_or_else(|| {
                AlmaError::InvalidResponse(format!("{mms_id}: bib entry is not an object")).into()
            }),
            None => Err(AlmaError::RecordNotFound(mms_id.to_string()).into()),
        },
        _ => Err(AlmaError::InvalidResponse(format!(
            "{mms_id}: neither mms_id nor bib array in response"
        ))
        .into()),
    }
}

fn map_transport_error(err: reqwest::Error) -> AlmaError {
    if err.is_timeout() {
        AlmaError::Timeout(err.to_string())
    } else {
        AlmaError::ConnectionFailed(err.to_string())
    }
}

fn status_error(status: StatusCode, mms_id: &MmsId, body: String) -> AlmaError {
    let message = if body.trim().is_empty() {
        mms_id.to_string()
    } else {
        format!("{mms_id}: {}", body.trim())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AlmaError::AuthenticationFailed(format!("status {status} for {mms_id}"))
        }
        StatusCode::NOT_FOUND => AlmaError::RecordNotFound(mms_id.to_string()),
        s if s.is_server_error() => AlmaError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => AlmaError::ClientError {
            status: s.as_u16(),
            message,
        },
    }
}
