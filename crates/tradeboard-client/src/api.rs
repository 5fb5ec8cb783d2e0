// crates/tradeboard-client/src/api.rs

//! HTTP client for the remote trade API.
//!
//! One request per call: no retries, no timeouts, no cancellation.
//! Non-2xx responses and transport faults both surface as [`ApiError`].
//!
//! Trade endpoints hang off the base URL (`http://localhost:8000/api/trades`),
//! while the health check lives at the server root (`http://localhost:8000/ping`).

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use tradeboard_core::{NewTrade, TradeId, TradeRecord};
use tradeboard_protocol::{api, ProtocolError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response: {0}")]
    Decode(#[from] ProtocolError),

    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Health endpoint for `base_url`: `/ping` on the same origin.
pub fn ping_url(base_url: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    base.join("/ping").map_err(|e| invalid(e.to_string()))
}

/// Thin wrapper around a `reqwest::Client` bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    ping_url: Url,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let ping_url = ping_url(&base_url)?;
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            ping_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /trades`
    pub async fn list(&self) -> Result<Vec<TradeRecord>, ApiError> {
        let body = self.send(self.http.get(api::trades_url(&self.base_url))).await?;
        Ok(api::decode_records(&body)?)
    }

    /// `POST /trades`
    pub async fn create(&self, trade: &NewTrade) -> Result<TradeRecord, ApiError> {
        let req = self
            .http
            .post(api::trades_url(&self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(api::encode_new_trade(trade)?);
        let body = self.send(req).await?;
        Ok(api::decode_record(&body)?)
    }

    /// `PUT /trades/{id}`
    pub async fn update(&self, record: &TradeRecord) -> Result<TradeRecord, ApiError> {
        let req = self
            .http
            .put(api::trade_url(&self.base_url, record.id))
            .header(CONTENT_TYPE, "application/json")
            .body(api::encode_record(record)?);
        let body = self.send(req).await?;
        Ok(api::decode_record(&body)?)
    }

    /// `DELETE /trades/{id}`; the response body is ignored.
    pub async fn delete(&self, id: TradeId) -> Result<(), ApiError> {
        self.send(self.http.delete(api::trade_url(&self.base_url, id)))
            .await?;
        Ok(())
    }

    /// `GET /ping` at the server root; any 2xx counts as healthy.
    pub async fn ping(&self) -> Result<(), ApiError> {
        self.send(self.http.get(self.ping_url.clone())).await?;
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, bytes = body.len(), "api response");

        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }
        Ok(body)
    }
}
