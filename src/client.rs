use crate::errors::{ConversionError, Result};
use crate::models::{ConversionReport, ConversionRequest};
use crate::storage::OutputLocks;
use log::{debug, info};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_REMOTE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Error body of the conversion server: `{ "error": "..." }`.
#[derive(Deserialize, Debug)]
struct RemoteErrorResponse {
    error: String,
}

#[derive(Deserialize, Debug)]
struct ShutdownResponse {
    message: String,
}

/// Client for an external conversion server (`POST /convert`, `POST /shutdown`).
///
/// It takes the same [`ConversionRequest`] and returns the same
/// [`ConversionReport`] as the local pipeline, so callers can swap backends.
/// The server writes the output file itself; this client only guarantees that
/// it never has two requests in flight for the same output path.
#[derive(Debug)]
pub struct RemoteConverter {
    http: reqwest::Client,
    base_url: String,
    locks: OutputLocks,
}

impl RemoteConverter {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locks: OutputLocks::new(),
        })
    }

    /// Builds a client from `SVGDXF_REMOTE_URL` and `SVGDXF_REMOTE_TIMEOUT_SECS`.
    ///
    /// Unset variables fall back to `http://localhost:3000` and 60 seconds.
    /// Call `dotenvy::dotenv().ok();` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let base_url = optional_var("SVGDXF_REMOTE_URL")?
            .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());
        let timeout_secs = match optional_var("SVGDXF_REMOTE_TIMEOUT_SECS")? {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConversionError::InvalidRequest(format!(
                    "SVGDXF_REMOTE_TIMEOUT_SECS must be a whole number of seconds, got '{}': {}",
                    raw, e
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one conversion to the server.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` when required fields are missing (nothing is sent).
    /// * `OutputBusy` when this client already has a request for the same output path.
    /// * `Network` for connection failures and timeouts.
    /// * `RemoteError` for non-2xx replies, carrying the server's `error` text.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<ConversionReport> {
        request.validate()?;
        let output_path = request.output_path();
        let _guard = self.locks.acquire(&output_path)?;

        let url = format!("{}/convert", self.base_url);
        debug!("[RemoteConverter] POST {} for '{}'", url, output_path.display());
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(ConversionError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(ConversionError::Network)?;
        if status.is_success() {
            let report: ConversionReport = serde_json::from_str(&body)?;
            info!(
                "Remote conversion finished: {} ({})",
                report.message,
                report.output_path.display()
            );
            Ok(report)
        } else {
            Err(remote_error(status, &body))
        }
    }

    /// Asks the server to shut down and returns its farewell message.
    pub async fn shutdown(&self) -> Result<String> {
        let url = format!("{}/shutdown", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ConversionError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(ConversionError::Network)?;
        if status.is_success() {
            Ok(serde_json::from_str::<ShutdownResponse>(&body)?.message)
        } else {
            Err(remote_error(status, &body))
        }
    }
}

fn optional_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(Some(value)),
        Ok(_) | Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn remote_error(status: reqwest::StatusCode, body: &str) -> ConversionError {
    let message = match serde_json::from_str::<RemoteErrorResponse>(body) {
        Ok(reply) => reply.error,
        Err(_) => format!("Request failed with status {}: {}", status, body),
    };
    ConversionError::RemoteError {
        status: status.as_u16(),
        message,
    }
}
