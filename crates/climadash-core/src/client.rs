//! HTTP client for the readings REST API.
//!
//! The API exposes two read-only endpoints:
//!
//! | Endpoint | Response |
//! |----------|----------|
//! | `GET /temp?limit={n}&skip={m}` | `{ "data": { "count": n, "temps": [...] } }` |
//! | `GET /temp/dates?month={1-12}&year={yyyy}` | `{ "data": { "temps": [...] } }` |
//!
//! Records are decoded one at a time: an incomplete or mistyped record is
//! dropped with a warning rather than failing the whole request.
//!
//! # Example
//!
//! ```no_run
//! use climadash_core::client::ApiClient;
//! use time::Month;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("https://express-api-iot.vercel.app")?;
//!
//! let page = client.fetch_page(1, 15).await?;
//! println!("{} of {} readings", page.readings.len(), page.total_count);
//!
//! let may = client.fetch_month(Month::May, 2024).await?;
//! println!("{} readings in May", may.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use time::Month;
use tracing::{debug, warn};

use climadash_types::{Page, RawReading, Reading};

use crate::error::{Error, Result};
use crate::pagination::skip_for;
use crate::traits::ReadingSource;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://express-api-iot.vercel.app";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the readings API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

// ==========================================================================
// Wire envelopes
// ==========================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    temps: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct MonthData {
    #[serde(default)]
    temps: Vec<Value>,
}

// ==========================================================================
// ApiClient Implementation
// ==========================================================================

impl ApiClient {
    /// Create a new client with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API host (e.g., "https://express-api-iot.vercel.app").
    ///   A trailing `/temp` is accepted and stripped.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Request)?;

        Ok(Self { client, base_url })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the paginated list endpoint for a 1-based page.
    #[must_use]
    pub fn page_url(&self, page: u32, page_size: u32) -> String {
        format!(
            "{}/temp?limit={}&skip={}",
            self.base_url,
            page_size,
            skip_for(page, page_size)
        )
    }

    /// URL of the month endpoint.
    #[must_use]
    pub fn month_url(&self, month: Month, year: i32) -> String {
        format!(
            "{}/temp/dates?month={}&year={}",
            self.base_url, month as u8, year
        )
    }

    /// Fetch one page of readings.
    pub async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page> {
        let url = self.page_url(page, page_size);
        let envelope: Envelope<PageData> = self.get(&url).await?;

        let (readings, skipped) = collect_valid(envelope.data.temps);
        debug!(
            page,
            page_size,
            count = readings.len(),
            total = envelope.data.count,
            skipped,
            "Fetched page"
        );

        Ok(Page {
            readings,
            total_count: envelope.data.count,
            skipped,
        })
    }

    /// Fetch all readings for a month of a given year.
    pub async fn fetch_month(&self, month: Month, year: i32) -> Result<Vec<Reading>> {
        let url = self.month_url(month, year);
        let envelope: Envelope<MonthData> = self.get(&url).await?;

        let (readings, skipped) = collect_valid(envelope.data.temps);
        debug!(%month, year, count = readings.len(), skipped, "Fetched month");

        Ok(readings)
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| Error::NotReachable {
                    url: url.to_string(),
                    source: e,
                })?;

        self.handle_response(url, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await.map_err(Error::Request)?;
            serde_json::from_slice(&body).map_err(|e| Error::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
        } else {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .or_else(|| v.get("message"))
                        .and_then(|e| e.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| status.to_string());

            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ReadingSource for ApiClient {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page> {
        ApiClient::fetch_page(self, page, page_size).await
    }

    async fn fetch_month(&self, month: Month, year: i32) -> Result<Vec<Reading>> {
        ApiClient::fetch_month(self, month, year).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Normalize a base URL: trim trailing slashes and a trailing `/temp`.
fn normalize_base_url(base_url: &str) -> Result<String> {
    let mut base_url = base_url.trim().trim_end_matches('/');
    if let Some(stripped) = base_url.strip_suffix("/temp") {
        base_url = stripped.trim_end_matches('/');
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }

    Ok(base_url.to_string())
}

/// Convert wire records, dropping the ones that are mistyped or incomplete.
///
/// Returns the valid readings in input order and the number dropped.
pub(crate) fn collect_valid(raw: Vec<Value>) -> (Vec<Reading>, usize) {
    let total = raw.len();
    let readings: Vec<Reading> = raw
        .into_iter()
        .filter_map(|value| match decode_record(value) {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!(error = %e, "Skipping malformed reading");
                None
            }
        })
        .collect();
    let skipped = total - readings.len();
    (readings, skipped)
}

fn decode_record(value: Value) -> std::result::Result<Reading, String> {
    let raw: RawReading = serde_json::from_value(value).map_err(|e| e.to_string())?;
    Reading::try_from(raw).map_err(|e| e.to_string())
}
