//! Signed Kalshi REST client.

use super::auth::{parse_private_key, sign_request};
use super::rate_limit::RateLimiter;
use super::types::{
    Balance, EventsQuery, EventsResponse, ExchangeStatus, Market, MarketsQuery, MarketsResponse,
    SeriesQuery, SeriesResponse,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use rsa::RsaPrivateKey;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const ACCESS_KEY: HeaderName = HeaderName::from_static("kalshi-access-key");
const ACCESS_TIMESTAMP: HeaderName = HeaderName::from_static("kalshi-access-timestamp");
const ACCESS_SIGNATURE: HeaderName = HeaderName::from_static("kalshi-access-signature");

/// Read-only market data operations the application depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Account balance (authenticated).
    async fn get_balance(&self) -> Result<Balance>;
    async fn get_exchange_status(&self) -> Result<ExchangeStatus>;
    async fn get_series(&self, query: SeriesQuery) -> Result<SeriesResponse>;
    async fn get_events(&self, query: EventsQuery) -> Result<EventsResponse>;
    /// One page of markets; see [`get_all_markets`] for the full set.
    async fn get_markets(&self, query: MarketsQuery) -> Result<MarketsResponse>;
}

/// Follow `cursor` until the exchange stops returning one, or returns one
/// it already handed out.
pub async fn get_all_markets<A>(api: &A, mut query: MarketsQuery) -> Result<Vec<Market>>
where
    A: MarketApi + ?Sized,
{
    let mut markets = Vec::new();
    let mut seen: HashSet<String> = query.cursor.iter().cloned().collect();
    loop {
        let page = api.get_markets(query.clone()).await?;
        let next = page.next_cursor().map(str::to_string);
        markets.extend(page.markets);

        match next {
            Some(cursor) if seen.insert(cursor.clone()) => query.cursor = Some(cursor),
            Some(cursor) => {
                tracing::warn!(%cursor, "markets cursor repeated, stopping");
                break;
            }
            None => break,
        }
    }
    Ok(markets)
}

/// High-level API client for Kalshi.
pub struct KalshiClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    private_key: RsaPrivateKey,
    rate_limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for KalshiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KalshiClient")
            .field("base_url", &self.base_url)
            .field("key_id", &key_prefix(&self.key_id))
            .finish_non_exhaustive()
    }
}

fn key_prefix(key_id: &str) -> String {
    key_id.chars().take(10).collect()
}

impl KalshiClient {
    /// Create a client from API settings. Credentials are required.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let key_id = config
            .key_id
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::auth("missing API key id (set KALSHI_API_KEY or api.key_id)"))?
            .to_string();

        let pem = match (&config.private_key, &config.private_key_path) {
            (Some(pem), _) if !pem.trim().is_empty() => pem.clone(),
            (_, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                Error::auth(format!("could not read private key {}: {e}", path.display()))
            })?,
            _ => {
                return Err(Error::auth(
                    "missing private key (set KALSHI_PRIVATE_KEY or api.private_key_path)",
                ));
            }
        };
        let private_key = parse_private_key(&pem)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.resolved_base_url().to_string();
        tracing::info!(
            key_id = %format!("{}...", key_prefix(&key_id)),
            %base_url,
            "initialized Kalshi client"
        );

        Ok(Self {
            http,
            base_url,
            key_id,
            private_key,
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit,
                Duration::from_millis(config.rate_window_ms),
            )),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a signed request for `path` (relative to the base URL).
    ///
    /// The signature covers the URL path only, never the query string.
    pub fn build_request<Q>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
    ) -> Result<reqwest::Request>
    where
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), url);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let mut request = builder.build()?;

        let timestamp = u64::try_from(chrono::Utc::now().timestamp_millis())
            .map_err(|_| Error::signing("Invalid timestamp"))?;
        let signature_path = request.url().path().to_string();
        tracing::debug!("Signing: {timestamp} {method} {signature_path}");
        let signature =
            sign_request(timestamp, method.as_str(), &signature_path, &self.private_key)?;

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCESS_KEY, header_value(&self.key_id)?);
        headers.insert(ACCESS_TIMESTAMP, HeaderValue::from(timestamp));
        headers.insert(ACCESS_SIGNATURE, header_value(&signature)?);

        Ok(request)
    }

    /// Send a signed request and decode the JSON body.
    pub async fn request<T, Q>(&self, method: Method, path: &str, query: Option<&Q>) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.rate_limiter.wait().await;

        let request = self.build_request(method, path, query)?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response.text().await?;

        let decoded = decode_response(status, retry_after, &body);
        if let Err(e) = &decoded {
            tracing::warn!(status = status.as_u16(), path, error = %e, "request failed");
        }
        decoded
    }
}

/// Turn a response into a payload. A 429 carrying `Retry-After` seconds
/// becomes [`Error::RateLimited`]; any other non-2xx becomes [`Error::Api`].
fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> Result<T> {
    if status == StatusCode::TOO_MANY_REQUESTS
        && let Some(secs) = retry_after
    {
        return Err(Error::RateLimited(secs));
    }
    if !status.is_success() {
        return Err(Error::api(status.as_u16(), body));
    }
    Ok(serde_json::from_str(body)?)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::auth(format!("invalid header value: {e}")))
}

#[async_trait]
impl MarketApi for KalshiClient {
    async fn get_balance(&self) -> Result<Balance> {
        self.request(Method::GET, "/portfolio/balance", None::<&()>).await
    }

    async fn get_exchange_status(&self) -> Result<ExchangeStatus> {
        self.request(Method::GET, "/exchange/status", None::<&()>).await
    }

    async fn get_series(&self, query: SeriesQuery) -> Result<SeriesResponse> {
        self.request(Method::GET, "/series", Some(&query)).await
    }

    async fn get_events(&self, query: EventsQuery) -> Result<EventsResponse> {
        self.request(Method::GET, "/events", Some(&query)).await
    }

    async fn get_markets(&self, query: MarketsQuery) -> Result<MarketsResponse> {
        self.request(Method::GET, "/markets", Some(&query)).await
    }
}
