/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
//! HTTP transport layer for gateway requests
//!
//! Every request is a single GET: no retries, no backoff. The raw response
//! is normalized into either the success payload or an [`Error`] before any
//! typed decoding happens.

use ca_core::{CoinId, Config, Endpoint, Error, Result, ERROR_STATUS, SUCCESS_STATUS};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Ordered query parameters
pub type QueryParams = Vec<(String, String)>;

/// HTTP transport layer for making requests to the gateway
#[derive(Debug)]
pub struct Transport {
  client: Client,
  base_url: Url,
  timeout: Duration,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    config.validate()?;

    let referer = HeaderValue::from_str(&config.referer()?)
      .map_err(|e| Error::Config(format!("Invalid referer header: {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, referer);

    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(config.user_agent.as_str())
      .default_headers(headers)
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client, base_url: Url::parse(&config.base_url)?, timeout })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self {
      client: Client::new(),
      base_url: Url::parse("https://mock.cryptapi.io").expect("static mock URL"),
      timeout: Duration::from_secs(30),
    }
  }

  /// Make a GET request to a gateway endpoint
  ///
  /// # Arguments
  ///
  /// * `coin` - Coin the endpoint is scoped to, `None` for catalog-wide endpoints
  /// * `endpoint` - The endpoint to call
  /// * `params` - Query parameters, encoded individually in the given order
  /// * `timeout` - Per-call timeout overriding the client default
  ///
  /// # Returns
  ///
  /// The payload decoded into `T`, once the response carried the success marker
  #[instrument(
    skip(self, params, timeout),
    fields(coin = coin.map(CoinId::as_str).unwrap_or("-"), endpoint = %endpoint)
  )]
  pub async fn get<T>(
    &self,
    coin: Option<&CoinId>,
    endpoint: Endpoint,
    params: QueryParams,
    timeout: Option<Duration>,
  ) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let url = self.build_url(coin, endpoint, &params)?;
    debug!("Making request to: {}", url);

    let mut request = self.client.get(url);
    if let Some(timeout) = timeout {
      request = request.timeout(timeout);
    }

    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    debug!(status = status.as_u16(), "Response body length: {} bytes", body.len());

    #[cfg(feature = "debug-logging")]
    tracing::trace!(body = %body, "Response body");

    let payload = normalize(status, &body)?;

    serde_json::from_value(payload).map_err(|e| {
      error!("Failed to decode {} response: {}", endpoint, e);
      Error::Parse(format!("Failed to decode {} response: {}", endpoint, e))
    })
  }

  /// Build the full URL for a request
  ///
  /// `{base}/{endpoint}/` without a coin, `{base}/{coin segments}/{endpoint}/`
  /// with one.
  pub fn build_url(
    &self,
    coin: Option<&CoinId>,
    endpoint: Endpoint,
    params: &[(String, String)],
  ) -> Result<Url> {
    let mut url = self.base_url.clone();

    {
      let mut segments = url
        .path_segments_mut()
        .map_err(|_| Error::Config(format!("Base URL cannot carry a path: {}", self.base_url)))?;
      segments.pop_if_empty();
      if let Some(coin) = coin {
        segments.extend(coin.path_segments());
      }
      segments.push(endpoint.as_str());
      // trailing slash
      segments.push("");
    }

    if !params.is_empty() {
      let mut query_pairs = url.query_pairs_mut();
      for (key, value) in params {
        query_pairs.append_pair(key, value);
      }
    }

    Ok(url)
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Get the default request timeout
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

fn transport_error(e: reqwest::Error) -> Error {
  if e.is_timeout() {
    warn!("Request timed out: {}", e);
    Error::Timeout
  } else {
    warn!("Request failed: {}", e);
    Error::Http(format!("Request failed: {}", e))
  }
}

/// Turn a raw status/body pair into the success payload or an error
///
/// * non-2xx: the body's `error` message when it has one, else `HTTP error: <code>`
/// * 2xx without `"status": "success"`: invalid success response structure,
///   unless the body is an explicit gateway error carrying a message
/// * 2xx that is not JSON: parse error
pub(crate) fn normalize(status: StatusCode, body: &str) -> Result<Value> {
  let parsed = serde_json::from_str::<Value>(body);

  if !status.is_success() {
    let message = parsed.ok().as_ref().and_then(error_message).map(str::to_string);
    error!(status = status.as_u16(), "Request failed with status: {}", status);
    return Err(match message {
      Some(message) => Error::Api(message),
      None => Error::Http(format!("HTTP error: {}", status.as_u16())),
    });
  }

  let payload = parsed.map_err(|e| {
    error!("Failed to parse JSON response: {}", e);
    Error::Parse(format!(
      "Failed to parse response: {}. Response: {}",
      e,
      &body[..floor_char_boundary(body, 200)]
    ))
  })?;

  match payload.get("status").and_then(Value::as_str) {
    Some(SUCCESS_STATUS) => Ok(payload),
    Some(ERROR_STATUS) if error_message(&payload).is_some() => {
      let message = error_message(&payload).unwrap_or_default().to_string();
      warn!("Gateway reported an error: {}", message);
      Err(Error::Api(message))
    }
    _ => {
      warn!("Response lacks the success marker");
      Err(Error::InvalidResponse("invalid success response structure".to_string()))
    }
  }
}

fn error_message(payload: &Value) -> Option<&str> {
  payload.get("error").and_then(Value::as_str)
}

fn floor_char_boundary(text: &str, max: usize) -> usize {
  if text.len() <= max {
    return text.len();
  }
  (0..=max).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0)
}
