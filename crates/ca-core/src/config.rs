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
//! Configuration management for the CryptAPI client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Main configuration struct for the CryptAPI client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Base URL of the gateway API
  pub base_url: String,

  /// Client-side rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// User-Agent header sent with every request
  pub user_agent: String,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      base_url: crate::CRYPTAPI_BASE_URL.to_string(),
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      user_agent: crate::DEFAULT_USER_AGENT.to_string(),
    }
  }
}

impl Config {
  /// Load configuration from environment variables
  ///
  /// A `.env` file is honoured when present. Every variable is optional:
  ///
  /// * `CRYPTAPI_BASE_URL`
  /// * `CRYPTAPI_RATE_LIMIT`
  /// * `CRYPTAPI_TIMEOUT_SECS`
  /// * `CRYPTAPI_USER_AGENT`
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build a configuration from an arbitrary key lookup
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let base_url =
      lookup("CRYPTAPI_BASE_URL").unwrap_or_else(|| crate::CRYPTAPI_BASE_URL.to_string());

    let rate_limit = match lookup("CRYPTAPI_RATE_LIMIT") {
      Some(value) => value
        .parse()
        .map_err(|_| Error::Config("Invalid CRYPTAPI_RATE_LIMIT".to_string()))?,
      None => crate::DEFAULT_RATE_LIMIT,
    };

    let timeout_secs = match lookup("CRYPTAPI_TIMEOUT_SECS") {
      Some(value) => value
        .parse()
        .map_err(|_| Error::Config("Invalid CRYPTAPI_TIMEOUT_SECS".to_string()))?,
      None => crate::DEFAULT_TIMEOUT_SECS,
    };

    let user_agent =
      lookup("CRYPTAPI_USER_AGENT").unwrap_or_else(|| crate::DEFAULT_USER_AGENT.to_string());

    let config = Config { base_url, rate_limit, timeout_secs, user_agent };
    config.validate()?;
    Ok(config)
  }

  /// Point the client at another host, e.g. a mock server in tests
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Override the request timeout
  pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
    self.timeout_secs = timeout_secs;
    self
  }

  /// Override the client-side rate limit
  pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
    self.rate_limit = rate_limit;
    self
  }

  /// Check that the base URL is an absolute http(s) URL
  pub fn validate(&self) -> Result<()> {
    let url = Url::parse(&self.base_url)?;
    if !matches!(url.scheme(), "http" | "https") {
      return Err(Error::Config(format!("Unsupported base URL scheme: {}", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
      return Err(Error::Config(format!("Base URL has no host: {}", self.base_url)));
    }
    Ok(())
  }

  /// Origin of the base URL, sent as the `Referer` header
  pub fn referer(&self) -> Result<String> {
    let url = Url::parse(&self.base_url)?;
    Ok(url.origin().ascii_serialization())
  }
}
