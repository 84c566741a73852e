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
use thiserror::Error;

/// The main error type for ca-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error, raised locally before any request is sent
  #[error("Configuration error: {0}")]
  Config(String),

  /// The coin is not listed by the gateway
  #[error("Unsupported coin: {0}")]
  UnsupportedCoin(String),

  /// The supported coin list could not be fetched while validating a coin
  #[error("Supported coin list unavailable")]
  CoinListUnavailable,

  /// Serialization/Deserialization error
  #[error("Serialization error")]
  Serde(#[from] serde_json::Error),

  /// URL could not be parsed or assembled
  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),

  /// Response parsed as JSON but did not carry the success marker
  #[error("Invalid API response: {0}")]
  InvalidResponse(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Request exceeded its timeout
  #[error("Request timed out")]
  Timeout,

  /// Error message reported by the gateway
  #[error("API error: {0}")]
  Api(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

impl Error {
  /// True for errors raised before any network call was made
  pub fn is_local(&self) -> bool {
    matches!(self, Error::Config(_) | Error::Url(_))
  }

  /// True when the gateway was reached but answered with something unusable
  pub fn is_malformed_response(&self) -> bool {
    matches!(self, Error::InvalidResponse(_) | Error::Parse(_) | Error::Serde(_))
  }
}

/// Result type alias for ca-* crates
pub type Result<T> = std::result::Result<T, Error>;
