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
pub mod coin;
pub mod config;
pub mod error;

pub use coin::CoinId;
pub use config::Config;
pub use error::{Error, Result};

/// The gateway endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  // Catalog
  Info,

  // Payment lifecycle
  Create,
  Logs,
  QrCode,

  // Pricing
  Estimate,
  Convert,
}

impl Endpoint {
  /// Path segment of the endpoint
  pub fn as_str(&self) -> &'static str {
    match self {
      Endpoint::Info => "info",
      Endpoint::Create => "create",
      Endpoint::Logs => "logs",
      Endpoint::QrCode => "qrcode",
      Endpoint::Estimate => "estimate",
      Endpoint::Convert => "convert",
    }
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Base URL for the CryptAPI gateway
pub const CRYPTAPI_BASE_URL: &str = "https://api.cryptapi.io";

/// Value of the `status` field on successful responses
pub const SUCCESS_STATUS: &str = "success";

/// Value of the `status` field on gateway error responses
pub const ERROR_STATUS: &str = "error";

/// Default QR code size in pixels
pub const DEFAULT_QR_SIZE: u32 = 512;

/// Default number of output addresses used for fee estimates
pub const DEFAULT_ESTIMATE_ADDRESSES: u32 = 1;

/// Default confirmation priority used for fee estimates
pub const DEFAULT_PRIORITY: &str = "default";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client-side rate limit, requests per minute
pub const DEFAULT_RATE_LIMIT: u32 = 600;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("ca-client/", env!("CARGO_PKG_VERSION"));
