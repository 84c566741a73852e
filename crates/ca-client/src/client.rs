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
//! The client facade handing out endpoint groups and payment requests

use crate::endpoints::{
  info::InfoEndpoints, payment::PaymentRequestBuilder, pricing::PricingEndpoints,
  DirectRateLimiter,
};
use crate::transport::Transport;
use ca_core::{Config, Result};
use ca_models::info::SupportedCoins;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Main CryptAPI client
///
/// Provides access to the gateway endpoints through organized endpoint
/// groups and payment requests. Handles the shared transport and client-side
/// rate limiting.
///
/// # Examples
///
/// ```rust,no_run
/// use ca_client::CryptApiClient;
/// use ca_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CryptApiClient::new(Config::default())?;
///
///     let payment = client
///         .payment_request("polygon_usdt", "0xdestination", "https://shop.example.com/cb")
///         .callback_param("order_id", 1234)
///         .build()
///         .await?;
///     let created = payment.create_address().await?;
///     let qr = payment.qr_code(Some("25"), None).await?;
///     println!("Pay {} -> {:?}", created.address_in, qr.payment_uri);
///
///     Ok(())
/// }
/// ```
pub struct CryptApiClient {
  rate_limiter: Arc<DirectRateLimiter>,
  transport: Arc<Transport>,
}

impl CryptApiClient {
  /// Create a new client
  ///
  /// # Arguments
  ///
  /// * `config` - Base URL, timeout and rate limit settings
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration is invalid or the HTTP client
  /// cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    // Fall back to the default rate limit if the configured one is zero
    let rate_limit = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(ca_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate_limit)));

    let transport = Arc::new(Transport::new(&config)?);

    Ok(Self { transport, rate_limiter })
  }

  /// Create a new client with custom rate limiting
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration is invalid or the HTTP client
  /// cannot be created.
  pub fn with_rate_limiter(config: Config, rate_limiter: Arc<DirectRateLimiter>) -> Result<Self> {
    Ok(Self { transport: Arc::new(Transport::new(&config)?), rate_limiter })
  }

  /// Get access to catalog endpoints (service info, coin info, supported coins)
  pub fn info(&self) -> InfoEndpoints {
    InfoEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Get access to pricing endpoints (fee estimates, conversion)
  pub fn pricing(&self) -> PricingEndpoints {
    PricingEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Start a payment request
  ///
  /// # Arguments
  ///
  /// * `coin` - Coin id, e.g. "btc" or "polygon_usdt"
  /// * `address` - Destination address the gateway forwards funds to
  /// * `callback_url` - Webhook notified on payment events
  pub fn payment_request(
    &self,
    coin: impl Into<String>,
    address: impl Into<String>,
    callback_url: impl Into<String>,
  ) -> PaymentRequestBuilder {
    PaymentRequestBuilder::new(
      self.transport.clone(),
      self.rate_limiter.clone(),
      coin,
      address,
      callback_url,
    )
  }

  /// List supported coins; `None` when the catalog is unavailable
  pub async fn supported_coins(&self) -> Option<SupportedCoins> {
    self.info().supported_coins().await
  }

  /// Wait for rate limit to allow next request
  ///
  /// Endpoints wait automatically; this is for callers pacing their own work.
  pub async fn wait_for_rate_limit(&self) -> Result<()> {
    self.rate_limiter.until_ready().await;
    Ok(())
  }

  /// Get the transport layer
  pub fn transport(&self) -> &Arc<Transport> {
    &self.transport
  }
}

impl std::fmt::Debug for CryptApiClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CryptApiClient")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .finish()
  }
}
