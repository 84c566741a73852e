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
//! Pricing endpoints: blockchain fee estimates and fiat conversion

use super::{impl_endpoint_base, require, EndpointBase, DirectRateLimiter};
use crate::transport::Transport;
use ca_core::{CoinId, Endpoint, Result, DEFAULT_ESTIMATE_ADDRESSES, DEFAULT_PRIORITY};
use ca_models::pricing::{ConvertResponse, EstimateResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Pricing endpoints
pub struct PricingEndpoints {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
  timeout: Option<Duration>,
}

impl PricingEndpoints {
  /// Create a new pricing endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: Arc<DirectRateLimiter>) -> Self {
    Self { transport, rate_limiter, timeout: None }
  }

  /// Apply a timeout to every request made through this handle
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// Estimate the blockchain fee of forwarding a payment
  ///
  /// # Arguments
  ///
  /// * `coin` - Coin id, e.g. "btc" or "trc20_usdt"
  /// * `addresses` - Number of output addresses (default 1)
  /// * `priority` - Confirmation priority (default "default")
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: ca_client::CryptApiClient) -> ca_core::Result<()> {
  /// let estimate = client.pricing().estimate("btc", Some(2), Some("fast")).await?;
  /// println!("Fee: {} BTC (${:?})", estimate.estimated_cost, estimate.cost_in("USD"));
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self))]
  pub async fn estimate(
    &self,
    coin: &str,
    addresses: Option<u32>,
    priority: Option<&str>,
  ) -> Result<EstimateResponse> {
    let coin = CoinId::new(coin)?;
    self.wait_for_rate_limit().await?;

    let params = vec![
      ("addresses".to_string(), addresses.unwrap_or(DEFAULT_ESTIMATE_ADDRESSES).to_string()),
      ("priority".to_string(), priority.unwrap_or(DEFAULT_PRIORITY).to_string()),
    ];

    self.transport.get(Some(&coin), Endpoint::Estimate, params, self.timeout).await
  }

  /// Convert a fiat (or other currency) amount into coin units
  ///
  /// # Arguments
  ///
  /// * `coin` - Target coin id
  /// * `value` - Amount to convert
  /// * `from` - Source currency, e.g. "USD"
  #[instrument(skip(self))]
  pub async fn convert(&self, coin: &str, value: &str, from: &str) -> Result<ConvertResponse> {
    let coin = CoinId::new(coin)?;
    let value = require(value, "Value not set")?;
    let from = require(from, "Source currency not set")?;
    self.wait_for_rate_limit().await?;

    let params = vec![("value".to_string(), value.to_string()), ("from".to_string(), from.to_string())];

    self.transport.get(Some(&coin), Endpoint::Convert, params, self.timeout).await
  }
}

impl_endpoint_base!(PricingEndpoints);
