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
//! Catalog endpoints: service info, per-coin info and the supported coin list

use super::{impl_endpoint_base, EndpointBase, DirectRateLimiter};
use crate::transport::Transport;
use ca_core::{CoinId, Endpoint, Result};
use ca_models::info::{CoinInfo, ServiceInfo, SupportedCoins};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Catalog endpoints
pub struct InfoEndpoints {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
  timeout: Option<Duration>,
}

impl InfoEndpoints {
  /// Create a new info endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: Arc<DirectRateLimiter>) -> Self {
    Self { transport, rate_limiter, timeout: None }
  }

  /// Apply a timeout to every request made through this handle
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// Get the full coin catalog
  ///
  /// # Arguments
  ///
  /// * `prices` - Include fiat prices for every coin
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: ca_client::CryptApiClient) -> ca_core::Result<()> {
  /// let info = client.info().service_info(true).await?;
  /// for (coin, ticker) in info.supported_coins().iter() {
  ///     println!("{coin}: {ticker}");
  /// }
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self))]
  pub async fn service_info(&self, prices: bool) -> Result<ServiceInfo> {
    self.wait_for_rate_limit().await?;

    let params = vec![("prices".to_string(), prices_flag(prices))];

    self.transport.get(None, Endpoint::Info, params, self.timeout).await
  }

  /// Get the info record of one coin
  #[instrument(skip(self))]
  pub async fn coin_info(&self, coin: &str, prices: bool) -> Result<CoinInfo> {
    let coin = CoinId::new(coin)?;
    self.wait_for_rate_limit().await?;

    let params = vec![("prices".to_string(), prices_flag(prices))];

    self.transport.get(Some(&coin), Endpoint::Info, params, self.timeout).await
  }

  /// List every supported coin as `coin id -> ticker`
  ///
  /// The list is rebuilt on every call. This is advisory data: any failure
  /// (network, status, malformed body) is logged and reported as `None`
  /// instead of an error.
  #[instrument(skip(self))]
  pub async fn supported_coins(&self) -> Option<SupportedCoins> {
    match self.service_info(false).await {
      Ok(info) => {
        let coins = info.supported_coins();
        debug!("Gateway lists {} coins", coins.len());
        Some(coins)
      }
      Err(e) => {
        warn!(error = %e, "Supported coin list unavailable");
        None
      }
    }
  }
}

fn prices_flag(prices: bool) -> String {
  if prices { "1" } else { "0" }.to_string()
}

impl_endpoint_base!(InfoEndpoints);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_prices_flag() {
    assert_eq!(prices_flag(true), "1");
    assert_eq!(prices_flag(false), "0");
  }
}
