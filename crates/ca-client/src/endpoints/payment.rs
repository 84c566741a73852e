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
//! Payment requests: deposit address creation, callback logs and QR codes
//!
//! A [`PaymentRequest`] describes one payment. It is created through a
//! [`PaymentRequestBuilder`] whose `build` validates the coin against the
//! gateway's catalog before the request can be used. The deposit address
//! produced by [`PaymentRequest::create_address`] is stored on the instance
//! and reused by [`PaymentRequest::qr_code`].

use super::info::InfoEndpoints;
use super::{impl_endpoint_base, require, DirectRateLimiter, EndpointBase};
use crate::transport::{QueryParams, Transport};
use ca_core::{CoinId, Endpoint, Error, Result, DEFAULT_QR_SIZE};
use ca_models::payment::{CreateAddressResponse, LogsResponse, QrCodeResponse};
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const CALLBACK_PARAM: &str = "callback";
const ADDRESS_PARAM: &str = "address";

/// Builder for a [`PaymentRequest`]
pub struct PaymentRequestBuilder {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
  coin: String,
  address: String,
  callback_url: String,
  callback_params: QueryParams,
  gateway_params: QueryParams,
  timeout: Option<Duration>,
}

impl PaymentRequestBuilder {
  /// Start a payment request
  ///
  /// * `coin` - Coin id, e.g. "btc" or "polygon_usdt"
  /// * `address` - Destination address the gateway forwards funds to
  /// * `callback_url` - Webhook the gateway notifies on payment events
  pub fn new(
    transport: Arc<Transport>,
    rate_limiter: Arc<DirectRateLimiter>,
    coin: impl Into<String>,
    address: impl Into<String>,
    callback_url: impl Into<String>,
  ) -> Self {
    Self {
      transport,
      rate_limiter,
      coin: coin.into(),
      address: address.into(),
      callback_url: callback_url.into(),
      callback_params: Vec::new(),
      gateway_params: Vec::new(),
      timeout: None,
    }
  }

  /// Append an identifying parameter to the callback URL's query, e.g. an order id
  pub fn callback_param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
    self.callback_params.push((key.into(), value.to_string()));
    self
  }

  /// Forward a gateway option to the `create` call, e.g. `pending`, `multi_chain`, `convert`
  ///
  /// `callback` and `address` are always taken from the request itself; options
  /// with those keys are dropped.
  pub fn gateway_param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
    self.gateway_params.push((key.into(), value.to_string()));
    self
  }

  /// Apply a timeout to every request made by the payment request
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// Validate the coin against the gateway catalog and build the request
  ///
  /// # Errors
  ///
  /// * [`Error::CoinListUnavailable`] if the catalog cannot be fetched
  /// * [`Error::UnsupportedCoin`] if the coin is not listed
  #[instrument(skip(self), fields(coin = %self.coin))]
  pub async fn build(self) -> Result<PaymentRequest> {
    let mut catalog = InfoEndpoints::new(self.transport.clone(), self.rate_limiter.clone());
    if let Some(timeout) = self.timeout {
      catalog = catalog.with_timeout(timeout);
    }

    let coins = catalog.supported_coins().await.ok_or(Error::CoinListUnavailable)?;
    if !coins.contains(self.coin.trim()) {
      warn!("Coin {} is not supported by the gateway", self.coin);
      return Err(Error::UnsupportedCoin(self.coin));
    }

    Ok(self.build_unchecked())
  }

  /// Build the request without consulting the gateway catalog
  pub fn build_unchecked(self) -> PaymentRequest {
    PaymentRequest {
      transport: self.transport,
      rate_limiter: self.rate_limiter,
      coin: self.coin,
      address: self.address,
      callback_url: self.callback_url,
      callback_params: self.callback_params,
      gateway_params: self.gateway_params,
      timeout: self.timeout,
      payment_address: OnceLock::new(),
    }
  }
}

/// One payment: a coin, a destination and the callback that tracks it
///
/// Not meant to be reused across unrelated payments; the generated deposit
/// address is bound to the instance.
pub struct PaymentRequest {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
  coin: String,
  address: String,
  callback_url: String,
  callback_params: QueryParams,
  gateway_params: QueryParams,
  timeout: Option<Duration>,
  payment_address: OnceLock<String>,
}

impl PaymentRequest {
  /// Coin id of the payment
  pub fn coin(&self) -> &str {
    &self.coin
  }

  /// Destination address
  pub fn address(&self) -> &str {
    &self.address
  }

  /// Callback URL as given, without identifying parameters
  pub fn callback_url(&self) -> &str {
    &self.callback_url
  }

  /// Deposit address generated by [`PaymentRequest::create_address`], if any
  pub fn payment_address(&self) -> Option<&str> {
    self.payment_address.get().map(String::as_str)
  }

  /// Generate the deposit address for this payment
  ///
  /// Sends the gateway options, the encoded callback URL and the destination
  /// address. On success the returned `address_in` is stored on the instance.
  ///
  /// # Errors
  ///
  /// Fails locally, before any request, with [`Error::Config`] when the coin,
  /// address or callback URL is missing, when the callback URL does not parse,
  /// or when this instance already generated an address.
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: ca_client::CryptApiClient) -> ca_core::Result<()> {
  /// let payment = client
  ///     .payment_request("btc", "bc1qdestination", "https://shop.example.com/callback")
  ///     .callback_param("order_id", 1234)
  ///     .build()
  ///     .await?;
  /// let created = payment.create_address().await?;
  /// println!("Pay to {}", created.address_in);
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self), fields(coin = %self.coin))]
  pub async fn create_address(&self) -> Result<CreateAddressResponse> {
    let coin = CoinId::new(&self.coin)?;
    let address = require(&self.address, "Address not set")?;
    let callback = self.callback_query_value()?;

    if let Some(existing) = self.payment_address.get() {
      return Err(Error::Config(format!(
        "Payment address {} already generated for this request",
        existing
      )));
    }

    let params = self.create_params(address, callback);

    self.wait_for_rate_limit().await?;
    let response: CreateAddressResponse =
      self.transport.get(Some(&coin), Endpoint::Create, params, self.timeout).await?;

    if self.payment_address.set(response.address_in.clone()).is_err() {
      warn!("Concurrent address creation on one payment request; keeping the first address");
    } else {
      info!("Generated payment address {}", response.address_in);
    }

    Ok(response)
  }

  /// Fetch the callback history of this payment
  #[instrument(skip(self), fields(coin = %self.coin))]
  pub async fn check_logs(&self) -> Result<LogsResponse> {
    let coin = CoinId::new(&self.coin)?;
    let callback = self.callback_query_value()?;

    let params = vec![(CALLBACK_PARAM.to_string(), callback)];

    self.wait_for_rate_limit().await?;
    self.transport.get(Some(&coin), Endpoint::Logs, params, self.timeout).await
  }

  /// Fetch a QR code for the generated deposit address
  ///
  /// # Arguments
  ///
  /// * `value` - Amount to embed in the payment URI, if any
  /// * `size` - Image size in pixels (default 512)
  ///
  /// Without a prior successful [`PaymentRequest::create_address`] the
  /// request is still sent, and the gateway answers with an error.
  #[instrument(skip(self), fields(coin = %self.coin))]
  pub async fn qr_code(&self, value: Option<&str>, size: Option<u32>) -> Result<QrCodeResponse> {
    let coin = CoinId::new(&self.coin)?;

    let mut params = QueryParams::new();
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
      params.push(("value".to_string(), value.to_string()));
    }
    params.push(("size".to_string(), size.unwrap_or(DEFAULT_QR_SIZE).to_string()));
    match self.payment_address.get() {
      Some(address) => params.push((ADDRESS_PARAM.to_string(), address.clone())),
      None => warn!("QR code requested before a payment address was generated"),
    }

    self.wait_for_rate_limit().await?;
    self.transport.get(Some(&coin), Endpoint::QrCode, params, self.timeout).await
  }

  /// Callback URL with the identifying parameters appended to its query
  pub fn full_callback_url(&self) -> Result<String> {
    let callback = require(&self.callback_url, "Callback URL not set")?;
    let mut url = Url::parse(callback)
      .map_err(|e| Error::Config(format!("Invalid callback URL {}: {}", callback, e)))?;

    if !self.callback_params.is_empty() {
      let mut query_pairs = url.query_pairs_mut();
      for (key, value) in &self.callback_params {
        query_pairs.append_pair(key, value);
      }
    }

    Ok(url.to_string())
  }

  /// Value of the `callback` query parameter
  ///
  /// The serialized URL is already escaped as a whole URI; the transport
  /// form-encodes it as a single query value.
  fn callback_query_value(&self) -> Result<String> {
    let full = self.full_callback_url()?;
    debug!("Callback URL: {}", full);
    Ok(full)
  }

  /// Gateway options followed by the request's own `callback` and `address`
  fn create_params(&self, address: &str, callback: String) -> QueryParams {
    let mut params: QueryParams = self
      .gateway_params
      .iter()
      .filter(|(key, _)| {
        let reserved = key == CALLBACK_PARAM || key == ADDRESS_PARAM;
        if reserved {
          warn!("Ignoring gateway option {}; it is set by the payment request", key);
        }
        !reserved
      })
      .cloned()
      .collect();
    params.push((CALLBACK_PARAM.to_string(), callback));
    params.push((ADDRESS_PARAM.to_string(), address.to_string()));
    params
  }
}

impl_endpoint_base!(PaymentRequest);

impl fmt::Debug for PaymentRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PaymentRequest")
      .field("coin", &self.coin)
      .field("address", &self.address)
      .field("callback_url", &self.callback_url)
      .field("callback_params", &self.callback_params)
      .field("gateway_params", &self.gateway_params)
      .field("payment_address", &self.payment_address.get())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use governor::{Quota, RateLimiter};
  use std::num::NonZeroU32;

  fn builder(coin: &str, address: &str, callback: &str) -> PaymentRequestBuilder {
    let transport = Arc::new(Transport::new_mock());
    let quota = Quota::per_minute(NonZeroU32::new(600).unwrap());
    let rate_limiter = Arc::new(RateLimiter::direct(quota));
    PaymentRequestBuilder::new(transport, rate_limiter, coin, address, callback)
  }

  #[test]
  fn test_full_callback_url_appends_params() {
    let request = builder("btc", "bc1qdest", "https://shop.example.com/cb?store=7")
      .callback_param("order_id", 1234)
      .callback_param("note", "a b")
      .build_unchecked();

    assert_eq!(
      request.full_callback_url().unwrap(),
      "https://shop.example.com/cb?store=7&order_id=1234&note=a+b"
    );
  }

  #[test]
  fn test_callback_query_value_is_plain_url() {
    let request = builder("btc", "bc1qdest", "https://shop.example.com/cb")
      .callback_param("order_id", 42)
      .build_unchecked();

    assert_eq!(
      request.callback_query_value().unwrap(),
      "https://shop.example.com/cb?order_id=42"
    );
  }

  #[test]
  fn test_create_params_override_gateway_options() {
    let request = builder("btc", "bc1qdest", "https://shop.example.com/cb")
      .gateway_param("pending", 1)
      .gateway_param("callback", "https://other.example.com/")
      .gateway_param("address", "bc1qother")
      .build_unchecked();

    let params = request.create_params("bc1qdest", "https://shop.example.com/cb".to_string());

    assert_eq!(
      params,
      vec![
        ("pending".to_string(), "1".to_string()),
        ("callback".to_string(), "https://shop.example.com/cb".to_string()),
        ("address".to_string(), "bc1qdest".to_string()),
      ]
    );
  }

  #[test]
  fn test_invalid_callback_url() {
    let request = builder("btc", "bc1qdest", "not a url").build_unchecked();
    assert!(matches!(request.full_callback_url(), Err(Error::Config(_))));
  }

  #[tokio::test]
  async fn test_create_address_local_failures() {
    let cases = [
      ("", "bc1qdest", "https://shop.example.com/cb", "Coin not set"),
      ("btc", "", "https://shop.example.com/cb", "Address not set"),
      ("btc", "bc1qdest", "", "Callback URL not set"),
    ];

    for (coin, address, callback, expected) in cases {
      let request = builder(coin, address, callback).build_unchecked();
      match request.create_address().await {
        Err(Error::Config(msg)) => assert_eq!(msg, expected),
        other => panic!("Expected Config error, got {:?}", other),
      }
    }
  }

  #[tokio::test]
  async fn test_check_logs_local_failures() {
    let request = builder("btc", "", "").build_unchecked();
    match request.check_logs().await {
      Err(Error::Config(msg)) => assert_eq!(msg, "Callback URL not set"),
      other => panic!("Expected Config error, got {:?}", other),
    }

    let request = builder("", "bc1qdest", "https://shop.example.com/cb").build_unchecked();
    assert!(matches!(request.check_logs().await, Err(Error::Config(_))));
  }

  #[tokio::test]
  async fn test_qr_code_requires_coin() {
    let request = builder(" ", "bc1qdest", "https://shop.example.com/cb").build_unchecked();
    match request.qr_code(None, None).await {
      Err(Error::Config(msg)) => assert_eq!(msg, "Coin not set"),
      other => panic!("Expected Config error, got {:?}", other),
    }
  }

  #[test]
  fn test_debug_shows_payment_state() {
    let request = builder("btc", "bc1qdest", "https://shop.example.com/cb").build_unchecked();
    let debug = format!("{:?}", request);
    assert!(debug.contains("payment_address: None"));
    assert!(request.payment_address().is_none());
  }
}
