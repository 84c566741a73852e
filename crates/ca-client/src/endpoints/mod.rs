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
//! Gateway endpoint groups
//!
//! Each group shares the client's transport and rate limiter:
//! - [`info`]: coin catalog and supported coin listing
//! - [`payment`]: deposit addresses, callback logs, QR codes
//! - [`pricing`]: fee estimates and conversion

pub mod info;
pub mod payment;
pub mod pricing;

use crate::transport::Transport;
use ca_core::{Error, Result};
use governor::{
  RateLimiter,
  clock::DefaultClock,
  middleware::NoOpMiddleware,
  state::{InMemoryState, NotKeyed},
};
use std::sync::Arc;

/// Rate limiter shared by every endpoint group of a client
pub type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Base trait for endpoint implementations
///
/// Provides common functionality needed by all endpoint modules
#[allow(async_fn_in_trait)]
pub trait EndpointBase {
  /// Wait for rate limit before making a request
  async fn wait_for_rate_limit(&self) -> Result<()>;

  /// Get a reference to the transport layer
  fn transport(&self) -> &Arc<Transport>;
}

/// Macro to implement the EndpointBase trait for endpoint structs
macro_rules! impl_endpoint_base {
  ($struct_name:ident) => {
    impl EndpointBase for $struct_name {
      async fn wait_for_rate_limit(&self) -> Result<()> {
        self.rate_limiter.until_ready().await;
        Ok(())
      }

      fn transport(&self) -> &Arc<Transport> {
        &self.transport
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

/// Reject empty required arguments before any request is made
pub(crate) fn require<'a>(value: &'a str, message: &str) -> Result<&'a str> {
  let value = value.trim();
  if value.is_empty() {
    return Err(Error::Config(message.to_string()));
  }
  Ok(value)
}

#[cfg(test)]
mod tests {
  use super::*;
  use governor::Quota;
  use std::num::NonZeroU32;

  #[test]
  fn test_require_rejects_blank() {
    match require("  ", "Address not set") {
      Err(Error::Config(msg)) => assert_eq!(msg, "Address not set"),
      other => panic!("Expected Config error, got {:?}", other),
    }
    assert_eq!(require(" bc1q ", "Address not set").unwrap(), "bc1q");
  }

  #[tokio::test]
  async fn test_shared_rate_limiter() {
    let transport = Arc::new(Transport::new_mock());
    let quota = Quota::per_minute(NonZeroU32::new(600).unwrap());
    let rate_limiter = Arc::new(RateLimiter::direct(quota));

    let info = info::InfoEndpoints::new(transport.clone(), rate_limiter.clone());
    let pricing = pricing::PricingEndpoints::new(transport, rate_limiter);

    info.wait_for_rate_limit().await.unwrap();
    pricing.wait_for_rate_limit().await.unwrap();
    assert_eq!(info.transport().base_url().as_str(), "https://mock.cryptapi.io/");
    assert!(Arc::ptr_eq(info.transport(), pricing.transport()));
  }
}
