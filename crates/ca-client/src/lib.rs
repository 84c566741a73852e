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
//! # ca-client
//!
//! A CryptAPI payment gateway client for Rust.
//!
//! ## Features
//!
//! - **Payment Requests**: generate deposit addresses, poll callback logs and
//!   fetch QR codes for one payment
//! - **Catalog**: service info, per-coin info and a flat supported coin list
//! - **Pricing**: blockchain fee estimates and fiat conversion
//! - **Async/Await**: built on tokio and reqwest, one GET per operation, no retries
//! - **Rate Limiting**: a client-side limiter shared by all endpoint groups
//! - **Configurable**: base URL, timeout and rate limit via ca-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ca_client::CryptApiClient;
//! use ca_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CryptApiClient::new(Config::from_env()?)?;
//!
//!     let payment = client
//!         .payment_request("btc", "bc1qdestination", "https://shop.example.com/callback")
//!         .callback_param("order_id", 1234)
//!         .build()
//!         .await?;
//!
//!     let created = payment.create_address().await?;
//!     println!("Send BTC to {}", created.address_in);
//!
//!     let qr = payment.qr_code(Some("0.01"), None).await?;
//!     println!("Payment URI: {:?}", qr.payment_uri);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ca_core::Error>`. Missing arguments fail
//! locally with `Error::Config` before any request is made. The one exception
//! is [`endpoints::info::InfoEndpoints::supported_coins`], which reports any
//! failure as `None`.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod transport;

// Re-export the main client and common types
pub use ca_core::{CoinId, Config, Error, Result};
pub use ca_models::*;
pub use client::CryptApiClient;

// Re-export endpoint types for direct access if needed
pub use endpoints::{
  info::InfoEndpoints,
  payment::{PaymentRequest, PaymentRequestBuilder},
  pricing::PricingEndpoints,
};
