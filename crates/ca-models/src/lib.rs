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
//! # ca-models
//!
//! Data models for CryptAPI payment gateway responses.
//!
//! Every successful gateway response carries a `status` marker; the models
//! here keep it as [`ApiStatus`] alongside the endpoint-specific fields.
//!
//! ## Features
//!
//! - **Type Safety**: responses of `create`, `logs`, `qrcode`, `info`,
//!   `estimate` and `convert` are strongly typed
//! - **Lenient Scalars**: amounts sent as strings or numbers decode the same
//! - **Tagged Catalog**: the nested info tree is decoded into explicit coin,
//!   group and other nodes, and flattens into [`SupportedCoins`]
//!
//! ## Usage
//!
//! ```ignore
//! use ca_models::info::ServiceInfo;
//!
//! let info: ServiceInfo = serde_json::from_str(&response_json)?;
//! for (coin, ticker) in info.supported_coins().iter() {
//!     println!("{coin}: {ticker}");
//! }
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod info;
pub mod payment;
pub mod pricing;

// Re-export common types for convenience
pub use common::ApiStatus;

// Re-export all model types
pub use info::*;
pub use payment::*;
pub use pricing::*;
