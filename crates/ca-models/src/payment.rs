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
//! Payment lifecycle responses: address creation, callback logs and QR codes

use crate::common::{de, ApiStatus};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response of the `create` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAddressResponse {
  /// Status marker
  pub status: ApiStatus,

  /// Generated deposit address the payer sends funds to
  pub address_in: String,

  /// Forwarding destination; a string, or an address/percentage map for split payouts
  #[serde(default)]
  pub address_out: Option<Value>,

  /// Callback URL as registered by the gateway
  #[serde(default)]
  pub callback_url: Option<String>,

  /// Confirmation priority
  #[serde(default)]
  pub priority: Option<String>,

  /// Minimum amount accepted at `address_in`
  #[serde(default, deserialize_with = "de::opt_string")]
  pub minimum_transaction_coin: Option<String>,

  /// Fields not modelled above
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

/// Response of the `logs` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
  /// Status marker
  pub status: ApiStatus,

  /// Deposit address the logs belong to
  #[serde(default)]
  pub address_in: Option<String>,

  /// Forwarding destination
  #[serde(default)]
  pub address_out: Option<Value>,

  /// Callback URL as registered by the gateway
  #[serde(default)]
  pub callback_url: Option<String>,

  /// Whether pending (unconfirmed) payments are notified
  #[serde(default, deserialize_with = "de::opt_flag")]
  pub notify_pending: Option<bool>,

  /// Confirmations required before the confirmed notification
  #[serde(default, deserialize_with = "de::opt_u64")]
  pub notify_confirmations: Option<u64>,

  /// Confirmation priority
  #[serde(default)]
  pub priority: Option<String>,

  /// One entry per payment received at the address
  #[serde(default)]
  pub callbacks: Vec<CallbackRecord>,
}

impl LogsResponse {
  /// True when at least one payment reached the address
  pub fn has_payments(&self) -> bool {
    !self.callbacks.is_empty()
  }
}

/// A payment observed at the deposit address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackRecord {
  /// Transaction into the deposit address
  #[serde(default)]
  pub txid_in: Option<String>,

  /// Forwarding transaction
  #[serde(default)]
  pub txid_out: Option<String>,

  /// Amount received, in coin units
  #[serde(default, deserialize_with = "de::opt_string")]
  pub value_coin: Option<String>,

  /// Amount forwarded after fees, in coin units
  #[serde(default, deserialize_with = "de::opt_string")]
  pub value_forwarded_coin: Option<String>,

  /// Gateway fee, in coin units
  #[serde(default, deserialize_with = "de::opt_string")]
  pub fee_coin: Option<String>,

  /// Confirmations at last update
  #[serde(default, deserialize_with = "de::opt_u64")]
  pub confirmations: Option<u64>,

  /// Last update timestamp
  #[serde(default, deserialize_with = "de::opt_string")]
  pub last_update: Option<String>,

  /// Delivery result, e.g. `sent` or `pending`
  #[serde(default)]
  pub result: Option<String>,

  /// Individual webhook delivery attempts
  #[serde(default)]
  pub logs: Vec<CallbackDelivery>,
}

/// One webhook delivery attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackDelivery {
  /// URL the gateway called
  #[serde(default)]
  pub request_url: Option<String>,

  /// Body the callback endpoint answered with
  #[serde(default)]
  pub response: Option<String>,

  /// HTTP status the callback endpoint answered with
  #[serde(default, deserialize_with = "de::opt_string")]
  pub response_status: Option<String>,

  /// Attempt timestamp
  #[serde(default, deserialize_with = "de::opt_string")]
  pub timestamp: Option<String>,

  /// Scheduled retry timestamp
  #[serde(default, deserialize_with = "de::opt_string")]
  pub next_try: Option<String>,

  /// Whether this was a pending notification
  #[serde(default, deserialize_with = "de::opt_flag")]
  pub pending: Option<bool>,
}

/// Response of the `qrcode` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeResponse {
  /// Status marker
  pub status: ApiStatus,

  /// Base64-encoded PNG image
  pub qr_code: String,

  /// Payment URI encoded in the image, e.g. `bitcoin:bc1q...?amount=0.1`
  #[serde(default)]
  pub payment_uri: Option<String>,
}

impl QrCodeResponse {
  /// Decode the PNG bytes of the QR image
  pub fn image_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
    base64::engine::general_purpose::STANDARD.decode(self.qr_code.trim())
  }
}
