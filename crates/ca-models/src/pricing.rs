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
//! Fee estimates and currency conversion

use crate::common::{de, value_to_string, ApiStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response of the `estimate` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResponse {
  /// Status marker
  pub status: ApiStatus,

  /// Estimated blockchain fee in coin units
  #[serde(deserialize_with = "de::string_or_number")]
  pub estimated_cost: String,

  /// Estimated fee converted to fiat currencies, keyed by currency code
  #[serde(default)]
  pub estimated_cost_currency: BTreeMap<String, Value>,
}

impl EstimateResponse {
  /// Estimated fee in a fiat currency
  pub fn cost_in(&self, currency: &str) -> Option<String> {
    self.estimated_cost_currency.get(currency).and_then(value_to_string)
  }
}

/// Response of the `convert` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertResponse {
  /// Status marker
  pub status: ApiStatus,

  /// Converted value in coin units
  #[serde(deserialize_with = "de::string_or_number")]
  pub value_coin: String,

  /// Exchange rate applied
  #[serde(deserialize_with = "de::string_or_number")]
  pub exchange_rate: String,
}
