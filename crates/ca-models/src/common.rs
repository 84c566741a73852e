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
//! Common types and field decoders shared by all gateway responses

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The `status` marker carried by every gateway response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
  /// The call succeeded
  Success,
  /// The gateway rejected the call
  Error,
}

impl ApiStatus {
  /// True for [`ApiStatus::Success`]
  pub fn is_success(&self) -> bool {
    matches!(self, ApiStatus::Success)
  }
}

/// Render a JSON scalar as a string; the gateway mixes `"0.1"` and `0.1`
pub fn value_to_string(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// Field decoders for values the gateway sends as either strings or numbers
pub mod de {
  use super::*;

  /// Required string that may arrive as a number
  pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Value::deserialize(deserializer)?;
    value_to_string(&value)
      .ok_or_else(|| serde::de::Error::custom(format!("expected string or number, got {value}")))
  }

  /// Optional string that may arrive as a number; null and other shapes map to `None`
  pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
  }

  /// Optional unsigned integer that may arrive as a string
  pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
      Some(Value::Number(n)) => n.as_u64(),
      Some(Value::String(s)) => s.trim().parse().ok(),
      _ => None,
    })
  }

  /// Optional flag sent as `true`, `1` or `"1"`
  pub fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
      Some(Value::Bool(b)) => Some(b),
      Some(Value::Number(n)) => n.as_i64().map(|n| n != 0),
      Some(Value::String(s)) => match s.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
      },
      _ => None,
    })
  }
}
