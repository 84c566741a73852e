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
//! Canonical coin identifiers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a chain group and a token in a compound coin id
pub const COIN_SEPARATOR: char = '_';

/// Canonical coin identifier, e.g. `btc` or `polygon_usdt`
///
/// Compound identifiers map onto two URL path segments: `polygon_usdt`
/// becomes `polygon/usdt`. Only the first separator splits, so
/// `bep20_1inch_x` becomes `bep20/1inch_x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinId(String);

impl CoinId {
  /// Create a coin id, rejecting empty input
  pub fn new(coin: impl AsRef<str>) -> Result<Self> {
    let coin = coin.as_ref().trim();
    if coin.is_empty() {
      return Err(Error::Config("Coin not set".to_string()));
    }
    Ok(CoinId(coin.to_string()))
  }

  /// The identifier as given
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// URL path segments addressing this coin
  pub fn path_segments(&self) -> Vec<&str> {
    match self.0.split_once(COIN_SEPARATOR) {
      Some((group, subtype)) if !group.is_empty() && !subtype.is_empty() => vec![group, subtype],
      _ => vec![self.0.as_str()],
    }
  }

  /// Chain group for compound ids (`polygon` for `polygon_usdt`)
  pub fn group(&self) -> Option<&str> {
    match self.0.split_once(COIN_SEPARATOR) {
      Some((group, subtype)) if !group.is_empty() && !subtype.is_empty() => Some(group),
      _ => None,
    }
  }
}

impl fmt::Display for CoinId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl TryFrom<String> for CoinId {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> {
    CoinId::new(value)
  }
}

impl TryFrom<&str> for CoinId {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self> {
    CoinId::new(value)
  }
}

impl From<CoinId> for String {
  fn from(value: CoinId) -> Self {
    value.0
  }
}

impl AsRef<str> for CoinId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
