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
//! Service info catalog and the supported coin listing derived from it
//!
//! The info endpoint answers with a tree: top-level keys are either base
//! coins (`btc`, `ltc`) carrying a coin record, or chain prefixes (`polygon`,
//! `trc20`) whose children are the token records of that chain. A few keys
//! are not coins at all (`status`, `fee_tiers`). Every entry is classified
//! into an [`InfoNode`] while decoding, so malformed shapes surface as
//! [`InfoNode::Other`] instead of being probed for later.

use crate::common::{value_to_string, ApiStatus};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

const STATUS_KEY: &str = "status";
const FEE_TIERS_KEY: &str = "fee_tiers";

/// Attributes of a single coin or token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
  /// Ticker, e.g. `usdt`
  pub ticker: String,

  /// Everything else the gateway reports (name, logo, minimums, fees, prices)
  #[serde(flatten)]
  pub attributes: BTreeMap<String, Value>,
}

impl CoinRecord {
  /// Human readable coin name
  pub fn name(&self) -> Option<&str> {
    self.attributes.get("coin").and_then(Value::as_str)
  }

  /// Minimum transaction amount in coin units
  pub fn minimum_transaction(&self) -> Option<String> {
    self.attributes.get("minimum_transaction_coin").and_then(value_to_string)
  }

  /// Price in a fiat currency, present when the info call asked for prices
  pub fn price(&self, currency: &str) -> Option<String> {
    self.attributes.get("prices")?.get(currency).and_then(value_to_string)
  }
}

/// One entry of the info tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoNode {
  /// Leaf coin record
  Coin(CoinRecord),
  /// Grouping node, e.g. a chain prefix holding its tokens
  Group(InfoGroup),
  /// Anything that is neither (markers, lists, scalars, null)
  Other(Value),
}

/// Ordered key/node mapping; keeps the gateway's key order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InfoGroup {
  entries: Vec<(String, InfoNode)>,
}

impl InfoGroup {
  /// Iterate entries in response order
  pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoNode)> {
    self.entries.iter().map(|(key, node)| (key.as_str(), node))
  }

  /// Look up an entry by key
  pub fn get(&self, key: &str) -> Option<&InfoNode> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
  }

  /// Number of direct entries
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// True when the group has no entries
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn take(&mut self, key: &str) -> Option<InfoNode> {
    let index = self.entries.iter().position(|(k, _)| k == key)?;
    Some(self.entries.remove(index).1)
  }
}

impl FromIterator<(String, InfoNode)> for InfoGroup {
  fn from_iter<I: IntoIterator<Item = (String, InfoNode)>>(iter: I) -> Self {
    InfoGroup { entries: iter.into_iter().collect() }
  }
}

impl<'de> Deserialize<'de> for InfoGroup {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct GroupVisitor;

    impl<'de> Visitor<'de> for GroupVisitor {
      type Value = InfoGroup;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of coin entries")
      }

      fn visit_map<A>(self, mut map: A) -> Result<InfoGroup, A::Error>
      where
        A: MapAccess<'de>,
      {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, node)) = map.next_entry::<String, InfoNode>()? {
          entries.push((key, node));
        }
        Ok(InfoGroup { entries })
      }
    }

    deserializer.deserialize_map(GroupVisitor)
  }
}

impl Serialize for InfoGroup {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (key, node) in &self.entries {
      map.serialize_entry(key, node)?;
    }
    map.end()
  }
}

/// Response of the catalog-wide info endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "InfoGroup")]
pub struct ServiceInfo {
  /// Status marker
  pub status: ApiStatus,

  /// Fee tier table, kept out of the coin tree
  pub fee_tiers: Option<Value>,

  /// Coin tree without the `status` and `fee_tiers` keys
  pub coins: InfoGroup,
}

impl TryFrom<InfoGroup> for ServiceInfo {
  type Error = String;

  fn try_from(mut group: InfoGroup) -> Result<Self, Self::Error> {
    let status = match group.take(STATUS_KEY) {
      Some(InfoNode::Other(value)) => serde_json::from_value::<ApiStatus>(value)
        .map_err(|e| format!("invalid status marker: {e}"))?,
      Some(_) => return Err("invalid status marker".to_string()),
      None => return Err("missing status marker".to_string()),
    };

    let fee_tiers = group.take(FEE_TIERS_KEY).map(|node| match node {
      InfoNode::Other(value) => value,
      other => serde_json::to_value(other).unwrap_or(Value::Null),
    });

    Ok(ServiceInfo { status, fee_tiers, coins: group })
  }
}

impl ServiceInfo {
  /// Flat `coin_token -> ticker` listing of every coin in the catalog
  pub fn supported_coins(&self) -> SupportedCoins {
    let mut coins = SupportedCoins::default();
    flatten_coins(&self.coins, &mut coins, "");
    coins
  }
}

/// Response of the per-coin info endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinInfo {
  /// Status marker
  pub status: ApiStatus,

  /// The coin's record
  #[serde(flatten)]
  pub record: CoinRecord,
}

/// Flat, insertion-ordered mapping from canonical coin id to ticker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedCoins {
  entries: Vec<(String, String)>,
}

impl SupportedCoins {
  /// Record a coin; an existing id keeps its position and takes the new ticker
  pub fn insert(&mut self, coin: impl Into<String>, ticker: impl Into<String>) {
    let coin = coin.into();
    let ticker = ticker.into();
    match self.entries.iter_mut().find(|(k, _)| *k == coin) {
      Some(entry) => entry.1 = ticker,
      None => self.entries.push((coin, ticker)),
    }
  }

  /// Ticker of a coin id
  pub fn get(&self, coin: &str) -> Option<&str> {
    self.entries.iter().find(|(k, _)| k == coin).map(|(_, ticker)| ticker.as_str())
  }

  /// True when the coin id is listed
  pub fn contains(&self, coin: &str) -> bool {
    self.get(coin).is_some()
  }

  /// Coin ids in discovery order
  pub fn coins(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  /// `(coin id, ticker)` pairs in discovery order
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Number of coins
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// True when nothing is listed
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl Serialize for SupportedCoins {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (coin, ticker) in &self.entries {
      map.serialize_entry(coin, ticker)?;
    }
    map.end()
  }
}

/// Walk an info tree and record every coin record under its underscored path
///
/// Coin records become `prefix + key -> ticker`; groups are descended with
/// `prefix + key + "_"` at any depth; other values are skipped. Entries are
/// visited depth-first in response order.
pub fn flatten_coins(group: &InfoGroup, coins: &mut SupportedCoins, prefix: &str) {
  for (key, node) in group.iter() {
    match node {
      InfoNode::Coin(record) => coins.insert(format!("{prefix}{key}"), record.ticker.clone()),
      InfoNode::Group(children) => flatten_coins(children, coins, &format!("{prefix}{key}_")),
      InfoNode::Other(_) => {}
    }
  }
}
