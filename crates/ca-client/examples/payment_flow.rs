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
//! Walk one payment through the gateway: check the coin, price it, generate a
//! deposit address, render a QR code and poll the callback logs.
//!
//! ```text
//! cargo run --example payment_flow -- polygon_usdt 0xYourWallet https://shop.example.com/cb 25
//! ```

use anyhow::{Context, Result};
use ca_client::CryptApiClient;
use ca_core::Config;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let mut args = env::args().skip(1);
  let coin = args.next().unwrap_or_else(|| "btc".to_string());
  let address = args.next().context("usage: payment_flow <coin> <address> <callback> [value]")?;
  let callback = args.next().context("usage: payment_flow <coin> <address> <callback> [value]")?;
  let value = args.next();

  let config = Config::from_env().context("Failed to load configuration")?;
  println!("Gateway: {} ({} requests/minute)", config.base_url, config.rate_limit);
  let client = CryptApiClient::new(config)?;

  // Price the payment before committing to it
  let estimate = client.pricing().estimate(&coin, None, None).await?;
  println!("Estimated forwarding fee: {} {}", estimate.estimated_cost, coin);
  if let Some(usd) = estimate.cost_in("USD") {
    println!("  ~ {} USD", usd);
  }

  if let Some(value) = value.as_deref() {
    let converted = client.pricing().convert(&coin, value, "USD").await?;
    println!("{} USD = {} {} (rate {})", value, converted.value_coin, coin, converted.exchange_rate);
  }

  let payment = client
    .payment_request(&coin, &address, &callback)
    .callback_param("order_id", std::process::id())
    .build()
    .await
    .with_context(|| format!("Cannot accept {} payments", coin))?;

  let created = payment.create_address().await?;
  println!("\nSend {} to {}", coin, created.address_in);
  if let Some(minimum) = created.minimum_transaction_coin.as_deref() {
    println!("Minimum transaction: {} {}", minimum, coin);
  }

  let qr = payment.qr_code(value.as_deref(), Some(300)).await?;
  let image = qr.image_bytes().context("Gateway returned an undecodable QR image")?;
  println!("QR code: {} bytes of PNG", image.len());
  if let Some(uri) = qr.payment_uri.as_deref() {
    println!("Payment URI: {}", uri);
  }

  let logs = payment.check_logs().await?;
  if logs.has_payments() {
    for callback in &logs.callbacks {
      println!(
        "  tx {} value {} confirmations {}",
        callback.txid_in.as_deref().unwrap_or("-"),
        callback.value_coin.as_deref().unwrap_or("-"),
        callback.confirmations.unwrap_or(0)
      );
    }
  } else {
    println!("No payments received yet");
  }

  Ok(())
}
