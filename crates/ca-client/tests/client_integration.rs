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
//! End-to-end tests against a mock gateway

use ca_client::{CryptApiClient, Error};
use ca_core::Config;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{any, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALLBACK: &str = "https://shop.example.com/cb";
const FULL_CALLBACK: &str = "https://shop.example.com/cb?order_id=42";

fn client_for(server: &MockServer) -> CryptApiClient {
  CryptApiClient::new(Config::default().with_base_url(server.uri())).unwrap()
}

fn info_body() -> serde_json::Value {
  json!({
    "btc": {"coin": "Bitcoin", "ticker": "btc"},
    "polygon": {
      "usdt": {"coin": "Tether", "ticker": "usdt"},
      "matic": {"coin": "Polygon", "ticker": "matic"}
    },
    "fee_tiers": [{"minimum": "0", "fee": "0.01"}],
    "status": "success"
  })
}

fn created_body(address_in: &str) -> serde_json::Value {
  json!({
    "address_in": address_in,
    "address_out": "bc1qdest",
    "callback_url": "https://shop.example.com/cb?order_id=42",
    "priority": "default",
    "status": "success"
  })
}

#[tokio::test]
async fn test_create_address_compound_coin_path() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/polygon/usdt/create/"))
    .and(query_param("callback", FULL_CALLBACK))
    .and(query_param("address", "0xdest"))
    .and(query_param("multi_chain", "1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(created_body("0xdeposit")))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client
    .payment_request("polygon_usdt", "0xdest", CALLBACK)
    .callback_param("order_id", 42)
    .gateway_param("multi_chain", 1)
    .build_unchecked();

  let created = payment.create_address().await.unwrap();
  assert_eq!(created.address_in, "0xdeposit");
  assert_eq!(payment.payment_address(), Some("0xdeposit"));
}

#[tokio::test]
async fn test_create_address_sends_each_reserved_param_once() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/create/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(created_body("bc1qdeposit")))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client
    .payment_request("btc", "bc1qdest", CALLBACK)
    .callback_param("order_id", 42)
    .gateway_param("callback", "https://other.example.com/")
    .gateway_param("address", "bc1qother")
    .gateway_param("pending", 1)
    .build_unchecked();

  payment.create_address().await.unwrap();

  let requests = server.received_requests().await.unwrap();
  assert_eq!(requests.len(), 1);
  let url = &requests[0].url;
  assert_eq!(
    url.query(),
    Some(
      "pending=1&callback=https%3A%2F%2Fshop.example.com%2Fcb%3Forder_id%3D42&address=bc1qdest"
    )
  );

  let callbacks: Vec<String> =
    url.query_pairs().filter(|(k, _)| k == "callback").map(|(_, v)| v.into_owned()).collect();
  assert_eq!(callbacks, vec![FULL_CALLBACK.to_string()]);
  let addresses = url.query_pairs().filter(|(k, _)| k == "address").count();
  assert_eq!(addresses, 1);
}

#[tokio::test]
async fn test_create_address_simple_coin_path() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/create/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(created_body("bc1qdeposit")))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client.payment_request("btc", "bc1qdest", CALLBACK).build_unchecked();

  assert_eq!(payment.create_address().await.unwrap().address_in, "bc1qdeposit");
}

#[tokio::test]
async fn test_qr_code_uses_created_address() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/create/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(created_body("bc1qdeposit")))
    .expect(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .and(path("/btc/qrcode/"))
    .and(query_param("address", "bc1qdeposit"))
    .and(query_param("value", "0.5"))
    .and(query_param("size", "512"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "qr_code": "iVBORw0KGgo=",
      "payment_uri": "bitcoin:bc1qdeposit?amount=0.5",
      "status": "success"
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client
    .payment_request("btc", "bc1qdest", CALLBACK)
    .callback_param("order_id", 42)
    .build_unchecked();

  payment.create_address().await.unwrap();
  let qr = payment.qr_code(Some("0.5"), None).await.unwrap();

  assert_eq!(qr.payment_uri.as_deref(), Some("bitcoin:bc1qdeposit?amount=0.5"));
  assert_eq!(&qr.image_bytes().unwrap()[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_qr_code_without_address_reaches_gateway() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/qrcode/"))
    .and(query_param_is_missing("address"))
    .and(query_param("size", "256"))
    .respond_with(
      ResponseTemplate::new(400)
        .set_body_json(json!({"status": "error", "error": "Address not provided"})),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client.payment_request("btc", "bc1qdest", CALLBACK).build_unchecked();

  match payment.qr_code(None, Some(256)).await {
    Err(Error::Api(message)) => assert_eq!(message, "Address not provided"),
    other => panic!("Expected Api error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_missing_callback_makes_no_request() {
  let server = MockServer::start().await;

  Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

  let client = client_for(&server);
  let payment = client.payment_request("btc", "bc1qdest", "").build_unchecked();

  match payment.create_address().await {
    Err(Error::Config(message)) => assert_eq!(message, "Callback URL not set"),
    other => panic!("Expected Config error, got {:?}", other),
  }
  match payment.check_logs().await {
    Err(Error::Config(message)) => assert_eq!(message, "Callback URL not set"),
    other => panic!("Expected Config error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_second_create_address_is_rejected_locally() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/create/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(created_body("bc1qdeposit")))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client.payment_request("btc", "bc1qdest", CALLBACK).build_unchecked();

  payment.create_address().await.unwrap();
  let second = payment.create_address().await;

  assert!(matches!(second, Err(Error::Config(_))));
  assert_eq!(payment.payment_address(), Some("bc1qdeposit"));
}

#[tokio::test]
async fn test_check_logs() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/logs/"))
    .and(query_param("callback", FULL_CALLBACK))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "success",
      "callback_url": "https://shop.example.com/cb?order_id=42",
      "address_in": "bc1qdeposit",
      "address_out": "bc1qdest",
      "notify_pending": false,
      "notify_confirmations": 1,
      "callbacks": [
        {"txid_in": "abc", "value_coin": "0.5", "confirmations": 2, "result": "sent", "logs": []}
      ]
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client
    .payment_request("btc", "bc1qdest", CALLBACK)
    .callback_param("order_id", 42)
    .build_unchecked();

  let logs = payment.check_logs().await.unwrap();
  assert!(logs.has_payments());
  assert_eq!(logs.callbacks[0].txid_in.as_deref(), Some("abc"));
  assert_eq!(logs.notify_pending, Some(false));
}

#[tokio::test]
async fn test_gateway_error_message_is_surfaced() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/doge/create/"))
    .respond_with(
      ResponseTemplate::new(400).set_body_json(json!({"status": "error", "error": "bad coin"})),
    )
    .mount(&server)
    .await;

  let client = client_for(&server);
  let payment = client.payment_request("doge", "Ddest", CALLBACK).build_unchecked();

  match payment.create_address().await {
    Err(Error::Api(message)) => assert_eq!(message, "bad coin"),
    other => panic!("Expected Api error, got {:?}", other),
  }
  assert_eq!(payment.payment_address(), None);
}

#[tokio::test]
async fn test_missing_success_marker() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/estimate/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"estimated_cost": "0.1"})))
    .mount(&server)
    .await;

  let client = client_for(&server);

  match client.pricing().estimate("btc", None, None).await {
    Err(Error::InvalidResponse(message)) => {
      assert_eq!(message, "invalid success response structure")
    }
    other => panic!("Expected InvalidResponse error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_supported_coins() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .and(query_param("prices", "0"))
    .respond_with(ResponseTemplate::new(200).set_body_json(info_body()))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let coins = client.supported_coins().await.unwrap();

  assert_eq!(coins.coins().collect::<Vec<_>>(), vec!["btc", "polygon_usdt", "polygon_matic"]);
  assert_eq!(coins.get("polygon_usdt"), Some("usdt"));
  assert!(!coins.contains("fee_tiers"));
}

#[tokio::test]
async fn test_supported_coins_absorbs_failures() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
    .mount(&server)
    .await;

  let client = client_for(&server);
  assert!(client.supported_coins().await.is_none());
}

#[tokio::test]
async fn test_supported_coins_absorbs_malformed_body() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
    .mount(&server)
    .await;

  let client = client_for(&server);
  assert!(client.info().supported_coins().await.is_none());
}

#[tokio::test]
async fn test_supported_coins_absorbs_network_failure() {
  // Port 1 is reserved; the connection is refused
  let config = Config::default().with_base_url("http://127.0.0.1:1").with_timeout_secs(2);
  let client = CryptApiClient::new(config).unwrap();
  assert!(client.supported_coins().await.is_none());
}

#[tokio::test]
async fn test_build_validates_coin() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(info_body()))
    .expect(2)
    .mount(&server)
    .await;

  let client = client_for(&server);

  let payment = client.payment_request("polygon_usdt", "0xdest", CALLBACK).build().await.unwrap();
  assert_eq!(payment.coin(), "polygon_usdt");

  match client.payment_request("polygon_shib", "0xdest", CALLBACK).build().await {
    Err(Error::UnsupportedCoin(coin)) => assert_eq!(coin, "polygon_shib"),
    other => panic!("Expected UnsupportedCoin error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_build_fails_when_catalog_unavailable() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .respond_with(ResponseTemplate::new(503))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let result = client.payment_request("btc", "bc1qdest", CALLBACK).build().await;

  assert!(matches!(result, Err(Error::CoinListUnavailable)));
}

#[tokio::test]
async fn test_service_info_with_prices() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .and(query_param("prices", "1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "btc": {"coin": "Bitcoin", "ticker": "btc", "prices": {"USD": "27000.12"}},
      "status": "success"
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let info = client.info().service_info(true).await.unwrap();

  match info.coins.get("btc") {
    Some(ca_client::InfoNode::Coin(record)) => {
      assert_eq!(record.price("USD").as_deref(), Some("27000.12"))
    }
    other => panic!("Expected coin record, got {:?}", other),
  }
}

#[tokio::test]
async fn test_coin_info() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/trc20/usdt/info/"))
    .and(query_param("prices", "0"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "coin": "Tether", "ticker": "usdt", "minimum_transaction_coin": "1", "status": "success"
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let info = client.info().coin_info("trc20_usdt", false).await.unwrap();

  assert_eq!(info.record.ticker, "usdt");
  assert_eq!(info.record.minimum_transaction().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_estimate_defaults() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/btc/estimate/"))
    .and(query_param("addresses", "1"))
    .and(query_param("priority", "default"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "success",
      "estimated_cost": "0.00001592",
      "estimated_cost_currency": {"USD": "0.43"}
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let estimate = client.pricing().estimate("btc", None, None).await.unwrap();

  assert_eq!(estimate.estimated_cost, "0.00001592");
  assert_eq!(estimate.cost_in("USD").as_deref(), Some("0.43"));
}

#[tokio::test]
async fn test_convert() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/ltc/convert/"))
    .and(query_param("value", "100"))
    .and(query_param("from", "USD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "success", "value_coin": "1.23", "exchange_rate": "81.3"
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let converted = client.pricing().convert("ltc", "100", "USD").await.unwrap();

  assert_eq!(converted.value_coin, "1.23");
  assert_eq!(converted.exchange_rate, "81.3");
}

#[tokio::test]
async fn test_pricing_local_failures() {
  let server = MockServer::start().await;

  Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

  let client = client_for(&server);

  assert!(matches!(client.pricing().estimate("", None, None).await, Err(Error::Config(_))));
  assert!(matches!(client.pricing().convert("btc", "", "USD").await, Err(Error::Config(_))));
  assert!(matches!(client.pricing().convert("btc", "10", " ").await, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_referer_header_is_sent() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .and(header("referer", server.uri().as_str()))
    .respond_with(ResponseTemplate::new(200).set_body_json(info_body()))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  assert!(client.info().service_info(false).await.is_ok());
}

#[tokio::test]
async fn test_per_call_timeout() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/info/"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(info_body()).set_delay(Duration::from_secs(2)),
    )
    .mount(&server)
    .await;

  let client = client_for(&server);
  let result =
    client.info().with_timeout(Duration::from_millis(100)).service_info(false).await;

  assert!(matches!(result, Err(Error::Timeout)));
}
