// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP implementation of [`PaymentLookup`] against the gateway's
//! consolidating search endpoint.
//!
//! The bot deliberately goes through the same endpoint the dashboard uses
//! instead of talking to store backends directly; the fan-out and
//! first-paid-wins policy live in one place.

use std::time::Duration;

use async_trait::async_trait;
use balcao_core::{BalcaoError, Order, PaymentLookup, PaymentMatch};
use serde::Deserialize;
use tracing::debug;

/// Raw passthrough shape of `GET /stores/all/payments/search`.
#[derive(Debug, Deserialize)]
struct SearchPayload {
    status: String,
    #[serde(default)]
    order: Option<Order>,
    #[serde(default)]
    store: Option<String>,
    #[serde(default)]
    store_name: Option<String>,
}

fn into_match(payload: SearchPayload) -> Option<PaymentMatch> {
    if payload.status != "paid" {
        return None;
    }
    let order = payload.order?;
    Some(PaymentMatch {
        order,
        store: payload.store.unwrap_or_default(),
        store_name: payload.store_name.unwrap_or_default(),
    })
}

/// Payment lookup over the gateway's search endpoint.
pub struct HttpPaymentLookup {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPaymentLookup {
    /// `base_url` is the gateway base, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BalcaoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| BalcaoError::Internal(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PaymentLookup for HttpPaymentLookup {
    async fn find_paid_order(&self, email: &str) -> Result<Option<PaymentMatch>, BalcaoError> {
        let url = format!(
            "{}/stores/all/payments/search?email={}",
            self.base_url,
            urlencode(email)
        );
        debug!(url = url.as_str(), "consolidating search");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| BalcaoError::Internal(format!("payment search request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BalcaoError::Internal(format!(
                "payment search returned {}",
                response.status()
            )));
        }

        let payload: SearchPayload = response
            .json()
            .await
            .map_err(|e| BalcaoError::Internal(format!("payment search returned garbage: {e}")))?;

        Ok(into_match(payload))
    }
}

/// Percent-encode the few characters that legally appear in emails.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn urlencode_escapes_plus_and_at() {
        assert_eq!(urlencode("a+b@c.com"), "a%2Bb%40c.com");
        assert_eq!(urlencode("simples"), "simples");
    }

    #[test]
    fn non_paid_payload_is_no_match() {
        let payload = SearchPayload {
            status: "pending".into(),
            order: None,
            store: None,
            store_name: None,
        };
        assert!(into_match(payload).is_none());
    }

    #[tokio::test]
    async fn finds_paid_order_through_the_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/all/payments/search"))
            .and(query_param("email", "cliente@gmail.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "paid",
                "order": {
                    "id": 12,
                    "amount": 19.9,
                    "status": "paid",
                    "customer_email": "cliente@gmail.com",
                    "created_at": "2026-01-30T08:00:00Z"
                },
                "store": "lojabux",
                "store_name": "RecargaBX"
            })))
            .mount(&server)
            .await;

        let lookup = HttpPaymentLookup::new(server.uri()).unwrap();
        let found = lookup.find_paid_order("cliente@gmail.com").await.unwrap().unwrap();
        assert_eq!(found.store_name, "RecargaBX");
        assert_eq!(found.order.display_id(), "12");
    }

    #[tokio::test]
    async fn not_found_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/all/payments/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "not_found",
                "message": "Nenhum pedido encontrado"
            })))
            .mount(&server)
            .await;

        let lookup = HttpPaymentLookup::new(server.uri()).unwrap();
        assert!(lookup.find_paid_order("x@y.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_is_an_error_not_a_silent_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/all/payments/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let lookup = HttpPaymentLookup::new(server.uri()).unwrap();
        assert!(lookup.find_paid_order("x@y.com").await.is_err());
    }
}
