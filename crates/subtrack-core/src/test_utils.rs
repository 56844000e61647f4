//! Test utilities for subtrack-core
//!
//! Provides a canonical subscription fixture plus an in-memory mock of
//! the Persistence Gateway for development and integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::models::{BillingCycle, PaymentDetails, Subscriber, Subscription};

/// A fully-populated subscription record for tests: monthly, 10 USD,
/// auto-renew on, renewing 2025-03-15, default reminders.
pub fn subscription(id: &str, name: &str, department: &str, category: &str) -> Subscription {
    Subscription {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        category: category.to_string(),
        description: String::new(),
        date_started: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        billing_cycle: BillingCycle::Monthly,
        renewal_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        trial_price: 0.0,
        regular_price: 10.0,
        price_currency: "USD".to_string(),
        auto_renew: true,
        url: String::new(),
        subscriber: Subscriber {
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            email: "juan@example.com".to_string(),
            designation: "IT Admin".to_string(),
            mobile: "09171234567".to_string(),
        },
        payment: PaymentDetails {
            card_type: "Visa".to_string(),
            cardholder_name: "Juan Dela Cruz".to_string(),
            last_four: "4242".to_string(),
            expiry_date: "12/26".to_string(),
        },
        reminders: vec![30, 7, 1],
        attachments: vec![],
    }
}

#[derive(Clone, Default)]
struct GatewayState {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
    settings: Arc<Mutex<HashMap<String, Value>>>,
}

/// In-memory mock of the Persistence Gateway
///
/// Speaks the real wire protocol: one endpoint, `action` query
/// dispatch, camelCase record fields, `{"success": bool}` envelopes.
pub struct MockGateway {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    state: GatewayState,
}

impl MockGateway {
    /// Start the mock gateway on an available port
    pub async fn start() -> Self {
        let state = GatewayState::default();
        let app = Router::new()
            .route("/", get(handle_get).post(handle_post))
            .with_state(state.clone());

        let (addr, shutdown_tx) = serve(app).await;
        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            state,
        }
    }

    /// Start a broken gateway that answers every request with an HTML
    /// error page, the way a missing endpoint does
    pub async fn start_html() -> Self {
        let app = Router::new().fallback(handle_html);
        let (addr, shutdown_tx) = serve(app).await;
        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            state: GatewayState::default(),
        }
    }

    /// Base URL for this mock gateway
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Preload subscription records
    pub fn seed(&self, subs: Vec<Subscription>) {
        self.state.subscriptions.lock().unwrap().extend(subs);
    }

    /// Preload one stored setting
    pub fn set_setting(&self, key: &str, value: Value) {
        self.state
            .settings
            .lock()
            .unwrap()
            .insert(key.to_string(), value);
    }

    /// Snapshot of the stored records
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.state.subscriptions.lock().unwrap().clone()
    }

    /// Look up one stored setting
    pub fn setting(&self, key: &str) -> Option<Value> {
        self.state.settings.lock().unwrap().get(key).cloned()
    }

    /// Stop the mock gateway
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn serve(app: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

async fn handle_get(
    State(state): State<GatewayState>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    match params.get("action").map(String::as_str) {
        Some("get_all") => {
            let subs = state.subscriptions.lock().unwrap().clone();
            Json(subs).into_response()
        }
        Some("get_settings") => {
            let settings = state.settings.lock().unwrap().clone();
            Json(settings).into_response()
        }
        _ => Json(json!({"success": false, "error": "unknown action"})).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct SettingPayload {
    key: String,
    value: Value,
}

async fn handle_post(
    State(state): State<GatewayState>,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    match params.get("action").map(String::as_str) {
        Some("save") => {
            let sub: Subscription = match serde_json::from_str(&body) {
                Ok(sub) => sub,
                Err(e) => return Json(json!({"success": false, "error": e.to_string()})),
            };
            let mut subs = state.subscriptions.lock().unwrap();
            match subs.iter_mut().find(|s| s.id == sub.id) {
                Some(slot) => *slot = sub,
                None => subs.push(sub),
            }
            Json(json!({"success": true}))
        }
        Some("delete") => {
            let Some(id) = params.get("id") else {
                return Json(json!({"success": false, "error": "missing id"}));
            };
            let mut subs = state.subscriptions.lock().unwrap();
            match subs.iter().position(|s| &s.id == id) {
                Some(idx) => {
                    subs.remove(idx);
                    Json(json!({"success": true}))
                }
                None => Json(json!({"success": false, "error": "no such id"})),
            }
        }
        Some("save_setting") => {
            let payload: SettingPayload = match serde_json::from_str(&body) {
                Ok(p) => p,
                Err(e) => return Json(json!({"success": false, "error": e.to_string()})),
            };
            state
                .settings
                .lock()
                .unwrap()
                .insert(payload.key, payload.value);
            Json(json!({"success": true}))
        }
        _ => Json(json!({"success": false, "error": "unknown action"})),
    }
}

async fn handle_html() -> Html<&'static str> {
    Html("<!DOCTYPE html>\n<html><head><title>404 Not Found</title></head><body><h1>Not Found</h1></body></html>")
}

/// Mock of the advisor's generate endpoint
///
/// Always answers with one recommendation wrapped in a markdown code
/// fence, which real model output tends to carry.
pub struct MockAdvisorServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockAdvisorServer {
    pub async fn start() -> Self {
        let app = Router::new().route("/api/generate", axum::routing::post(handle_generate));
        let (addr, shutdown_tx) = serve(app).await;
        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockAdvisorServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    #[allow(dead_code)]
    prompt: String,
    #[allow(dead_code)]
    stream: bool,
}

async fn handle_generate(Json(request): Json<GenerateRequest>) -> Json<Value> {
    let payload = r#"```json
[{"title": "Downgrade Idle Licenses", "description": "Two seats untouched for 90 days.", "category": "Savings", "impact": "Medium"}]
```"#;
    Json(json!({
        "model": request.model,
        "response": payload,
        "done": true
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_valid() {
        let sub = subscription("abc123xyz", "AWS", "Engineering", "Cloud Infrastructure");
        assert!(crate::validate::validate_subscription(&sub).is_ok());
        assert_eq!(sub.billing_cycle, BillingCycle::Monthly);
        assert_eq!(sub.price_currency, "USD");
    }

    #[tokio::test]
    async fn test_mock_gateway_seed_and_inspect() {
        let server = MockGateway::start().await;
        server.seed(vec![subscription("a1", "AWS", "Engineering", "Cloud Infrastructure")]);
        server.set_setting("theme", json!("dark"));

        assert_eq!(server.subscriptions().len(), 1);
        assert_eq!(server.setting("theme"), Some(json!("dark")));
        assert_eq!(server.setting("missing"), None);
    }
}
