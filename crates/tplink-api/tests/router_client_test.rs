#![allow(clippy::unwrap_used)]
// Integration tests for `RouterClient` against a wiremock router.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use tplink_api::{Band, Credentials, Error, RadioSetting, RadioState, RouterClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const LOGIN_PATH: &str = "/data/login.json";
const WIRELESS_PATH: &str = "/admin/wireless";

fn band_data(enable: &str) -> Value {
    json!({
        "enable": enable,
        "ssid": "TestWifi",
        "hidden": "off",
        "encryption": "psk",
        "psk_version": "auto",
        "psk_cipher": "aes",
        "psk_key": "123 test&key",
        "server": "0.0.0.0",
        "port": "1812",
        "wep_key1": "",
        "hwmode": "ng",
        "htmode": "auto",
        "channel": "auto",
        "disabled": "off",
        "txpower": "high"
    })
}

fn client_for(server: &MockServer) -> RouterClient {
    client_with_timeout(server, Duration::from_secs(10))
}

fn client_with_timeout(server: &MockServer, timeout: Duration) -> RouterClient {
    RouterClient::with_transport(
        server.address().to_string(),
        Credentials::new("admin", SecretString::from("secret".to_owned())),
        TransportConfig::default().with_timeout(timeout),
    )
}

async fn mount_login(server: &MockServer, success: Value) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_string_contains("operation=login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": success })))
        .mount(server)
        .await;
}

async fn mount_read(server: &MockServer, band: Band, body: Value) {
    Mock::given(method("POST"))
        .and(path(WIRELESS_PATH))
        .and(query_param("form", band.form()))
        .and(body_string_contains("operation=read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, route: &str, operation: &str) -> Vec<Request> {
    let needle = format!("operation={operation}");
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == route && String::from_utf8_lossy(&r.body).contains(&needle))
        .collect()
}

fn form_fields(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// A router that remembers writes, so reads reflect them.
#[derive(Clone)]
struct FakeRouter {
    bands: Arc<Mutex<HashMap<String, Map<String, Value>>>>,
}

impl FakeRouter {
    fn new() -> Self {
        let mut bands = HashMap::new();
        for band in Band::ALL {
            if let Value::Object(fields) = band_data("off") {
                bands.insert(band.form().to_owned(), fields);
            }
        }
        Self {
            bands: Arc::new(Mutex::new(bands)),
        }
    }
}

impl Respond for FakeRouter {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let form = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "form")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        let fields: HashMap<String, String> = url::form_urlencoded::parse(&request.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut bands = self.bands.lock().unwrap();
        let Some(stored) = bands.get_mut(&form) else {
            return ResponseTemplate::new(200).set_body_json(json!({ "success": "false" }));
        };

        let operation = fields.get("operation").cloned();
        match operation.as_deref() {
            Some("read") => ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": stored.clone() })),
            Some("write") => {
                for (key, value) in fields {
                    if key != "operation" {
                        stored.insert(key, Value::String(value));
                    }
                }
                ResponseTemplate::new(200).set_body_json(json!({ "success": true }))
            }
            _ => ResponseTemplate::new(200).set_body_json(json!({ "success": "false" })),
        }
    }
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_keeps_session() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    let mut client = client_for(&server);

    client.login().await.unwrap();

    assert!(client.has_session());
}

#[tokio::test]
async fn test_login_sends_browser_headers_and_credentials() {
    let server = MockServer::start().await;
    mount_login(&server, json!(true)).await;
    let mut client = client_for(&server);

    client.login().await.unwrap();

    let logins = requests_to(&server, LOGIN_PATH, "login").await;
    assert_eq!(logins.len(), 1);
    let req = &logins[0];
    let header = |name: &str| {
        req.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };

    let origin = format!("http://{}/", server.address());
    assert_eq!(header("origin"), origin);
    assert_eq!(header("referer"), origin);
    assert_eq!(header("x-requested-with"), "XMLHttpRequest");
    assert_eq!(header("user-agent"), "Mozilla/5.0");
    assert_eq!(header("dnt"), "1");
    assert_eq!(header("accept-encoding"), "gzip, deflate");
    assert_eq!(header("accept-language"), "en-US,en;q=0.9,es;q=0.8");
    assert_eq!(header("accept"), "application/json, text/javascript, */*; q=0.01");
    assert_eq!(
        header("content-type"),
        "application/x-www-form-urlencoded; charset=UTF-8"
    );
    // Basic auth on the request and the Basic token as a cookie.
    assert_eq!(header("authorization"), "Basic YWRtaW46c2VjcmV0");
    assert!(
        header("cookie").contains("Authorization=Basic YWRtaW46c2VjcmV0"),
        "missing auth cookie: {}",
        header("cookie")
    );
    assert_eq!(form_fields(req), vec![("operation".to_owned(), "login".to_owned())]);
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, json!("false")).await;
    let mut client = client_for(&server);

    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.has_session());
    assert_eq!(client.state(), RadioState::Unknown);
    assert!(!client.is_available());
}

#[tokio::test]
async fn test_login_boolean_false_is_not_a_rejection() {
    let server = MockServer::start().await;
    mount_login(&server, json!(false)).await;
    let mut client = client_for(&server);

    client.login().await.unwrap();

    assert!(client.has_session());
}

#[tokio::test]
async fn test_login_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;
    let mut client = client_for(&server);

    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
    assert_eq!(client.state(), RadioState::Unknown);
}

#[tokio::test]
async fn test_login_unreachable() {
    // Nothing listens on port 1.
    let mut client = RouterClient::new(
        "127.0.0.1:1",
        Credentials::new("admin", SecretString::from("secret".to_owned())),
    );
    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
    assert!(!client.has_session());
    assert_eq!(client.state(), RadioState::Unknown);
}

#[tokio::test]
async fn test_login_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": "true" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let mut client = client_with_timeout(&server, Duration::from_millis(200));
    assert_eq!(client.state(), RadioState::Off);

    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout, got: {result:?}"
    );
    assert!(!client.has_session());
    assert_eq!(client.state(), RadioState::Unknown);
}

// ── Reading ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_band_state_on() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::TwoGhz,
        json!({ "success": true, "timeout": true, "data": band_data("on") }),
    )
    .await;
    let mut client = client_for(&server);

    let state = client.band_state(Band::TwoGhz, false).await;

    assert_eq!(state, RadioState::On);
    assert_eq!(client.state(), RadioState::On);
    assert!(client.is_available());
    let payload = client.last_payload().unwrap();
    assert_eq!(payload.ssid(), Some("TestWifi"));
    assert_eq!(payload.enable(), Some("on"));
}

#[tokio::test]
async fn test_band_state_anything_but_on_is_off() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::FiveGhz,
        json!({ "success": "true", "data": band_data("disabled") }),
    )
    .await;
    let mut client = client_for(&server);

    assert_eq!(client.band_state(Band::FiveGhz, false).await, RadioState::Off);
}

#[tokio::test]
async fn test_keep_alive_controls_session() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::TwoGhz,
        json!({ "success": true, "data": band_data("on") }),
    )
    .await;
    let mut client = client_for(&server);

    client.band_state(Band::TwoGhz, true).await;
    assert!(client.has_session());

    // Reuses the open session, then closes it.
    client.band_state(Band::TwoGhz, false).await;
    assert!(!client.has_session());

    assert_eq!(requests_to(&server, LOGIN_PATH, "login").await.len(), 1);
    assert_eq!(requests_to(&server, WIRELESS_PATH, "read").await.len(), 2);
}

#[tokio::test]
async fn test_band_state_login_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, json!("false")).await;
    let mut client = client_for(&server);

    let state = client.band_state(Band::TwoGhz, true).await;

    assert_eq!(state, RadioState::Unknown);
    assert!(!client.has_session());
    assert!(requests_to(&server, WIRELESS_PATH, "read").await.is_empty());
}

#[tokio::test]
async fn test_band_state_read_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(&server, Band::TwoGhz, json!({ "success": "false" })).await;
    let mut client = client_for(&server);

    let state = client.band_state(Band::TwoGhz, true).await;

    assert_eq!(state, RadioState::Unknown);
    assert!(!client.has_session());
    assert!(client.last_payload().is_none());
}

#[tokio::test]
async fn test_band_state_missing_data() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(&server, Band::TwoGhz, json!({ "success": true })).await;
    let mut client = client_for(&server);

    assert_eq!(client.band_state(Band::TwoGhz, true).await, RadioState::Unknown);
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_read_timeout_forces_fresh_login() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    Mock::given(method("POST"))
        .and(path(WIRELESS_PATH))
        .and(body_string_contains("operation=read"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": band_data("on") }))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_read(
        &server,
        Band::TwoGhz,
        json!({ "success": true, "data": band_data("on") }),
    )
    .await;
    let mut client = client_with_timeout(&server, Duration::from_millis(200));

    let state = client.band_state(Band::TwoGhz, true).await;
    assert_eq!(state, RadioState::Unknown);
    assert!(!client.has_session());

    let state = client.band_state(Band::TwoGhz, false).await;
    assert_eq!(state, RadioState::On);
    assert_eq!(requests_to(&server, LOGIN_PATH, "login").await.len(), 2);
}

// ── Writing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_then_get_round_trip() {
    for band in Band::ALL {
        let server = MockServer::start().await;
        mount_login(&server, json!("true")).await;
        Mock::given(method("POST"))
            .and(path(WIRELESS_PATH))
            .respond_with(FakeRouter::new())
            .mount(&server)
            .await;
        let mut client = client_for(&server);

        client.set_band_state(band, RadioSetting::On).await.unwrap();
        assert_eq!(client.state(), RadioState::On);

        assert_eq!(client.band_state(band, false).await, RadioState::On);

        client.set_band_state(band, RadioSetting::Off).await.unwrap();
        assert_eq!(client.band_state(band, false).await, RadioState::Off);
    }
}

#[tokio::test]
async fn test_write_resends_payload_verbatim() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::FiveGhz,
        json!({ "success": true, "data": band_data("off") }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(WIRELESS_PATH))
        .and(query_param("form", "wireless_5g"))
        .and(body_string_contains("operation=write"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;
    let mut client = client_for(&server);

    client
        .set_band_state(Band::FiveGhz, RadioSetting::On)
        .await
        .unwrap();

    let writes = requests_to(&server, WIRELESS_PATH, "write").await;
    assert_eq!(writes.len(), 1);
    let sent = form_fields(&writes[0]);

    let Value::Object(read) = band_data("off") else {
        panic!("fixture is an object");
    };
    let expected: Vec<(String, String)> = read
        .iter()
        .filter(|(k, _)| k.as_str() != "enable")
        .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_owned()))
        .collect();
    let unchanged: Vec<(String, String)> = sent
        .iter()
        .filter(|(k, _)| k != "enable" && k != "operation")
        .cloned()
        .collect();
    assert_eq!(unchanged, expected);

    let lookup = |key: &str| sent.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
    assert_eq!(lookup("enable"), Some("on"));
    assert_eq!(lookup("operation"), Some("write"));

    // One login, one read, one write -- all in one session, closed afterwards.
    assert_eq!(requests_to(&server, LOGIN_PATH, "login").await.len(), 1);
    assert_eq!(requests_to(&server, WIRELESS_PATH, "read").await.len(), 1);
    assert!(!client.has_session());
    assert_eq!(client.state(), RadioState::On);
}

#[tokio::test]
async fn test_no_write_when_read_fails() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(&server, Band::TwoGhz, json!({ "success": "false" })).await;
    let mut client = client_for(&server);

    let result = client.set_band_state(Band::TwoGhz, RadioSetting::On).await;

    assert!(
        matches!(result, Err(Error::Unavailable)),
        "expected Unavailable, got: {result:?}"
    );
    assert!(requests_to(&server, WIRELESS_PATH, "write").await.is_empty());
    assert_eq!(client.state(), RadioState::Unknown);
}

#[tokio::test]
async fn test_no_write_when_login_fails() {
    let server = MockServer::start().await;
    mount_login(&server, json!("false")).await;
    let mut client = client_for(&server);

    let result = client.set_band_state(Band::TwoGhz, RadioSetting::Off).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(requests_to(&server, WIRELESS_PATH, "read").await.is_empty());
    assert!(requests_to(&server, WIRELESS_PATH, "write").await.is_empty());
}

#[tokio::test]
async fn test_write_rejected_keeps_last_state() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::TwoGhz,
        json!({ "success": true, "data": band_data("off") }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(WIRELESS_PATH))
        .and(body_string_contains("operation=write"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": "false" })))
        .mount(&server)
        .await;
    let mut client = client_for(&server);

    let result = client.set_band_state(Band::TwoGhz, RadioSetting::On).await;

    assert!(
        matches!(result, Err(Error::Rejected { operation: "write" })),
        "expected write rejection, got: {result:?}"
    );
    assert_eq!(client.state(), RadioState::Off);
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_write_timeout_marks_state_unknown() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::TwoGhz,
        json!({ "success": true, "data": band_data("on") }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(WIRELESS_PATH))
        .and(body_string_contains("operation=write"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let mut client = client_with_timeout(&server, Duration::from_millis(200));

    let result = client.set_band_state(Band::TwoGhz, RadioSetting::Off).await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout, got: {result:?}"
    );
    assert_eq!(client.state(), RadioState::Unknown);
    assert!(!client.is_available());
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_write_garbage_body_marks_state_unknown() {
    let server = MockServer::start().await;
    mount_login(&server, json!("true")).await;
    mount_read(
        &server,
        Band::FiveGhz,
        json!({ "success": true, "data": band_data("off") }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(WIRELESS_PATH))
        .and(body_string_contains("operation=write"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rebooting</html>"))
        .expect(1)
        .mount(&server)
        .await;
    let mut client = client_for(&server);

    let result = client.set_band_state(Band::FiveGhz, RadioSetting::On).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
    assert_eq!(client.state(), RadioState::Unknown);
    assert!(!client.is_available());
    assert!(!client.has_session());
}
