use std::sync::Arc;

use super::*;
use crate::config::ApiConfig;
use crate::net::transport::TransportError;
use crate::net::transport::test_helpers::MockTransport;
use crate::net::types::HttpResponse;
use crate::state::session::SessionStore;

fn console_with(transport: Arc<MockTransport>) -> Console<Vec<u8>> {
    let api = ApiClient::with_transport(&ApiConfig::default(), transport);
    let flow = LoginFlow::new(api.clone(), SessionStore::new());
    Console::new(flow, api, Vec::new())
}

async fn run_script(console: &mut Console<Vec<u8>>, script: &str) {
    console.run(script.as_bytes()).await.unwrap();
}

fn output(console: Console<Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).unwrap()
}

// =========================================================================
// Command parsing
// =========================================================================

#[test]
fn parse_recognizes_commands_and_arguments() {
    assert_eq!(Command::parse("login alice"), Command::Login("alice".to_owned()));
    assert_eq!(Command::parse("  OPEN   /key-management "), Command::Open("/key-management".to_owned()));
    assert_eq!(Command::parse("get auth/me"), Command::Get("auth/me".to_owned()));
    assert_eq!(Command::parse("exit"), Command::Quit);
    assert_eq!(Command::parse(""), Command::Empty);
    assert_eq!(Command::parse("teleport"), Command::Unknown("teleport".to_owned()));
}

// =========================================================================
// Session gating
// =========================================================================

#[tokio::test]
async fn starts_on_login_view_and_gates_pages() {
    let mut console = console_with(MockTransport::new(vec![]));
    run_script(&mut console, "pages\nopen /dashboard\nquit\n").await;
    let out = output(console);

    assert!(out.starts_with("Login\n"));
    assert_eq!(out.matches("Login required.").count(), 2);
    assert!(!out.contains("QUANTUM ENCRYPTION"));
}

#[tokio::test]
async fn login_success_shows_main_view_and_pages() {
    let transport = MockTransport::new(vec![MockTransport::ok_json(200, &serde_json::json!({ "token": "mock-token" }))]);
    let mut console = console_with(transport.clone());
    run_script(&mut console, "login testuser\ntestpass\nopen /key-management\nstatus\n").await;

    assert_eq!(console.flow().session().token().as_deref(), Some("mock-token"));
    let body: serde_json::Value =
        serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "username": "testuser", "password": "testpass" }));

    let out = output(console);
    assert!(out.contains("Signed in as testuser."));
    assert!(out.contains("MILITARY-GRADE\nQUANTUM ENCRYPTION"));
    assert!(out.contains("revoke quantum and classical keys"));
    assert!(out.contains("Signed in (token present)."));
    assert!(!out.contains("mock-token"));
    assert!(!out.contains("testpass"));
}

#[tokio::test]
async fn login_failure_is_shown_inline_and_loop_continues() {
    let transport = MockTransport::new(vec![
        MockTransport::ok_json(200, &serde_json::json!({})),
        Ok(HttpResponse::new(404, "")),
        Err(TransportError::new("Network error")),
    ]);
    let mut console = console_with(transport);
    run_script(&mut console, "login a\nx\nlogin a\nx\nlogin a\nx\nstatus\n").await;

    assert!(!console.flow().session().is_authenticated());
    let out = output(console);
    assert!(out.contains("Error: Invalid credentials"));
    assert!(out.contains("Error: HTTP error! status: 404"));
    assert!(out.contains("Error: Network error"));
    assert!(out.contains("Signed out."));
}

#[tokio::test]
async fn logout_returns_to_login_view() {
    let transport = MockTransport::new(vec![MockTransport::ok_json(200, &serde_json::json!({ "token": "t" }))]);
    let mut console = console_with(transport);
    run_script(&mut console, "login u\np\nlogout\npages\n").await;

    assert!(!console.flow().session().is_authenticated());
    let out = output(console);
    assert!(out.contains("Signed out."));
    assert!(out.ends_with("Login required.\nLogin\n  Use `login <username>` to sign in. Type `help` for commands.\n> "));
}

#[tokio::test]
async fn end_of_input_during_password_stops_cleanly() {
    let transport = MockTransport::new(vec![]);
    let mut console = console_with(transport.clone());
    run_script(&mut console, "login u\n").await;
    assert!(transport.requests().is_empty());
    assert!(!console.flow().session().is_authenticated());
}

// =========================================================================
// Hidden password entry
// =========================================================================

fn typed_without_echo() -> std::io::Result<String> {
    Ok("s3cret-pass".to_owned())
}

fn terminal_closed() -> std::io::Result<String> {
    Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "terminal closed"))
}

#[tokio::test]
async fn hidden_password_is_not_taken_from_command_input() {
    let transport = MockTransport::new(vec![MockTransport::ok_json(200, &serde_json::json!({ "token": "t" }))]);
    let mut console = console_with(transport.clone()).with_password_source(PasswordSource::Hidden(typed_without_echo));
    run_script(&mut console, "login testuser\nstatus\n").await;

    let body: serde_json::Value =
        serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["password"], "s3cret-pass");

    let out = output(console);
    assert!(out.contains("Password: \nSigned in as testuser."));
    assert!(out.contains("Signed in (token present)."));
    assert!(!out.contains("s3cret-pass"));
}

#[tokio::test]
async fn hidden_password_read_failure_ends_run_with_error() {
    let transport = MockTransport::new(vec![]);
    let mut console = console_with(transport.clone()).with_password_source(PasswordSource::Hidden(terminal_closed));

    let err = console.run("login testuser\n".as_bytes()).await.unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    assert!(transport.requests().is_empty());
    assert!(!console.flow().session().is_authenticated());
}

// =========================================================================
// Other commands
// =========================================================================

#[tokio::test]
async fn get_prints_json_or_coded_error() {
    let transport = MockTransport::new(vec![
        MockTransport::ok_json(200, &serde_json::json!({ "token": "t" })),
        MockTransport::ok_json(200, &serde_json::json!({ "status": "ok" })),
        Ok(HttpResponse::new(503, "")),
    ]);
    let mut console = console_with(transport.clone());
    run_script(&mut console, "login u\np\nget health\nget health\n").await;

    let requests = transport.requests();
    assert_eq!(requests[1].url, "http://localhost:5000/api/health");
    assert_eq!(requests[1].method, reqwest::Method::GET);

    let out = output(console);
    assert!(out.contains("\"status\": \"ok\""));
    assert!(out.contains("Error: [E_HTTP] HTTP error! status: 503 (retryable)"));
}

#[tokio::test]
async fn unknown_and_help_commands() {
    let mut console = console_with(MockTransport::new(vec![]));
    run_script(&mut console, "help\nteleport\n").await;
    let out = output(console);
    assert!(out.contains("login <username>"));
    assert!(out.contains("Unknown command: teleport. Type `help`."));
}
