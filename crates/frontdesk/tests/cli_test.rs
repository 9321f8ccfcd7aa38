//! Integration tests for the `frontdesk` CLI binary.
//!
//! Argument parsing, help output and completions run without a backend;
//! command tests point `--api-url` at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `frontdesk` binary with env isolation.
///
/// Clears all `FRONTDESK_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn frontdesk_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("frontdesk");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FRONTDESK_API_URL")
        .env_remove("FRONTDESK_OUTPUT")
        .env_remove("FRONTDESK_TIMEOUT")
        .env_remove("FRONTDESK_ORDER")
        .env_remove("FRONTDESK_POLLING__INTERVAL_MS");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn request_json(id: &str, status: &str, created_at: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "roomNumber": 204,
        "type": "housekeeping",
        "details": { "items": [{ "name": "Towels", "quantity": 2 }], "urgency": "normal" },
        "status": status,
        "priority": 1,
        "createdAt": created_at,
    })
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

async fn backend() -> (MockServer, String) {
    let server = MockServer::start().await;
    let api = format!("{}/api", server.uri());
    (server, api)
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = frontdesk_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("requests")
                .and(predicate::str::contains("rooms"))
                .and(predicate::str::contains("guests"))
                .and(predicate::str::contains("bookings")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frontdesk"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_requests_subcommands_exist() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["requests", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("approve")
                .and(predicate::str::contains("decline"))
                .and(predicate::str::contains("complete"))
                .and(predicate::str::contains("status"))
                .and(predicate::str::contains("stats"))
                .and(predicate::str::contains("watch")),
        );
}

// ── Parse errors ────────────────────────────────────────────────────

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    let output = frontdesk_cmd(home.path())
        .args(["--output", "invalid", "requests", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("possible values"));
}

#[test]
fn test_invalid_status_rejected_by_parser() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["requests", "status", "r1", "done"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_uses_config_dir() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("config.toml\n"));
}

#[test]
fn test_config_show_layers_env_and_flags() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .env("FRONTDESK_API_URL", "http://env.example/api")
        .args(["config", "show", "--timeout", "9"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("api_url = \"http://env.example/api\"")
                .and(predicate::str::contains("timeout = 9"))
                .and(predicate::str::contains("interval_ms = 60000")),
        );
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    frontdesk_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_api_url_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", "ftp://nowhere/api", "requests", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

// ── Requests against a mock backend ─────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_list_reverses_backend_order() {
    let (server, api) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(envelope(json!([
            request_json("a", "pending", "2025-03-01T08:00:00Z"),
            request_json("b", "assigned", "2025-03-01T09:00:00Z"),
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "-o", "plain", "requests", "list"])
        .assert()
        .success()
        .stdout("b\na\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_list_filters_by_status() {
    let (server, api) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(envelope(json!([
            request_json("a", "pending", "2025-03-01T08:00:00Z"),
            request_json("b", "completed", "2025-03-01T09:00:00Z"),
            request_json("c", "pending", "2025-03-01T10:00:00Z"),
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let output = frontdesk_cmd(home.path())
        .args(["--api-url", &api, "-o", "json", "requests", "list"])
        .args(["--status", "pending"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c", "a"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_stats_counts_statuses() {
    let (server, api) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(envelope(json!([
            request_json("a", "pending", "2025-03-01T08:00:00Z"),
            request_json("b", "completed", "2025-03-01T09:00:00Z"),
            request_json("c", "in-progress", "2025-03-01T10:00:00Z"),
            request_json("d", "on-hold", "2025-03-01T11:00:00Z"),
            { "_id": "e", "type": "spa", "status": "pending" },
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let output = frontdesk_cmd(home.path())
        .args(["--api-url", &api, "-o", "json-compact", "requests", "stats"])
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 5);
    assert_eq!(stats["pending"], 2);
    assert_eq!(stats["in_progress"], 1);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["unknown"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_approve_calls_assign_endpoint() {
    let (server, api) = backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/requests/r1/assign"))
        .respond_with(envelope(request_json(
            "r1",
            "assigned",
            "2025-03-01T08:00:00Z",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "-o", "plain", "requests", "approve", "r1"])
        .assert()
        .success()
        .stdout("r1\n")
        .stderr(predicate::str::contains("Request approved"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_decline_requires_confirmation() {
    let (server, api) = backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/requests/r1/cancel"))
        .respond_with(envelope(request_json(
            "r1",
            "cancelled",
            "2025-03-01T08:00:00Z",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "requests", "decline", "r1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));

    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "-y", "requests", "decline", "r1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Request declined"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_status_sends_generic_update_and_warns() {
    let (server, api) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/requests/r1"))
        .respond_with(envelope(request_json(
            "r1",
            "pending",
            "2025-03-01T08:00:00Z",
        )))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/requests/r1"))
        .and(body_json(json!({ "status": "in-progress" })))
        .respond_with(envelope(request_json(
            "r1",
            "in-progress",
            "2025-03-01T08:00:00Z",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "requests", "status", "r1", "in-progress"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("warning:")
                .and(predicate::str::contains("Request moved to in-progress")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_get_missing_exits_not_found() {
    let (server, api) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/requests/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "success": false, "error": "Request not found" })),
        )
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "requests", "get", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("request 'nope' not found"));
}

#[test]
fn test_unreachable_backend_exits_connection() {
    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:1/api", "requests", "list"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not reach the backend"));
}

// ── Peripheral resources ────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_rooms_set_status_puts_status() {
    let (server, api) = backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/rooms/room1"))
        .and(body_json(json!({ "status": "cleaning" })))
        .respond_with(envelope(json!({
            "_id": "room1",
            "roomNumber": "101",
            "roomName": "Garden",
            "status": "cleaning"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "rooms", "set-status", "room1", "cleaning"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Room 101 (Garden) is now cleaning"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bookings_get_recovers_room_from_summary() {
    let (server, api) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/bk1"))
        .respond_with(envelope(json!({
            "_id": "bk1",
            "customerName": "Ada Lovelace",
            "adults": 2,
            "bookingSummary": "Room Type: Deluxe King\nArea ID: 305"
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    frontdesk_cmd(home.path())
        .args(["--api-url", &api, "bookings", "get", "bk1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Deluxe King")
                .and(predicate::str::contains("305"))
                .and(predicate::str::contains("Ada Lovelace")),
        );
}
