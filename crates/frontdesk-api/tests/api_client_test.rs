#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use frontdesk_api::types::{AssignRoom, RequestUpdate, RoomUpdate};
use frontdesk_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn request_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "requestId": format!("REQ-{id}"),
        "roomNumber": 204,
        "type": "roomService",
        "details": {
            "items": [{ "name": "Club sandwich", "quantity": 1 }],
            "urgency": "high",
            "message": "No onions"
        },
        "status": status,
        "priority": 3,
        "createdAt": "2025-03-01T08:00:00.000Z",
        "updatedAt": "2025-03-01T08:05:00.000Z"
    })
}

// ── Request endpoints ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_requests_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [request_json("a", "pending"), request_json("b", "assigned")]
        })))
        .mount(&server)
        .await;

    let requests = client.list_requests().await.unwrap();
    let ids: Vec<&str> = requests.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(requests[0].request_type, "roomService");
    assert_eq!(requests[1].status, "assigned");
}

#[tokio::test]
async fn test_transitions_hit_sub_resources() {
    let (server, client) = setup().await;

    for (action, status) in [
        ("assign", "assigned"),
        ("cancel", "cancelled"),
        ("complete", "completed"),
    ] {
        Mock::given(method("PUT"))
            .and(path(format!("/api/requests/r1/{action}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": request_json("r1", status)
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    assert_eq!(client.assign_request("r1").await.unwrap().status, "assigned");
    assert_eq!(client.cancel_request("r1").await.unwrap().status, "cancelled");
    assert_eq!(
        client.complete_request("r1").await.unwrap().status,
        "completed"
    );
}

#[tokio::test]
async fn test_generic_update_sends_status_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/requests/r1"))
        .and(body_json(json!({ "status": "in-progress" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": request_json("r1", "in-progress")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_request("r1", &RequestUpdate::status("in-progress"))
        .await
        .unwrap();
    assert_eq!(updated.status, "in-progress");
}

#[tokio::test]
async fn test_delete_request() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/requests/r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.delete_request("r1").await.unwrap();
}

// ── Error synthesis ─────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_uses_backend_error_field() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/requests/r1/assign"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Request not found" })),
        )
        .mount(&server)
        .await;

    let err = client.assign_request("r1").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Request not found");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_http_error_falls_back_to_message_field() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Bad room filter" })),
        )
        .mount(&server)
        .await;

    let err = client.list_rooms().await.unwrap_err();
    assert_eq!(err.to_string(), "Bad room filter");
}

#[tokio::test]
async fn test_http_error_without_json_body_synthesizes_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_requests().await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP 500: Internal Server Error");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_with_blank_fields_synthesizes_message() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/requests/x/assign"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "error": "", "message": "  " })),
        )
        .mount(&server)
        .await;

    let err = client.assign_request("x").await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "HTTP 409: Conflict");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_skips_blank_error_for_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "", "message": "Bad filter" })),
        )
        .mount(&server)
        .await;

    let err = client.list_requests().await.unwrap_err();
    assert_eq!(err.to_string(), "Bad filter");
}

#[tokio::test]
async fn test_ids_are_encoded_as_single_path_segment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/requests/a%2Fb%3Fc%23d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": request_json("a/b?c#d", "pending"),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/requests/a%2Fb/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": request_json("a/b", "cancelled"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = client.get_request("a/b?c#d").await.unwrap();
    assert_eq!(req.id, "a/b?c#d");
    let cancelled = client.cancel_request("a/b").await.unwrap();
    assert_eq!(cancelled.status, "cancelled");
}

#[tokio::test]
async fn test_network_failure_has_status_zero() {
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1/api").unwrap(),
    );

    let err = client.list_requests().await.unwrap_err();
    assert!(err.is_network(), "expected network error, got: {err:?}");
    assert_eq!(err.status(), Some(0));
    assert!(err.to_string().starts_with("Network error: "));
}

#[tokio::test]
async fn test_envelope_success_false_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/b9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Booking archived"
        })))
        .mount(&server)
        .await;

    let err = client.get_booking("b9").await.unwrap_err();
    assert!(
        matches!(&err, Error::Rejected { message } if message == "Booking archived"),
        "expected Rejected, got: {err:?}"
    );
    assert!(!err.is_api_error());
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/guests"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_guests().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Rooms & guests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_update_room_status() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/rooms/room-1"))
        .and(body_json(json!({ "status": "cleaning" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "_id": "room-1", "roomNumber": "101", "status": "cleaning" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = RoomUpdate {
        status: Some("cleaning".into()),
        ..RoomUpdate::default()
    };
    let room = client.update_room("room-1", &update).await.unwrap();
    assert_eq!(room.status.as_deref(), Some("cleaning"));
}

#[tokio::test]
async fn test_assign_room_posts_ids() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/guests/assign-room"))
        .and(body_json(json!({ "guestId": "g1", "roomId": "room-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "_id": "g1", "firstName": "Ada", "roomNumber": "101", "room": "room-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let guest = client
        .assign_room(&AssignRoom {
            guest_id: "g1".into(),
            room_id: "room-1".into(),
        })
        .await
        .unwrap();
    assert_eq!(guest.room.map(|r| r.id().to_owned()), Some("room-1".into()));
}
