#![allow(clippy::unwrap_used)]
// `RequestFeed` driven by the real `ApiClient` against a wiremock backend.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use frontdesk_api::{ApiClient, TransportConfig};
use frontdesk_core::{
    AlwaysActive, FeedConfig, PollingConfig, RequestFeed, RequestId, RequestStatus, SnapshotOrder,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn as_returned() -> FeedConfig {
    FeedConfig {
        polling: PollingConfig {
            enabled: false,
            ..PollingConfig::default()
        },
        order: SnapshotOrder::AsReturned,
    }
}

/// One well-formed record, one without `createdAt`, one with a status this
/// build does not know.
async fn mount_irregular_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(envelope(json!([
            {
                "_id": "a", "type": "housekeeping", "status": "pending",
                "createdAt": "2025-03-01T08:00:00Z"
            },
            { "_id": "b", "type": "laundry", "status": "pending" },
            {
                "_id": "c", "type": "spa", "status": "on-hold",
                "createdAt": "2025-03-01T09:00:00Z"
            },
        ])))
        .mount(server)
        .await;
}

fn ids(feed: &RequestFeed<ApiClient>) -> Vec<String> {
    feed.requests().iter().map(|r| r.id.to_string()).collect()
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_snapshot_keeps_every_record_the_server_lists() {
    let (server, client) = setup().await;
    mount_irregular_list(&server).await;

    let feed = RequestFeed::new(client, &AlwaysActive::new(), as_returned());
    feed.start().await;

    assert_eq!(ids(&feed), vec!["a", "b", "c"]);
    assert_eq!(feed.error(), None);

    let snapshot = feed.requests();
    assert_eq!(snapshot[1].created_at, None);
    assert_eq!(snapshot[2].status, RequestStatus::Unknown);
}

#[tokio::test]
async fn test_approve_succeeds_on_sparse_server_copy() {
    let (server, client) = setup().await;
    mount_irregular_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/requests/b/assign"))
        .respond_with(envelope(json!({ "status": "assigned" })))
        .expect(1)
        .mount(&server)
        .await;

    let feed = RequestFeed::new(client, &AlwaysActive::new(), as_returned());
    feed.start().await;
    let before = feed.requests();

    let approved = feed.approve(&RequestId::new("b")).await.unwrap();
    assert_eq!(approved.id.as_str(), "b");
    assert_eq!(approved.status, RequestStatus::Assigned);

    let after = feed.requests();
    assert_eq!(ids(&feed), vec!["a", "b", "c"]);
    assert_eq!(after[1].status, RequestStatus::Assigned);
    assert!(std::sync::Arc::ptr_eq(&before[0], &after[0]));
    assert_eq!(feed.error(), None);
}

#[tokio::test]
async fn test_decline_of_unknown_status_request() {
    let (server, client) = setup().await;
    mount_irregular_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/requests/c/cancel"))
        .respond_with(envelope(json!({
            "_id": "c", "type": "spa", "status": "cancelled",
            "createdAt": "2025-03-01T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let feed = RequestFeed::new(client, &AlwaysActive::new(), as_returned());
    feed.start().await;

    feed.decline(&RequestId::new("c")).await.unwrap();
    assert_eq!(feed.requests()[2].status, RequestStatus::Cancelled);
    assert_eq!(feed.error(), None);
}
