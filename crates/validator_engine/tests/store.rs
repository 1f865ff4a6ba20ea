use pretty_assertions::assert_eq;
use serde_json::json;
use validator_core::{Candidate, ValidationStatus};
use validator_engine::{AirtableStore, RecordStore, StoreError, VALIDATION_VIEW};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "key-secret";
const BASE_ID: &str = "appBase1";

fn store_for(server: &MockServer) -> AirtableStore {
    AirtableStore::with_endpoint(&server.uri(), API_KEY, BASE_ID).expect("client")
}

#[tokio::test]
async fn listing_filters_to_eligible_candidates() {
    let server = MockServer::start().await;
    let payload = json!({
        "records": [
            { "id": "rec1", "fields": { "gameplay_url": "https://a.itch.io/one" } },
            { "id": "rec2", "fields": { "gameplay_url": "https://b.itch.io/two", "ysws_status": "Ready" } },
            { "id": "rec3", "fields": { "gameplay_url": "https://c.itch.io/three", "ysws_status": "Invalid" } },
            { "id": "rec4", "fields": { "ysws_status": "Pending" } },
            { "id": "rec5", "fields": { "gameplay_url": "https://e.itch.io/five", "ysws_status": "Pending" } },
            { "id": "rec6", "fields": {} }
        ]
    });
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE_ID}/projects")))
        .and(query_param("view", VALIDATION_VIEW))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let candidates = store.list_candidates().await.expect("list ok");

    assert_eq!(
        candidates,
        vec![
            Candidate {
                id: "rec1".to_string(),
                url: "https://a.itch.io/one".to_string(),
                current_status: None,
            },
            Candidate {
                id: "rec5".to_string(),
                url: "https://e.itch.io/five".to_string(),
                current_status: Some("Pending".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn listing_follows_offset_pagination() {
    let server = MockServer::start().await;
    let page_one = json!({
        "records": [
            { "id": "rec1", "fields": { "gameplay_url": "https://a.itch.io/one" } }
        ],
        "offset": "itrNext/rec1"
    });
    let page_two = json!({
        "records": [
            { "id": "rec2", "fields": { "gameplay_url": "https://b.itch.io/two" } }
        ]
    });
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE_ID}/projects")))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_one))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE_ID}/projects")))
        .and(query_param("offset", "itrNext/rec1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_two))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let candidates = store.list_candidates().await.expect("list ok");

    let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["rec1", "rec2"]);
}

#[tokio::test]
async fn listing_surfaces_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE_ID}/projects")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store.list_candidates().await.unwrap_err();
    assert!(matches!(err, StoreError::HttpStatus(500)));
}

#[tokio::test]
async fn listing_surfaces_malformed_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE_ID}/projects")))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>not json</html>", "text/html"))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store.list_candidates().await.unwrap_err();
    assert!(matches!(err, StoreError::Payload(_)));
}

#[tokio::test]
async fn update_patches_the_status_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/v0/{BASE_ID}/projects/recA")))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .and(body_json(json!({ "fields": { "ysws_status": "Ready" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "recA" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    store
        .update_status("recA", ValidationStatus::Ready)
        .await
        .expect("update ok");
}

#[tokio::test]
async fn update_surfaces_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/v0/{BASE_ID}/projects/recB")))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store
        .update_status("recB", ValidationStatus::Invalid)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::HttpStatus(422)));
}
