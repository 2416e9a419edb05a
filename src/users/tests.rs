use super::*;
use httpmock::prelude::*;
use reqwest::Client;
use reqwest_middleware::ClientBuilder;
use serde_json::json;

fn store(base_url: String) -> UserStore {
    let client = ClientBuilder::new(Client::new()).build();
    UserStore::new(crate::db::Database::new(client, base_url))
}

fn sample_profile() -> UserProfile {
    UserProfile {
        full_name: "Reesta Shrestha".to_string(),
        email: "reesta@example.com".to_string(),
        preferences: vec!["Chamomile".to_string(), "Peppermint".to_string()],
        photo_url: None,
    }
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let server = MockServer::start();
    let users = store(server.url(""));
    let profile = sample_profile();

    let create_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/Users/uid-1.json")
            .header("content-type", "application/json")
            .json_body(json!({
                "fullName": "Reesta Shrestha",
                "email": "reesta@example.com",
                "preferences": ["Chamomile", "Peppermint"]
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({}));
    });

    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/Users/uid-1.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "fullName": "Reesta Shrestha",
                "email": "reesta@example.com",
                "preferences": ["Chamomile", "Peppermint"]
            }));
    });

    users.create_user("uid-1", &profile).await.unwrap();
    let fetched = users.get_user("uid-1").await.unwrap();
    assert_eq!(fetched, Some(profile));

    create_mock.assert();
    get_mock.assert();
}

#[tokio::test]
async fn test_get_missing_user_is_soft_failure() {
    let server = MockServer::start();
    let users = store(server.url(""));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/Users/ghost.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let fetched = users.get_user("ghost").await.unwrap();
    assert!(fetched.is_none());

    mock.assert();
}

#[tokio::test]
async fn test_get_malformed_user_is_soft_failure() {
    let server = MockServer::start();
    let users = store(server.url(""));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/Users/uid-1.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"fullName": 42}));
    });

    let fetched = users.get_user("uid-1").await.unwrap();
    assert!(fetched.is_none());

    mock.assert();
}

#[tokio::test]
async fn test_update_sends_only_named_fields() {
    let server = MockServer::start();
    let users = store(server.url(""));

    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/Users/uid-1.json")
            .json_body(json!({"preferences": ["Hibiscus"]}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({}));
    });

    let update = UserUpdate {
        preferences: Some(vec!["Hibiscus".to_string()]),
        ..Default::default()
    };
    users.update_user("uid-1", &update).await.unwrap();

    mock.assert();
}
