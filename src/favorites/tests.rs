use super::*;
use crate::session::Session;
use httpmock::prelude::*;
use reqwest::Client;
use reqwest_middleware::ClientBuilder;
use serde_json::json;

fn signed_in_session() -> SessionHandle {
    let session = SessionHandle::new();
    session.install(Session {
        uid: "uid-1".to_string(),
        email: "reesta@example.com".to_string(),
        id_token: "tok-1".to_string(),
        refresh_token: None,
    });
    session
}

fn store(base_url: String, session: SessionHandle) -> FavoriteStore {
    let client = ClientBuilder::new(Client::new()).build();
    FavoriteStore::new(Database::new(client, base_url), session)
}

fn sample_tea() -> FavoriteTea {
    FavoriteTea {
        name: "Chamomile".to_string(),
        tea_type: "Herbal".to_string(),
        description: "Helps me sleep".to_string(),
    }
}

#[tokio::test]
async fn test_add_favorite_rejects_blank_fields_without_remote_call() {
    let server = MockServer::start();
    let favorites = store(server.url(""), signed_in_session());

    let catch_all = server.mock(|when, then| {
        when.path_matches(".*");
        then.status(200);
    });

    let result = favorites
        .add_favorite(FavoriteTea {
            name: String::new(),
            ..sample_tea()
        })
        .await;
    assert!(matches!(result, Err(FavoriteError::Invalid(_))));

    catch_all.assert_hits(0);
}

#[tokio::test]
async fn test_add_favorite_requires_a_session() {
    let server = MockServer::start();
    let favorites = store(server.url(""), SessionHandle::new());

    let result = favorites.add_favorite(sample_tea()).await;
    assert!(matches!(result, Err(FavoriteError::NotSignedIn)));
}

#[tokio::test]
async fn test_add_favorite_writes_under_the_user() {
    let server = MockServer::start();
    let favorites = store(server.url(""), signed_in_session());

    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path_matches("^/favourites/uid-1/[^/]{20}\\.json$")
            .json_body(json!({
                "teaName": "Chamomile",
                "teaType": "Herbal",
                "description": "Helps me sleep"
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({}));
    });

    favorites.add_favorite(sample_tea()).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_list_favorites_keeps_saved_order() {
    let server = MockServer::start();
    let favorites = store(server.url(""), signed_in_session());

    let mock = server.mock(|when, then| {
        when.method(GET).path("/favourites/uid-1.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "-Nb0000000000000000B": {
                    "teaName": "Peppermint",
                    "teaType": "Herbal",
                    "description": "Fresh after meals"
                },
                "-Nb0000000000000000A": {
                    "teaName": "Chamomile",
                    "teaType": "Herbal",
                    "description": "Helps me sleep"
                }
            }));
    });

    let listed = favorites.list_favorites().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Chamomile", "Peppermint"]);

    mock.assert();
}
