use super::*;
use crate::orders::models::PaymentMethod;
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

fn recorder(base_url: String, session: SessionHandle) -> OrderRecorder {
    let client = ClientBuilder::new(Client::new()).build();
    OrderRecorder::new(Database::new(client, base_url), session)
}

fn request() -> OrderRequest {
    OrderRequest {
        product_name: "Chamomile Blend".to_string(),
        product_price: 12.5,
        product_image: "https://media.example.com/chamomile.png".to_string(),
        delivery_address: "12 Tea Garden Lane".to_string(),
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

#[tokio::test]
async fn test_place_order_rejects_blank_address_without_remote_call() {
    let server = MockServer::start();
    let orders = recorder(server.url(""), signed_in_session());

    let catch_all = server.mock(|when, then| {
        when.path_matches(".*");
        then.status(200);
    });

    let result = orders
        .place_order(OrderRequest {
            delivery_address: "  ".to_string(),
            ..request()
        })
        .await;
    match result {
        Err(OrderError::Invalid(msg)) => {
            assert_eq!(msg, "Please enter your delivery address.");
        }
        other => panic!("expected Invalid, got {:?}", other.map(|_| ())),
    }

    catch_all.assert_hits(0);
}

#[tokio::test]
async fn test_place_order_requires_a_session() {
    let server = MockServer::start();
    let orders = recorder(server.url(""), SessionHandle::new());

    let result = orders.place_order(request()).await;
    assert!(matches!(result, Err(OrderError::NotSignedIn)));
}

#[tokio::test]
async fn test_place_order_writes_one_snapshot_under_the_user() {
    let server = MockServer::start();
    let orders = recorder(server.url(""), signed_in_session());

    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path_matches("^/orders/uid-1/[^/]{20}\\.json$")
            .header("content-type", "application/json")
            .body_includes("Chamomile Blend")
            .body_includes("12 Tea Garden Lane")
            .body_includes("Cash on Delivery");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({}));
    });

    let order = orders.place_order(request()).await.unwrap();
    assert_eq!(order.order_id.len(), 20);
    assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
    assert_eq!(order.timestamp.len(), "2026-08-06 10:30:00".len());

    mock.assert();
}

#[tokio::test]
async fn test_place_order_surfaces_raw_write_failure() {
    let server = MockServer::start();
    let orders = recorder(server.url(""), signed_in_session());

    let mock = server.mock(|when, then| {
        when.method(PUT).path_matches("^/orders/uid-1/.*");
        then.status(500)
            .header("content-type", "application/json")
            .json_body(json!({"error": "Service unavailable"}));
    });

    let result = orders.place_order(request()).await;
    match result {
        Err(OrderError::Database(e)) => assert_eq!(e.to_string(), "Service unavailable"),
        other => panic!("expected Database error, got {:?}", other.map(|_| ())),
    }

    mock.assert();
}

#[tokio::test]
async fn test_list_orders_returns_history_oldest_first() {
    let server = MockServer::start();
    let orders = recorder(server.url(""), signed_in_session());

    let mock = server.mock(|when, then| {
        when.method(GET).path("/orders/uid-1.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "-Nb0000000000000000B": {
                    "orderId": "-Nb0000000000000000B",
                    "productName": "Peppermint",
                    "productPrice": 9.0,
                    "productImage": "https://media.example.com/p2.png",
                    "deliveryAddress": "12 Tea Garden Lane",
                    "paymentMethod": "Cash on Delivery",
                    "timestamp": "2026-08-06 11:00:00"
                },
                "-Nb0000000000000000A": {
                    "orderId": "-Nb0000000000000000A",
                    "productName": "Chamomile Blend",
                    "productPrice": 12.5,
                    "productImage": "https://media.example.com/p1.png",
                    "deliveryAddress": "12 Tea Garden Lane",
                    "paymentMethod": "Cash on Delivery",
                    "timestamp": "2026-08-06 10:30:00"
                }
            }));
    });

    let history = orders.list_orders().await.unwrap();
    let names: Vec<&str> = history.iter().map(|o| o.product_name.as_str()).collect();
    assert_eq!(names, ["Chamomile Blend", "Peppermint"]);

    mock.assert();
}
