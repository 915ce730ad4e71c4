//! Tests for the CardTrader client against a mock API

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{listings_for, CardTraderClient};
use crate::config::CardTraderCredentials;
use crate::ports::MarketplacePort;
use mtg_common::Error;

fn client_with_mock(mock_uri: &str) -> CardTraderClient {
    CardTraderClient::new(CardTraderCredentials {
        token: "test_token".to_string(),
    })
    .unwrap()
    .with_base_url(mock_uri)
}

// ── info ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn info_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .and(header("Authorization", "Bearer test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1, "name": "price-bot", "user_id": 77
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let info = tokio::task::spawn_blocking(move || client_with_mock(&uri).info())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(info["name"], "price-bot");
}

#[tokio::test]
async fn info_401_is_auth_expired() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || client_with_mock(&uri).info())
        .await
        .unwrap();

    match result {
        Err(Error::AuthExpired { provider, status }) => {
            assert_eq!(provider, "CardTrader");
            assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
        }
        other => panic!("Expected Error::AuthExpired, got: {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_is_auth_expired_too() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || client_with_mock(&uri).games())
        .await
        .unwrap();

    assert!(matches!(result, Err(Error::AuthExpired { .. })));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || client_with_mock(&uri).info())
        .await
        .unwrap();

    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected Error::HttpStatus(500), got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || client_with_mock(&uri).info())
        .await
        .unwrap();

    assert!(matches!(result, Err(Error::Parse(_))));
}

// ── games ────────────────────────────────────────────────────────────

#[tokio::test]
async fn games_accepts_wrapped_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "array": [
                { "id": 1, "name": "magic", "display_name": "Magic: the Gathering" },
                { "id": 5, "name": "pokemon", "display_name": "Pokémon" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let games = tokio::task::spawn_blocking(move || client_with_mock(&uri).games())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(games.len(), 2);
    assert_eq!(games[0].id, 1);
    assert_eq!(games[1].display_name.as_deref(), Some("Pokémon"));
}

// ── search_blueprints ────────────────────────────────────────────────

#[tokio::test]
async fn search_blueprints_sends_name_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blueprints/export"))
        .and(query_param("name", "The One Ring"))
        .and(query_param("game_id", "1"))
        .and(query_param("category_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 10,
                "name": "The One Ring",
                "slug": "the-one-ring-borderless",
                "expansion_id": 3
            },
            { "id": 11, "name": "The One Ring", "slug": "the-one-ring", "expansion_id": 3 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let entries = tokio::task::spawn_blocking(move || {
        client_with_mock(&uri).search_blueprints("The One Ring", 1, 1)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].slug, "the-one-ring");
    assert_eq!(entries[0].expansion_id, Some(3));
}

// ── marketplace_products ─────────────────────────────────────────────

#[tokio::test]
async fn marketplace_products_unwraps_blueprint_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketplace/products"))
        .and(query_param("blueprint_id", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "11": [
                {
                    "id": 501,
                    "blueprint_id": 11,
                    "price_cents": 4599,
                    "price_currency": "EUR",
                    "quantity": 1,
                    "on_vacation": false,
                    "properties_hash": {
                        "condition": "Near Mint",
                        "mtg_language": "en",
                        "mtg_foil": false
                    }
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let listings =
        tokio::task::spawn_blocking(move || client_with_mock(&uri).marketplace_products(11))
            .await
            .unwrap()
            .unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].id, 501);
    assert!((listings[0].price().unwrap() - 45.99).abs() < 0.001);
}

#[test]
fn listings_for_missing_key_is_empty() {
    let value = serde_json::json!({ "99": [] });
    assert!(listings_for(value, 11).unwrap().is_empty());
}

#[test]
fn listings_for_accepts_bare_array() {
    let value = serde_json::json!([{ "id": 1, "blueprint_id": 11 }]);
    let listings = listings_for(value, 11).unwrap();
    assert_eq!(listings.len(), 1);
}
