//! TitleLookupClient tests against a mock OMDb server

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;

use crai_cm::services::title_lookup::TitleLookupClient;

fn client(base_url: &str, api_key: Option<&str>) -> TitleLookupClient {
    TitleLookupClient::new(base_url, api_key.map(String::from), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn missing_api_key_disables_lookup_without_io() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let lookup = client(&server.url(), None);
    assert_eq!(lookup.lookup("Dune").await, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn sentinel_and_empty_titles_short_circuit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let lookup = client(&server.url(), Some("test-key"));
    assert_eq!(lookup.lookup("N/A").await, None);
    assert_eq!(lookup.lookup("").await, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn positive_match_maps_all_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("t".into(), "Dune".into()),
            Matcher::UrlEncoded("apikey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "Response": "True",
                "Title": "Dune",
                "Year": "2021",
                "Poster": "http://x/dune.jpg"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let lookup = client(&server.url(), Some("test-key"));
    let info = lookup.lookup("Dune").await.expect("match expected");

    assert_eq!(info.title, "Dune");
    assert_eq!(info.year, "2021");
    assert_eq!(info.poster_url.as_deref(), Some("http://x/dune.jpg"));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_fields_are_substituted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "Response": "True", "Poster": "N/A" }).to_string())
        .create_async()
        .await;

    let lookup = client(&server.url(), Some("test-key"));
    let info = lookup.lookup("Obscure Title").await.expect("match expected");

    assert_eq!(info.title, "N/A");
    assert_eq!(info.year, "N/A");
    // OMDb's "N/A" poster string means no artwork
    assert_eq!(info.poster_url, None);
}

#[tokio::test]
async fn no_match_yields_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "Response": "False", "Error": "Movie not found!" }).to_string(),
        )
        .create_async()
        .await;

    let lookup = client(&server.url(), Some("test-key"));
    assert_eq!(lookup.lookup("No Such Film").await, None);
}

#[tokio::test]
async fn error_status_yields_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let lookup = client(&server.url(), Some("test-key"));
    assert_eq!(lookup.lookup("Dune").await, None);
}

#[tokio::test]
async fn unreachable_service_yields_none() {
    // Nothing listens on this port; the transport error is swallowed
    let lookup = client("http://127.0.0.1:1", Some("test-key"));
    assert_eq!(lookup.lookup("Dune").await, None);
}
