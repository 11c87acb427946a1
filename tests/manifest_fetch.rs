//! Integration tests for the manifest fetcher.
//!
//! Each test stands up its own wiremock server so the fetcher is exercised
//! end-to-end: URL validation, HTTP status handling, size enforcement, and
//! lenient JSON decoding.

use folio::manifest::{fetch_manifest, ManifestError, MAX_MANIFEST_SIZE};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn server_with_body(body: impl Into<String>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.into()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_fetch_decodes_article_records() {
    let body = r#"[
        {
            "relative_path": "blog/2023/a",
            "title": "A",
            "quick_blurb": "x",
            "tags": ["t1"],
            "published_date": "2023-01-01",
            "html": "<p>A</p>"
        },
        {
            "relative_path": "notes/b",
            "title": "B",
            "quick_blurb": "y",
            "tags": [],
            "published_date": "2023-02-02",
            "html": "<p>B</p>"
        }
    ]"#;
    let server = server_with_body(body).await;

    let articles = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "A");
    assert_eq!(articles[0].tags, vec!["t1"]);
    assert_eq!(articles[1].relative_path, "notes/b");
    assert_eq!(articles[1].html, "<p>B</p>");
}

#[tokio::test]
async fn test_fetch_empty_manifest() {
    let server = server_with_body("[]").await;
    let articles = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_missing_fields_default_per_record() {
    // A record with absent tags/blurb must not fail the whole manifest
    let body = r#"[{"relative_path": "blog/a", "title": "Sparse"}]"#;
    let server = server_with_body(body).await;

    let articles = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Sparse");
    assert!(articles[0].tags.is_empty());
    assert!(articles[0].random_image.is_none());
    assert_eq!(articles[0].quick_blurb, "");
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::HttpStatus(404)));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = server_with_body("this is not json").await;
    let err = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Decode(_)));
}

#[tokio::test]
async fn test_non_array_json_is_decode_error() {
    let server = server_with_body(r#"{"articles": []}"#).await;
    let err = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Decode(_)));
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let server = server_with_body("x".repeat(MAX_MANIFEST_SIZE + 1)).await;
    let err = fetch_manifest(&client(), &format!("{}/content.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::ResponseTooLarge(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on this port
    let err = fetch_manifest(&client(), "http://127.0.0.1:1/content.json")
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Network(_)));
}
