//! Integration tests for gbooks-zotero
//!
//! These tests drive the pagination controller and batch orchestrator
//! against mock HTTP servers and verify the export pipeline end to end.

use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

use gbooks_zotero::harvest::{artifact_file_name, BatchRunner, Paginator, RunConfig};
use gbooks_zotero::models::AuthorQuery;
use gbooks_zotero::source::GoogleBooksClient;
use gbooks_zotero::zotero::{export_dir, CSV_HEADERS};

fn volume_item(i: usize) -> serde_json::Value {
    json!({
        "id": format!("vol{}", i),
        "volumeInfo": {
            "title": format!("Obra {}", i),
            "authors": ["Autor Uno"]
        },
        "saleInfo": {"saleability": "FREE"}
    })
}

fn page_body(total: u32, start: usize, count: usize) -> String {
    json!({
        "totalItems": total,
        "items": (start..start + count).map(volume_item).collect::<Vec<_>>()
    })
    .to_string()
}

fn paginator_for(server: &mockito::Server) -> Paginator {
    let client = GoogleBooksClient::with_base_url("TESTKEY", server.url()).unwrap();
    Paginator::new(client, 20, Duration::from_millis(0))
}

fn page_mock(server: &mut mockito::Server, max_results: &str, start_index: &str) -> mockito::Mock {
    server
        .mock("GET", "/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("maxResults".into(), max_results.into()),
            Matcher::UrlEncoded("startIndex".into(), start_index.into()),
        ]))
        .with_header("content-type", "application/json")
}

/// A zero advertised total terminates after a single request with no items
#[tokio::test]
async fn test_pagination_zero_total() {
    let mut server = mockito::Server::new_async().await;
    let mock = page_mock(&mut server, "20", "0")
        .with_body(r#"{"totalItems": 0}"#)
        .expect(1)
        .create_async()
        .await;

    let author = AuthorQuery::new("Simón Bolívar");
    let result = paginator_for(&server).fetch_all(&author).await;

    mock.assert_async().await;
    assert!(result.items.is_empty());
    assert_eq!(result.request_count, 1);
    assert_eq!(result.queried_total, 0);
    assert_eq!(result.request_urls.len(), 1);
}

/// A partial page is the natural end of the result set
#[tokio::test]
async fn test_pagination_natural_end() {
    let mut server = mockito::Server::new_async().await;
    let first = page_mock(&mut server, "20", "0")
        .with_body(page_body(45, 0, 20))
        .expect(1)
        .create_async()
        .await;
    let second = page_mock(&mut server, "20", "20")
        .with_body(page_body(45, 20, 5))
        .expect(1)
        .create_async()
        .await;

    let author = AuthorQuery::new("Rómulo Gallegos");
    let result = paginator_for(&server).fetch_all(&author).await;

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(result.items.len(), 25);
    assert_eq!(result.request_count, 2);
    assert_eq!(result.queried_total, 45);
    assert_eq!(result.fetched_total, 25);
}

/// An empty page with a nonzero total triggers exactly one rescue
/// request sized to the advertised total, then pagination stops
#[tokio::test]
async fn test_pagination_rescue_recovers_items() {
    let mut server = mockito::Server::new_async().await;
    let empty = page_mock(&mut server, "20", "0")
        .with_body(r#"{"totalItems": 7}"#)
        .expect(1)
        .create_async()
        .await;
    let rescue = page_mock(&mut server, "7", "0")
        .with_body(page_body(7, 0, 7))
        .expect(1)
        .create_async()
        .await;

    let author = AuthorQuery::new("Teresa de la Parra");
    let result = paginator_for(&server).fetch_all(&author).await;

    empty.assert_async().await;
    rescue.assert_async().await;
    assert_eq!(result.items.len(), 7);
    assert_eq!(result.request_count, 2);
    assert_eq!(result.request_urls.len(), 2);
    assert!(result.request_urls[1].contains("maxResults=7"));
}

/// A failed rescue is swallowed; pagination still terminates
#[tokio::test]
async fn test_pagination_rescue_failure_is_swallowed() {
    let mut server = mockito::Server::new_async().await;
    let empty = page_mock(&mut server, "20", "0")
        .with_body(r#"{"totalItems": 7}"#)
        .expect(1)
        .create_async()
        .await;
    let rescue = page_mock(&mut server, "7", "0")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let author = AuthorQuery::new("Andrés Bello");
    let result = paginator_for(&server).fetch_all(&author).await;

    empty.assert_async().await;
    rescue.assert_async().await;
    assert!(result.items.is_empty());
    assert_eq!(result.request_count, 2);
}

/// A transport failure mid-pagination keeps the accumulated partial results
#[tokio::test]
async fn test_pagination_keeps_partial_results_on_failure() {
    let mut server = mockito::Server::new_async().await;
    let first = page_mock(&mut server, "20", "0")
        .with_body(page_body(45, 0, 20))
        .expect(1)
        .create_async()
        .await;
    let second = page_mock(&mut server, "20", "20")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let author = AuthorQuery::new("José Gil Fortoul");
    let result = paginator_for(&server).fetch_all(&author).await;

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(result.items.len(), 20);
    assert_eq!(result.request_count, 2);
    assert_eq!(result.queried_total, 45);
}

/// The batch orchestrator persists one artifact per author plus the
/// run summary and log, and keeps going past per-author failures
#[tokio::test]
async fn test_batch_persists_artifacts_and_summary() {
    let mut server = mockito::Server::new_async().await;
    let pages = page_mock(&mut server, "20", "0")
        .with_body(page_body(2, 0, 2))
        .expect(2)
        .create_async()
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let authors = vec![
        AuthorQuery::new("Rufino Blanco Fombona").viaf("64066919"),
        AuthorQuery::new("Teresa de la Parra"),
    ];

    let client = GoogleBooksClient::with_base_url("TESTKEY", server.url()).unwrap();
    let paginator = Paginator::new(client, 20, Duration::from_millis(0));
    let runner = BatchRunner::new(
        paginator,
        RunConfig {
            page_size: 20,
            page_delay_ms: 0,
            author_delay_secs: 0,
        },
    );

    let summary = runner.run(&authors, out_dir.path()).await.unwrap();

    pages.assert_async().await;
    assert_eq!(summary.total_authors_queried, 2);
    assert_eq!(summary.authors_processed.len(), 2);
    assert_eq!(summary.authors_with_results(), 2);
    assert_eq!(summary.total_items_fetched(), 4);
    assert_eq!(summary.persistence_failures(), 0);
    assert_eq!(summary.authors_processed[1].viaf, "NO_VIAF_1");

    // Per-author artifacts
    let first_artifact = out_dir.path().join(artifact_file_name(&authors[0], 0));
    assert!(first_artifact.exists());
    let raw = std::fs::read_to_string(&first_artifact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["author"]["name"], "Rufino Blanco Fombona");
    assert_eq!(value["requestCount"], 1);
    assert_eq!(value["items"].as_array().unwrap().len(), 2);

    // Summary and run log
    assert!(out_dir.path().join("_processing_summary.json").exists());
    let has_log = std::fs::read_dir(out_dir.path()).unwrap().any(|entry| {
        entry
            .unwrap()
            .file_name()
            .to_string_lossy()
            .starts_with("run_log_")
    });
    assert!(has_log);
}

/// Export reads artifacts, skips the summary file, and writes both CSVs
/// with the fixed header and all fields quoted
#[tokio::test]
async fn test_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let artifact = json!({
        "author": {"name": "Rómulo Gallegos", "viaf": "64013775"},
        "firstRequestUrl": "https://example.com/volumes?q=inauthor:%22R%C3%B3mulo%20Gallegos%22",
        "requestUrls": ["https://example.com/volumes?q=inauthor:%22R%C3%B3mulo%20Gallegos%22"],
        "queriedTotal": 3,
        "fetchedTotal": 3,
        "requestCount": 1,
        "pageSize": 20,
        "items": [
            {
                "id": "aaa",
                "volumeInfo": {"title": "Doña Bárbara", "authors": ["Rómulo Gallegos"]},
                "saleInfo": {"saleability": "FREE"}
            },
            {
                "id": "bbb",
                "volumeInfo": {"title": "Otra obra", "authors": ["Alguien Más"]},
                "accessInfo": {"pdf": {"isAvailable": true, "downloadLink": "http://dl/b.pdf"}}
            },
            {
                "id": "ccc",
                "volumeInfo": {"title": "De pago", "authors": ["Rómulo Gallegos"]},
                "saleInfo": {"saleability": "FOR_SALE"}
            }
        ]
    });
    std::fs::write(
        dir.path().join("Romulo_Gallegos-64013775-CONSOLIDATED.json"),
        serde_json::to_string_pretty(&artifact).unwrap(),
    )
    .unwrap();

    // The run summary must be skipped, not parsed as an artifact.
    std::fs::write(
        dir.path().join("_processing_summary.json"),
        r#"{"runTimestamp": "x"}"#,
    )
    .unwrap();

    let matches_path = dir.path().join("matches.csv");
    let non_matches_path = dir.path().join("non_matches.csv");
    let outcome = export_dir(dir.path(), &matches_path, &non_matches_path).unwrap();

    assert_eq!(outcome.files_processed, 1);
    assert_eq!(outcome.matches, 1);
    assert_eq!(outcome.non_matches, 1);
    assert_eq!(outcome.excluded, 1);
    assert_eq!(outcome.authors, vec!["Rómulo Gallegos".to_string()]);

    let matches_csv = std::fs::read_to_string(&matches_path).unwrap();
    let mut lines = matches_csv.lines();
    let header = lines.next().unwrap();
    let expected_header = CSV_HEADERS
        .iter()
        .map(|h| format!("\"{}\"", h))
        .collect::<Vec<_>>()
        .join(",");
    assert_eq!(header, expected_header);

    let row = lines.next().unwrap();
    assert!(row.contains("\"Doña Bárbara\""));
    assert!(row.contains("\"Gallegos, Rómulo\""));
    assert!(row.contains("\"Google Books\""));
    assert!(lines.next().is_none());

    let non_matches_csv = std::fs::read_to_string(&non_matches_path).unwrap();
    assert!(non_matches_csv.contains("\"Otra obra\""));
    assert!(non_matches_csv.contains("\"http://dl/b.pdf\""));
}
