//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: trigger → catalog requests → CSV table →
//! charts on a local object store

use axum::body::Body;
use axum::http::{Request, StatusCode};
use movie_insights::charts::{budget_vs_revenue, locate_font, ChartKind};
use movie_insights::cli::router;
use movie_insights::config::AppConfig;
use movie_insights::pipeline::{Ingestor, Visualizer};
use movie_insights::table::{MovieTable, HEADER};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

const GENRES: [(i64, &str); 4] = [(28, "Action"), (35, "Comedy"), (18, "Drama"), (27, "Horror")];

fn movie_json(id: i64) -> Value {
    // 1 to 3 genres per movie, 99 is not in the taxonomy
    let genre_ids: Vec<i64> = match id % 4 {
        0 => vec![28],
        1 => vec![35, 18],
        2 => vec![27, 28, 99],
        _ => vec![18],
    };
    json!({
        "id": id,
        "title": format!("Movie {id}"),
        "release_date": format!("2023-{:02}-15", id % 12 + 1),
        "genre_ids": genre_ids,
        "vote_average": 6.5,
        "vote_count": 1000 + id,
        "overview": format!("Overview of movie {id}, with a comma"),
        "original_language": "en",
        "popularity": 200.0 - id as f64,
        "poster_path": format!("/poster{id}.jpg"),
        "adult": false
    })
}

async fn mock_catalog() -> MockServer {
    let server = MockServer::start().await;

    let genres: Vec<Value> = GENRES
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "genres": genres })))
        .mount(&server)
        .await;

    for page in 1..=3_i64 {
        let results: Vec<Value> = (1..=20).map(|i| movie_json((page - 1) * 20 + i)).collect();
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("primary_release_year", "2023"))
            .and(query_param("sort_by", "popularity.desc"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": page,
                "results": results,
                "total_pages": 3,
                "total_results": 60
            })))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path_regex(r"^/movie/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "budget": 150000000,
            "revenue": 0,
            "production_companies": [{"name": "Marvel Studios"}]
        })))
        .mount(&server)
        .await;

    server
}

fn local_config(server: &MockServer, dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.catalog.base_url = server.uri();
    config.catalog.api_key = Some("test-key".to_string());
    config.catalog.requests_per_second = 1000;
    config.catalog.burst_size = 1000;
    config.storage.table_url = dir.join("table").display().to_string();
    config.storage.charts_url = dir.join("charts").display().to_string();
    config
}

fn genre_count(id: i64) -> usize {
    match id % 4 {
        1 => 2,
        2 => 3,
        _ => 1,
    }
}

// ============================================================================
// Ingest Integration Tests
// ============================================================================

#[tokio::test]
async fn test_ingest_over_http_writes_table() {
    let server = mock_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let app = router(local_config(&server, dir.path()));

    let request = Request::builder()
        .method("POST")
        .uri("/ingest")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"year": 2023}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let outcome: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(outcome["statusCode"], 200);
    assert_eq!(
        outcome["body"],
        format!(
            "CSV file created and uploaded to file://{}/top_movies.csv.",
            dir.path().join("table").display()
        )
    );

    let detail_calls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().starts_with("/movie/"))
        .count();
    assert_eq!(detail_calls, 30);

    let csv = std::fs::read(dir.path().join("table").join("top_movies.csv")).unwrap();
    assert!(String::from_utf8_lossy(&csv).starts_with(
        "Movie ID,Title,Release Date,Genre,Vote Average,Vote Count,Overview,Language,\
         Budget,Revenue,Poster Path,Popularity,Adult,Production Companies\n"
    ));

    let table = MovieTable::from_csv(&csv).unwrap();
    assert_eq!(table.columns().len(), HEADER.len());

    let ids: Vec<i64> = (0..table.len())
        .map(|i| table.cell(i, "Movie ID").unwrap().parse().unwrap())
        .collect();
    let distinct: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), 30);
    assert_eq!(table.len(), distinct.iter().map(|id| genre_count(*id)).sum::<usize>());

    let mut per_movie: HashMap<i64, Vec<&str>> = HashMap::new();
    for (i, id) in ids.iter().enumerate() {
        per_movie
            .entry(*id)
            .or_default()
            .push(table.cell(i, "Genre").unwrap());
    }
    assert_eq!(per_movie[&2], vec!["Horror", "Action", "Unknown"]);

    for i in 0..table.len() {
        assert!(table.cell(i, "Release Date").unwrap().starts_with("2023-"));
        assert_eq!(table.cell(i, "Revenue"), Some("0"));
    }
    assert_eq!(table.cell(0, "Overview"), Some("Overview of movie 1, with a comma"));
}

#[tokio::test]
async fn test_ingest_identical_runs_produce_identical_tables() {
    let server = mock_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(&server, dir.path());
    let table_path = dir.path().join("table").join("top_movies.csv");

    let ingestor = Ingestor::from_config(&config).unwrap();
    ingestor.run(2023, Some(10)).await.unwrap();
    let first = std::fs::read(&table_path).unwrap();
    ingestor.run(2023, Some(10)).await.unwrap();
    let second = std::fs::read(&table_path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_ingest_shortfall_still_writes_table() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = local_config(&server, dir.path());
    config.ingest.min_movies = 100;

    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genres": [{"id": 28, "name": "Action"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [movie_json(4), movie_json(8)],
            "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/movie/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let report = Ingestor::from_config(&config)
        .unwrap()
        .run(2023, None)
        .await
        .unwrap();
    assert_eq!(report.movies, 2);
    assert_eq!(report.rows, 2);

    let csv = std::fs::read(dir.path().join("table").join("top_movies.csv")).unwrap();
    let table = MovieTable::from_csv(&csv).unwrap();
    assert_eq!(table.cell(0, "Budget"), Some("N/A"));
    assert_eq!(table.cell(0, "Production Companies"), Some(""));
}

// ============================================================================
// Visualize Integration Tests
// ============================================================================

#[tokio::test]
async fn test_visualize_missing_genre_column_writes_no_charts() {
    let dir = tempfile::tempdir().unwrap();
    let table_dir = dir.path().join("table");
    std::fs::create_dir_all(&table_dir).unwrap();
    std::fs::write(
        table_dir.join("top_movies.csv"),
        "Movie ID,Title,Budget,Revenue,Popularity,Production Companies\n\
         1,Alpha,100,200,10.0,Studio A\n",
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.storage.table_url = table_dir.display().to_string();
    config.storage.charts_url = dir.path().join("charts").display().to_string();

    let outcome = Visualizer::from_config(&config).unwrap().handle().await;
    assert_eq!(outcome.status_code, 500);
    assert_eq!(outcome.message, "Missing required column: Genre");

    let written = std::fs::read_dir(dir.path().join("charts")).unwrap().count();
    assert_eq!(written, 0);
}

#[test]
fn test_duplicate_titles_contribute_one_budget_entry() {
    let csv = "\
Title,Budget,Revenue,Genre,Popularity,Production Companies
Alpha,100000000,300000000,Action,50.0,Studio A
Alpha,250000000,300000000,Comedy,50.0,Studio A
Beta,90000000,N/A,Drama,20.0,Studio B
";
    let mut table = MovieTable::from_csv(csv.as_bytes()).unwrap();
    assert_eq!(table.dedup_by("Title").unwrap(), 1);

    let view = budget_vs_revenue(&table.summary_records().unwrap());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "Alpha");
    assert_eq!(view[0].budget, 100_000_000.0);
}

#[tokio::test]
async fn test_full_pipeline_produces_charts() {
    if locate_font(None).is_none() {
        eprintln!("skipping: no system font available");
        return;
    }
    let server = mock_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(&server, dir.path());

    let ingest = Ingestor::from_config(&config)
        .unwrap()
        .handle(&json!({"year": "2023"}))
        .await;
    assert_eq!(ingest.status_code, 200);

    let outcome = Visualizer::from_config(&config).unwrap().handle().await;
    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.message, "Visualizations created and uploaded successfully.");

    for kind in ChartKind::ALL {
        let png = std::fs::read(dir.path().join("charts").join(kind.file_name())).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
