use httpmock::prelude::*;
use opendata_etl::{EtlEngine, UniversitiesPipeline};
use rusqlite::Connection;
use tempfile::TempDir;

fn fixture_payload() -> serde_json::Value {
    serde_json::json!([
        {
            "name": "Bogazici University",
            "country": "Turkey",
            "alpha_two_code": "TR",
            "domains": ["boun.edu.tr"],
            "web_pages": ["http://www.boun.edu.tr/"],
            "state-province": null
        },
        {
            "name": "Middle East Technical University",
            "country": "Turkey",
            "alpha_two_code": "TR",
            "domains": ["metu.edu.tr", "odtu.edu.tr"],
            "web_pages": ["http://www.metu.edu.tr/", "http://www.odtu.edu.tr/"],
            "state-province": null
        },
        {
            "name": "Istanbul Technical University",
            "country": "Turkey",
            "alpha_two_code": "TR",
            "domains": ["itu.edu.tr"],
            "web_pages": ["http://www.itu.edu.tr/"],
            "state-province": null
        }
    ])
}

#[tokio::test]
async fn end_to_end_universities_run_fills_cal_uni() {
    let temp_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/search").query_param("country", "turkey");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(fixture_payload());
    });

    let pipeline = UniversitiesPipeline::with_endpoints(
        server.url("/search?country=turkey"),
        temp_dir.path(),
    );
    let destinations = EtlEngine::new(pipeline).run().await.unwrap();

    api_mock.assert();
    assert_eq!(destinations.len(), 1);
    assert!(destinations[0].ends_with("::cal_uni"));

    let conn = Connection::open(temp_dir.path().join("store.db")).unwrap();

    // Schema carries exactly the shaped columns, in order.
    let mut stmt = conn.prepare("SELECT * FROM cal_uni").unwrap();
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    assert_eq!(columns, vec!["domains", "country", "web_pages", "name"]);

    let rows: Vec<(String, String, String, String)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[1],
        (
            "metu.edu.tr,odtu.edu.tr".to_string(),
            "Turkey".to_string(),
            "http://www.metu.edu.tr/,http://www.odtu.edu.tr/".to_string(),
            "Middle East Technical University".to_string()
        )
    );
}

#[tokio::test]
async fn second_run_replaces_the_table() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let mut api_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(fixture_payload());
    });

    let pipeline =
        UniversitiesPipeline::with_endpoints(server.url("/search"), temp_dir.path());
    EtlEngine::new(pipeline).run().await.unwrap();

    api_mock.delete();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "name": "Lone University",
                    "country": "Turkey",
                    "domains": ["lone.edu.tr"],
                    "web_pages": ["http://lone.edu.tr/"]
                }
            ]));
    });

    let pipeline =
        UniversitiesPipeline::with_endpoints(server.url("/search"), temp_dir.path());
    EtlEngine::new(pipeline).run().await.unwrap();

    let conn = Connection::open(temp_dir.path().join("store.db")).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM cal_uni", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let name: String = conn
        .query_row("SELECT name FROM cal_uni", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Lone University");
}

#[tokio::test]
async fn run_fails_on_malformed_payload() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "not an array"}));
    });

    let pipeline =
        UniversitiesPipeline::with_endpoints(server.url("/search"), temp_dir.path());
    let result = EtlEngine::new(pipeline).run().await;

    api_mock.assert();
    assert!(result.is_err());
    assert!(!temp_dir.path().join("store.db").exists());
}
