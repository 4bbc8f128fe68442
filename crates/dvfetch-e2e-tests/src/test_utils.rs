use dvfetch_lib::DataverseFetcher;
use dvfetch_lib::config::EndpointConfig;
use dvfetch_lib::download::FetchOptions;
use dvfetch_lib::logger::FetchLogger;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::Level;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DATAFILE_PATH: &str = "/api/access/datafile/";

/// Captures log lines so tests can assert on skip/download/verify decisions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl FetchLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(Level::INFO, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::ERROR, message);
    }
}

pub fn endpoints_for(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        download_url: format!("{}{}", server.uri(), DATAFILE_PATH),
        metadata_url: format!("{}/api/files/{{id}}/metadata", server.uri()),
    }
}

pub fn build_fetcher(
    server: &MockServer,
    verify_checksum: bool,
    logger: Arc<RecordingLogger>,
) -> eyre::Result<DataverseFetcher> {
    let options = FetchOptions {
        verify_checksum,
        verbose: false,
        ..FetchOptions::default()
    };
    Ok(DataverseFetcher::new(endpoints_for(server), options)?.with_logger(logger))
}

/// Serves `body` for `id` and expects exactly `expected_calls` downloads.
pub async fn mount_datafile(server: &MockServer, id: &str, body: &[u8], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("{DATAFILE_PATH}{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_md5_metadata(server: &MockServer, id: &str, checksum: &str) {
    mount_metadata(
        server,
        id,
        json!({
            "status": "OK",
            "data": {
                "filesize": 13,
                "checksum": { "type": "MD5", "value": checksum }
            }
        }),
    )
    .await;
}

pub async fn mount_metadata(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/files/{id}/metadata")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("dvfetch_lib=debug,dataverse=debug,dvfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
