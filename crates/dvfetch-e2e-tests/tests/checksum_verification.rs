use assert_fs::TempDir;
use assert_fs::prelude::*;
use dvfetch_e2e_tests::{
    RecordingLogger, build_fetcher, init_tracing, mount_datafile, mount_md5_metadata,
    mount_metadata,
};
use dvfetch_lib::download::DownloadStatus;
use dvfetch_lib::table::{DatasetRecord, DatasetTable};
use dvfetch_lib::verification::VerificationOutcome;
use predicates::prelude::*;
use serde_json::json;
use tracing::Level;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HELLO: &[u8] = b"Hello, World!";
const HELLO_MD5: &str = "65a8e27d8879283831b664bd8b7f0ad4";

#[tokio::test]
async fn test_fresh_download_is_verified() {
    init_tracing();

    let server = MockServer::start().await;
    mount_datafile(&server, "7", HELLO, 1).await;
    mount_md5_metadata(&server, "7", &HELLO_MD5.to_uppercase()).await;
    let output = TempDir::new().unwrap();
    let logger = RecordingLogger::new();
    let fetcher = build_fetcher(&server, true, logger.clone()).unwrap();

    let summary = fetcher
        .fetch_all(
            DatasetTable::from_records([DatasetRecord::new("7", "hello", "txt")]),
            output.path(),
        )
        .await
        .unwrap();

    assert_eq!(
        summary.outcomes[0].verification,
        Some(VerificationOutcome::Verified)
    );
    assert_eq!(summary.failed_verification().count(), 0);
    assert!(logger.contains(Level::INFO, "Checksum verification enabled"));
    assert!(logger.contains(Level::INFO, "Checksum verified for hello.txt"));
}

#[tokio::test]
async fn test_mismatch_is_reported_but_not_raised() {
    init_tracing();

    let server = MockServer::start().await;
    mount_datafile(&server, "8", b"corrupted", 1).await;
    mount_md5_metadata(&server, "8", HELLO_MD5).await;
    let output = TempDir::new().unwrap();
    let logger = RecordingLogger::new();
    let fetcher = build_fetcher(&server, true, logger.clone()).unwrap();

    let outcome = fetcher
        .download_record(&DatasetRecord::new("8", "hello", "txt"), output.path())
        .await
        .expect("A checksum mismatch must not fail the download");

    match outcome.verification {
        Some(VerificationOutcome::Mismatch { expected, actual }) => {
            assert_eq!(expected, HELLO_MD5);
            assert_ne!(actual, HELLO_MD5);
        }
        other => panic!("expected Mismatch, got {other:?}"),
    }
    output.child("hello.txt").assert("corrupted");
    assert!(logger.contains(Level::ERROR, "Checksum mismatch for hello.txt"));
    assert!(logger.contains(Level::WARN, "Checksum verification failed for hello.txt"));
}

#[tokio::test]
async fn test_existing_file_is_verified_only_when_requested() {
    init_tracing();

    let server = MockServer::start().await;
    mount_datafile(&server, "9", HELLO, 0).await;
    Mock::given(method("GET"))
        .and(path("/api/files/9/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "checksum": { "type": "MD5", "value": HELLO_MD5 } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let output = TempDir::new().unwrap();
    output.child("hello.txt").write_binary(HELLO).unwrap();
    let record = DatasetRecord::new("9", "hello", "txt");

    let unverified = build_fetcher(&server, false, RecordingLogger::new())
        .unwrap()
        .download_record(&record, output.path())
        .await
        .unwrap();
    assert_eq!(unverified.status, DownloadStatus::AlreadyPresent);
    assert_eq!(unverified.verification, None);

    let verified = build_fetcher(&server, true, RecordingLogger::new())
        .unwrap()
        .download_record(&record, output.path())
        .await
        .unwrap();
    assert_eq!(verified.status, DownloadStatus::AlreadyPresent);
    assert_eq!(verified.verification, Some(VerificationOutcome::Verified));

    server.verify().await;
}

#[tokio::test]
async fn test_unavailable_metadata_is_vacuous_pass() {
    init_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/10/metadata"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let output = TempDir::new().unwrap();
    output.child("hello.txt").write_binary(HELLO).unwrap();
    let logger = RecordingLogger::new();
    let fetcher = build_fetcher(&server, true, logger.clone()).unwrap();

    assert!(
        fetcher
            .verify_file_checksum(output.child("hello.txt").path(), "10")
            .await
    );
    assert!(logger.contains(Level::WARN, "Could not retrieve metadata for file 10"));
    assert!(logger.contains(
        Level::INFO,
        "Checksum not available for file 10, skipping verification"
    ));
}

#[tokio::test]
async fn test_unsupported_checksum_type_is_skipped() {
    init_tracing();

    let server = MockServer::start().await;
    mount_metadata(
        &server,
        "11",
        json!({ "data": { "checksum": { "type": "SHA-1", "value": "abc" } } }),
    )
    .await;
    let output = TempDir::new().unwrap();
    output.child("hello.txt").write_binary(HELLO).unwrap();
    let logger = RecordingLogger::new();
    let fetcher = build_fetcher(&server, true, logger.clone()).unwrap();

    let outcome = fetcher
        .check_file_checksum(output.child("hello.txt").path(), "11")
        .await;

    assert!(matches!(outcome, VerificationOutcome::Skipped { .. }));
    assert!(outcome.passed());
    assert!(logger.contains(Level::INFO, "Unsupported checksum type 'SHA-1' for file 11"));
}

#[tokio::test]
async fn test_metadata_without_checksum_is_skipped() {
    init_tracing();

    let server = MockServer::start().await;
    mount_metadata(&server, "12", json!({ "data": { "filesize": 13 } })).await;
    let output = TempDir::new().unwrap();
    output.child("hello.txt").write_binary(HELLO).unwrap();
    let fetcher = build_fetcher(&server, true, RecordingLogger::new()).unwrap();

    assert!(
        fetcher
            .verify_file_checksum(output.child("hello.txt").path(), "12")
            .await
    );
}

#[tokio::test]
async fn test_missing_local_file_fails_verification() {
    init_tracing();

    let server = MockServer::start().await;
    mount_md5_metadata(&server, "13", HELLO_MD5).await;
    let output = TempDir::new().unwrap();
    let logger = RecordingLogger::new();
    let fetcher = build_fetcher(&server, true, logger.clone()).unwrap();

    let missing = output.child("absent.txt");
    assert!(!fetcher.verify_file_checksum(missing.path(), "13").await);
    missing.assert(predicate::path::missing());
    assert!(logger.contains(Level::ERROR, "not found for checksum verification"));
}
