// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Sync run workflow tests.
//!
//! These tests validate complete sync passes: the dated remote layout,
//! collection creation order, convergence across repeated runs, per-item
//! failure handling and cancellation.

use jiff::civil;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shuttersync_core::{CancellationToken, Engine, Progress, SyncOutcome};

use crate::common::{RecordingSink, setup_temp_dirs, test_config, write_media_file};

#[tokio::test]
#[ignore = "require network"]
async fn sync_uploads_catalog_into_dated_collections() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    write_media_file(&dirs.media_dir, "b.jpg", civil::date(2023, 5, 2));

    let server = MockServer::start().await;
    Mock::given(method("MKCOL"))
        .and(path("/2023"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("MKCOL"))
        .and(path("/2023/05"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/2023/05/a.jpg"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(header("content-type", "image/jpeg"))
        .and(body_bytes("a.jpg".as_bytes().to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/2023/05/b.jpg"))
        .and(body_bytes("b.jpg".as_bytes().to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let mut engine = Engine::new(config).await.unwrap();
    let sink = RecordingSink::new();
    engine.set_progress(sink.clone());

    // Act
    let outcome = engine.sync(&CancellationToken::new()).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        SyncOutcome {
            total: 2,
            uploaded: 2,
            failed: 0,
            cancelled: false
        }
    );
    assert_eq!(engine.store().count().await.unwrap(), 2);

    // The newest item goes first
    let snaps = sink.snapshots();
    assert_eq!(snaps.len(), 4);
    assert!(snaps[0].is_indeterminate());
    assert_eq!((snaps[1].current, snaps[1].total), (1, 2));
    assert_eq!(snaps[1].label, "b.jpg");
    assert_eq!(snaps[2].label, "a.jpg");
    assert_eq!(snaps[3], Progress::done(2));

    // Collections are created before any upload
    let requests = server.received_requests().await.unwrap();
    let last_mkcol = requests
        .iter()
        .rposition(|r| r.method.as_str() == "MKCOL")
        .unwrap();
    let first_put = requests
        .iter()
        .position(|r| r.method.as_str() == "PUT")
        .unwrap();
    assert!(last_mkcol < first_put);

    engine.close().await;
}

#[tokio::test]
#[ignore = "require network"]
async fn sync_repeated_runs_converge() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    write_media_file(&dirs.media_dir, "b.jpg", civil::date(2024, 1, 15));

    let server = MockServer::start().await;
    Mock::given(method("MKCOL"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let engine = Engine::new(config).await.unwrap();

    // Act
    let first = engine.sync(&CancellationToken::new()).await.unwrap();
    let second = engine.sync(&CancellationToken::new()).await.unwrap();

    // Assert: the second run finds nothing to upload
    assert_eq!(first.uploaded, 2);
    assert_eq!(
        second,
        SyncOutcome {
            total: 0,
            uploaded: 0,
            failed: 0,
            cancelled: false
        }
    );
    assert_eq!(engine.store().count().await.unwrap(), 2);

    engine.close().await;
}

#[tokio::test]
#[ignore = "require network"]
async fn sync_single_failure_does_not_abort_run() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    write_media_file(&dirs.media_dir, "b.jpg", civil::date(2023, 5, 2));

    let server = MockServer::start().await;
    Mock::given(method("MKCOL"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/2023/05/b.jpg"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/2023/05/a.jpg"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let mut engine = Engine::new(config).await.unwrap();
    let sink = RecordingSink::new();
    engine.set_progress(sink.clone());

    // Act
    let outcome = engine.sync(&CancellationToken::new()).await.unwrap();

    // Assert: b.jpg failed, a.jpg still made it
    assert_eq!(
        outcome,
        SyncOutcome {
            total: 2,
            uploaded: 1,
            failed: 1,
            cancelled: false
        }
    );
    assert_eq!(engine.store().count().await.unwrap(), 1);
    let failures: Vec<_> = engine
        .events()
        .snapshot()
        .into_iter()
        .filter(|e| e.contains("Failed to upload b.jpg"))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(sink.snapshots().last(), Some(&Progress::done(2)));

    engine.close().await;
}

#[tokio::test]
#[ignore = "require network"]
async fn sync_percent_encodes_file_names() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "my photo #1.jpg", civil::date(2023, 5, 1));

    let server = MockServer::start().await;
    Mock::given(method("MKCOL"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/2023/05/my%20photo%20%231.jpg"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let engine = Engine::new(config).await.unwrap();

    // Act
    let outcome = engine.sync(&CancellationToken::new()).await.unwrap();

    // Assert
    assert_eq!(outcome.uploaded, 1);

    engine.close().await;
}

#[tokio::test]
async fn sync_with_empty_catalog_reports_done_without_requests() {
    // Arrange: the port is never dialed because nothing is pending
    let dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&dirs.media_dir, &dirs.state_dir, "http://127.0.0.1:9/photos");
    let mut engine = Engine::new(config).await.unwrap();
    let sink = RecordingSink::new();
    engine.set_progress(sink.clone());

    // Act
    let outcome = engine.sync(&CancellationToken::new()).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        SyncOutcome {
            total: 0,
            uploaded: 0,
            failed: 0,
            cancelled: false
        }
    );
    assert_eq!(sink.snapshots().last(), Some(&Progress::done(0)));
    assert!(
        engine
            .events()
            .snapshot()
            .iter()
            .any(|e| e.contains("Everything is up to date"))
    );

    engine.close().await;
}

#[tokio::test]
async fn sync_honors_cancellation_before_first_upload() {
    // Arrange: the port is never dialed because the run stops first
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    write_media_file(&dirs.media_dir, "b.jpg", civil::date(2023, 5, 2));
    let config = test_config(&dirs.media_dir, &dirs.state_dir, "http://127.0.0.1:9/photos");
    let engine = Engine::new(config).await.unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    // Act
    let outcome = engine.sync(&cancel).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        SyncOutcome {
            total: 2,
            uploaded: 0,
            failed: 0,
            cancelled: true
        }
    );
    assert_eq!(engine.store().count().await.unwrap(), 0);
    assert!(
        engine
            .events()
            .snapshot()
            .iter()
            .any(|e| e.contains("Sync cancelled"))
    );

    engine.close().await;
}
