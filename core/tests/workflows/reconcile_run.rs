// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation workflow tests.
//!
//! These tests validate state rebuilds from the server: records are cleared,
//! every catalog item is checked remotely and only the ones the server
//! already has come back.

use jiff::civil;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shuttersync_core::{CancellationToken, Engine, Progress, ReconcileOutcome, SyncRecord};

use crate::common::{RecordingSink, setup_temp_dirs, test_config, write_media_file};

#[tokio::test]
#[ignore = "require network"]
async fn reconcile_rebuilds_state_from_remote() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    write_media_file(&dirs.media_dir, "b.jpg", civil::date(2023, 5, 2));
    write_media_file(&dirs.media_dir, "c.jpg", civil::date(2023, 5, 3));

    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/2023/05/a.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/2023/05/b.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/2023/05/c.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let mut engine = Engine::new(config).await.unwrap();
    let sink = RecordingSink::new();
    engine.set_progress(sink.clone());

    // A stale record that no longer corresponds to anything local
    engine
        .store()
        .insert(&SyncRecord {
            id: 999,
            file_name: "ghost.jpg".to_string(),
            synced_at_ms: 1_000,
        })
        .await
        .unwrap();

    // Act
    let outcome = engine.reconcile(&CancellationToken::new()).await.unwrap();

    // Assert: a and c come back, b and the stale record do not
    assert_eq!(
        outcome,
        ReconcileOutcome {
            total: 3,
            matched: 2,
            cancelled: false
        }
    );
    let names: Vec<String> = engine
        .store()
        .all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.file_name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"a.jpg".to_string()));
    assert!(names.contains(&"c.jpg".to_string()));
    assert_eq!(sink.snapshots().last(), Some(&Progress::done(3)));

    engine.close().await;
}

#[tokio::test]
#[ignore = "require network"]
async fn reconcile_treats_server_error_as_missing() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));

    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let engine = Engine::new(config).await.unwrap();

    // Act
    let outcome = engine.reconcile(&CancellationToken::new()).await.unwrap();

    // Assert: the item stays unsynced, the next sync run retries it
    assert_eq!(
        outcome,
        ReconcileOutcome {
            total: 1,
            matched: 0,
            cancelled: false
        }
    );
    assert_eq!(engine.store().count().await.unwrap(), 0);

    engine.close().await;
}

#[tokio::test]
#[ignore = "require network"]
async fn reconcile_is_idempotent() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    write_media_file(&dirs.media_dir, "b.jpg", civil::date(2024, 1, 15));

    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(4)
        .mount(&server)
        .await;

    let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
    let engine = Engine::new(config).await.unwrap();

    // Act
    let first = engine.reconcile(&CancellationToken::new()).await.unwrap();
    let second = engine.reconcile(&CancellationToken::new()).await.unwrap();

    // Assert
    assert_eq!(first, second);
    assert_eq!(first.matched, 2);
    assert_eq!(engine.store().count().await.unwrap(), 2);

    engine.close().await;
}

#[tokio::test]
async fn reconcile_survives_unreachable_server() {
    // Arrange: nothing listens on the port, every check fails as transport
    let dirs = setup_temp_dirs().await.unwrap();
    write_media_file(&dirs.media_dir, "a.jpg", civil::date(2023, 5, 1));
    let config = test_config(&dirs.media_dir, &dirs.state_dir, "http://127.0.0.1:9/photos");
    let engine = Engine::new(config).await.unwrap();

    // Act
    let outcome = engine.reconcile(&CancellationToken::new()).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        ReconcileOutcome {
            total: 1,
            matched: 0,
            cancelled: false
        }
    );
    assert_eq!(engine.store().count().await.unwrap(), 0);
    assert!(
        engine
            .events()
            .snapshot()
            .iter()
            .any(|e| e.contains("Could not verify a.jpg"))
    );

    engine.close().await;
}
