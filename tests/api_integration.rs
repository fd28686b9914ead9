//! End-to-end tests over a real TCP listener.

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{client, start_server, test_config, API_KEY};

#[tokio::test]
async fn test_local_client_with_key() {
    let server = start_server(test_config()).await;

    let res = client()
        .get(server.url("/connect-check"))
        .bearer_auth(API_KEY)
        .send()
        .await
        .expect("API unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.json::<Value>().await.unwrap(), json!("200 OK"));

    server.stop().await;
}

#[tokio::test]
async fn test_wrong_key_rejected() {
    let server = start_server(test_config()).await;

    let res = client()
        .get(server.url("/discord/direct-messages"))
        .bearer_auth("wrong")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "Forbidden: Invalid API Key");

    server.stop().await;
}

#[tokio::test]
async fn test_forwarded_external_client_blocked() {
    let server = start_server(test_config()).await;

    let res = client()
        .get(server.url("/connect-check"))
        .bearer_auth(API_KEY)
        .header("X-Forwarded-For", "10.0.0.5, 127.0.0.1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client()
        .get(server.url("/connect-check"))
        .bearer_auth(API_KEY)
        .header("X-Forwarded-For", "172.20.5.5, 10.0.0.1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_untrusted_peer_cannot_spoof_header() {
    let mut config = test_config();
    config.access.trusted_proxies = vec!["10.0.0.2".into()];
    config.access.allowed_ips = vec![];
    let server = start_server(config).await;

    // The test client connects from 127.0.0.1, which is local but not a
    // trusted proxy: its header is ignored and the peer address decides.
    let res = client()
        .get(server.url("/connect-check"))
        .bearer_auth(API_KEY)
        .header("X-Forwarded-For", "203.0.113.5")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_snapshot_written_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.json");

    let mut config = test_config();
    config.storage.snapshot_path = Some(path.to_string_lossy().into_owned());
    let server = start_server(config.clone()).await;

    let res = client()
        .post(server.url("/discord/server-channels"))
        .bearer_auth(API_KEY)
        .json(&json!({
            "guild_name": "TestServer",
            "channel_id": "channel123",
            "channel_name": "General",
            "scrapers": ["scraper1"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    server.stop().await;

    let snapshot: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let channels = &snapshot["notification-recipient"]["server-channels"];
    assert_eq!(channels[0]["_id"], "channel123");

    // A restarted server sees the same record.
    let server = start_server(config).await;
    let res = client()
        .get(server.url("/discord/server-channel"))
        .query(&[("channel_id", "channel123")])
        .bearer_auth(API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["guild_name"], "TestServer");

    server.stop().await;
}
