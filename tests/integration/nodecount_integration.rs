//! Node counting against a mock Stellarbeat

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::logging::{init_test_logging, log_test_step};
use stellar_telemetry::api::StellarbeatClient;
use stellar_telemetry::models::{Config, NodeTally};
use stellar_telemetry::node_count::count_nodes;
use stellar_telemetry::TelemetryError;

fn config_for(server: &MockServer) -> Config {
    Config {
        stellarbeat_url: format!("{}/v1", server.uri()),
        ..Config::default()
    }
}

#[test_log::test(tokio::test)]
async fn test_counts_nodes_from_snapshot() {
    init_test_logging();
    log_test_step("Tallying a Stellarbeat snapshot");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "time": "2021-05-20T10:00:00.000Z",
            "nodes": [
                { "publicKey": "GA1", "active": true, "isValidator": true, "isFullValidator": true },
                { "publicKey": "GA2", "active": true, "isValidator": true, "isFullValidator": false },
                { "publicKey": "GA3", "active": true, "isValidator": false, "isFullValidator": false },
                { "publicKey": "GA4", "active": false, "isValidator": true, "isFullValidator": true },
                { "publicKey": "GA5", "active": true }
            ],
            "organizations": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StellarbeatClient::new(&config_for(&server)).unwrap();
    let nodes = client.get_nodes().await.unwrap();
    assert_eq!(nodes.len(), 5);
    assert_eq!(nodes[0].public_key.as_deref(), Some("GA1"));

    let tally = count_nodes(&nodes);
    assert_eq!(tally, NodeTally { full: 1, basic: 1, watcher: 2 });
    assert_eq!(tally.total(), 4);
}

#[tokio::test]
async fn test_snapshot_without_nodes_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organizations": [] })))
        .mount(&server)
        .await;

    let client = StellarbeatClient::new(&config_for(&server)).unwrap();
    let err = client.get_nodes().await.unwrap_err();
    assert!(matches!(err, TelemetryError::MalformedResponse { .. }));
}
