//! ApiClient tests against a mock OpenHome endpoint

use miot_api::{ApiClient, ApiConfig, ApiError, Credentials, RegionTable};
use miot_spec::PropertyId;
use mockito::{Matcher, Server, ServerGuard};
use rstest::rstest;
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;

fn pids(raw: &[&str]) -> Vec<PropertyId> {
    raw.iter().map(|p| p.parse().unwrap()).collect()
}

fn client_for(server: &ServerGuard) -> ApiClient {
    let config = ApiConfig::default()
        .with_regions(RegionTable::empty().with_region("mock", server.host_with_port()));
    ApiClient::new(Credentials::new("2882303761517", "token-abc"), config)
}

#[test]
fn test_query_properties_sends_headers_and_pids() {
    let mut server = Server::new();
    let client = client_for(&server);
    let body = json!({"properties": [
        {"pid": "123.2.1", "value": true, "status": 0},
        {"pid": "123.2.2", "value": 80, "status": 0}
    ]});

    let mock = server
        .mock("GET", "/api/v1/properties")
        .match_query(Matcher::UrlEncoded("pid".into(), "123.2.1,123.2.2".into()))
        .match_header("App-Id", "2882303761517")
        .match_header("Access-Token", "token-abc")
        .match_header("Spec-NS", "miot-spec-v2")
        .match_header("Content-Type", "application/json")
        .match_header("Request-Id", client.request_id())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create();

    let response = client
        .query_properties("mock", &pids(&["123.2.1", "123.2.2"]))
        .unwrap();

    assert_eq!(response, body);
    mock.assert();
}

#[test]
fn test_unknown_region_makes_no_request() {
    let mut server = Server::new();
    let client = client_for(&server);
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let result = client.query_properties("cn", &pids(&["123.2.1"]));

    match result {
        Err(ApiError::UnknownRegion(region)) => assert_eq!(region, "cn"),
        other => panic!("Expected UnknownRegion, got {:?}", other),
    }
    mock.assert();
}

#[rstest]
#[case(400)]
#[case(401)]
#[case(500)]
fn test_error_status(#[case] status: usize) {
    let mut server = Server::new();
    let client = client_for(&server);
    let _mock = server
        .mock("GET", "/api/v1/properties")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body(r#"{"code": -1}"#)
        .create();

    let result = client.query_properties("mock", &pids(&["1.2.3"]));

    match result {
        Err(ApiError::HttpStatus { status: got }) => assert_eq!(got as usize, status),
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[test]
fn test_non_json_body() {
    let mut server = Server::new();
    let client = client_for(&server);
    let _mock = server
        .mock("GET", "/api/v1/properties")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("gateway maintenance")
        .create();

    let result = client.query_properties("mock", &pids(&["1.2.3"]));

    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}

#[test]
fn test_connection_refused_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ApiConfig::default()
        .with_regions(RegionTable::empty().with_region("dead", format!("127.0.0.1:{}", port)));
    let client = ApiClient::new(Credentials::new("app", "token"), config);

    let result = client.query_properties("dead", &pids(&["1.2.3"]));

    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[test]
fn test_silent_server_times_out() {
    // Accepted by the kernel backlog but never answered.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = ApiConfig::default()
        .with_regions(RegionTable::empty().with_region("slow", format!("127.0.0.1:{}", port)))
        .with_timeout(Duration::from_millis(300));
    let client = ApiClient::new(Credentials::new("app", "token"), config);

    let result = client.query_properties("slow", &pids(&["1.2.3"]));

    assert!(matches!(result, Err(ApiError::Timeout(_))), "got {:?}", result);
    drop(listener);
}
