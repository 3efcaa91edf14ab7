use contentful_cma::{CmaClient, CmaSpace, CmaTag, Config, ErrorKind, LogLevel, Resource, Result};
use serde_json::json;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CMA_JSON: &str = "application/vnd.contentful.management.v1+json";

/// Server running on its own runtime; the blocking client is used from the test thread
fn server() -> (Runtime, MockServer) {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

fn client_for(server: &MockServer) -> CmaClient {
    let config = Config::new("http".to_string(), server.address().to_string())
        .with_access_token("test-token")
        .with_space_id("s1")
        .with_log_level(LogLevel::Full)
        .with_timeout(Duration::from_secs(5));

    CmaClient::builder().with_config(config).build().unwrap()
}

#[test]
fn test_fetch_one_space_over_http() {
    let (runtime, server) = server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/spaces/s1"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"sys":{"type":"Space","id":"s1","version":3},"name":"Example"}"#, CMA_JSON),
            )
            .expect(1)
            .mount(&server),
    );

    let space = client_for(&server).spaces().fetch_one("s1").unwrap();
    assert_eq!(space.id(), Some("s1"));
    assert_eq!(space.version(), Some(3));
    assert_eq!(space.name.as_deref(), Some("Example"));

    runtime.block_on(server.verify());
}

#[test]
fn test_fetch_all_tags_sends_default_limit() {
    let (runtime, server) = server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/spaces/s1/environments/master/tags"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"type": "Array"},
                "total": 2, "skip": 0, "limit": 100,
                "items": [
                    {"sys": {"type": "Tag", "id": "t1"}, "name": "one"},
                    {"sys": {"type": "Tag", "id": "t2"}, "name": "two"}
                ]
            })))
            .expect(1)
            .mount(&server),
    );

    let tags = client_for(&server).tags().fetch_all_configured().unwrap();
    let ids: Vec<_> = tags.iter().filter_map(|t| t.id()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);

    runtime.block_on(server.verify());
}

#[test]
fn test_create_tag_sends_cma_content_type() {
    let (runtime, server) = server();
    runtime.block_on(
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/environments/master/tags/news"))
            .and(header("Content-Type", CMA_JSON))
            .and(body_json(json!({
                "sys": {"type": "Tag", "id": "news", "visibility": "private"},
                "name": "News"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sys": {"type": "Tag", "id": "news", "version": 1},
                "name": "News"
            })))
            .expect(1)
            .mount(&server),
    );

    let tag = client_for(&server)
        .tags()
        .create("s1", "master", &CmaTag::new("news", "News"))
        .unwrap();
    assert_eq!(tag.version(), Some(1));

    runtime.block_on(server.verify());
}

#[test]
fn test_error_response_keeps_request_id() {
    let (runtime, server) = server();
    runtime.block_on(
        Mock::given(method("PUT"))
            .and(path("/spaces/s1"))
            .respond_with(
                ResponseTemplate::new(409)
                    .insert_header("X-Contentful-Request-Id", "req-1")
                    .set_body_json(json!({
                        "sys": {"type": "Error", "id": "VersionMismatch"},
                        "message": "Version mismatch"
                    })),
            )
            .mount(&server),
    );

    let mut space = CmaSpace::new().with_name("renamed");
    space.set_id("s1");
    space.set_version(1);
    let err = client_for(&server).spaces().update(&space).unwrap_err();

    assert!(err.is_version_mismatch());
    match err {
        contentful_cma::CmaError::Api {
            message, request_id, ..
        } => {
            assert_eq!(message, "Version mismatch");
            assert_eq!(request_id.as_deref(), Some("req-1"));
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[test]
fn test_unreachable_host_is_transport_error() {
    let config = Config::new("http".to_string(), "127.0.0.1:1".to_string())
        .with_timeout(Duration::from_secs(2));
    let client = CmaClient::builder().with_config(config).build().unwrap();

    let err = client.spaces().fetch_one("s1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn test_async_call_with_default_executors() {
    let (runtime, server) = server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/spaces/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"type": "Space", "id": "s1"},
                "name": "Example"
            })))
            .mount(&server),
    );

    let client = client_for(&server);
    let (tx, rx) = mpsc::channel();
    let handle = client
        .spaces()
        .async_api()
        .fetch_one("s1", move |result: Result<CmaSpace>| {
            let name = std::thread::current().name().map(str::to_string);
            tx.send((result.map(|s| s.name), name)).unwrap();
        });

    let (result, thread_name) = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(result.unwrap().as_deref(), Some("Example"));
    assert!(thread_name.unwrap().starts_with("cma-callback"));
    assert!(handle.wait_timeout(Duration::from_secs(5)));
}
