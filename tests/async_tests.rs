mod common;

use common::{queued_client, MockTransport};
use contentful_cma::{Callback, CmaArray, CmaError, CmaPersonalAccessToken, CmaSpace, CmaTag, ErrorKind, Result};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

/// Counts which side of a callback was invoked
struct Outcome {
    tx: mpsc::Sender<std::result::Result<String, (ErrorKind, Option<u16>)>>,
}

impl Callback<CmaPersonalAccessToken> for Outcome {
    fn on_success(self, token: CmaPersonalAccessToken) {
        self.tx.send(Ok(token.name.unwrap_or_default())).unwrap();
    }

    fn on_failure(self, error: CmaError) {
        self.tx.send(Err((error.kind(), error.status_code()))).unwrap();
    }
}

#[test]
fn test_validation_failure_is_delivered_on_callback_context() {
    let transport = MockTransport::new();
    let (client, queue) = queued_client(transport.clone());
    let caller = thread::current().id();
    let (tx, rx) = mpsc::channel();

    let handle = client
        .spaces()
        .async_api()
        .fetch_one("", move |result: Result<CmaSpace>| {
            tx.send((result.map(|_| ()), thread::current().id())).unwrap();
        });

    assert!(queue.run_next(WAIT));
    let (result, delivered_on) = rx.recv().unwrap();
    assert!(matches!(result, Err(CmaError::Validation { parameter: "spaceId" })));
    assert_eq!(delivered_on, caller);
    assert!(handle.is_resolved());
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_not_found_reaches_only_on_failure() {
    let transport = MockTransport::new();
    transport.respond(
        404,
        r#"{"sys":{"type":"Error","id":"NotFound"},"message":"The resource could not be found."}"#,
    );
    let (client, queue) = queued_client(transport.clone());
    let (tx, rx) = mpsc::channel();

    client
        .personal_access_tokens()
        .async_api()
        .fetch_one("pat1", Outcome { tx });

    assert!(queue.run_next(WAIT));
    assert_eq!(rx.recv().unwrap(), Err((ErrorKind::Api, Some(404))));
    assert!(rx.try_recv().is_err());
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn test_success_is_delivered_once() {
    let transport = MockTransport::new();
    transport.respond(
        200,
        r#"{"sys":{"type":"Array"},"total":1,"items":[{"sys":{"type":"Tag","id":"t1"},"name":"one"}]}"#,
    );
    let (client, queue) = queued_client(transport.clone());
    let (tx, rx) = mpsc::channel();

    let handle = client
        .tags()
        .async_api()
        .fetch_all("s1", "master", move |result: Result<CmaArray<CmaTag>>| {
            tx.send(result.map(|tags| tags.len())).unwrap();
        });

    assert!(queue.run_next(WAIT));
    assert_eq!(rx.recv().unwrap().unwrap(), 1);
    assert!(handle.wait_timeout(WAIT));
    assert_eq!(queue.pending(), 0);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_cancelled_call_is_not_delivered() {
    let transport = MockTransport::new();
    transport.respond(200, r#"{"sys":{"type":"Space","id":"s1"}}"#);
    let (client, queue) = queued_client(transport.clone());
    let (tx, rx) = mpsc::channel();

    let handle = client
        .spaces()
        .async_api()
        .fetch_one("s1", move |result: Result<CmaSpace>| {
            tx.send(result.is_ok()).unwrap();
        });
    assert!(handle.cancel());

    // the network call still runs, only delivery is dropped
    assert!(queue.run_next(WAIT));
    assert!(rx.try_recv().is_err());
    assert!(handle.is_cancelled());
    assert_eq!(transport.call_count(), 1);
}

#[cfg(feature = "async")]
#[test]
fn test_tokio_background_executor() {
    use contentful_cma::{CmaClient, Executor, TokioExecutor};
    use std::sync::Arc;

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let transport = MockTransport::new();
    transport.respond(200, r#"{"sys":{"type":"Space","id":"s1"},"name":"Example"}"#);
    let queue = contentful_cma::CallbackQueue::new();
    let background: Arc<dyn Executor> = Arc::new(TokioExecutor::new(runtime.handle().clone()));
    let callback: Arc<dyn Executor> = Arc::new(queue.clone());

    let client = CmaClient::builder()
        .with_transport(transport.clone())
        .with_background_executor(background)
        .with_callback_executor(callback)
        .build()
        .unwrap();

    let (tx, rx) = mpsc::channel();
    client
        .spaces()
        .async_api()
        .fetch_one("s1", move |result: Result<CmaSpace>| {
            tx.send(result.map(|s| s.name)).unwrap();
        });

    assert!(queue.run_next(WAIT));
    assert_eq!(rx.recv().unwrap().unwrap().as_deref(), Some("Example"));
}
