#![allow(dead_code)]

use contentful_cma::{
    CallbackQueue, CmaClient, Executor, HttpRequest, HttpResponse, Result, SynchronousExecutor, Transport,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport answering from a queue of canned responses and recording
/// every request it receives
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(MockTransport::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body.as_bytes().to_vec()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, b"{}".to_vec())))
    }
}

/// Client over `transport` running every call on the calling thread
pub fn client(transport: Arc<MockTransport>) -> CmaClient {
    let sync: Arc<dyn Executor> = Arc::new(SynchronousExecutor);
    CmaClient::builder()
        .with_access_token("<access_token>")
        .with_space_id("configured-space")
        .with_transport(transport)
        .with_background_executor(sync.clone())
        .with_callback_executor(sync)
        .build()
        .unwrap()
}

/// Client whose callbacks only run when the returned queue is drained
pub fn queued_client(transport: Arc<MockTransport>) -> (CmaClient, CallbackQueue) {
    let queue = CallbackQueue::new();
    let callback: Arc<dyn Executor> = Arc::new(queue.clone());
    let client = CmaClient::builder()
        .with_access_token("<access_token>")
        .with_transport(transport)
        .with_callback_executor(callback)
        .build()
        .unwrap();
    (client, queue)
}

pub fn body_json(request: &HttpRequest) -> serde_json::Value {
    let body = request.body.as_ref().expect("request has no body");
    serde_json::from_slice(&body.bytes).unwrap()
}

pub fn query_pairs(request: &HttpRequest) -> Vec<(String, String)> {
    url::Url::parse(&request.url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn path(request: &HttpRequest) -> String {
    url::Url::parse(&request.url).unwrap().path().to_string()
}
