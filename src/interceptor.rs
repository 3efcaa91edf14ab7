//! Request interceptors.
//!
//! Every call passes through the configured interceptors in order. Each
//! step receives the request and a [`Chain`] holding the remaining steps;
//! calling [`Chain::proceed`] runs them and the transport, so a step can
//! act both before and after the rest of the pipeline.

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse, RequestBody, Transport};
use std::sync::Arc;

/// Default media type of every CMA request body
pub const CMA_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// A single request/response transform step
pub trait Interceptor: Send + Sync {
    fn intercept(&self, request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse>;
}

/// The remainder of the pipeline after the current interceptor
pub struct Chain<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    transport: &'a dyn Transport,
}

impl<'a> Chain<'a> {
    pub fn new(interceptors: &'a [Arc<dyn Interceptor>], transport: &'a dyn Transport) -> Self {
        Chain {
            interceptors,
            transport,
        }
    }

    /// Run the remaining interceptors and then the transport
    pub fn proceed(self, request: HttpRequest) -> Result<HttpResponse> {
        match self.interceptors.split_first() {
            Some((first, rest)) => first.intercept(request, Chain::new(rest, self.transport)),
            None => self.transport.execute(request),
        }
    }
}

/// Ordered interceptors terminated by a transport.
///
/// Immutable once built and shared by every concurrent call.
#[derive(Clone)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
    transport: Arc<dyn Transport>,
}

impl InterceptorChain {
    pub fn new(interceptors: Vec<Arc<dyn Interceptor>>, transport: Arc<dyn Transport>) -> Self {
        InterceptorChain {
            interceptors,
            transport,
        }
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Send a request through every interceptor and the transport
    pub fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        Chain::new(&self.interceptors, self.transport.as_ref()).proceed(request)
    }
}

/// Sets a fixed header on every request
#[derive(Debug, Clone)]
pub struct HeaderInterceptor {
    name: String,
    value: String,
}

impl HeaderInterceptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderInterceptor {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `Authorization: Bearer <token>`
    pub fn authorization(access_token: &str) -> Self {
        HeaderInterceptor::new("Authorization", format!("Bearer {}", access_token))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Interceptor for HeaderInterceptor {
    fn intercept(&self, mut request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse> {
        request.set_header(self.name.as_str(), self.value.as_str());
        chain.proceed(request)
    }
}

type RequestPredicate = dyn Fn(&HttpRequest) -> bool + Send + Sync;

/// Adds a content type header to matching requests.
///
/// When a matching POST, PUT or PATCH request carries a body, the body is
/// re-tagged with the same media type. The bytes are left untouched.
pub struct ContentTypeInterceptor {
    content_type: String,
    predicate: Box<RequestPredicate>,
}

impl ContentTypeInterceptor {
    pub const HEADER_NAME: &'static str = "Content-Type";

    pub fn new<F>(content_type: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&HttpRequest) -> bool + Send + Sync + 'static,
    {
        ContentTypeInterceptor {
            content_type: content_type.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Interceptor applying [`CMA_CONTENT_TYPE`] to every request
    pub fn cma() -> Self {
        ContentTypeInterceptor::new(CMA_CONTENT_TYPE, |_| true)
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Rewrite a request without forwarding it
    pub fn apply(&self, mut request: HttpRequest) -> HttpRequest {
        if !(self.predicate)(&request) {
            return request;
        }

        request.set_header(Self::HEADER_NAME, self.content_type.as_str());

        if request.method.permits_body() {
            if let Some(body) = request.body.take() {
                request.body = Some(RequestBody::new(self.content_type.as_str(), body.bytes));
            }
        }

        request
    }
}

impl std::fmt::Debug for ContentTypeInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentTypeInterceptor")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl Interceptor for ContentTypeInterceptor {
    fn intercept(&self, request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse> {
        chain.proceed(self.apply(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use std::sync::Mutex;

    /// Transport answering 200 and remembering what it was sent
    #[derive(Default)]
    struct EchoTransport {
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for EchoTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse::new(200, b"{}".to_vec()))
        }
    }

    /// Records its name before and after the rest of the chain runs
    struct Tracer {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Interceptor for Tracer {
        fn intercept(&self, request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse> {
            self.log.lock().unwrap().push(format!("{} before", self.name));
            let response = chain.proceed(request);
            self.log.lock().unwrap().push(format!("{} after", self.name));
            response
        }
    }

    fn post_with_body() -> HttpRequest {
        let mut request = HttpRequest::new(HttpMethod::Post, "https://api.contentful.com/spaces");
        request.body = Some(RequestBody::json(br#"{"name":"space"}"#.to_vec()));
        request
    }

    #[test]
    fn test_chain_wraps_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let transport = Arc::new(EchoTransport::default());
        let steps: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(Tracer { name: "outer", log: log.clone() }),
            Arc::new(Tracer { name: "inner", log: log.clone() }),
        ];
        let chain = InterceptorChain::new(steps, transport.clone());

        let response = chain.dispatch(HttpRequest::new(HttpMethod::Get, "https://x/")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer before", "inner before", "inner after", "outer after"]
        );
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_content_type_rewrites_body() {
        let interceptor = ContentTypeInterceptor::cma();
        let original = post_with_body();
        let rewritten = interceptor.apply(original.clone());

        assert_eq!(rewritten.header("Content-Type"), Some(CMA_CONTENT_TYPE));
        let body = rewritten.body.as_ref().unwrap();
        assert_eq!(body.media_type, CMA_CONTENT_TYPE);
        assert_eq!(body.bytes, original.body.unwrap().bytes);
    }

    #[test]
    fn test_content_type_is_idempotent() {
        let interceptor = ContentTypeInterceptor::cma();
        let once = interceptor.apply(post_with_body());
        let twice = interceptor.apply(once.clone());

        assert_eq!(once, twice);
        assert_eq!(
            twice
                .headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
                .count(),
            1
        );
    }

    #[test]
    fn test_content_type_skips_body_for_get() {
        let interceptor = ContentTypeInterceptor::new("text/plain", |_| true);
        let mut request = HttpRequest::new(HttpMethod::Get, "https://x/");
        request.body = Some(RequestBody::json(b"[]".to_vec()));

        let rewritten = interceptor.apply(request);
        assert_eq!(rewritten.header("Content-Type"), Some("text/plain"));
        assert_eq!(rewritten.body.unwrap().media_type, "application/json");
    }

    #[test]
    fn test_content_type_predicate_miss() {
        let interceptor = ContentTypeInterceptor::new("text/plain", |r| r.method == HttpMethod::Put);
        let rewritten = interceptor.apply(post_with_body());

        assert!(rewritten.header("Content-Type").is_none());
        assert_eq!(rewritten.body.unwrap().media_type, "application/json");
    }

    #[test]
    fn test_header_interceptor_sets_authorization() {
        let transport = Arc::new(EchoTransport::default());
        let steps: Vec<Arc<dyn Interceptor>> = vec![Arc::new(HeaderInterceptor::authorization("secret"))];
        let chain = InterceptorChain::new(steps, transport.clone());

        chain.dispatch(HttpRequest::new(HttpMethod::Get, "https://x/")).unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].header("authorization"), Some("Bearer secret"));
    }
}
