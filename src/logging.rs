use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::interceptor::{Chain, Interceptor};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Verbosity of request/response tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Do not log anything
    #[default]
    None,
    /// One line per call with method, url, status and duration
    Basic,
    /// Basic plus headers and bodies
    Full,
}

/// Emits `tracing` events for every call passing through the chain
#[derive(Debug, Clone, Copy)]
pub struct LogInterceptor {
    level: LogLevel,
}

impl LogInterceptor {
    pub fn new(level: LogLevel) -> Self {
        LogInterceptor { level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl Interceptor for LogInterceptor {
    fn intercept(&self, request: HttpRequest, chain: Chain<'_>) -> Result<HttpResponse> {
        if self.level == LogLevel::None {
            return chain.proceed(request);
        }

        let method = request.method;
        let url = request.url.clone();

        if self.level == LogLevel::Full {
            for (name, value) in &request.headers {
                let value = if name.eq_ignore_ascii_case("Authorization") {
                    "<redacted>"
                } else {
                    value.as_str()
                };
                trace!(%method, %url, header = %name, value, "request header");
            }
            if let Some(ref body) = request.body {
                trace!(
                    %method,
                    %url,
                    media_type = %body.media_type,
                    body = %String::from_utf8_lossy(&body.bytes),
                    "request body"
                );
            }
        }

        let start = Instant::now();
        let result = chain.proceed(request);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                debug!(%method, %url, status = response.status, elapsed_ms, "request completed");
                if self.level == LogLevel::Full {
                    trace!(
                        %method,
                        %url,
                        body = %String::from_utf8_lossy(&response.body),
                        "response body"
                    );
                }
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, elapsed_ms, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CmaError;
    use crate::http::{HttpMethod, RequestBody, Transport};
    use crate::interceptor::InterceptorChain;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    struct Fixed(u16);

    impl Transport for Fixed {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse> {
            Ok(HttpResponse::new(self.0, b"{}".to_vec()))
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse> {
            Err(CmaError::transport("connection refused"))
        }
    }

    #[test]
    fn test_log_interceptor_passes_response_through() {
        for level in [LogLevel::None, LogLevel::Basic, LogLevel::Full] {
            let steps: Vec<Arc<dyn Interceptor>> = vec![Arc::new(LogInterceptor::new(level))];
            let chain = InterceptorChain::new(steps, Arc::new(Fixed(201)));
            let response = chain.dispatch(HttpRequest::new(HttpMethod::Get, "https://x/")).unwrap();
            assert_eq!(response.status, 201);
        }
    }

    #[test]
    fn test_log_interceptor_passes_error_through() {
        let steps: Vec<Arc<dyn Interceptor>> = vec![Arc::new(LogInterceptor::new(LogLevel::Basic))];
        let chain = InterceptorChain::new(steps, Arc::new(Unreachable));
        let err = chain.dispatch(HttpRequest::new(HttpMethod::Get, "https://x/")).unwrap_err();
        assert!(matches!(err, CmaError::Transport { .. }));
    }

    /// Layer recording the level and rendered fields of every event
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<(Level, String)>>>);

    struct FieldText(String);

    impl Visit for FieldText {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.push_str(&format!("{}={:?} ", field.name(), value));
        }
    }

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut text = FieldText(String::new());
            event.record(&mut text);
            self.0.lock().unwrap().push((*event.metadata().level(), text.0));
        }
    }

    fn events_for(level: LogLevel, transport: Arc<dyn Transport>) -> Vec<(Level, String)> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            let steps: Vec<Arc<dyn Interceptor>> = vec![Arc::new(LogInterceptor::new(level))];
            let chain = InterceptorChain::new(steps, transport);

            let mut request = HttpRequest::new(HttpMethod::Post, "https://x/spaces");
            request.set_header("Authorization", "Bearer secret-token");
            request.body = Some(RequestBody::json(br#"{"name":"n"}"#.to_vec()));
            let _ = chain.dispatch(request);
        });

        let events = captured.0.lock().unwrap().clone();
        events
    }

    fn count(events: &[(Level, String)], level: Level) -> usize {
        events.iter().filter(|(l, _)| *l == level).count()
    }

    #[test]
    fn test_level_none_emits_nothing() {
        assert!(events_for(LogLevel::None, Arc::new(Fixed(200))).is_empty());
        assert!(events_for(LogLevel::None, Arc::new(Unreachable)).is_empty());
    }

    #[test]
    fn test_level_basic_emits_one_line_per_call() {
        let events = events_for(LogLevel::Basic, Arc::new(Fixed(200)));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, Level::DEBUG);
        assert!(events[0].1.contains("status=200"));

        let events = events_for(LogLevel::Basic, Arc::new(Unreachable));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, Level::WARN);
    }

    #[test]
    fn test_level_full_redacts_authorization() {
        let events = events_for(LogLevel::Full, Arc::new(Fixed(200)));

        assert_eq!(count(&events, Level::DEBUG), 1);
        // one header, the request body and the response body
        assert_eq!(count(&events, Level::TRACE), 3);
        assert!(events.iter().all(|(_, text)| !text.contains("secret-token")));
        assert!(events.iter().any(|(_, text)| text.contains("<redacted>")));
        assert!(events.iter().any(|(_, text)| text.contains(r#"{"name":"n"}"#)));
    }

    #[test]
    fn test_default_level_is_none() {
        assert_eq!(LogLevel::default(), LogLevel::None);
    }
}
