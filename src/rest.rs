use crate::client::Config;
use crate::endpoint::Endpoint;
use crate::error::{CmaError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::interceptor::InterceptorChain;
use serde::de::DeserializeOwned;

/// Response header carrying the server-side request id
pub const REQUEST_ID_HEADER: &str = "X-Contentful-Request-Id";

/// Executes endpoints through the interceptor chain and blocks until the
/// single decoded value, or a normalized error, is available.
#[derive(Clone)]
pub struct RestContext {
    /// Configuration
    pub config: Config,
    chain: InterceptorChain,
}

impl RestContext {
    pub fn new(config: Config, chain: InterceptorChain) -> Self {
        RestContext { config, chain }
    }

    /// Execute an endpoint and decode the response body into `T`
    ///
    /// # Errors
    /// * `Transport` if no response was received
    /// * `Api` for any non-2xx status
    /// * `Decode` if the body is empty or not shaped like `T`
    pub fn execute<T>(&self, endpoint: Endpoint<T>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(endpoint)?;

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Err(CmaError::Decode {
                source: <serde_json::Error as serde::de::Error>::custom("response contained no value"),
                body: String::new(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| CmaError::Decode {
            source,
            body: String::from_utf8_lossy(&response.body).to_string(),
        })
    }

    /// Execute an endpoint whose response carries no resource, returning the status code
    pub fn execute_status<T>(&self, endpoint: Endpoint<T>) -> Result<u16> {
        self.send(endpoint).map(|response| response.status)
    }

    /// Build the request, dispatch it and turn non-2xx answers into errors
    fn send<T>(&self, endpoint: Endpoint<T>) -> Result<HttpResponse> {
        let url = endpoint.url(&self.config.base_url())?;

        let mut request = HttpRequest::new(endpoint.method, url.as_str());
        for (name, value) in endpoint.headers {
            request.set_header(name, value);
        }
        request.body = endpoint.body;

        let response = self.chain.dispatch(request)?;

        if !response.is_success() {
            let request_id = response.header(REQUEST_ID_HEADER).map(str::to_string);
            return Err(CmaError::from_status(response.status, &response.body, request_id));
        }

        Ok(response)
    }
}

impl std::fmt::Debug for RestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestContext")
            .field("config", &self.config)
            .field("interceptors", &self.chain.len())
            .finish()
    }
}
