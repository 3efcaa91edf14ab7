use crate::callback::AsyncBridge;
use crate::error::{CmaError, Result};
use crate::executor::{Executor, ThreadPool};
use crate::http::{ReqwestTransport, Transport};
use crate::interceptor::{ContentTypeInterceptor, HeaderInterceptor, Interceptor, InterceptorChain};
use crate::logging::{LogInterceptor, LogLevel};
use crate::modules::{
    ModuleApiKeys, ModuleContext, ModuleEntries, ModulePersonalAccessTokens, ModuleSpaces, ModuleTags,
};
use crate::rest::RestContext;
use reqwest::blocking::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Create the HTTP client used by the default transport
/// with connection pooling and the configured timeouts
pub fn create_rest_client(config: &Config) -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|e| CmaError::RequestBuild(format!("failed to create HTTP client: {}", e)))
}

/// Value of the `X-Contentful-User-Agent` header
pub fn sdk_user_agent() -> String {
    format!(
        "sdk contentful-cma-rs/{}; platform Rust; os {};",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

/// Configuration for the CMA client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
    /// Space used by calls that do not name one
    pub space_id: Option<String>,
    /// Environment used by calls that do not name one
    pub environment_id: Option<String>,
    /// Management token sent as a bearer token
    pub access_token: Option<String>,
    /// Request/response trace verbosity
    pub log_level: LogLevel,
    /// Total timeout of one request
    pub timeout: Duration,
    /// Connect timeout of one request
    pub connect_timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "api.contentful.com".to_string(),
            space_id: None,
            environment_id: Some("master".to_string()),
            access_token: None,
            log_level: LogLevel::None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("contentful-cma-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: String, host: String) -> Self {
        Config {
            scheme,
            host,
            ..Config::default()
        }
    }

    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.space_id = Some(space_id.into());
        self
    }

    pub fn with_environment_id(mut self, environment_id: impl Into<String>) -> Self {
        self.environment_id = Some(environment_id.into());
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Entry point to every resource module.
///
/// Cheap to clone; all clones share one transport, interceptor chain and
/// pair of execution contexts.
#[derive(Debug, Clone)]
pub struct CmaClient {
    spaces: ModuleSpaces,
    tags: ModuleTags,
    personal_access_tokens: ModulePersonalAccessTokens,
    api_keys: ModuleApiKeys,
    entries: ModuleEntries,
}

impl CmaClient {
    pub fn builder() -> CmaClientBuilder {
        CmaClientBuilder::new()
    }

    pub fn spaces(&self) -> &ModuleSpaces {
        &self.spaces
    }

    pub fn tags(&self) -> &ModuleTags {
        &self.tags
    }

    pub fn personal_access_tokens(&self) -> &ModulePersonalAccessTokens {
        &self.personal_access_tokens
    }

    pub fn api_keys(&self) -> &ModuleApiKeys {
        &self.api_keys
    }

    pub fn entries(&self) -> &ModuleEntries {
        &self.entries
    }
}

/// Builder for [`CmaClient`]
#[derive(Default)]
pub struct CmaClientBuilder {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    background: Option<Arc<dyn Executor>>,
    callback: Option<Arc<dyn Executor>>,
}

impl CmaClientBuilder {
    pub fn new() -> Self {
        CmaClientBuilder::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.config.access_token = Some(access_token.into());
        self
    }

    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.config.space_id = Some(space_id.into());
        self
    }

    pub fn with_environment_id(mut self, environment_id: impl Into<String>) -> Self {
        self.config.environment_id = Some(environment_id.into());
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.config.log_level = log_level;
        self
    }

    /// Send requests through `transport` instead of the default reqwest client
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append an interceptor; it runs after the authorization and user agent
    /// steps and before the content type and logging steps
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Context running the blocking network calls of async operations
    pub fn with_background_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.background = Some(executor);
        self
    }

    /// Context delivering async results to callbacks.
    ///
    /// Defaults to a dedicated single-thread pool named `cma-callback`, so
    /// callbacks never run on the background threads. Pass a `CallbackQueue`
    /// and drain it to receive results on your own thread instead.
    pub fn with_callback_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.callback = Some(executor);
        self
    }

    pub fn build(self) -> Result<CmaClient> {
        let config = self.config;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(create_rest_client(&config)?)),
        };

        let mut interceptors: Vec<Arc<dyn Interceptor>> = Vec::new();
        if let Some(ref token) = config.access_token {
            interceptors.push(Arc::new(HeaderInterceptor::authorization(token)));
        }
        interceptors.push(Arc::new(HeaderInterceptor::new("User-Agent", config.user_agent.as_str())));
        interceptors.push(Arc::new(HeaderInterceptor::new("X-Contentful-User-Agent", sdk_user_agent())));
        interceptors.extend(self.interceptors);
        interceptors.push(Arc::new(ContentTypeInterceptor::cma()));
        interceptors.push(Arc::new(LogInterceptor::new(config.log_level)));

        let background: Arc<dyn Executor> = match self.background {
            Some(executor) => executor,
            None => Arc::new(ThreadPool::with_default_size("cma-background")?),
        };
        let callback: Arc<dyn Executor> = match self.callback {
            Some(executor) => executor,
            None => Arc::new(ThreadPool::new("cma-callback", 1)?),
        };

        let ctx = Arc::new(ModuleContext {
            space_id: config.space_id.clone(),
            environment_id: config.environment_id.clone(),
            rest: RestContext::new(config, InterceptorChain::new(interceptors, transport)),
            bridge: AsyncBridge::new(background, callback),
        });

        Ok(CmaClient {
            spaces: ModuleSpaces::new(ctx.clone()),
            tags: ModuleTags::new(ctx.clone()),
            personal_access_tokens: ModulePersonalAccessTokens::new(ctx.clone()),
            api_keys: ModuleApiKeys::new(ctx.clone()),
            entries: ModuleEntries::new(ctx),
        })
    }
}

impl std::fmt::Debug for CmaClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmaClientBuilder")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
