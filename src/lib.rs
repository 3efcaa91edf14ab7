//! # contentful-cma - Contentful Content Management API client
//!
//! A typed Rust client for the Contentful Content Management API (CMA).
//! Every resource family is a module on [`CmaClient`] offering blocking
//! calls and an async counterpart that reports through a [`Callback`].
//!
//! ## Features
//!
//! - Typed models for spaces, tags, entries, API keys and personal access tokens
//! - Request pipeline of interceptors ahead of a pluggable [`Transport`]
//! - Errors classified by kind, carrying the decoded API error body
//! - Async calls run on a background executor, results delivered on a
//!   separate callback executor
//!
//! ## Basic Usage
//!
//! ```no_run
//! use contentful_cma::{CmaClient, Query};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CmaClient::builder()
//!         .with_access_token("CFPAT-...")
//!         .with_space_id("cfexampleapi")
//!         .build()?;
//!
//!     let tags = client.tags().fetch_all_configured()?;
//!     for tag in &tags {
//!         println!("{:?}", tag.name);
//!     }
//!
//!     let spaces = client.spaces().fetch_all_with(Query::new().with("limit", 5))?;
//!     println!("{} spaces", spaces.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Async Calls
//!
//! ```no_run
//! use contentful_cma::{CmaClient, CmaSpace, Result};
//!
//! let client = CmaClient::builder().with_access_token("CFPAT-...").build()?;
//!
//! let handle = client.spaces().async_api().fetch_one("cfexampleapi", |result: Result<CmaSpace>| {
//!     match result {
//!         Ok(space) => println!("space {:?}", space.name),
//!         Err(e) => eprintln!("failed: {}", e),
//!     }
//! });
//! handle.wait_timeout(std::time::Duration::from_secs(10));
//! # Ok::<(), contentful_cma::CmaError>(())
//! ```

pub mod callback;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod http;
pub mod interceptor;
pub mod logging;
pub mod model;
pub mod modules;
pub mod query;
pub mod response;
pub mod rest;
pub mod time;

// Re-export main types for convenience
pub use callback::{AsyncBridge, CallHandle, Callback};
pub use client::{CmaClient, CmaClientBuilder, Config};
pub use error::{CmaError, ErrorKind, Result};
#[cfg(feature = "async")]
pub use executor::TokioExecutor;
pub use executor::{CallbackQueue, Executor, SynchronousExecutor, ThreadPool};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
pub use interceptor::{Chain, ContentTypeInterceptor, HeaderInterceptor, Interceptor};
pub use logging::LogLevel;
pub use model::*;
pub use modules::{
    AsyncApiKeys, AsyncEntries, AsyncPersonalAccessTokens, AsyncSpaces, AsyncTags, ModuleApiKeys, ModuleEntries,
    ModulePersonalAccessTokens, ModuleSpaces, ModuleTags,
};
pub use query::{DefaultQueryParameter, Query};
pub use response::ApiErrorBody;
pub use time::Time;

// Re-export serde_json for convenience
pub use serde_json::json;
