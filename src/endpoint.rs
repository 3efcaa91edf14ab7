//! Declarative description of one API operation.

use crate::error::{CmaError, Result};
use crate::http::{HttpMethod, RequestBody};
use crate::query::Query;
use serde::Serialize;
use std::marker::PhantomData;
use url::Url;

/// Method, path, parameters and body of one call, typed by what it returns.
///
/// Path segments are percent-encoded when the URL is built, so ids can be
/// passed through verbatim.
#[derive(Debug, Clone)]
pub struct Endpoint<T> {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub query: Query,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    returns: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    pub fn new<I, S>(method: HttpMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Endpoint {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Query::new(),
            headers: Vec::new(),
            body: None,
            returns: PhantomData,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Get, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Post, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Put, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(HttpMethod::Delete, segments)
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.headers.push((name.into(), value.to_string()));
        self
    }

    /// Serialize `body` as the JSON request payload
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(RequestBody::json(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Serialize `body` without its top-level `sys` block.
    ///
    /// Update payloads must not carry `sys`; the version travels in a header.
    pub fn json_without_sys<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let mut value = serde_json::to_value(body)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("sys");
        }
        self.body = Some(RequestBody::json(serde_json::to_vec(&value)?));
        Ok(self)
    }

    /// Path relative to the base URL, e.g. `/spaces/abc/environments/master/tags`
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    /// Resolve against `base_url` with encoded segments and query
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let mut url = Url::parse(base_url)?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CmaError::RequestBuild(format!("base url cannot be a base: {}", base_url)))?;
            segments.pop_if_empty();
            for segment in &self.segments {
                segments.push(segment);
            }
        }

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.query.iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}
