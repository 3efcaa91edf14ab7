use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Filter and pagination options, kept in insertion order with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(IndexMap<String, String>);

impl Query {
    pub fn new() -> Self {
        Query(IndexMap::new())
    }

    /// Set a parameter, replacing any previous value in place
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add every missing default; keys already present keep their value
    pub fn put_if_not_set(&mut self, defaults: &[(&str, &str)]) {
        for (key, value) in defaults {
            if !self.0.contains_key(*key) {
                self.0.insert((*key).to_string(), (*value).to_string());
            }
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

/// Defaults injected into list requests
pub struct DefaultQueryParameter;

impl DefaultQueryParameter {
    /// Applied to every `fetch_all` call
    pub const FETCH: &'static [(&'static str, &'static str)] = &[("limit", "100")];
}
