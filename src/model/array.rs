use super::{CmaSystem, CmaType};
use serde::{Deserialize, Serialize};

/// Paginated envelope returned by every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmaArray<T> {
    pub sys: CmaSystem,

    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub skip: u64,

    #[serde(default)]
    pub limit: u64,

    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> CmaArray<T> {
    pub fn new(items: Vec<T>) -> Self {
        CmaArray {
            sys: CmaSystem::new(CmaType::Array),
            total: items.len() as u64,
            skip: 0,
            limit: items.len() as u64,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Whether more items exist past this page
    pub fn has_more(&self) -> bool {
        self.skip.saturating_add(self.items.len() as u64) < self.total
    }
}

impl<T> IntoIterator for CmaArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a CmaArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
