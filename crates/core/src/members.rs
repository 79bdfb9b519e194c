//! Exact-value membership sets for the `users` arrays on projects and tasks.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::types::DocKey;

/// An insertion-ordered set of user keys.
///
/// Serialized as a plain JSON array. Membership is decided by key equality,
/// so `"bob"` is never considered present because `"bobby"` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberSet(IndexSet<DocKey>);

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Add a key. Returns `false` if it was already a member.
    pub fn insert(&mut self, key: impl Into<DocKey>) -> bool {
        self.0.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocKey> {
        self.0.iter()
    }
}

impl<K: Into<DocKey>> FromIterator<K> for MemberSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a MemberSet {
    type Item = &'a DocKey;
    type IntoIter = indexmap::set::Iter<'a, DocKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
