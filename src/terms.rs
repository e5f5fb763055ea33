//! Exact and prefix term lookup over normalized posting lists.

use crate::index::DocHandle;
use ahash::AHashMap;

/// A term → documents mapping with support for prefix scans.
///
/// Posting lists are sorted and deduplicated at construction; keys are kept
/// in a parallel sorted vector so a prefix scan is a binary search plus a
/// bounded walk rather than a full-map sweep.
#[derive(Debug)]
pub(crate) struct PostingMap {
    postings: AHashMap<String, Vec<DocHandle>>,
    sorted_keys: Vec<String>,
}

impl PostingMap {
    pub(crate) fn new(mut postings: AHashMap<String, Vec<DocHandle>>) -> Self {
        for docs in postings.values_mut() {
            docs.sort_unstable();
            docs.dedup();
        }
        let mut sorted_keys: Vec<String> = postings.keys().cloned().collect();
        sorted_keys.sort_unstable();
        Self {
            postings,
            sorted_keys,
        }
    }

    /// Number of distinct terms.
    pub(crate) fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Documents containing exactly `token`. A miss is an empty slice, not an
    /// error.
    pub(crate) fn docs_exact(&self, token: &str) -> &[DocHandle] {
        match self.postings.get(token) {
            Some(docs) => docs,
            None => &[],
        }
    }

    /// Union of documents over every indexed term starting with `prefix`,
    /// sorted and deduplicated.
    pub(crate) fn docs_with_prefix(&self, prefix: &str) -> Vec<DocHandle> {
        let start = self
            .sorted_keys
            .partition_point(|key| key.as_str() < prefix);

        let mut docs: Vec<DocHandle> = Vec::new();
        for key in &self.sorted_keys[start..] {
            if !key.starts_with(prefix) {
                break;
            }
            docs.extend_from_slice(&self.postings[key]);
        }
        docs.sort_unstable();
        docs.dedup();
        docs
    }
}
