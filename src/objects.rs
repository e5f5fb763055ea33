//! API-object (symbol) lookup.
//!
//! The snapshot's compact object rows are normalized into [`ObjectRecord`]s
//! at load time; this module answers "which documents define a symbol
//! matching this token" with a match tier the scorer turns into a weight.

use crate::index::DocHandle;
use ahash::AHashMap;

/// A normalized entry from the snapshot's `objects` table.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    /// Enclosing namespace; empty for top-level symbols.
    pub namespace: String,
    /// The symbol's own name, without namespace.
    pub short_name: String,
    /// Type id into the snapshot's `objnames` side-table.
    pub type_id: usize,
    /// Human-readable label resolved from `objnames` (e.g. "Python class").
    pub label: String,
    /// Display priority from the builder: 0 boosts, 1 is neutral, 2 demotes.
    /// Negative priorities are excluded from search at load time.
    pub priority: i64,
    /// Target document.
    pub doc: DocHandle,
    /// URL fragment for deep-linking the symbol within the document.
    pub anchor: String,
}

impl ObjectRecord {
    /// The dotted full path, `namespace.shortName` (or just the short name
    /// for top-level symbols).
    pub fn full_path(&self) -> String {
        if self.namespace.is_empty() {
            self.short_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.short_name)
        }
    }
}

/// How a query token matched an object, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMatch {
    /// Token equals the dotted full path.
    FullPath,
    /// Token equals the short name.
    ShortName,
    /// Token occurs somewhere inside the full path.
    Partial,
}

impl ObjectMatch {
    fn strength(self) -> u8 {
        match self {
            Self::FullPath => 2,
            Self::ShortName => 1,
            Self::Partial => 0,
        }
    }
}

/// One document matched through the object table.
#[derive(Debug, Clone)]
pub struct ObjectHit<'a> {
    pub doc: DocHandle,
    pub kind: ObjectMatch,
    pub record: &'a ObjectRecord,
}

/// Lookup structure over all searchable object records.
#[derive(Debug, Default)]
pub(crate) struct ObjectIndex {
    records: Vec<ObjectRecord>,
    /// Lowercased full path per record, aligned with `records`.
    full_lower: Vec<String>,
    /// Lowercased short name per record, aligned with `records`.
    short_lower: Vec<String>,
}

impl ObjectIndex {
    pub(crate) fn new(records: Vec<ObjectRecord>) -> Self {
        let full_lower = records.iter().map(|r| r.full_path().to_lowercase()).collect();
        let short_lower = records.iter().map(|r| r.short_name.to_lowercase()).collect();
        Self {
            records,
            full_lower,
            short_lower,
        }
    }

    pub(crate) fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Resolve a lowercased token against every record, case-insensitively.
    ///
    /// Multiple objects resolving to the same document are combined by
    /// keeping the strongest match (never summed), so symbol-dense documents
    /// are not over-rewarded. Ties prefer the lower priority value, then the
    /// earlier record. Output is sorted by document handle.
    pub(crate) fn matches(&self, token: &str) -> Vec<ObjectHit<'_>> {
        let mut best: AHashMap<DocHandle, ObjectHit<'_>> = AHashMap::new();

        for (i, record) in self.records.iter().enumerate() {
            let kind = if token == self.full_lower[i] {
                ObjectMatch::FullPath
            } else if token == self.short_lower[i] {
                ObjectMatch::ShortName
            } else if self.full_lower[i].contains(token) {
                ObjectMatch::Partial
            } else {
                continue;
            };

            let replace = best.get(&record.doc).is_none_or(|existing| {
                (existing.kind.strength(), -existing.record.priority)
                    < (kind.strength(), -record.priority)
            });
            if replace {
                best.insert(
                    record.doc,
                    ObjectHit {
                        doc: record.doc,
                        kind,
                        record,
                    },
                );
            }
        }

        let mut hits: Vec<ObjectHit<'_>> = best.into_values().collect();
        hits.sort_by_key(|hit| hit.doc);
        hits
    }
}
