//! Validated, read-only model over a loaded index snapshot.
//!
//! `IndexModel::load` is the single ingestion boundary: it checks every
//! cross-reference invariant of the raw snapshot, normalizes the compact wire
//! encodings into uniform structures, and then never changes. A model is
//! cheaply shareable behind `Arc`; no writer exists after load, so reads need
//! no synchronization.

use crate::error::{MalformedIndex, Result};
use crate::objects::{ObjectHit, ObjectIndex, ObjectRecord};
use crate::schema::{Postings, RawIndex, RawObject};
use crate::terms::PostingMap;
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Stable integer reference to a position in the aligned
/// `docnames`/`filenames`/`titles` tables.
pub type DocHandle = usize;

/// Options controlling snapshot validation.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// When set, the snapshot's `envversion` stamp must equal this map
    /// exactly; any drift fails the load. When unset, the stamp only has to
    /// be present and non-empty.
    pub expected_envversion: Option<BTreeMap<String, u64>>,
}

/// Immutable, validated view over the five snapshot tables.
#[derive(Debug)]
pub struct IndexModel {
    docnames: Vec<String>,
    filenames: Vec<String>,
    titles: Vec<String>,
    body_terms: PostingMap,
    title_terms: PostingMap,
    objects: ObjectIndex,
    envversion: BTreeMap<String, u64>,
}

impl IndexModel {
    /// Load and validate a raw snapshot with default options.
    pub fn load(raw: RawIndex) -> Result<Self> {
        Self::load_with(raw, &LoadOptions::default())
    }

    /// Parse a JSON snapshot and load it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::load(RawIndex::from_json_str(json)?)
    }

    /// Load and validate a raw snapshot.
    ///
    /// Fails fast on any structural problem; no partially-loaded model is
    /// ever observable.
    pub fn load_with(raw: RawIndex, options: &LoadOptions) -> Result<Self> {
        let start = std::time::Instant::now();

        if raw.docnames.len() != raw.filenames.len() || raw.docnames.len() != raw.titles.len() {
            return Err(MalformedIndex::LengthMismatch {
                docnames: raw.docnames.len(),
                filenames: raw.filenames.len(),
                titles: raw.titles.len(),
            });
        }
        let count = raw.docnames.len();

        check_envversion(&raw.envversion, options)?;

        let body_terms = normalize_postings(raw.terms, "terms", count)?;
        let title_terms = normalize_postings(raw.titleterms, "titleterms", count)?;
        let objects = normalize_objects(raw.objects, &raw.objnames, count)?;

        let model = Self {
            docnames: raw.docnames,
            filenames: raw.filenames,
            titles: raw.titles,
            body_terms,
            title_terms,
            objects,
            envversion: raw.envversion,
        };

        tracing::info!(
            "Loaded search index: {} documents, {} body terms, {} title terms, {} objects in {:?}",
            model.document_count(),
            model.body_terms.term_count(),
            model.title_terms.term_count(),
            model.objects.record_count(),
            start.elapsed()
        );

        Ok(model)
    }

    /// Number of documents in the corpus.
    pub fn document_count(&self) -> usize {
        self.docnames.len()
    }

    /// Canonical identifier for a document.
    pub fn docname(&self, handle: DocHandle) -> Option<&str> {
        self.docnames.get(handle).map(String::as_str)
    }

    /// Display title for a document.
    pub fn title(&self, handle: DocHandle) -> Option<&str> {
        self.titles.get(handle).map(String::as_str)
    }

    /// On-disk/URL path for a document.
    pub fn filename(&self, handle: DocHandle) -> Option<&str> {
        self.filenames.get(handle).map(String::as_str)
    }

    /// The snapshot's opaque version stamp.
    pub fn envversion(&self) -> &BTreeMap<String, u64> {
        &self.envversion
    }

    /// Documents whose body contains `term` exactly.
    pub fn body_term_docs(&self, term: &str) -> &[DocHandle] {
        self.body_terms.docs_exact(term)
    }

    /// Documents whose title contains `term` exactly.
    pub fn title_term_docs(&self, term: &str) -> &[DocHandle] {
        self.title_terms.docs_exact(term)
    }

    /// Documents matched through the object table, case-insensitively.
    pub fn objects_matching(&self, name: &str) -> Vec<ObjectHit<'_>> {
        self.objects.matches(&name.to_lowercase())
    }

    pub(crate) fn body_terms(&self) -> &PostingMap {
        &self.body_terms
    }

    pub(crate) fn title_terms(&self) -> &PostingMap {
        &self.title_terms
    }

    pub(crate) fn object_index(&self) -> &ObjectIndex {
        &self.objects
    }
}

fn check_envversion(envversion: &BTreeMap<String, u64>, options: &LoadOptions) -> Result<()> {
    if envversion.is_empty() {
        return Err(MalformedIndex::MissingEnvVersion);
    }
    let Some(expected) = &options.expected_envversion else {
        return Ok(());
    };

    for component in expected.keys().chain(envversion.keys()) {
        let want = expected.get(component).copied();
        let found = envversion.get(component).copied();
        if want != found {
            return Err(MalformedIndex::IncompatibleEnvVersion {
                component: component.clone(),
                found,
                expected: want,
            });
        }
    }
    Ok(())
}

/// Normalize scalar-or-list postings into uniform posting lists, lowercasing
/// term keys and validating every referenced handle.
fn normalize_postings(
    raw: BTreeMap<String, Postings>,
    table: &'static str,
    count: usize,
) -> Result<PostingMap> {
    let mut postings: AHashMap<String, Vec<DocHandle>> = AHashMap::with_capacity(raw.len());

    for (term, encoded) in raw {
        let docs = encoded.into_vec();
        if docs.is_empty() {
            return Err(MalformedIndex::EmptyPostings(term));
        }
        for &handle in &docs {
            if handle >= count {
                return Err(MalformedIndex::HandleOutOfRange {
                    table,
                    key: term,
                    handle,
                    count,
                });
            }
        }
        // Terms are expected to arrive case-normalized; enforce it anyway and
        // merge any duplicates that fold together.
        postings.entry(term.to_lowercase()).or_default().extend(docs);
    }

    Ok(PostingMap::new(postings))
}

/// Flatten and validate the namespace → rows object table.
///
/// Rows with a negative priority are deliberately unsearchable and are
/// dropped here, after validation.
fn normalize_objects(
    raw: BTreeMap<String, Vec<RawObject>>,
    objnames: &BTreeMap<String, (String, String, String)>,
    count: usize,
) -> Result<ObjectIndex> {
    let mut records = Vec::new();

    for (namespace, rows) in raw {
        for RawObject(short_name, doc, type_id, priority, anchor) in rows {
            let full_name = if namespace.is_empty() {
                short_name.clone()
            } else {
                format!("{namespace}.{short_name}")
            };
            if doc >= count {
                return Err(MalformedIndex::HandleOutOfRange {
                    table: "objects",
                    key: full_name,
                    handle: doc,
                    count,
                });
            }
            let Some((_, _, label)) = objnames.get(&type_id.to_string()) else {
                return Err(MalformedIndex::UnknownObjectType {
                    name: full_name,
                    type_id,
                });
            };
            if priority < 0 {
                continue;
            }
            records.push(ObjectRecord {
                namespace: namespace.clone(),
                short_name,
                type_id,
                label: label.clone(),
                priority,
                doc,
                anchor,
            });
        }
    }

    Ok(ObjectIndex::new(records))
}
