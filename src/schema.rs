//! Wire schema for the index snapshot produced by the external index builder.
//!
//! These types mirror the compact on-disk encoding exactly as emitted; they
//! exist only at the ingestion boundary. All shape quirks of the format (a
//! term with a single posting stored as a bare handle, object rows as
//! positional tuples) are normalized away by [`crate::index::IndexModel::load`]
//! so the rest of the engine never branches on encoding.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Posting lists as encoded on the wire: a term referencing a single document
/// may be stored as a bare handle instead of a singleton list. Both forms
/// mean the same thing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Postings {
    One(usize),
    Many(Vec<usize>),
}

impl Postings {
    /// Normalize into a plain list of document handles.
    pub fn into_vec(self) -> Vec<usize> {
        match self {
            Self::One(handle) => vec![handle],
            Self::Many(handles) => handles,
        }
    }
}

/// One row of the `objects` table:
/// `(shortName, documentHandle, objectTypeId, priority, anchor)`.
///
/// The anchor is the URL fragment a renderer appends to the document's
/// filename to deep-link the symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObject(pub String, pub usize, pub usize, pub i64, pub String);

/// The raw index snapshot, exactly as the external builder emits it.
///
/// Field alignment and handle validity are *not* guaranteed at this layer;
/// loading into an [`crate::index::IndexModel`] performs all validation.
/// Unknown extra fields are ignored so newer builders remain loadable.
#[derive(Debug, Deserialize)]
pub struct RawIndex {
    /// Canonical document identifiers; position is the document handle.
    pub docnames: Vec<String>,
    /// On-disk/URL path per document, aligned with `docnames`.
    pub filenames: Vec<String>,
    /// Display title per document, aligned with `docnames`.
    pub titles: Vec<String>,
    /// Body-term postings.
    pub terms: BTreeMap<String, Postings>,
    /// Title-term postings, same shape as `terms`.
    pub titleterms: BTreeMap<String, Postings>,
    /// Namespace → object rows. An empty namespace key holds top-level symbols.
    pub objects: BTreeMap<String, Vec<RawObject>>,
    /// Object type id → `(domain, role)`.
    pub objtypes: BTreeMap<String, (String, String)>,
    /// Object type id → `(domain, role, displayLabel)`.
    pub objnames: BTreeMap<String, (String, String, String)>,
    /// Opaque version/config stamp: sub-component name → schema version.
    pub envversion: BTreeMap<String, u64>,
}

impl RawIndex {
    /// Parse a snapshot from its JSON serialization.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
