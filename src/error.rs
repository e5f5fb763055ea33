//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for index loading.
///
/// Per-query conditions (empty query, no matches, superseded search) are plain
/// return values, never errors; only structural load failures surface here.
pub type Result<T, E = MalformedIndex> = std::result::Result<T, E>;

/// Structural validation failure while loading an index snapshot.
///
/// Any of these is fatal to the engine instance: no partial model is ever
/// constructed, and the host should present a "search unavailable" state
/// rather than an empty result list.
#[derive(Debug, Error)]
pub enum MalformedIndex {
    /// The snapshot could not be deserialized (missing field, wrong shape).
    #[error("failed to parse index snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// The aligned document tables disagree on length.
    #[error(
        "aligned tables disagree on length: {docnames} docnames, {filenames} filenames, {titles} titles"
    )]
    LengthMismatch {
        docnames: usize,
        filenames: usize,
        titles: usize,
    },

    /// A posting or object row references a document that does not exist.
    #[error("{table} entry '{key}' references document {handle}, but only {count} documents exist")]
    HandleOutOfRange {
        table: &'static str,
        key: String,
        handle: usize,
        count: usize,
    },

    /// A term maps to an empty posting list.
    #[error("term '{0}' has no postings")]
    EmptyPostings(String),

    /// An object row uses a type id absent from the `objnames` side-table.
    #[error("object '{name}' uses unknown object type id {type_id}")]
    UnknownObjectType { name: String, type_id: usize },

    /// The snapshot carries no `envversion` stamp at all.
    #[error("index snapshot carries an empty envversion stamp")]
    MissingEnvVersion,

    /// The snapshot's `envversion` stamp differs from what the host expects.
    #[error(
        "envversion mismatch for '{component}': snapshot has {found:?}, host expects {expected:?}"
    )]
    IncompatibleEnvVersion {
        component: String,
        found: Option<u64>,
        expected: Option<u64>,
    },
}
