//! Client-side query engine for static documentation search indexes.
//!
//! A documentation build emits a precomputed search snapshot: aligned
//! `docnames`/`filenames`/`titles` tables, inverted body and title term
//! indexes, and an API-object table. This crate loads that snapshot once
//! into an immutable [`IndexModel`] and answers free-text queries through a
//! [`SearchEngine`]: tokenize, look up terms and objects, rank with
//! title > object > body weighting under AND semantics, and return an
//! ordered, deterministic result list.
//!
//! ```no_run
//! use docsearch::{IndexModel, SearchEngine};
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("searchindex.json")?;
//! let model = IndexModel::from_json_str(&json)?;
//! let engine = SearchEngine::new(Arc::new(model));
//! for hit in engine.search("hazard analysis") {
//!     println!("{:.1}  {}  ({})", hit.score, hit.title, hit.filename);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod index;
pub mod objects;
pub mod query;
pub mod schema;
pub mod scoring;
pub(crate) mod terms;
pub mod tokenize;
pub mod trace;

pub use error::{MalformedIndex, Result};
pub use index::{DocHandle, IndexModel, LoadOptions};
pub use objects::{ObjectHit, ObjectMatch, ObjectRecord};
pub use query::{SearchEngine, SearchHit, SearchTicket};
pub use schema::RawIndex;
pub use scoring::ScoreWeights;
pub use tokenize::{Tokenizer, TokenizerConfig};
