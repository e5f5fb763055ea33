//! The query engine façade: tokenize → lookup → score → sort.
//!
//! A [`SearchEngine`] is a pure function of `(IndexModel, query text)` plus a
//! single atomic generation counter used for supersession: when the host
//! dispatches searches asynchronously (debounced keystrokes), issuing a new
//! query invalidates any still-undelivered older one, so stale results are
//! never observable.

use crate::index::{DocHandle, IndexModel};
use crate::scoring::{self, ScoreWeights};
use crate::tokenize::Tokenizer;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// One ranked search result with enough context to render a results page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc: DocHandle,
    pub docname: String,
    pub title: String,
    pub filename: String,
    pub score: f64,
}

/// Claim on a search issued via [`SearchEngine::begin`]. A ticket is stale
/// once any newer ticket has been issued on the same engine.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// The single public entry point for querying a loaded index.
#[derive(Debug)]
pub struct SearchEngine {
    model: Arc<IndexModel>,
    tokenizer: Tokenizer,
    weights: ScoreWeights,
    generation: AtomicU64,
}

impl SearchEngine {
    /// Engine with default tokenizer rules and score weights.
    pub fn new(model: Arc<IndexModel>) -> Self {
        Self::with_config(model, Tokenizer::new(), ScoreWeights::default())
    }

    pub fn with_config(model: Arc<IndexModel>, tokenizer: Tokenizer, weights: ScoreWeights) -> Self {
        Self {
            model,
            tokenizer,
            weights,
            generation: AtomicU64::new(0),
        }
    }

    /// The loaded index this engine serves.
    pub fn model(&self) -> &IndexModel {
        &self.model
    }

    /// Execute a search synchronously and deliver its results.
    ///
    /// Every invocation supersedes all outstanding tickets, so mixing plain
    /// searches with [`begin`](Self::begin)/[`run`](Self::run) can never
    /// deliver a stale ticket afterwards. An empty or all-stop-word query
    /// returns an empty list; so does a query where some token matches no
    /// document. Ordering is descending score, ties broken by ascending
    /// document handle.
    pub fn search(&self, text: &str) -> Vec<SearchHit> {
        let ticket = self.begin(text);
        self.execute(ticket.query())
    }

    /// Issue a search ticket, superseding every ticket issued before it.
    pub fn begin(&self, text: &str) -> SearchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket {
            generation,
            query: text.to_string(),
        }
    }

    /// Run a ticketed search, delivering results only if the ticket is still
    /// the newest one. A superseded ticket yields `None` even when the
    /// computation itself would have succeeded.
    pub fn run(&self, ticket: &SearchTicket) -> Option<Vec<SearchHit>> {
        if self.is_stale(ticket) {
            return None;
        }
        let results = self.execute(&ticket.query);
        // A newer query may have been issued while this one computed.
        if self.is_stale(ticket) {
            return None;
        }
        Some(results)
    }

    /// Whether a newer ticket has been issued since this one.
    pub fn is_stale(&self, ticket: &SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) != ticket.generation
    }

    fn execute(&self, text: &str) -> Vec<SearchHit> {
        let start = std::time::Instant::now();
        let tokens = self.tokenizer.tokenize(text);
        if tokens.is_empty() {
            tracing::trace!("query '{}' tokenized to nothing", text);
            return Vec::new();
        }

        let ranked = scoring::rank(&self.model, &tokens, &self.weights);
        let hits: Vec<SearchHit> = ranked
            .into_iter()
            .map(|(doc, score)| SearchHit {
                doc,
                docname: self.model.docname(doc).unwrap_or_default().to_string(),
                title: self.model.title(doc).unwrap_or_default().to_string(),
                filename: self.model.filename(doc).unwrap_or_default().to_string(),
                score,
            })
            .collect();

        tracing::debug!(
            "query '{}': {} tokens, {} hits in {:?}",
            text,
            tokens.len(),
            hits.len(),
            start.elapsed()
        );
        hits
    }
}
