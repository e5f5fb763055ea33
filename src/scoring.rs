//! Relevance weights and result ranking.
//!
//! Matching is conjunctive: a document qualifies only if every distinct query
//! token matches it through at least one of title terms, object names, or
//! body terms. Per token a document earns the *maximum* weight among the
//! categories it matched in; the document's score is the sum over tokens.

use crate::index::{DocHandle, IndexModel};
use crate::objects::{ObjectHit, ObjectMatch};
use ahash::AHashMap;

/// Per-category score weights.
///
/// The defaults encode the required ordering: a title match outranks any
/// object match, which outranks a body match. The strongest object score
/// (full-path match plus the priority boost) stays below the title weight.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Token found in a document's title terms.
    pub title: f64,
    /// Final-token prefix match against title terms.
    pub title_prefix: f64,
    /// Token equals an object's dotted full path.
    pub object_full: f64,
    /// Token equals an object's short name.
    pub object_short: f64,
    /// Token found inside an object's full path.
    pub object_partial: f64,
    /// Added for priority-0 objects, subtracted for priority >= 2.
    pub object_priority_boost: f64,
    /// Token found in a document's body terms.
    pub body: f64,
    /// Final-token prefix match against body terms.
    pub body_prefix: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            title: 15.0,
            title_prefix: 7.0,
            object_full: 12.0,
            object_short: 11.0,
            object_partial: 6.0,
            object_priority_boost: 2.0,
            body: 5.0,
            body_prefix: 2.0,
        }
    }
}

impl ScoreWeights {
    /// Weight contributed by a single object hit.
    pub(crate) fn object_score(&self, hit: &ObjectHit<'_>) -> f64 {
        let base = match hit.kind {
            ObjectMatch::FullPath => self.object_full,
            ObjectMatch::ShortName => self.object_short,
            ObjectMatch::Partial => self.object_partial,
        };
        match hit.record.priority {
            0 => base + self.object_priority_boost,
            1 => base,
            _ => base - self.object_priority_boost,
        }
    }
}

/// Rank documents for an already-tokenized query.
///
/// Tokens are deduplicated for AND-matching; prefix broadening is keyed off
/// the query's final token. Ordering is descending score with ties broken by
/// ascending document handle, so output is deterministic across runs.
pub(crate) fn rank(
    model: &IndexModel,
    tokens: &[String],
    weights: &ScoreWeights,
) -> Vec<(DocHandle, f64)> {
    let Some(final_token) = tokens.last() else {
        return Vec::new();
    };

    let mut unique: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !unique.contains(&token.as_str()) {
            unique.push(token.as_str());
        }
    }

    let mut scores: AHashMap<DocHandle, f64> = AHashMap::new();

    for (i, token) in unique.iter().enumerate() {
        // Prefix broadening follows the query's actual final token, even when
        // that token also occurred earlier; every other token stays exact.
        let prefix_mode = *token == final_token.as_str();
        let per_token = token_matches(model, token, prefix_mode, weights);
        if per_token.is_empty() {
            // AND semantics: one unmatched token empties the result set.
            return Vec::new();
        }

        if i == 0 {
            scores = per_token;
        } else {
            scores = scores
                .into_iter()
                .filter_map(|(doc, score)| per_token.get(&doc).map(|w| (doc, score + w)))
                .collect();
            if scores.is_empty() {
                return Vec::new();
            }
        }
    }

    let mut ranked: Vec<(DocHandle, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Best category weight per document for a single token.
fn token_matches(
    model: &IndexModel,
    token: &str,
    prefix_mode: bool,
    weights: &ScoreWeights,
) -> AHashMap<DocHandle, f64> {
    let mut best: AHashMap<DocHandle, f64> = AHashMap::new();

    for &doc in model.title_terms().docs_exact(token) {
        merge_max(&mut best, doc, weights.title);
    }
    for &doc in model.body_terms().docs_exact(token) {
        merge_max(&mut best, doc, weights.body);
    }

    // Prefix broadening only applies to the final, possibly-incomplete token
    // of an interactive query.
    if prefix_mode {
        for doc in model.title_terms().docs_with_prefix(token) {
            merge_max(&mut best, doc, weights.title_prefix);
        }
        for doc in model.body_terms().docs_with_prefix(token) {
            merge_max(&mut best, doc, weights.body_prefix);
        }
    }

    for hit in model.object_index().matches(token) {
        let score = weights.object_score(&hit);
        merge_max(&mut best, hit.doc, score);
    }

    best
}

fn merge_max(scores: &mut AHashMap<DocHandle, f64>, doc: DocHandle, weight: f64) {
    let entry = scores.entry(doc).or_insert(f64::MIN);
    if weight > *entry {
        *entry = weight;
    }
}
