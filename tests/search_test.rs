mod common;

use assert2::check;
use common::engine;
use docsearch::{SearchHit, Tokenizer};
use rstest::rstest;
use std::collections::HashSet;

fn docs(hits: &[SearchHit]) -> HashSet<usize> {
    hits.iter().map(|hit| hit.doc).collect()
}

// --- Empty and no-match queries ---

/// A query that tokenizes to nothing returns an empty list, not an error.
#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
#[case("the and of")] // all stop words
fn empty_query_yields_no_results(#[case] query: &str) {
    check!(engine().search(query).is_empty());
}

/// A token matching no document is normal control flow.
#[test]
fn unmatched_token_yields_no_results() {
    check!(engine().search("zzzyx").is_empty());
}

// --- Title coverage ---

/// Every token of every title must be reachable through search.
#[test]
fn title_tokens_find_their_document() {
    let engine = engine();
    let tokenizer = Tokenizer::new();

    for doc in 0..engine.model().document_count() {
        let title = engine.model().title(doc).unwrap().to_string();
        for token in tokenizer.tokenize(&title) {
            let hits = engine.search(&token);
            check!(
                docs(&hits).contains(&doc),
                "search('{}') should include document {} ('{}')",
                token,
                doc,
                title
            );
        }
    }
}

// --- Determinism and ordering ---

/// Repeated searches over an unchanged index yield identical ordered output.
#[rstest]
#[case("widget")]
#[case("search config")]
#[case("guide")]
fn search_is_deterministic(#[case] query: &str) {
    let engine = engine();
    check!(engine.search(query) == engine.search(query));
}

/// Scores never increase down a returned result list.
#[rstest]
#[case("widget")]
#[case("guide")]
#[case("search")]
fn scores_are_monotonically_decreasing(#[case] query: &str) {
    let hits = engine().search(query);
    check!(!hits.is_empty());
    for pair in hits.windows(2) {
        check!(pair[0].score >= pair[1].score, "query '{}'", query);
    }
}

/// Equal scores fall back to corpus order (ascending document handle).
#[test]
fn ties_break_by_document_handle() {
    // "search" is a body term in documents 0 and 1, nothing else matches it.
    let hits = engine().search("search");
    check!(hits.len() == 2);
    check!(hits[0].score == hits[1].score);
    check!(hits[0].doc == 0);
    check!(hits[1].doc == 1);
}

// --- Conjunctive semantics ---

/// Every result of a two-token query satisfies both single-token queries.
#[rstest]
#[case("search", "config")]
#[case("widget", "gallery")]
#[case("install", "guide")]
fn and_semantics_intersect(#[case] a: &str, #[case] b: &str) {
    let engine = engine();
    let combined = docs(&engine.search(&format!("{a} {b}")));
    let only_a = docs(&engine.search(a));
    let only_b = docs(&engine.search(b));

    check!(combined.is_subset(&only_a));
    check!(combined.is_subset(&only_b));
}

/// Two tokens with disjoint match sets produce nothing.
#[test]
fn disjoint_tokens_yield_no_results() {
    // "engine" only matches document 0, "install" only document 2.
    check!(engine().search("engine install").is_empty());
}

// --- Weight ordering ---

/// A title-only match outranks a body-only match for the same token:
/// "guide" is a title term of document 2 and a body term of document 0.
#[test]
fn title_match_outranks_body_match() {
    let hits = engine().search("guide");
    check!(hits.len() == 2);
    check!(hits[0].doc == 2);
    check!(hits[1].doc == 0);
    check!(hits[0].score > hits[1].score);
}

// --- Object lookup ---

/// Both the short and the qualified form of an object name reach its
/// document, and the qualified query never scores lower.
#[test]
fn object_short_and_qualified_names_match() {
    let engine = engine();
    let short = engine.search("Widget");
    let qualified = engine.search("ui.Widget");

    let short_hit = short.iter().find(|hit| hit.doc == 3).unwrap();
    let qualified_hit = qualified.iter().find(|hit| hit.doc == 3).unwrap();
    check!(qualified_hit.score >= short_hit.score);
}

/// A top-level function is found by its bare name.
#[test]
fn top_level_object_is_searchable() {
    let hits = engine().search("configure");
    check!(docs(&hits).contains(&1));
}

/// Object hits expose the metadata a renderer needs for deep links.
#[test]
fn object_hits_carry_label_and_anchor() {
    let engine = engine();
    let hits = engine.model().objects_matching("Widget");
    check!(hits.len() == 1);
    check!(hits[0].record.label == "Python class");
    check!(hits[0].record.anchor == "ui.Widget");
}

// --- Prefix matching ---

/// The final token of a query is treated as a possibly-incomplete prefix.
#[test]
fn final_token_matches_by_prefix() {
    let hits = engine().search("inst");
    check!(docs(&hits).contains(&2));
}

/// Interior tokens are matched exactly, never broadened to a prefix.
#[test]
fn interior_tokens_require_exact_match() {
    let engine = engine();
    // As a final token "inst" reaches document 2 through the prefix scan.
    check!(!engine.search("config inst").is_empty());
    // As an interior token it matches nothing and empties the result set.
    check!(engine.search("inst config").is_empty());
}

/// A final token that repeats an interior one still matches by prefix:
/// "inst" must reach document 2 through "install"/"installation" and
/// intersect with "config".
#[test]
fn repeated_final_token_keeps_prefix_mode() {
    let hits = engine().search("inst config inst");
    check!(docs(&hits).contains(&2));
}

/// Repeating an interior token at the end of the query does not broaden the
/// interior occurrence of any other token.
#[test]
fn repeated_final_token_does_not_broaden_interior_tokens() {
    // "config" is final, so "inst" stays exact-only and empties the set.
    check!(engine().search("config inst config").is_empty());
}

// --- Supersession ---

/// Issuing a second query before the first delivers means only the second
/// query's results are observable.
#[test]
fn newer_query_supersedes_older() {
    let engine = engine();
    let first = engine.begin("widget");
    let second = engine.begin("install");

    check!(engine.run(&first).is_none());

    let delivered = engine.run(&second).unwrap();
    check!(docs(&delivered).contains(&2));
}

/// Repeated rapid invocation stays safe: only the newest ticket delivers.
#[test]
fn only_newest_of_many_tickets_delivers() {
    let engine = engine();
    let tickets: Vec<_> = ["w", "wi", "wid", "widg", "widget"]
        .iter()
        .map(|q| engine.begin(q))
        .collect();

    for stale in &tickets[..tickets.len() - 1] {
        check!(engine.run(stale).is_none());
    }
    let newest = engine.run(tickets.last().unwrap());
    check!(newest.is_some());
    check!(!newest.unwrap().is_empty());
}
