//! Shared fixture corpus for integration tests.
//!
//! Four documents exercising every lookup path: body terms, title terms, and
//! API objects (one namespaced class, one top-level function).

#![allow(dead_code)]

use docsearch::{IndexModel, SearchEngine};
use serde_json::json;
use std::sync::Arc;

pub fn snapshot() -> serde_json::Value {
    json!({
        "docnames": ["docs/intro", "docs/api", "docs/install", "docs/widgets"],
        "filenames": [
            "docs/intro.html", "docs/api.html", "docs/install.html", "docs/widgets.html"
        ],
        "titles": ["Introduction", "API Reference", "Installation Guide", "Widget Gallery"],
        "terms": {
            "search": [0, 1],
            "engine": 0,
            "install": [2],
            "widget": [1, 3],
            "config": [1, 2],
            "guide": [0]
        },
        "titleterms": {
            "introduction": 0,
            "api": 1,
            "reference": 1,
            "installation": 2,
            "guide": 2,
            "widget": 3,
            "gallery": 3
        },
        "objects": {
            "ui": [["Widget", 3, 0, 1, "ui.Widget"]],
            "": [["configure", 1, 1, 1, "configure"]]
        },
        "objtypes": {
            "0": ["py", "class"],
            "1": ["py", "function"]
        },
        "objnames": {
            "0": ["py", "class", "Python class"],
            "1": ["py", "function", "Python function"]
        },
        "envversion": {"format": 2, "domains": 1}
    })
}

pub fn model() -> IndexModel {
    docsearch::trace::init();
    IndexModel::from_json_str(&snapshot().to_string()).expect("fixture snapshot is valid")
}

pub fn engine() -> SearchEngine {
    SearchEngine::new(Arc::new(model()))
}
