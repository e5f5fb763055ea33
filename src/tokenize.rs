//! Query tokenization.
//!
//! The rules here must mirror whatever produced the snapshot's `terms` and
//! `titleterms` tables; any drift means lookups silently miss. The builder's
//! rules are: lowercase, split on runs of non-word characters (`_` counts as
//! a word character), drop stop words, drop tokens below a minimum length
//! unless they are purely numeric or explicitly allow-listed.

use ahash::AHashSet;
use regex::Regex;

/// Default minimum token length. Shorter tokens are dropped unless numeric
/// or allow-listed.
const MIN_TOKEN_LENGTH: usize = 3;

/// Common English stop words filtered from queries.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with",
];

/// Tuning knobs for query tokenization.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Tokens shorter than this are dropped (numeric and allow-listed tokens
    /// are exempt).
    pub min_token_len: usize,
    /// Tokens dropped outright.
    pub stop_words: AHashSet<String>,
    /// Short tokens kept despite `min_token_len` (e.g. domain abbreviations).
    pub allow_list: AHashSet<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: MIN_TOKEN_LENGTH,
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            allow_list: AHashSet::new(),
        }
    }
}

/// Splits raw query text into normalized search tokens.
#[derive(Debug)]
pub struct Tokenizer {
    config: TokenizerConfig,
    /// Runs of word characters (`\w` includes `_` and digits).
    word: Regex,
    /// Qualified-name chunks like `module.Class.method`.
    dotted: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_config(TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TokenizerConfig) -> Self {
        Self {
            config,
            word: Regex::new(r"\w+").expect("static regex"),
            dotted: Regex::new(r"^\w+(?:\.\w+)+$").expect("static regex"),
        }
    }

    /// Tokenize query text into a finite, order-preserving sequence.
    ///
    /// Duplicates are preserved; the lookup stage deduplicates for
    /// AND-matching. A whitespace-delimited chunk shaped like a dotted
    /// qualified name (`ui.Widget`) additionally yields the whole chunk as a
    /// token, ahead of its segments, so object lookup can match full paths.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut tokens = Vec::new();

        for chunk in lowered.split_whitespace() {
            let chunk = chunk.trim_matches(|c: char| !c.is_alphanumeric() && c != '_');

            if self.dotted.is_match(chunk) && !chunk.chars().all(|c| c.is_numeric() || c == '.') {
                tokens.push(chunk.to_string());
            }

            for word in self.word.find_iter(chunk) {
                let token = word.as_str();
                if self.keep(token) {
                    tokens.push(token.to_string());
                }
            }
        }

        tokens
    }

    fn keep(&self, token: &str) -> bool {
        if self.config.stop_words.contains(token) {
            return false;
        }
        if token.chars().count() >= self.config.min_token_len {
            return true;
        }
        token.chars().all(char::is_numeric) || self.config.allow_list.contains(token)
    }
}
