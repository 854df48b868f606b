//! # Search Keyword Normalization
//!
//! Turns the raw text of the customer search box into at most two
//! lowercase tokens that are safe to embed in a `LIKE` pattern.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Keyword → Tokens                                     │
//! │                                                                         │
//! │  User types: "  Jósé!  Doe42 (vip) "                                   │
//! │       │                                                                 │
//! │       ▼  split on whitespace                                            │
//! │  ["Jósé!", "Doe42", "(vip)"]                                           │
//! │       │                                                                 │
//! │       ▼  strip denylist, transliterate, lowercase                       │
//! │  ["jose", "doe", "vip"]                                                │
//! │       │                                                                 │
//! │       ▼  drop empties, keep first two                                   │
//! │  ["jose", "doe"]                                                       │
//! │       │                                                                 │
//! │       ▼  patterns()                                                     │
//! │  [Some("%jose%"), Some("%doe%")]                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing token yields a `None` pattern. Bound as SQL `NULL`, the
//! `LIKE` branch it feeds never matches, so a one-word search only
//! matches on that word and an empty search matches nothing.

use serde::Serialize;

use crate::MAX_SEARCH_TOKENS;

/// Characters removed from every keyword fragment (ASCII digits are removed too).
pub const DENYLIST: &[char] = &[
    '*', '+', '~', '.', ',', '%', '=', '?', '¿', '(', ')', '#', '@', '!', '¡',
];

/// A normalized customer search keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchKeyword {
    raw: String,
    tokens: Vec<String>,
}

impl SearchKeyword {
    /// Normalizes a raw keyword. Never fails; garbage input yields no tokens.
    ///
    /// ## Example
    /// ```rust
    /// use lunchly_core::search::SearchKeyword;
    ///
    /// let keyword = SearchKeyword::parse("Jane Doyle");
    /// assert_eq!(keyword.tokens(), ["jane", "doyle"]);
    ///
    /// let keyword = SearchKeyword::parse("42 !!");
    /// assert!(keyword.is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split_whitespace()
            .map(normalize_fragment)
            .filter(|token| !token.is_empty())
            .take(MAX_SEARCH_TOKENS)
            .collect();

        SearchKeyword {
            raw: raw.to_string(),
            tokens,
        }
    }

    /// The keyword exactly as the user typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized tokens (zero, one or two).
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn second(&self) -> Option<&str> {
        self.tokens.get(1).map(String::as_str)
    }

    /// True when nothing survived normalization.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Substring patterns for the two token slots, `%token%` or `None`.
    pub fn patterns(&self) -> [Option<String>; MAX_SEARCH_TOKENS] {
        [
            self.first().map(like_pattern),
            self.second().map(like_pattern),
        ]
    }

    /// Tests `name` against the `%token%` patterns the way SQLite `LIKE`
    /// does: `_` matches any single character and only ASCII letters fold
    /// case.
    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        self.tokens.iter().any(|token| like_contains(&name, token))
    }
}

/// Strips denylisted characters and digits, transliterates to ASCII and lowercases.
pub fn normalize_fragment(fragment: &str) -> String {
    let kept: String = fragment.chars().filter(|c| is_allowed(*c)).collect();

    // Transliteration can reintroduce digits or punctuation ("½" -> "1/2").
    deunicode::deunicode(&kept)
        .chars()
        .filter(|c| is_allowed(*c) && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn is_allowed(c: char) -> bool {
    !c.is_ascii_digit() && !DENYLIST.contains(&c)
}

fn like_pattern(token: &str) -> String {
    format!("%{}%", token)
}

/// `name LIKE '%token%'`. Tokens never contain `%`, so `_` is the only
/// wildcard left to honor.
fn like_contains(name: &[char], token: &str) -> bool {
    let token: Vec<char> = token.chars().collect();
    if token.is_empty() {
        return true;
    }

    name.windows(token.len()).any(|window| {
        window
            .iter()
            .zip(&token)
            .all(|(n, t)| *t == '_' || n.eq_ignore_ascii_case(t))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
