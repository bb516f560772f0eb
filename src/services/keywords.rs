// src/services/keywords.rs

//! Job title keyword matching.
//!
//! All keywords are folded into a single case-insensitive regex. Each
//! keyword only matches on whole-word boundaries, so `Analyst` finds
//! "Data Analyst" but not "Analystics".

use std::collections::HashSet;

use regex::Regex;
use regex_syntax::is_word_character;

use crate::error::ConfigError;
use crate::models::Anchor;

/// Compiled matcher over a set of job title keywords.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Regex,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Compile keywords into a single matcher.
    ///
    /// Keywords are trimmed and blank or repeated entries are skipped.
    /// Returns `NoKeywordsConfigured` if nothing usable remains.
    pub fn compile<S: AsRef<str>>(keywords: &[S]) -> Result<Self, ConfigError> {
        let keywords = normalize_keywords(keywords);
        if keywords.is_empty() {
            return Err(ConfigError::NoKeywordsConfigured);
        }

        let alternatives: Vec<String> = keywords.iter().map(|k| keyword_pattern(k)).collect();
        let source = format!("(?i)(?:{})", alternatives.join("|"));
        let pattern =
            Regex::new(&source).map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

        log::debug!("Compiled {} job title keywords", keywords.len());
        Ok(Self { pattern, keywords })
    }

    /// Keywords the matcher was built from, in load order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether `text` contains any keyword as a whole word.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// The first keyword occurrence in `text`, as it appears there.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern.find(text).map(|m| m.as_str())
    }

    /// Whether an anchor's title qualifies as a job posting.
    ///
    /// The visible text is the only input; an anchor without text never
    /// matches, whatever its href.
    pub fn matches(&self, anchor: &Anchor) -> bool {
        !anchor.text.is_empty() && self.is_match(&anchor.text)
    }
}

/// Trim keywords, dropping blanks and exact repeats (first wins).
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_string()))
        .map(str::to_string)
        .collect()
}

/// Regex fragment for one keyword.
///
/// Words are escaped individually and joined by `\s+`. A `\b` is only
/// placed on a side that ends in a word character (as Unicode `\w` sees
/// it, combining marks included), otherwise keywords like `C++` could
/// never match.
fn keyword_pattern(keyword: &str) -> String {
    let body = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let lead = if keyword.chars().next().is_some_and(is_word_character) {
        r"\b"
    } else {
        ""
    };
    let tail = if keyword.chars().last().is_some_and(is_word_character) {
        r"\b"
    } else {
        ""
    };

    format!("{lead}{body}{tail}")
}
