//! Tokenization of raw request text.

use lazy_static::lazy_static;
use regex::{Matches, Regex};
use std::collections::HashSet;

lazy_static! {
    static ref WORD_TOKEN: Regex = Regex::new(r"\w+").unwrap();
}

/// Tokens shorter than this many characters carry no meaning.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Every word token of `text`, unfiltered, in order of appearance.
///
/// `text` is expected to be lower-cased already.
pub fn word_tokens(text: &str) -> Vec<&str> {
    WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

fn is_significant(token: &str, stop_words: &HashSet<String>) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS
        && !token.chars().all(char::is_numeric)
        && !stop_words.contains(token)
}

/// The significant tokens of a request.
///
/// Holds the lower-cased text; iterating is lazy and can be repeated any
/// number of times.
#[derive(Debug, Clone)]
pub struct SignificantWords<'s> {
    text: String,
    stop_words: &'s HashSet<String>,
}

impl<'s> SignificantWords<'s> {
    pub fn new(raw: &str, stop_words: &'s HashSet<String>) -> Self {
        Self {
            text: raw.to_lowercase(),
            stop_words,
        }
    }

    /// The lower-cased request.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: WORD_TOKEN.find_iter(&self.text),
            stop_words: self.stop_words,
        }
    }
}

impl<'a, 's> IntoIterator for &'a SignificantWords<'s> {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    words: Matches<'static, 'a>,
    stop_words: &'a HashSet<String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let stop_words = self.stop_words;
        self.words
            .by_ref()
            .map(|m| m.as_str())
            .find(|token| is_significant(token, stop_words))
    }
}
