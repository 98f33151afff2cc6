use crate::config::DEFAULT_MATCH_THRESHOLD;
use crate::models::QueryFilters;
use crate::services::dataset::{Column, MovieDataset};
use crate::services::fuzzy;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// Digits with an optional fractional part, e.g. `8` or `7.5`
    static ref NUMBER_PATTERN: Regex = Regex::new(r"\d+(\.\d+)?").unwrap();

    /// Common English stop words dropped from the keyword list
    pub static ref STOP_WORDS: Vec<&'static str> = vec![
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "about", "as", "into", "through", "during",
        "above", "below", "over", "under", "than", "is", "are", "was", "be",
        "i", "me", "my", "we", "you", "it", "this", "that", "these", "those",
        "some", "any", "all", "can", "please", "show", "give", "find", "want",
    ];
}

/// How a minimum rating is read out of the query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingPolicy {
    /// The first decimal number anywhere in the query, even when it is
    /// really a year or a count ("movies from 2020 rated above 7" yields 2020)
    #[default]
    FirstNumber,
}

impl RatingPolicy {
    pub fn extract(&self, query: &str) -> Option<f64> {
        match self {
            RatingPolicy::FirstNumber => NUMBER_PATTERN
                .find(query)
                .and_then(|m| m.as_str().parse::<f64>().ok()),
        }
    }
}

/// Turns free text into [`QueryFilters`] by matching it against the dataset's own values
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    /// A best match must score strictly above this (0-100) to be kept
    threshold: u8,
    rating_policy: RatingPolicy,
}

impl QueryInterpreter {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_MATCH_THRESHOLD)
    }

    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            threshold,
            rating_policy: RatingPolicy::default(),
        }
    }

    pub fn interpret(&self, query: &str, dataset: &MovieDataset) -> QueryFilters {
        // Only traced; matching below always runs on the raw query.
        let keywords = extract_keywords(query);
        debug!("Query keywords (unused for matching): {:?}", keywords);

        let filters = QueryFilters {
            actor: self.best_match(query, dataset, Column::Actor),
            genre: self.best_match(query, dataset, Column::Genre),
            language: self.best_match(query, dataset, Column::Language),
            min_rating: self.rating_policy.extract(query),
        };

        debug!(?filters, "Interpreted query '{}'", query);
        filters
    }

    fn best_match(&self, query: &str, dataset: &MovieDataset, column: Column) -> Option<String> {
        let candidates = dataset.distinct_values(column);
        let (value, score) = fuzzy::extract_one(query, candidates)?;
        debug!("Best {:?} candidate {:?} scored {}", column, value, score);

        if score > self.threshold {
            Some(value.to_string())
        } else {
            None
        }
    }
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased words of the query with stop words removed
pub fn extract_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty() && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}
