//! String similarity used to line free text up against known column values.
//!
//! Every score is an integer from 0 to 100 built on normalized Levenshtein
//! similarity. [`weighted_ratio`] picks the best of several strategies the
//! way common fuzzy-matching libraries do:
//!
//! - strings of similar length are compared whole, and as sorted or
//!   de-duplicated token sets;
//! - when one string is at least 1.5 times longer, the shorter one is slid
//!   across the longer one so a name buried in a sentence still matches.
//!
//! There is no extra penalty for very long queries, so a candidate that
//! appears verbatim anywhere in a query always scores at least 90.
//!
//! The flip side is that very short values match inside unrelated words:
//! `"War"` scores 90 against `"award winning movie"`, and a one-letter
//! value such as `"a"` matches almost any query.

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const PARTIAL_LENGTH_RATIO: f64 = 1.5;

/// Lowercase, turn anything that is not a letter or digit into a space, trim
pub fn process(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().collect::<String>()
            } else {
                " ".to_string()
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn percent(similarity: f64) -> f64 {
    (similarity * 100.0).round()
}

/// Whole-string similarity of two already processed strings
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    percent(normalized_levenshtein(a, b))
}

/// Best [`ratio`] of the shorter string against every same-length window of the longer
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let short_len = shorter.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let longer: Vec<char> = longer.chars().collect();
    let mut best: f64 = 0.0;
    for window in longer.windows(short_len) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(shorter, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, partial: bool) -> f64 {
    let (a, b) = (sorted_tokens(a), sorted_tokens(b));
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

fn token_set(a: &str, b: &str, partial: bool) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a
        .intersection(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let only_a = tokens_a
        .difference(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let only_b = tokens_b
        .difference(&tokens_a)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let combined_a = format!("{} {}", intersection, only_a).trim().to_string();
    let combined_b = format!("{} {}", intersection, only_b).trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    [
        score(&intersection, &combined_a),
        score(&intersection, &combined_b),
        score(&combined_a, &combined_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    token_sort(a, b, false)
}

pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set(a, b, false)
}

/// Combined 0-100 similarity between two raw strings
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let (a, b) = (process(a), process(b));
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let length_ratio = len_a.max(len_b) / len_a.min(len_b);

    let base = ratio(&a, &b);
    let best = if length_ratio < PARTIAL_LENGTH_RATIO {
        base.max(token_sort(&a, &b, false) * UNBASE_SCALE)
            .max(token_set(&a, &b, false) * UNBASE_SCALE)
    } else {
        base.max(partial_ratio(&a, &b) * PARTIAL_SCALE)
            .max(token_sort(&a, &b, true) * UNBASE_SCALE * PARTIAL_SCALE)
            .max(token_set(&a, &b, true) * UNBASE_SCALE * PARTIAL_SCALE)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Highest scoring candidate for `query`.
///
/// Ties go to the candidate that comes first in `candidates`.
pub fn extract_one<'a, I>(query: &str, candidates: I) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, u8)> = None;
    for candidate in candidates {
        let score = weighted_ratio(query, candidate);
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process() {
        assert_eq!(process("  Malayalam, ACTION!  "), "malayalam  action");
        assert_eq!(process("?!"), "");
    }

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(weighted_ratio("Mohanlal", "mohanlal"), 100);
        assert_eq!(weighted_ratio("Action", "ACTION"), 100);
    }

    #[test]
    fn test_verbatim_mention_in_long_query() {
        let query = "Malayalam action movie with Mohanlal";
        assert!(weighted_ratio(query, "Mohanlal") > 80);
        assert!(weighted_ratio(query, "Action") > 80);
        assert!(weighted_ratio(query, "Malayalam") > 80);

        let long_query = "I would really love to watch something starring Vijay tonight";
        assert!(weighted_ratio(long_query, "Vijay") >= 90);
    }

    #[test]
    fn test_token_order_does_not_matter() {
        assert_eq!(token_sort_ratio("lal mohan", "mohan lal"), 100.0);
        assert_eq!(token_set_ratio("mohan lal lal", "lal mohan"), 100.0);
    }

    #[test]
    fn test_unrelated_strings_score_low() {
        assert!(weighted_ratio("Korean horror", "Mohanlal") <= 80);
        assert!(weighted_ratio("Korean horror", "Thriller") <= 80);
        assert!(weighted_ratio("movies rated above 8", "Tamil") <= 80);
    }

    #[test]
    fn test_short_values_match_inside_other_words() {
        assert_eq!(weighted_ratio("award winning movie", "War"), 90);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(weighted_ratio("", "Action"), 0);
        assert_eq!(weighted_ratio("...", "Action"), 0);
    }

    #[test]
    fn test_partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("vijay", "starring vijay tonight"), 100.0);
        assert_eq!(partial_ratio("", "anything"), 0.0);
    }

    #[test]
    fn test_extract_one_prefers_first_on_tie() {
        let best = extract_one("action", ["Action", "action", "Drama"]);
        assert_eq!(best, Some(("Action", 100)));
    }

    #[test]
    fn test_extract_one_empty_candidates() {
        let candidates: Vec<&str> = Vec::new();
        assert_eq!(extract_one("anything", candidates), None);
    }
}
