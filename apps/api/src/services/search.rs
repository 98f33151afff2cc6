use crate::error::{ApiError, Result};
use crate::models::{Movie, QueryFilters, RankedMovie};
use crate::services::dataset::MovieDataset;
use crate::services::query_interpreter::QueryInterpreter;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// Longest query, in characters, that is worth interpreting
pub const MAX_QUERY_CHARS: usize = 500;

/// What a search produced: a ranking, or nothing for the given query
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<RankedMovie>),
    NoResults { query: String },
}

impl SearchOutcome {
    /// Human-readable notice for an empty search, `None` when there are results
    pub fn message(&self) -> Option<String> {
        match self {
            SearchOutcome::Results(_) => None,
            SearchOutcome::NoResults { query } => Some(format!("No movies found for: {}", query)),
        }
    }

    pub fn results(&self) -> &[RankedMovie] {
        match self {
            SearchOutcome::Results(results) => results,
            SearchOutcome::NoResults { .. } => &[],
        }
    }
}

/// A finished search together with how the query was read
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub query: String,
    pub filters: QueryFilters,
    pub outcome: SearchOutcome,
}

fn contains_ignore_case(value: Option<&str>, needle: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(&needle.to_lowercase()))
}

fn matches(movie: &Movie, filters: &QueryFilters) -> bool {
    if let Some(actor) = &filters.actor {
        if !contains_ignore_case(movie.actor.as_deref(), actor) {
            return false;
        }
    }
    if let Some(genre) = &filters.genre {
        if !contains_ignore_case(movie.genre.as_deref(), genre) {
            return false;
        }
    }
    if let Some(language) = &filters.language {
        if !contains_ignore_case(movie.language.as_deref(), language) {
            return false;
        }
    }
    if let Some(min_rating) = filters.min_rating {
        if !movie.rating.is_some_and(|rating| rating >= min_rating) {
            return false;
        }
    }
    true
}

/// Missing ratings sort after every known one
fn by_rating_desc(a: &Movie, b: &Movie) -> Ordering {
    match (a.rating, b.rating) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Apply every set filter, then rank what is left by rating.
///
/// The sort is stable, so movies with equal ratings keep their dataset order.
pub fn filter_and_rank(dataset: &MovieDataset, filters: &QueryFilters, query: &str) -> SearchOutcome {
    let mut matched: Vec<&Movie> = dataset
        .movies()
        .iter()
        .filter(|movie| matches(movie, filters))
        .collect();

    if matched.is_empty() {
        return SearchOutcome::NoResults {
            query: query.to_string(),
        };
    }

    matched.sort_by(|a, b| by_rating_desc(a, b));

    SearchOutcome::Results(
        matched
            .into_iter()
            .enumerate()
            .map(|(idx, movie)| RankedMovie::from_movie(idx + 1, movie))
            .collect(),
    )
}

/// Answers free-text movie queries against a shared, immutable dataset
#[derive(Debug, Clone)]
pub struct SearchService {
    dataset: Arc<MovieDataset>,
    interpreter: QueryInterpreter,
}

impl SearchService {
    pub fn new(dataset: Arc<MovieDataset>, interpreter: QueryInterpreter) -> Self {
        Self {
            dataset,
            interpreter,
        }
    }

    pub fn dataset(&self) -> &MovieDataset {
        &self.dataset
    }

    pub fn search(&self, query: &str) -> Result<SearchReport> {
        let trimmed_query = query.trim();
        if trimmed_query.is_empty() {
            return Err(ApiError::InvalidInput("Query cannot be empty".into()));
        }
        if trimmed_query.chars().count() > MAX_QUERY_CHARS {
            return Err(ApiError::InvalidInput(format!(
                "Query cannot be longer than {} characters",
                MAX_QUERY_CHARS
            )));
        }

        let filters = self.interpreter.interpret(trimmed_query, &self.dataset);
        info!(?filters, "Interpreted query '{}'", trimmed_query);

        let outcome = filter_and_rank(&self.dataset, &filters, trimmed_query);
        match &outcome {
            SearchOutcome::Results(results) => {
                info!(
                    "Returning {} movies for '{}'. Top result: {:?}",
                    results.len(),
                    trimmed_query,
                    results.first().and_then(|m| m.name.clone())
                );
            }
            SearchOutcome::NoResults { .. } => {
                info!("No movies matched '{}'", trimmed_query);
            }
        }
        debug!("Search outcome: {:?}", outcome);

        Ok(SearchReport {
            query: trimmed_query.to_string(),
            filters,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> MovieDataset {
        MovieDataset::from_movies(vec![
            Movie::new("Drishyam", "Mohanlal", "Thriller", "Malayalam", 8.5),
            Movie::new("Lucifer", "Mohanlal", "Action", "Malayalam", 8.0),
            Movie::new("Leo", "Vijay", "Action", "Tamil", 7.5),
        ])
    }

    fn service() -> SearchService {
        SearchService::new(Arc::new(sample_dataset()), QueryInterpreter::new())
    }

    fn names(outcome: &SearchOutcome) -> Vec<&str> {
        outcome
            .results()
            .iter()
            .filter_map(|m| m.name.as_deref())
            .collect()
    }

    #[test]
    fn test_actor_genre_language_query() {
        let report = service()
            .search("Malayalam action movie with Mohanlal")
            .unwrap();

        assert_eq!(names(&report.outcome), vec!["Lucifer"]);
        assert_eq!(report.outcome.results()[0].position, 1);
    }

    #[test]
    fn test_min_rating_query() {
        let report = service().search("movies rated above 8").unwrap();

        assert_eq!(report.filters.min_rating, Some(8.0));
        assert_eq!(names(&report.outcome), vec!["Drishyam", "Lucifer"]);
        let positions: Vec<usize> = report.outcome.results().iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_unrecognized_query_returns_everything_ranked() {
        let report = service().search("Korean horror").unwrap();

        assert!(report.filters.is_empty());
        assert_eq!(names(&report.outcome), vec!["Drishyam", "Lucifer", "Leo"]);
    }

    #[test]
    fn test_empty_intersection_carries_query() {
        let report = service().search("Vijay Thriller").unwrap();

        assert_eq!(report.filters.actor.as_deref(), Some("Vijay"));
        assert_eq!(report.filters.genre.as_deref(), Some("Thriller"));
        assert_eq!(
            report.outcome,
            SearchOutcome::NoResults {
                query: "Vijay Thriller".to_string()
            }
        );
        assert_eq!(
            report.outcome.message().as_deref(),
            Some("No movies found for: Vijay Thriller")
        );
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let err = service().search("   ").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_overlong_query_is_rejected() {
        let service = service();

        let err = service.search(&"great film ".repeat(20_000)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));

        let at_limit = "a".repeat(MAX_QUERY_CHARS);
        assert!(service.search(&at_limit).is_ok());

        // Surrounding whitespace does not count towards the limit
        let padded = format!("   {}   ", "Mohanlal".repeat(MAX_QUERY_CHARS / 8));
        assert!(service.search(&padded).is_ok());
    }

    #[test]
    fn test_zero_min_rating_still_drops_unrated_movies() {
        let mut unrated = Movie::new("Unrated", "Vijay", "Drama", "Tamil", 0.0);
        unrated.rating = None;
        let dataset = MovieDataset::from_movies(vec![
            unrated,
            Movie::new("Leo", "Vijay", "Action", "Tamil", 7.5),
            Movie::new("Flop", "Vijay", "Action", "Tamil", 0.0),
        ]);
        let filters = QueryFilters {
            min_rating: Some(0.0),
            ..Default::default()
        };

        let outcome = filter_and_rank(&dataset, &filters, "rated above 0");
        assert_eq!(names(&outcome), vec!["Leo", "Flop"]);
    }

    #[test]
    fn test_min_rating_is_a_lower_bound() {
        let dataset = sample_dataset();
        for threshold in [0.0, 7.5, 7.9, 8.0, 8.5, 9.0] {
            let filters = QueryFilters {
                min_rating: Some(threshold),
                ..Default::default()
            };
            let outcome = filter_and_rank(&dataset, &filters, "q");
            assert!(outcome
                .results()
                .iter()
                .all(|m| m.rating.is_some_and(|r| r >= threshold)));
        }
    }

    #[test]
    fn test_same_query_same_ranking() {
        let service = service();
        let first = service.search("Mohanlal").unwrap();
        let second = service.search("Mohanlal").unwrap();

        assert_eq!(first.outcome, second.outcome);
    }

    #[test]
    fn test_ties_keep_dataset_order_and_missing_ratings_go_last() {
        let mut unrated = Movie::new("Unrated", "Vijay", "Drama", "Tamil", 0.0);
        unrated.rating = None;
        let dataset = MovieDataset::from_movies(vec![
            unrated,
            Movie::new("First", "Vijay", "Action", "Tamil", 7.0),
            Movie::new("Second", "Vijay", "Action", "Tamil", 7.0),
            Movie::new("Best", "Vijay", "Action", "Tamil", 9.0),
        ]);

        let outcome = filter_and_rank(&dataset, &QueryFilters::default(), "q");
        assert_eq!(names(&outcome), vec!["Best", "First", "Second", "Unrated"]);
    }

    #[test]
    fn test_substring_filter_is_case_insensitive() {
        let dataset = MovieDataset::from_movies(vec![
            Movie::new("Kireedam", "Mohanlal, Thilakan", "Drama", "Malayalam", 8.9),
            Movie::new("Leo", "Vijay", "Action", "Tamil", 7.5),
        ]);
        let filters = QueryFilters {
            actor: Some("MOHANLAL".to_string()),
            ..Default::default()
        };

        let outcome = filter_and_rank(&dataset, &filters, "q");
        assert_eq!(names(&outcome), vec!["Kireedam"]);
    }

    #[test]
    fn test_rows_with_missing_values_are_excluded() {
        let mut anonymous = Movie::new("Anonymous", "", "Action", "Tamil", 9.0);
        anonymous.actor = None;
        let dataset = MovieDataset::from_movies(vec![
            anonymous,
            Movie::new("Leo", "Vijay", "Action", "Tamil", 7.5),
        ]);
        let filters = QueryFilters {
            actor: Some("Vijay".to_string()),
            ..Default::default()
        };

        let outcome = filter_and_rank(&dataset, &filters, "q");
        assert_eq!(names(&outcome), vec!["Leo"]);
    }
}
