use serde::{Deserialize, Serialize};

pub use movie::{Movie, RankedMovie};

mod movie;

/// Constraints pulled out of a free-text query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub actor: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub min_rating: Option<f64>,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.actor.is_none()
            && self.genre.is_none()
            && self.language.is_none()
            && self.min_rating.is_none()
    }
}

/// Request structure for movie searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query, e.g. "Malayalam action movie with Mohanlal"
    pub query: String,
}

/// Response structure for movie searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    /// Filters the query was interpreted as
    pub filters: QueryFilters,
    /// Ranked matches, best rated first
    pub results: Vec<RankedMovie>,
    /// Set when nothing matched
    pub message: Option<String>,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    /// Number of rows in the loaded dataset
    pub movies: usize,
    /// Required dataset columns that were not found when loading
    pub missing_columns: Vec<String>,
}
