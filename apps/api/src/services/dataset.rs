use crate::models::Movie;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns every movie table is expected to carry, after header normalization
pub const REQUIRED_COLUMNS: [&str; 5] = ["Movie name", "Rating", "Language", "Actor", "Genre"];

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Text columns the query interpreter can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Actor,
    Genre,
    Language,
}

impl Column {
    pub fn value<'a>(&self, movie: &'a Movie) -> Option<&'a str> {
        match self {
            Column::Actor => movie.actor.as_deref(),
            Column::Genre => movie.genre.as_deref(),
            Column::Language => movie.language.as_deref(),
        }
    }
}

/// Read-only movie table, loaded once and shared for the life of the process
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    movies: Vec<Movie>,
    missing_columns: Vec<String>,
}

/// Trim a header and capitalize it: first char upper-case, the rest lower-case
pub fn normalize_column_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

impl MovieDataset {
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            missing_columns: Vec::new(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        info!("Loading movie dataset from {}", path.display());

        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::Fields)
            .flexible(true)
            .from_reader(reader);

        let headers: StringRecord = reader
            .headers()?
            .iter()
            .map(normalize_column_name)
            .collect();
        debug!("Normalized dataset columns: {:?}", headers);

        let missing_columns: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !headers.iter().any(|h| h == **required))
            .map(|required| required.to_string())
            .collect();

        for column in &missing_columns {
            warn!("Dataset missing required column: {}", column);
        }

        reader.set_headers(headers);

        let mut movies = Vec::new();
        for record in reader.deserialize::<Movie>() {
            movies.push(record?);
        }

        info!("Loaded {} movies", movies.len());

        Ok(Self {
            movies,
            missing_columns,
        })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Required columns that were absent from the source headers
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    /// Distinct non-empty values of a column, in order of first appearance
    pub fn distinct_values(&self, column: Column) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.movies
            .iter()
            .filter_map(|movie| column.value(movie))
            .filter(|value| !value.is_empty() && seen.insert(*value))
            .collect()
    }
}
