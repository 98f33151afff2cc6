use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Ratings that are blank or not a number become missing rather than failing the row
fn deserialize_optional_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        Float(f64),
        String(String),
    }

    match Option::<StringOrFloat>::deserialize(deserializer)? {
        Some(StringOrFloat::Float(f)) if f.is_finite() => Ok(Some(f)),
        Some(StringOrFloat::Float(_)) | None => Ok(None),
        Some(StringOrFloat::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Some(f)),
                _ => {
                    warn!("Ignoring non-numeric rating value: {:?}", trimmed);
                    Ok(None)
                }
            }
        }
    }
}

/// One row of the movie table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(
        rename = "Movie name",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "Actor",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub actor: Option<String>,
    #[serde(
        rename = "Genre",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub genre: Option<String>,
    #[serde(
        rename = "Language",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub language: Option<String>,
    #[serde(
        rename = "Rating",
        default,
        deserialize_with = "deserialize_optional_rating"
    )]
    pub rating: Option<f64>,
}

impl Movie {
    pub fn new(name: &str, actor: &str, genre: &str, language: &str, rating: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            actor: Some(actor.to_string()),
            genre: Some(genre.to_string()),
            language: Some(language.to_string()),
            rating: Some(rating),
        }
    }
}

/// A movie as shown to the user, with its 1-based place in the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMovie {
    pub position: usize,
    pub name: Option<String>,
    pub actor: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub rating: Option<f64>,
}

impl RankedMovie {
    pub fn from_movie(position: usize, movie: &Movie) -> Self {
        Self {
            position,
            name: movie.name.clone(),
            actor: movie.actor.clone(),
            genre: movie.genre.clone(),
            language: movie.language.clone(),
            rating: movie.rating,
        }
    }
}
