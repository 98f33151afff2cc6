//! Interactive movie search over a CSV dataset.
//!
//! Usage: `query-movies [DATASET_PATH]`, then type one query per line.

use anyhow::{Context, Result};
use console::{style, Term};
use movie_query_api::{
    config::Config,
    models::RankedMovie,
    services::{MovieDataset, QueryInterpreter, SearchOutcome, SearchService},
};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HEADERS: [&str; 6] = ["Sl. No.", "Movie name", "Actor", "Genre", "Language", "Rating"];

fn cells(movie: &RankedMovie) -> [String; 6] {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    [
        movie.position.to_string(),
        text(&movie.name),
        text(&movie.actor),
        text(&movie.genre),
        text(&movie.language),
        movie
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string()),
    ]
}

fn render_table(term: &Term, movies: &[RankedMovie]) -> Result<()> {
    let rows: Vec<[String; 6]> = movies.iter().map(cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    term.write_line(&style(header).bold().to_string())?;

    for row in rows {
        let line = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        term.write_line(&line)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_query_api=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    let dataset_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.dataset_path.clone());

    let dataset = MovieDataset::from_path(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;

    let term = Term::stdout();
    for column in dataset.missing_columns() {
        term.write_line(
            &style(format!("Dataset missing required column: {}", column))
                .red()
                .to_string(),
        )?;
    }

    let service = SearchService::new(
        Arc::new(dataset),
        QueryInterpreter::with_threshold(config.match_threshold),
    );

    term.write_line(&format!(
        "{} movies loaded. Type a query, or an empty line to skip.",
        service.dataset().len()
    ))?;

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line).context("Failed to read query")? == 0 {
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let report = match service.search(query) {
            Ok(report) => report,
            Err(e) => {
                term.write_line(&style(e.to_string()).red().to_string())?;
                continue;
            }
        };
        match &report.outcome {
            SearchOutcome::Results(movies) => render_table(&term, movies)?,
            SearchOutcome::NoResults { .. } => {
                if let Some(message) = report.outcome.message() {
                    term.write_line(&style(message).yellow().to_string())?;
                }
            }
        }
    }

    Ok(())
}
