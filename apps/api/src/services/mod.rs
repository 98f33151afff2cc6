pub mod dataset;
pub mod fuzzy;
pub mod query_interpreter;
pub mod search;

// Re-export public types
pub use dataset::{Column, DatasetError, MovieDataset};
pub use query_interpreter::{QueryInterpreter, RatingPolicy};
pub use search::{SearchOutcome, SearchReport, SearchService};
