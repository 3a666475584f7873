//! Synthetic Reading Generator
//!
//! Produces batches of randomized structural readings spaced ten minutes
//! apart, and writes them to the JSON file the dashboard polls.

mod error;
mod generator;
mod output;

pub use error::GeneratorError;
pub use generator::{generate, ReadingGenerator, READING_INTERVAL_MINUTES};
pub use output::{read_batch, write_batch};

/// Readings produced per poll by the CLI and the dashboard
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// File the CLI writes and the dashboard seeds from
pub const DEFAULT_OUTPUT_PATH: &str = "data/readings.json";
