//! Reading Generator - writes one synthetic batch and exits

use reading_generator::{write_batch, ReadingGenerator, DEFAULT_BATCH_SIZE, DEFAULT_OUTPUT_PATH};
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let now = chrono::Local::now().naive_local();
    let batch = ReadingGenerator::from_entropy().next_batch(DEFAULT_BATCH_SIZE, now);

    write_batch(Path::new(DEFAULT_OUTPUT_PATH), &batch)?;
    info!("Generated {} readings", batch.len());

    Ok(())
}
