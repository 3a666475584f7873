//! Live Refresh Loop
//!
//! Simulates the periodic telemetry poll: while live mode is on, each tick
//! generates a fresh batch, optionally writes it to the output file, and
//! replaces the store's baseline.

use crate::{DashboardSettings, SharedStore};
use reading_generator::{read_batch, write_batch, ReadingGenerator};
use reading_model::ReadingBatch;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Build the generator described by the settings
pub fn generator_for(settings: &DashboardSettings) -> ReadingGenerator {
    match settings.seed {
        Some(seed) => ReadingGenerator::from_seed(seed),
        None => ReadingGenerator::from_entropy(),
    }
}

/// Batch to show at startup: the output file if present, else a fresh one
pub fn initial_baseline(settings: &DashboardSettings, generator: &mut ReadingGenerator) -> ReadingBatch {
    if settings.output_path.exists() {
        match read_batch(&settings.output_path) {
            Ok(batch) => {
                info!(
                    "Seeded {} readings from {}",
                    batch.len(),
                    settings.output_path.display()
                );
                return batch;
            }
            Err(e) => warn!("Ignoring {}: {}", settings.output_path.display(), e),
        }
    }

    let batch = generator.next_batch(settings.batch_size, chrono::Local::now().naive_local());
    if settings.persist_generated {
        if let Err(e) = write_batch(&settings.output_path, &batch) {
            warn!("Could not persist initial batch: {}", e);
        }
    }
    batch
}

/// Periodic batch regeneration
pub struct RefreshLoop {
    store: SharedStore,
    generator: ReadingGenerator,
    batch_size: usize,
    interval: Duration,
    output_path: Option<PathBuf>,
}

impl RefreshLoop {
    pub fn new(store: SharedStore, settings: &DashboardSettings, generator: ReadingGenerator) -> Self {
        Self {
            store,
            generator,
            batch_size: settings.batch_size,
            interval: settings.refresh_interval(),
            output_path: settings
                .persist_generated
                .then(|| settings.output_path.clone()),
        }
    }

    /// Run one refresh cycle; returns whether a new batch was published
    pub async fn tick(&mut self) -> bool {
        if !self.store.read().await.live_mode() {
            debug!("Live mode off, skipping refresh");
            return false;
        }

        let batch = self
            .generator
            .next_batch(self.batch_size, chrono::Local::now().naive_local());

        if let Some(path) = &self.output_path {
            if let Err(e) = write_batch(path, &batch) {
                warn!("Could not persist refreshed batch: {}", e);
            }
        }

        self.store.write().await.replace_baseline(batch);
        metrics::counter!("cathedral_refresh_cycles_total").increment(1);
        true
    }

    /// Tick every interval until `shutdown` becomes true or its sender drops
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("Starting refresh loop every {:?}", self.interval);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // first tick fires immediately; the baseline is already fresh
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Refresh loop stopped");
    }
}
