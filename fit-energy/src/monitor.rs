use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::Local;
use fit_store::HealthStore;
use log::{error, info};
use tokio::time::{self, Instant};

use crate::{display, energy::EnergySummary};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[mockall::automock]
pub trait Reporter: Send + Sync {
    fn report(&self, summary: &EnergySummary);
}

/// Writes each refreshed summary to the log.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, summary: &EnergySummary) {
        info!(
            "Consumed {}, active {}, resting {}, net {}",
            display::format_energy(Some(summary.consumed_joules)),
            display::format_energy(Some(summary.active_burned_joules)),
            display::format_energy(summary.resting_burned_joules),
            display::format_energy(summary.net_joules()),
        );
    }
}

pub struct EnergyMonitor {
    store: Arc<dyn HealthStore>,
    reporter: Box<dyn Reporter>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl EnergyMonitor {
    pub fn new(
        store: Arc<dyn HealthStore>,
        reporter: Box<dyn Reporter>,
        interval: Duration,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            store,
            reporter,
            interval,
            running,
        }
    }

    /// Refreshes today's summary every interval until `running` is cleared.
    pub async fn run(&self) {
        info!("Monitoring energy every {}s", self.interval.as_secs());
        while self.running.load(Ordering::Relaxed) {
            match EnergySummary::fetch(self.store.as_ref(), &Local::now()).await {
                Ok(summary) => self.reporter.report(&summary),
                Err(e) => error!("Failed to refresh energy summary, skipping: {}", e),
            }
            self.wait_for_next_cycle().await;
        }
        info!("Received stop signal, terminating...");
    }

    async fn wait_for_next_cycle(&self) {
        let deadline = Instant::now() + self.interval;
        while self.running.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}
