use std::error::Error;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use fit_energy::{
    config::Config,
    monitor::{EnergyMonitor, LogReporter},
};
use fit_store::HealthStore;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    log4rs::init_file(&config.log_config, Default::default())?;

    info!("Connecting to health store at {}", config.store_url);
    let store: Arc<dyn HealthStore> = Arc::new(fit_store::create(config.store_url));

    let running = Arc::new(AtomicBool::new(true));
    let monitor = EnergyMonitor::new(
        store,
        Box::new(LogReporter),
        config.refresh_interval,
        running.clone(),
    );
    ctrlc::set_handler(move || running.store(false, Ordering::Relaxed))?;

    monitor.run().await;
    Ok(())
}
