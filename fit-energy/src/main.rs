use std::error::Error;
use std::sync::Arc;

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use fit_energy::{
    config::Config,
    display,
    energy::EnergySummary,
    journal::Journal,
    profile::Profile,
};
use fit_model::food::FoodItem;
use fit_store::HealthStore;
use log::info;

#[derive(Parser)]
#[command(name = "fit", about = "Daily energy balance from a health store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask for access to the health data the app uses
    Authorize,
    /// Energy consumed and burned so far today
    Energy {
        #[arg(long)]
        json: bool,
    },
    /// Age, height and weight
    Profile,
    /// Record height in inches
    SetHeight { inches: f64 },
    /// Record weight in pounds
    SetWeight { pounds: f64 },
    /// Foods that can be logged
    Foods,
    /// Foods logged today
    Journal,
    /// Log a food from the catalog as eaten now
    LogFood { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    log4rs::init_file(&config.log_config, Default::default())?;

    info!("Connecting to health store at {}", config.store_url);
    let store: Arc<dyn HealthStore> = Arc::new(fit_store::create(config.store_url));

    match cli.command {
        Command::Authorize => {
            if Profile::new(store).authorize().await? {
                println!("Access granted");
            } else {
                println!("Access not granted");
            }
        }
        Command::Energy { json } => {
            let summary = EnergySummary::fetch(store.as_ref(), &Local::now()).await?;
            if json {
                let output = serde_json::json!({
                    "summary": summary,
                    "net_joules": summary.net_joules(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "Consumed:       {}",
                    display::format_energy(Some(summary.consumed_joules))
                );
                println!(
                    "Active burned:  {}",
                    display::format_energy(Some(summary.active_burned_joules))
                );
                println!(
                    "Resting burned: {}",
                    display::format_energy(summary.resting_burned_joules)
                );
                println!(
                    "Net:            {}",
                    display::format_energy(summary.net_joules())
                );
            }
        }
        Command::Profile => {
            let profile = Profile::new(store);
            let age = profile.age(Local::now().date_naive()).await?;
            let height = profile.height_inches().await?;
            let weight = profile.weight_pounds().await?;
            println!("Age:    {}", display::format_value(age, "years"));
            println!(
                "Height: {}",
                display::format_value(height.map(|h| format!("{:.1}", h)), "in")
            );
            println!(
                "Weight: {}",
                display::format_value(weight.map(|w| format!("{:.1}", w)), "lb")
            );
        }
        Command::SetHeight { inches } => {
            Profile::new(store)
                .save_height_inches(inches, Utc::now())
                .await?;
            println!("Saved height of {} in", inches);
        }
        Command::SetWeight { pounds } => {
            Profile::new(store)
                .save_weight_pounds(pounds, Utc::now())
                .await?;
            println!("Saved weight of {} lb", pounds);
        }
        Command::Foods => {
            for food_item in FoodItem::catalog() {
                println!(
                    "{:<24} {}",
                    food_item.name(),
                    display::format_energy(Some(food_item.joules()))
                );
            }
        }
        Command::Journal => {
            let mut journal = Journal::new(store);
            journal.refresh(&Local::now()).await?;
            if journal.food_items().is_empty() {
                println!("Nothing logged today");
            }
            for food_item in journal.food_items() {
                println!(
                    "{:<24} {}",
                    food_item.name(),
                    display::format_energy(Some(food_item.joules()))
                );
            }
        }
        Command::LogFood { name } => {
            let Some(food_item) = FoodItem::find_in_catalog(&name) else {
                println!("{} is not in the catalog", name);
                return Ok(());
            };
            let mut journal = Journal::new(store);
            journal.add(food_item.clone(), Utc::now()).await?;
            println!("Logged {}", food_item.name());
        }
    }

    Ok(())
}
