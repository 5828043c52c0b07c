pub mod basal;
pub mod config;
pub mod day;
pub mod display;
pub mod energy;
pub mod journal;
pub mod monitor;
pub mod profile;
