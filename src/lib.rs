pub mod config;
pub mod locations;
pub mod matcher;
pub mod model;
pub mod notifier;
pub mod parser;
pub mod runner;
pub mod schedule;
pub mod scraper;
pub mod utils;
