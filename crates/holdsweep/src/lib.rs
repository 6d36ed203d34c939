//! Command-line front end for holdsweep
//!
//! Loads a daily price history from CSV, merges run settings from a YAML
//! run file and the command line, runs the backtest sweep and writes the
//! results table, omissions and summary for plotting tools.

pub mod app;
pub mod cli;
pub mod config;
pub mod export;
pub mod logging;
pub mod prices;
pub mod report;

pub use app::run;
pub use cli::Args;
pub use config::{RunFile, Settings};
pub use logging::init_logging;
