//! Native shell around the core state machine: configuration, logging,
//! effect execution and the terminal front end.
mod app;
pub mod config;
mod effects;
pub mod logging;
mod ui;

pub use app::run_app;
