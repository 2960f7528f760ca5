pub mod cli;
pub mod cloud_providers;
pub mod config;
pub mod constants;
pub mod daemon;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod logging;
