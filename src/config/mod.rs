mod config_loader;

pub use config_loader::{Config, ConfigLoader};
