//! Process bootstrap: logging, configuration and wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_default, ShellConfig, StorageConfig};
pub use wiring::{build_resolver, RunningShell, ServicePorts, WiredShell};
