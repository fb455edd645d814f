//! # crew-shell
//!
//! Outer layer of the Crew client: process bootstrap (tracing, TOML config,
//! dependency wiring) and the navigation shell that mounts screens from the
//! flow resolver's snapshot.

pub mod bootstrap;
pub mod shell;

pub use bootstrap::{build_resolver, load_config, load_config_or_default, ShellConfig};
pub use shell::{NavigationShell, Route, ScreenMounter};
