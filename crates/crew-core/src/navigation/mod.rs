//! Navigation domain module.
//!
//! Decides which top-level flow is shown and when the shell may show it.

pub mod bootstrap;
mod phase;
mod target;

pub use bootstrap::{BootstrapAction, BootstrapEvent, BootstrapState, BootstrapStateMachine};
pub use phase::{FlowSnapshot, PresentationPhase};
pub use target::{resolve_target, NavigationTarget};
