//! Bootstrap domain module.
//!
//! This module defines the launch-time bootstrap state machine types. The
//! "has validation started" and "has the splash minimum elapsed" guards are
//! encoded in [`BootstrapState`] rather than kept as loose flags.

mod action;
mod event;
mod state;
pub mod state_machine;

pub use action::BootstrapAction;
pub use event::BootstrapEvent;
pub use state::BootstrapState;
pub use state_machine::BootstrapStateMachine;
