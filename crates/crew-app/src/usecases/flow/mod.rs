//! Flow resolver
//!
//! Owns the in-memory session / onboarding / profile state and turns it into
//! the `(phase, target)` pair rendered by the navigation shell.

mod context;
mod error;
mod resolver;
mod state;

pub use context::FlowContext;
pub use error::{CompletionOutcome, FlowError};
pub use resolver::{FlowResolver, FlowResolverDeps};
pub use state::{CompletionLatch, FlowState, InvalidationLatch};
