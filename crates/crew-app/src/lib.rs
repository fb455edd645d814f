//! Crew client application layer
//!
//! This crate contains the use cases and the flow resolver that decides which
//! top-level flow the navigation shell mounts.

pub mod usecases;

pub use usecases::flow::{CompletionOutcome, FlowError, FlowResolver, FlowResolverDeps};
