//! Business logic use cases
//!
//! Small single-purpose use cases are composed by the [`flow::FlowResolver`],
//! which owns the in-memory state and the navigation guards.
//!
//! 启动流程：
//! ValidateSession → HydrateAccount → resolve_target → Shell

pub mod flow;
pub mod hydrate_account;
pub mod internal;
pub mod onboarding;
pub mod profile;
pub mod session;

pub use hydrate_account::{AccountSnapshot, HydrateAccount};
pub use onboarding::RecordOnboardingStep;
pub use profile::CompleteProfile;
pub use session::{SessionCheck, SignOut, ValidateSession};
