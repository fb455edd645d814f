//! # crew-core
//!
//! Core domain models and navigation rules for the Crew client.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the session / onboarding / profile models, the navigation decision table,
//! the bootstrap state machine, and the ports implemented by outer layers.

pub mod config;
pub mod error;
pub mod ids;
pub mod navigation;
pub mod notice;
pub mod onboarding;
pub mod ports;
pub mod profile;
pub mod session;

// Re-export commonly used types at the crate root
pub use config::FlowConfig;
pub use error::ErrorKind;
pub use ids::UserId;
pub use navigation::{resolve_target, FlowSnapshot, NavigationTarget, PresentationPhase};
pub use notice::{Notice, NoticeKind};
pub use onboarding::OnboardingState;
pub use profile::{
    PreferenceCategory, PreferenceSelections, ProfileAttributes, ProfileState, ProfileStatus,
    ProfileUpdate, ValidationError,
};
pub use session::{AuthenticatedSession, Credential, SessionState, SessionStatus};
