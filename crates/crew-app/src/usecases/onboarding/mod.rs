//! Onboarding use cases
//!
//! Terms and notification steps are recorded locally only. The profile
//! service mirrors terms acceptance, which hydration uses to repair a lost
//! local flag.

pub mod record_step;

pub use record_step::RecordOnboardingStep;
