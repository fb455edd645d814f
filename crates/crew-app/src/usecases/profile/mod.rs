//! Profile use cases

pub mod complete_profile;

pub use complete_profile::CompleteProfile;
