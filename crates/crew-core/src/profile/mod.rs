//! Profile domain models
//!
//! Profile completion is decided by the profile service. The local
//! `profileCompleted` flag is only a cold-start cache written from server truth.

mod attributes;
mod preferences;

pub use attributes::{Gender, ProfileAttributes, ProfileUpdate};
pub use preferences::{PreferenceCategory, PreferenceSelections, ValidationError};

use crate::error::ErrorKind;

/// In-memory profile state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileState {
    pub complete: bool,
    pub attributes: Option<ProfileAttributes>,
    pub last_error: Option<ErrorKind>,
}

impl ProfileState {
    /// Replace with a freshly fetched server status.
    pub fn hydrate(&mut self, status: ProfileStatus) {
        // completion never flips back within one account
        self.complete = self.complete || status.complete;
        self.attributes = Some(status.attributes);
        self.last_error = None;
    }

    /// Record the attributes confirmed by a completion update.
    pub fn mark_complete(&mut self, attributes: ProfileAttributes) {
        self.complete = true;
        self.attributes = Some(attributes);
        self.last_error = None;
    }
}

/// Result of `ProfileServicePort::get_status`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileStatus {
    pub complete: bool,
    pub attributes: ProfileAttributes,
}
