//! Port interfaces for the application layer
//!
//! Ports define the contract between the flow resolver (use cases) and the
//! collaborators it does not own: the session and profile services, the
//! persistent flag store, and the navigation shell. Implementations live in
//! `crew-infra`, `crew-shell`, or the host application.

pub mod flag_store;
mod navigator;
mod notice;
pub mod profile_service;
pub mod session_service;


pub use flag_store::{FlagKey, FlagStorePort, StorageError, FLAG_TRUE};
pub use navigator::NavigatorPort;
pub use notice::NoticePort;
pub use profile_service::{ProfileError, ProfileServicePort};
pub use session_service::{SessionError, SessionServicePort};
