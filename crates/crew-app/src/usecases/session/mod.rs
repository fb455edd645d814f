pub mod sign_out;
pub mod validate_session;

pub use sign_out::SignOut;
pub use validate_session::{SessionCheck, ValidateSession};
