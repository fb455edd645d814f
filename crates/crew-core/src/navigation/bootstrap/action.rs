#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapAction {
    /// Start the minimum splash timer.
    StartSplashTimer,

    /// Validate the stored session, then hydrate the account (runs once).
    ValidateSession,

    /// Start the minimum interactive-loading timer.
    StartLoadingFloorTimer,
}
