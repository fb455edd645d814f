#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapEvent {
    /// The resolver was mounted (may repeat on re-render).
    Mount,

    // Timers
    SplashElapsed,
    LoadingFloorElapsed,

    /// Session validation and hydration produced a concrete result.
    Resolved,
}
