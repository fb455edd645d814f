use async_trait::async_trait;

use crate::navigation::NavigationTarget;

/// Receives explicit navigation stack resets (finalization, forced logout).
#[async_trait]
pub trait NavigatorPort: Send + Sync {
    async fn reset_to(&self, target: NavigationTarget);
}
