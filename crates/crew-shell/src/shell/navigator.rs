use async_trait::async_trait;
use crew_core::navigation::NavigationTarget;
use crew_core::ports::NavigatorPort;
use tokio::sync::mpsc;
use tracing::warn;

/// `NavigatorPort` forwarding resets to the [`NavigationShell`](super::NavigationShell).
#[derive(Clone)]
pub struct ShellNavigator {
    tx: mpsc::UnboundedSender<NavigationTarget>,
}

impl ShellNavigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationTarget>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NavigatorPort for ShellNavigator {
    async fn reset_to(&self, target: NavigationTarget) {
        if self.tx.send(target).is_err() {
            warn!(?target, "navigation shell closed, reset dropped");
        }
    }
}
