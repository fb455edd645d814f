//! # Dependency Injection / 依赖注入模块
//!
//! Builds the flow resolver from configuration and the host's service ports,
//! and connects it to the navigation shell. This is the only place that knows
//! every concrete adapter.

use std::sync::Arc;

use crew_app::{FlowResolver, FlowResolverDeps};
use crew_core::navigation::NavigationTarget;
use crew_core::ports::{ProfileServicePort, SessionServicePort};
use crew_infra::FileFlagStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::config::ShellConfig;
use crate::shell::{ChannelNoticeSink, DeliveredNotice, NavigationShell, ScreenMounter, ShellNavigator};

/// Remote services supplied by the host application.
#[derive(Clone)]
pub struct ServicePorts {
    pub session_service: Arc<dyn SessionServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
}

/// A wired resolver plus the receiving ends the host consumes.
pub struct WiredShell {
    pub resolver: Arc<FlowResolver>,
    pub resets: mpsc::UnboundedReceiver<NavigationTarget>,
    pub notices: mpsc::UnboundedReceiver<DeliveredNotice>,
}

/// Started shell: bootstrap and screen mounting run in the background.
pub struct RunningShell<M> {
    pub resolver: Arc<FlowResolver>,
    pub notices: mpsc::UnboundedReceiver<DeliveredNotice>,
    pub bootstrap: JoinHandle<()>,
    pub shell: JoinHandle<M>,
}

pub fn build_resolver(config: &ShellConfig, services: ServicePorts) -> anyhow::Result<WiredShell> {
    let data_dir = config.data_dir()?;
    let flag_store = Arc::new(FileFlagStore::with_defaults(data_dir));
    info!(path = %flag_store.path().display(), "flag store configured");

    let (navigator, resets) = ShellNavigator::channel();
    let (notice_sink, notices) = ChannelNoticeSink::channel();

    let resolver = Arc::new(FlowResolver::new(
        config.flow.clone(),
        FlowResolverDeps {
            session_service: services.session_service,
            profile_service: services.profile_service,
            flag_store,
            navigator: Arc::new(navigator),
            notices: Arc::new(notice_sink),
        },
    ));

    Ok(WiredShell {
        resolver,
        resets,
        notices,
    })
}

impl WiredShell {
    /// Spawn the navigation shell, then the bootstrap sequence.
    pub fn start<M>(self, mounter: M) -> RunningShell<M>
    where
        M: ScreenMounter + 'static,
    {
        let shell = NavigationShell::new(mounter, self.resolver.subscribe(), self.resets);
        let shell = tokio::spawn(shell.run());
        let bootstrap = self.resolver.spawn_bootstrap();

        RunningShell {
            resolver: self.resolver,
            notices: self.notices,
            bootstrap,
            shell,
        }
    }
}
