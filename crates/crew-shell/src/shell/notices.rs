use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crew_core::notice::{Notice, NoticeKind};
use crew_core::ports::NoticePort;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// A notice with the time it reached the shell.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveredNotice {
    pub notice: Notice,
    pub delivered_at: DateTime<Utc>,
}

/// `NoticePort` queueing notices for the host UI.
#[derive(Clone)]
pub struct ChannelNoticeSink {
    tx: mpsc::UnboundedSender<DeliveredNotice>,
}

impl ChannelNoticeSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DeliveredNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NoticePort for ChannelNoticeSink {
    async fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Modal | NoticeKind::Error => {
                warn!(kind = ?notice.kind, title = %notice.title, "user notice")
            }
            NoticeKind::Inline => info!(title = %notice.title, "user notice"),
        }

        let delivered = DeliveredNotice {
            notice,
            delivered_at: Utc::now(),
        };
        if self.tx.send(delivered).is_err() {
            warn!("notice receiver closed, notice dropped");
        }
    }
}
