use async_trait::async_trait;

use crate::notice::Notice;

#[async_trait]
pub trait NoticePort: Send + Sync {
    async fn notify(&self, notice: Notice);
}
