use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Clipboard {
    /// Writes text to the system clipboard.
    async fn set_text(&self, text: String) -> Result<()>;
}

pub type ClipboardBox = Box<dyn Clipboard + Send + Sync>;
