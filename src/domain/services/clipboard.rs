use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

use crate::domain::models::Clipboard;

type ClipboardRequest = (String, oneshot::Sender<Result<()>>);

static SENDER: OnceCell<mpsc::UnboundedSender<ClipboardRequest>> = OnceCell::new();

/// Owns the system clipboard for the lifetime of the app. Some platforms drop
/// clipboard contents when the owning handle goes away, so a single handle
/// lives in `start` and writes are funneled to it.
#[derive(Default)]
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<ClipboardRequest>();
        SENDER
            .set(tx)
            .map_err(|_| return anyhow!("Clipboard service is already running."))?;
        let mut clipboard = arboard::Clipboard::new()?;

        while let Some((text, reply)) = rx.recv().await {
            let res = clipboard
                .set_text(text)
                .map_err(|err| return anyhow!("Failed to write to clipboard: {err}"));
            let _ = reply.send(res);
        }

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    pub async fn set(text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            let (reply_tx, reply_rx) = oneshot::channel();
            tx.send((text, reply_tx))
                .map_err(|_| return anyhow!("Clipboard service has stopped."))?;
            return reply_rx.await?;
        }

        return Err(anyhow!("Clipboard service is not initialized."));
    }
}

#[async_trait]
impl Clipboard for ClipboardService {
    #[allow(clippy::implicit_return)]
    async fn set_text(&self, text: String) -> Result<()> {
        return ClipboardService::set(text).await;
    }
}
