use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::shared::config::ScannerConfig;
use crate::shared::error::AppError;

/// One decode attempt from the capture device.
#[derive(Debug, Clone)]
pub enum DecodeEvent {
    /// A symbol was read successfully; payload is the raw decoded text.
    Decoded(String),
    /// The frame could not be decoded. Expected continuously while aiming;
    /// never an error.
    Noise(String),
}

/// Stream of decode events from an acquired capture device. Dropping the
/// feed releases the device; release runs exactly once.
pub struct DecodeFeed {
    events: mpsc::Receiver<DecodeEvent>,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl std::fmt::Debug for DecodeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeFeed").finish_non_exhaustive()
    }
}

impl DecodeFeed {
    pub fn new(
        events: mpsc::Receiver<DecodeEvent>,
        release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            events,
            release: Some(Box::new(release)),
        }
    }

    /// `None` once the device side has hung up.
    pub async fn next_event(&mut self) -> Option<DecodeEvent> {
        self.events.recv().await
    }
}

impl Drop for DecodeFeed {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// A camera-driven symbol reader. Implementations own the platform capture
/// pipeline; at most one feed may be live per device.
#[async_trait]
pub trait SymbolReader: Send + Sync {
    async fn acquire(&self, config: &ScannerConfig) -> Result<DecodeFeed, AppError>;
}
