use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::application::ports::{DecodeEvent, SymbolReader};
use crate::shared::config::ScannerConfig;
use crate::shared::error::AppError;

/// Callback for a successful read; fires at most once per session.
pub type DecodedCallback = Box<dyn Fn(String) + Send + Sync>;
/// Callback for an undecodable frame. Continuous noise is expected and is
/// never surfaced to the operator.
pub type NoiseCallback = Box<dyn Fn(String) + Send + Sync>;

/// Decoder bridge: owns the capture device lifecycle and forwards decode
/// events to the caller. Exactly one session may be active; starting a new
/// one tears the old one down first. The bridge does not stop itself after
/// a successful read; the caller closes the scan surface and calls [`stop`],
/// which releases the device deterministically and tolerates being called
/// with no session active.
///
/// [`stop`]: ScannerService::stop
pub struct ScannerService {
    reader: Arc<dyn SymbolReader>,
    config: ScannerConfig,
    active: Mutex<Option<ScanSession>>,
}

struct ScanSession {
    forwarder: JoinHandle<()>,
}

impl ScannerService {
    pub fn new(reader: Arc<dyn SymbolReader>, config: ScannerConfig) -> Self {
        Self {
            reader,
            config,
            active: Mutex::new(None),
        }
    }

    pub async fn start(
        &self,
        on_decoded: DecodedCallback,
        on_noise: NoiseCallback,
    ) -> Result<(), AppError> {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            teardown(previous).await;
        }

        let mut feed = self.reader.acquire(&self.config).await?;
        let forwarder = tokio::spawn(async move {
            let mut fired = false;
            while let Some(event) = feed.next_event().await {
                match event {
                    DecodeEvent::Decoded(text) if !fired => {
                        fired = true;
                        on_decoded(text);
                    }
                    DecodeEvent::Decoded(_) => {
                        // At most one decode per session; the caller is
                        // expected to stop us after the first.
                    }
                    DecodeEvent::Noise(info) => {
                        debug!(info = %info, "scan frame not decodable");
                        on_noise(info);
                    }
                }
            }
        });

        *active = Some(ScanSession { forwarder });
        Ok(())
    }

    /// Idempotent; safe when no session is active or the device was never
    /// granted.
    pub async fn stop(&self) {
        let mut active = self.active.lock().await;
        if let Some(session) = active.take() {
            teardown(session).await;
        }
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }
}

/// Aborting the forwarder drops its feed, which releases the device. Await
/// the handle so the release has happened by the time teardown returns.
async fn teardown(session: ScanSession) {
    session.forwarder.abort();
    let _ = session.forwarder.await;
}
