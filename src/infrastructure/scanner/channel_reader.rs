use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::symbol_reader::{DecodeEvent, DecodeFeed, SymbolReader};
use crate::shared::config::ScannerConfig;
use crate::shared::error::AppError;

const FEED_BUFFER: usize = 32;

struct ReaderShared {
    in_use: AtomicBool,
    sender: StdMutex<Option<mpsc::Sender<DecodeEvent>>>,
}

/// Symbol reader fed through a channel by an external capture pipeline.
/// Models the exclusive-device contract: one live feed at a time, released
/// when the feed is dropped.
pub struct ChannelSymbolReader {
    shared: Arc<ReaderShared>,
}

/// Handle for the capture pipeline to push decode results into the active
/// session. Events sent while no session is live are dropped.
#[derive(Clone)]
pub struct DecodeInjector {
    shared: Arc<ReaderShared>,
}

impl ChannelSymbolReader {
    pub fn new() -> (Self, DecodeInjector) {
        let shared = Arc::new(ReaderShared {
            in_use: AtomicBool::new(false),
            sender: StdMutex::new(None),
        });
        (
            Self {
                shared: Arc::clone(&shared),
            },
            DecodeInjector { shared },
        )
    }
}

#[async_trait]
impl SymbolReader for ChannelSymbolReader {
    async fn acquire(&self, config: &ScannerConfig) -> Result<DecodeFeed, AppError> {
        if self.shared.in_use.swap(true, Ordering::SeqCst) {
            return Err(AppError::Scanner(
                "capture device already in use".to_string(),
            ));
        }
        debug!(
            fps = config.fps,
            symbologies = config.symbologies.len(),
            "capture device acquired"
        );

        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        *lock_sender(&self.shared) = Some(tx);

        let shared = Arc::clone(&self.shared);
        Ok(DecodeFeed::new(rx, move || {
            *lock_sender(&shared) = None;
            shared.in_use.store(false, Ordering::SeqCst);
            debug!("capture device released");
        }))
    }
}

impl DecodeInjector {
    /// Returns false when no session was live to receive the event.
    pub fn decoded(&self, text: impl Into<String>) -> bool {
        self.send(DecodeEvent::Decoded(text.into()))
    }

    pub fn noise(&self, info: impl Into<String>) -> bool {
        self.send(DecodeEvent::Noise(info.into()))
    }

    fn send(&self, event: DecodeEvent) -> bool {
        let sender = lock_sender(&self.shared).clone();
        match sender {
            Some(tx) => tx.try_send(event).is_ok(),
            None => false,
        }
    }
}

fn lock_sender(shared: &ReaderShared) -> std::sync::MutexGuard<'_, Option<mpsc::Sender<DecodeEvent>>> {
    shared
        .sender
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn device_is_exclusive_until_the_feed_is_dropped() {
        let (reader, _injector) = ChannelSymbolReader::new();
        let config = ScannerConfig::default();

        let feed = reader.acquire(&config).await.expect("first acquire");
        let err = reader.acquire(&config).await.expect_err("still in use");
        assert!(matches!(err, AppError::Scanner(_)));

        drop(feed);
        reader.acquire(&config).await.expect("re-acquire after drop");
    }

    #[tokio::test]
    async fn injected_events_reach_the_live_feed_only() {
        let (reader, injector) = ChannelSymbolReader::new();
        assert!(!injector.decoded("early"));

        let mut feed = reader.acquire(&ScannerConfig::default()).await.expect("acquire");
        assert!(injector.noise("blur"));
        assert!(injector.decoded("CODE-1"));

        assert!(matches!(
            feed.next_event().await,
            Some(DecodeEvent::Noise(_))
        ));
        match feed.next_event().await {
            Some(DecodeEvent::Decoded(text)) => assert_eq!(text, "CODE-1"),
            other => panic!("unexpected event: {other:?}"),
        }

        drop(feed);
        assert!(!injector.decoded("late"));
    }
}
