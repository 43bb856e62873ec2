use std::sync::Arc;

use anyhow::Context;

use crate::application::ports::{DocumentPrinter, RecordGateway, SessionGateway, SymbolReader};
use crate::application::services::{CaptureService, HistoryService, ScannerService};
use crate::infrastructure::api::HttpApiClient;
use crate::infrastructure::printing::SpoolPrinter;
use crate::infrastructure::scanner::{ChannelSymbolReader, DecodeInjector};
use crate::presentation::handlers::{CaptureHandler, HistoryHandler, SessionHandler};
use crate::shared::config::AppConfig;

/// Wires configuration through infrastructure into services and handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub capture: Arc<CaptureService>,
    pub history: Arc<HistoryService>,
    pub scanner: Arc<ScannerService>,
    pub session: Arc<dyn SessionGateway>,
    pub printer: Arc<dyn DocumentPrinter>,
    /// Feed for the external capture pipeline to push decode results.
    pub scan_input: DecodeInjector,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("invalid configuration")?;

        let api = Arc::new(HttpApiClient::new(&config.api)?);
        let printer: Arc<dyn DocumentPrinter> =
            Arc::new(SpoolPrinter::new(&config.printing.spool_dir));
        let (reader, scan_input) = ChannelSymbolReader::new();

        let history = Arc::new(HistoryService::new(
            Arc::clone(&api) as Arc<dyn RecordGateway>,
            config.history.query_limit,
        ));
        let capture = Arc::new(CaptureService::new(
            Arc::clone(&api) as Arc<dyn RecordGateway>,
            Arc::clone(&printer),
            Arc::clone(&history),
        ));
        let scanner = Arc::new(ScannerService::new(
            Arc::new(reader) as Arc<dyn SymbolReader>,
            config.scanner.clone(),
        ));

        Ok(Self {
            config,
            capture,
            history,
            scanner,
            session: api,
            printer,
            scan_input,
        })
    }

    pub fn capture_handler(&self) -> CaptureHandler {
        CaptureHandler::new(Arc::clone(&self.capture), Arc::clone(&self.scanner))
    }

    pub fn history_handler(&self) -> HistoryHandler {
        HistoryHandler::new(
            Arc::clone(&self.history),
            Arc::clone(&self.printer),
            self.config.history.visible_rows,
        )
    }

    pub fn session_handler(&self) -> SessionHandler {
        SessionHandler::new(Arc::clone(&self.session))
    }
}
