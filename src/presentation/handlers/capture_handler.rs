use std::sync::Arc;

use crate::application::services::{CaptureService, ScannerService, SubmitOutcome};
use crate::presentation::dto::CaptureStateResponse;
use crate::shared::error::AppError;

/// Maps capture-screen interactions onto the capture and scanner services.
pub struct CaptureHandler {
    capture: Arc<CaptureService>,
    scanner: Arc<ScannerService>,
}

impl CaptureHandler {
    pub fn new(capture: Arc<CaptureService>, scanner: Arc<ScannerService>) -> Self {
        Self { capture, scanner }
    }

    pub async fn set_code(&self, value: String) {
        self.capture.set_code(value).await;
    }

    pub async fn set_apartment(&self, value: String) {
        self.capture.set_apartment(value).await;
    }

    /// Enter on the code field: focus moves to the apartment field.
    pub async fn confirm_code(&self) -> CaptureStateResponse {
        self.capture.confirm_code().await;
        self.state().await
    }

    /// Enter on the apartment field: submit when eligible.
    pub async fn confirm_apartment(&self) -> Result<SubmitOutcome, AppError> {
        self.capture.confirm_apartment().await
    }

    /// The print-label button.
    pub async fn submit(&self) -> Result<SubmitOutcome, AppError> {
        self.capture.submit().await
    }

    /// Opens the scan dialog: a decoded symbol lands in the code field and
    /// the session stops, mirroring the dialog closing itself. Decode noise
    /// stays internal.
    pub async fn open_scanner(&self) -> Result<(), AppError> {
        let capture = Arc::clone(&self.capture);
        let scanner = Arc::clone(&self.scanner);
        self.scanner
            .start(
                Box::new(move |decoded| {
                    let capture = Arc::clone(&capture);
                    let scanner = Arc::clone(&scanner);
                    tokio::spawn(async move {
                        capture.apply_scan(decoded).await;
                        scanner.stop().await;
                    });
                }),
                Box::new(|_noise| {}),
            )
            .await
    }

    /// Closing the dialog without a read releases the device all the same.
    pub async fn close_scanner(&self) {
        self.scanner.stop().await;
    }

    pub async fn state(&self) -> CaptureStateResponse {
        let draft = self.capture.draft().await;
        CaptureStateResponse {
            code: draft.code,
            apartment: draft.apartment,
            focus: self.capture.focus().await,
            saving: self.capture.is_saving(),
            error: self.capture.last_error().await,
        }
    }
}
