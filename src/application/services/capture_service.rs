use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{DocumentPrinter, PrintDocument, RecordGateway};
use crate::application::services::history_service::HistoryService;
use crate::domain::entities::{CaptureDraft, FocusField, NewLabelRecord};
use crate::shared::error::AppError;

/// Capture form state plus the submit orchestration.
///
/// Submit is a two-state machine (`Idle`/`Saving`). Entering `Saving` fires
/// the durable save and then prints immediately, before the save outcome is
/// known: a slow or failing backend never blocks the physical print. On
/// settle the draft clears, the history refreshes with the active filter,
/// and the machine returns to `Idle` so failed saves never block further
/// submissions. A printed label whose save failed is an accepted
/// inconsistency, surfaced only through the retained error message.
pub struct CaptureService {
    gateway: Arc<dyn RecordGateway>,
    printer: Arc<dyn DocumentPrinter>,
    history: Arc<HistoryService>,
    saving: AtomicBool,
    state: Mutex<CaptureState>,
}

struct CaptureState {
    draft: CaptureDraft,
    focus: FocusField,
    last_error: Option<String>,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self {
            draft: CaptureDraft::default(),
            // The code field has focus when the capture screen mounts.
            focus: FocusField::Code,
            last_error: None,
        }
    }
}

/// What a submit attempt did, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Fields were incomplete or a submission was already in flight.
    Ignored,
    /// Printed and saved.
    Saved,
}

impl CaptureService {
    pub fn new(
        gateway: Arc<dyn RecordGateway>,
        printer: Arc<dyn DocumentPrinter>,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            gateway,
            printer,
            history,
            saving: AtomicBool::new(false),
            state: Mutex::new(CaptureState::default()),
        }
    }

    pub async fn set_code(&self, value: impl Into<String>) {
        self.state.lock().await.draft.code = value.into();
    }

    pub async fn set_apartment(&self, value: impl Into<String>) {
        self.state.lock().await.draft.apartment = value.into();
    }

    /// A successful scan writes through the same path as typing. Focus stays
    /// wherever it was; only the initial mount focuses the code field.
    pub async fn apply_scan(&self, decoded: String) {
        debug!(len = decoded.len(), "applying decoded text to code field");
        self.set_code(decoded).await;
    }

    pub async fn draft(&self) -> CaptureDraft {
        self.state.lock().await.draft.clone()
    }

    pub async fn focus(&self) -> FocusField {
        self.state.lock().await.focus
    }

    /// Message from the most recent failed save, cleared on the next settle.
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Confirmation on the code field moves focus to the apartment field
    /// without submitting.
    pub async fn confirm_code(&self) {
        self.state.lock().await.focus = FocusField::Apartment;
    }

    /// Confirmation on the apartment field submits, subject to eligibility.
    pub async fn confirm_apartment(&self) -> Result<SubmitOutcome, AppError> {
        self.submit().await
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, AppError> {
        let record = {
            let state = self.state.lock().await;
            if !state.draft.is_submittable() {
                return Ok(SubmitOutcome::Ignored);
            }
            state.draft.to_new_record()
        };

        // Atomic Idle -> Saving; a second trigger while saving is a no-op.
        if self
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(SubmitOutcome::Ignored);
        }

        // Fire the durable save; its result is not yet known.
        let gateway = Arc::clone(&self.gateway);
        let save_record = record.clone();
        let save = tokio::spawn(async move { gateway.create(&save_record).await });

        // Print before awaiting the save outcome. Print failures do not
        // abort the save; they only log.
        let document = render_label(&record);
        if let Err(err) = self.printer.print(&document).await {
            warn!(error = %err, "label print failed");
        }

        let result = match save.await {
            Ok(result) => result,
            Err(err) => Err(AppError::Internal(format!("save task failed: {err}"))),
        };

        self.settle(&result).await;
        result.map(|()| SubmitOutcome::Saved)
    }

    /// Settle runs on either outcome: clear the draft for the next package,
    /// refocus the code field, record or clear the error, refresh the
    /// history with the active filter, return to `Idle`.
    async fn settle(&self, result: &Result<(), AppError>) {
        {
            let mut state = self.state.lock().await;
            state.draft.clear();
            state.focus = FocusField::Code;
            state.last_error = result.as_ref().err().map(|err| err.to_string());
        }
        self.history.refresh_current().await;
        self.saving.store(false, Ordering::SeqCst);
    }
}

/// Plain-text label: the code and the destination apartment.
fn render_label(record: &NewLabelRecord) -> PrintDocument {
    PrintDocument {
        title: format!("Package label - {}", record.apartment),
        body: format!("{}\n{}\n", record.package_code, record.apartment),
    }
}
