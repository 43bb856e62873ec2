use std::sync::Arc;

use crate::application::ports::DocumentPrinter;
use crate::application::services::HistoryService;
use crate::application::services::history_export::render_history_document;
use crate::presentation::dto::{
    HistoryFilterRequest, HistoryRowDto, HistoryViewResponse, Validate,
};
use crate::shared::error::AppError;

/// Maps the history panel onto the reconciler and the print exporter.
pub struct HistoryHandler {
    history: Arc<HistoryService>,
    printer: Arc<dyn DocumentPrinter>,
    visible_rows: usize,
}

impl HistoryHandler {
    pub fn new(
        history: Arc<HistoryService>,
        printer: Arc<dyn DocumentPrinter>,
        visible_rows: usize,
    ) -> Self {
        Self {
            history,
            printer,
            visible_rows,
        }
    }

    /// Filter edit: the new value takes effect immediately; a superseded
    /// in-flight refresh cannot overwrite the newer result.
    pub async fn set_filter(&self, request: HistoryFilterRequest) -> Result<(), AppError> {
        request.validate().map_err(AppError::InvalidInput)?;
        self.history
            .set_filter(request.parsed_from(), request.parsed_to())
            .await;
        Ok(())
    }

    pub async fn refresh(&self) {
        self.history.refresh_current().await;
    }

    /// Rows for the table, capped to the visible window.
    pub async fn view(&self) -> HistoryViewResponse {
        let rows = self.history.rows().await;
        let visible = &rows[..rows.len().min(self.visible_rows)];
        HistoryViewResponse {
            rows: visible.iter().map(HistoryRowDto::from).collect(),
            error: self.history.last_error().await,
        }
    }

    /// Prints the visible rows. `Ok(false)` when there is nothing to print;
    /// the UI renders that as a disabled button.
    pub async fn print_visible(&self) -> Result<bool, AppError> {
        let rows = self.history.rows().await;
        match render_history_document(&rows, self.visible_rows) {
            Some(document) => {
                self.printer.print(&document).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
