use async_trait::async_trait;

use crate::shared::error::AppError;

/// A rendered document ready for the print pipeline. Self-contained: no
/// external stylesheet or asset references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub body: String,
}

/// Capability to render a document to a physical or virtual printer. Shared
/// by the live-capture label path and the history table export.
#[async_trait]
pub trait DocumentPrinter: Send + Sync {
    async fn print(&self, document: &PrintDocument) -> Result<(), AppError>;
}
