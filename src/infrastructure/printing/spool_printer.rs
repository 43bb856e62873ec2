use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::printer::{DocumentPrinter, PrintDocument};
use crate::shared::error::AppError;

/// Writes rendered documents into a spool directory for pickup by the OS
/// print pipeline. One file per document, uuid-named, html extension.
pub struct SpoolPrinter {
    dir: PathBuf,
}

impl SpoolPrinter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DocumentPrinter for SpoolPrinter {
    async fn print(&self, document: &PrintDocument) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| AppError::Printer(err.to_string()))?;

        let path = self.dir.join(format!("{}.html", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, document.body.as_bytes())
            .await
            .map_err(|err| AppError::Printer(err.to_string()))?;

        info!(path = %path.display(), title = %document.title, "document spooled for printing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spools_one_file_per_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let printer = SpoolPrinter::new(dir.path());

        let document = PrintDocument {
            title: "Package label - 101".to_string(),
            body: "PKG-1\n101\n".to_string(),
        };
        printer.print(&document).await.expect("print");
        printer.print(&document).await.expect("print again");

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read spool dir")
            .collect();
        assert_eq!(files.len(), 2);

        let first = files[0].as_ref().expect("entry").path();
        let contents = std::fs::read_to_string(first).expect("read spooled file");
        assert_eq!(contents, "PKG-1\n101\n");
    }
}
