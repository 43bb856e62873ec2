pub mod capture_service;
pub mod history_export;
pub mod history_service;
pub mod scanner_service;

pub use capture_service::{CaptureService, SubmitOutcome};
pub use history_service::HistoryService;
pub use scanner_service::{DecodedCallback, NoiseCallback, ScannerService};
