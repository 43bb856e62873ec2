pub mod capture;
pub mod history;
pub mod package_record;

pub use capture::{CaptureDraft, FocusField};
pub use history::{DateRangeFilter, HistoryRow};
pub use package_record::{NewLabelRecord, PackageRecord};
