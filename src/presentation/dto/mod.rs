pub mod capture_dto;
pub mod history_dto;

pub use capture_dto::CaptureStateResponse;
pub use history_dto::{HistoryFilterRequest, HistoryRowDto, HistoryViewResponse};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
