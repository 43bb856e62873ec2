pub mod capture_handler;
pub mod history_handler;
pub mod session_handler;

pub use capture_handler::CaptureHandler;
pub use history_handler::HistoryHandler;
pub use session_handler::SessionHandler;
