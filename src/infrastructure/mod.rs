pub mod api;
pub mod printing;
pub mod scanner;
