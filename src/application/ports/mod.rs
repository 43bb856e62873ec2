pub mod printer;
pub mod record_gateway;
pub mod session_gateway;
pub mod symbol_reader;

pub use printer::{DocumentPrinter, PrintDocument};
pub use record_gateway::RecordGateway;
pub use session_gateway::{SessionGateway, UserSession};
pub use symbol_reader::{DecodeEvent, DecodeFeed, SymbolReader};
