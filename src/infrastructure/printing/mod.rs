pub mod spool_printer;

pub use spool_printer::SpoolPrinter;
