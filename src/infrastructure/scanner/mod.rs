pub mod channel_reader;

pub use channel_reader::{ChannelSymbolReader, DecodeInjector};
