#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! # Morse Core
//!
//! Morse code codec for embedded systems and hosts.
//! Validated symbol table, text <-> Morse translation and the 1/3/7 timing model.

pub mod types;
pub mod error;
pub mod table;
pub mod sequence;
pub mod codec;
pub mod timing;
pub mod render;
pub mod station;
pub mod time;


pub use types::*;
pub use error::*;
pub use table::{Code, SymbolTable, TableBuilder, ITU_ENTRY_COUNT, TABLE_CAPACITY};
pub use sequence::MorseSequence;
pub use codec::*;
pub use timing::*;
pub use render::{render, PulseSink};
pub use station::{Command, Response, Station, StationError};
pub use time::Duration;

/// Codec library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timing for most amateur radio applications
pub fn default_timing() -> TimingConfig {
    TimingConfig::default()
}
