//! Shared test fixtures

use morse_core::{Codec, SymbolTable, TableError};

/// Every character of the built-in table
pub const SUPPORTED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@,?\"!:()&-_./;";

/// Process-wide ITU table
pub fn table() -> Result<&'static SymbolTable, TableError> {
    SymbolTable::standard()
}

pub fn codec() -> Result<Codec<'static>, TableError> {
    Ok(Codec::new(table()?))
}

/// Encode then render as wire text
pub fn encode_text(codec: &Codec<'_>, text: &str) -> String {
    match codec.encode(text) {
        Ok(encoded) => encoded.output.to_string(),
        Err(error) => format!("<{}>", error),
    }
}
