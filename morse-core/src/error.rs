//! Error types for table construction, translation and configuration

use core::fmt;

use crate::types::Pattern;

/// A dot/dash string could not be turned into a [`Pattern`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// No symbols at all
    Empty,
    /// More symbols than any table entry may carry
    TooLong,
    /// Character outside the `.`/`-` alphabet
    InvalidSymbol(char),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "empty pattern"),
            PatternError::TooLong => write!(f, "pattern longer than {} symbols", crate::types::MAX_PATTERN_LEN),
            PatternError::InvalidSymbol(c) => write!(f, "invalid symbol {:?}", c),
        }
    }
}

/// Symbol table construction failed; no table is produced
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Character and pattern lists differ in length
    LengthMismatch { characters: usize, patterns: usize },
    /// Same character listed twice (after case normalization)
    DuplicateCharacter(char),
    /// Two characters share one pattern
    DuplicatePattern { pattern: Pattern, first: char, second: char },
    /// Entry count differs from the declared size
    CountMismatch { expected: usize, actual: usize },
    /// Pattern text is not a valid dot/dash string
    InvalidPattern { character: char, error: PatternError },
    /// Whitespace is reserved for the word gap
    ReservedCharacter(char),
    /// Table source line could not be parsed
    Syntax { line: usize },
    /// More entries than the table can hold
    CapacityExceeded,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::LengthMismatch { characters, patterns } => {
                write!(f, "{} characters but {} patterns", characters, patterns)
            }
            TableError::DuplicateCharacter(c) => write!(f, "duplicate character {:?}", c),
            TableError::DuplicatePattern { pattern, first, second } => {
                write!(f, "pattern {} used by both {:?} and {:?}", pattern, first, second)
            }
            TableError::CountMismatch { expected, actual } => {
                write!(f, "expected {} entries, found {}", expected, actual)
            }
            TableError::InvalidPattern { character, error } => {
                write!(f, "invalid pattern for {:?}: {}", character, error)
            }
            TableError::ReservedCharacter(c) => write!(f, "reserved character {:?}", c),
            TableError::Syntax { line } => write!(f, "syntax error on line {}", line),
            TableError::CapacityExceeded => write!(f, "table capacity exceeded"),
        }
    }
}

/// Per-character encode failure
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Character has no pattern; `position` is its byte offset in the input
    UnsupportedCharacter { character: char, position: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnsupportedCharacter { character, position } => {
                write!(f, "unsupported character {:?} at {}", character, position)
            }
        }
    }
}

/// Why a Morse input could not be segmented
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Malformation {
    /// Two inter-character markers in a row, or a dangling one
    EmptyPattern,
    /// Word separator with no letters on one side
    EmptyWord,
    /// Symbol outside the dot/dash alphabet
    InvalidSymbol(char),
}

/// Per-pattern decode failure
///
/// Positions are byte offsets when decoding wire text and element indices
/// when decoding a [`MorseSequence`](crate::sequence::MorseSequence).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Well-formed pattern with no table entry; `length` is its size in the input
    UnknownPattern { position: usize, length: usize },
    /// Input breaks the separator convention
    MalformedSequence { position: usize, reason: Malformation },
}

impl DecodeError {
    pub const fn position(&self) -> usize {
        match self {
            DecodeError::UnknownPattern { position, .. } => *position,
            DecodeError::MalformedSequence { position, .. } => *position,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownPattern { position, length } => {
                write!(f, "unknown pattern at {} ({} symbols)", position, length)
            }
            DecodeError::MalformedSequence { position, reason } => {
                let reason = match reason {
                    Malformation::EmptyPattern => "empty pattern",
                    Malformation::EmptyWord => "empty word",
                    Malformation::InvalidSymbol(_) => "invalid symbol",
                };
                write!(f, "malformed sequence at {}: {}", position, reason)
            }
        }
    }
}

/// Output buffer too small for the translation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output capacity exceeded")
    }
}

/// Invalid timing configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// WPM must be between 1 and 100
    SpeedOutOfRange(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SpeedOutOfRange(wpm) => write!(f, "WPM {} out of range 1-100", wpm),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
