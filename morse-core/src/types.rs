//! Core data types for the Morse codec

use core::fmt;

use crate::error::PatternError;

/// Longest pattern a table entry may carry
pub const MAX_PATTERN_LEN: usize = 6;

/// Keyed Morse symbols
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Dit (short symbol)
    Dot,
    /// Dah (long symbol)
    Dash,
}

impl Symbol {
    /// Returns the keyed duration of this symbol in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
        }
    }

    /// Wire character for this symbol
    pub const fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    pub const fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }

    pub const fn to_element(&self) -> Element {
        match self {
            Symbol::Dot => Element::Dot,
            Symbol::Dash => Element::Dash,
        }
    }
}

/// Elements of a Morse sequence: keyed symbols and typed gaps
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Dit
    Dot,
    /// Dah
    Dash,
    /// Silence between symbols of one character
    SymbolGap,
    /// Silence between characters of one word
    CharGap,
    /// Silence between words
    WordGap,
}

impl Element {
    /// Returns the duration of this element in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Element::Dot => 1,
            Element::Dash => 3,
            Element::SymbolGap => 1,
            Element::CharGap => 3,
            Element::WordGap => 7,
        }
    }

    /// Returns true if this element produces key output
    pub const fn is_keyed(&self) -> bool {
        match self {
            Element::Dot | Element::Dash => true,
            Element::SymbolGap | Element::CharGap | Element::WordGap => false,
        }
    }

    /// Symbol carried by this element, if keyed
    pub const fn symbol(&self) -> Option<Symbol> {
        match self {
            Element::Dot => Some(Symbol::Dot),
            Element::Dash => Some(Symbol::Dash),
            _ => None,
        }
    }

    pub const fn to_pulse(&self) -> Pulse {
        Pulse {
            signal_on: self.is_keyed(),
            units: self.duration_units(),
        }
    }
}

/// One key-down or key-up interval for an output renderer
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    /// true = key down
    pub signal_on: bool,
    /// Length in timing units
    pub units: u32,
}

impl Pulse {
    pub const fn on(units: u32) -> Self {
        Self { signal_on: true, units }
    }

    pub const fn off(units: u32) -> Self {
        Self { signal_on: false, units }
    }
}

/// Dot/dash pattern of a single character, packed into bits
///
/// Bit `i` is set when symbol `i` is a dash. Equality and hashing cover both
/// length and bits, so `..` and `...` stay distinct.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    len: u8,
    bits: u8,
}

impl Pattern {
    pub(crate) const fn empty() -> Self {
        Self { len: 0, bits: 0 }
    }

    /// Parse a dot/dash string such as `".-"`
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut pattern = Self::empty();
        for c in text.chars() {
            let symbol = Symbol::from_char(c).ok_or(PatternError::InvalidSymbol(c))?;
            pattern.push(symbol)?;
        }
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(pattern)
    }

    /// Build a pattern from a symbol slice
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self, PatternError> {
        let mut pattern = Self::empty();
        for &symbol in symbols {
            pattern.push(symbol)?;
        }
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(pattern)
    }

    /// Append one symbol
    pub(crate) fn push(&mut self, symbol: Symbol) -> Result<(), PatternError> {
        if self.len as usize >= MAX_PATTERN_LEN {
            return Err(PatternError::TooLong);
        }
        if symbol == Symbol::Dash {
            self.bits |= 1 << self.len;
        }
        self.len += 1;
        Ok(())
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbol at `index`, first symbol at 0
    pub const fn symbol(&self, index: usize) -> Option<Symbol> {
        if index >= self.len as usize {
            return None;
        }
        if self.bits & (1 << index) != 0 {
            Some(Symbol::Dash)
        } else {
            Some(Symbol::Dot)
        }
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.len()).filter_map(move |i| self.symbol(i))
    }

    /// Keyed time plus intra-character gaps, in units
    pub fn duration_units(&self) -> u32 {
        let keyed: u32 = self.symbols().map(|s| s.duration_units()).sum();
        keyed + (self.len() as u32).saturating_sub(1)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols() {
            fmt::Write::write_char(f, symbol.as_char())?;
        }
        Ok(())
    }
}
