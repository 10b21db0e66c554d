//! Validated character <-> pattern table

use heapless::FnvIndexMap;

use crate::error::TableError;
use crate::types::Pattern;

/// Maximum number of entries a table can hold
pub const TABLE_CAPACITY: usize = 64;

/// Declared size of the built-in ITU table
pub const ITU_ENTRY_COUNT: usize = 50;

/// International Morse code: letters, digits and common punctuation
const ITU_ENTRIES: &[(char, &str)] = &[
    // Letters A-Z
    ('A', ".-"), ('B', "-..."), ('C', "-.-."), ('D', "-.."), ('E', "."),
    ('F', "..-."), ('G', "--."), ('H', "...."), ('I', ".."), ('J', ".---"),
    ('K', "-.-"), ('L', ".-.."), ('M', "--"), ('N', "-."), ('O', "---"),
    ('P', ".--."), ('Q', "--.-"), ('R', ".-."), ('S', "..."), ('T', "-"),
    ('U', "..-"), ('V', "...-"), ('W', ".--"), ('X', "-..-"), ('Y', "-.--"),
    ('Z', "--.."),
    // Digits 0-9
    ('0', "-----"), ('1', ".----"), ('2', "..---"), ('3', "...--"), ('4', "....-"),
    ('5', "....."), ('6', "-...."), ('7', "--..."), ('8', "---.."), ('9', "----."),
    // Punctuation
    ('@', ".--.-."), (',', "--..--"), ('?', "..--.."), ('"', ".-..-."), ('!', "-.-.--"),
    (':', "---..."), ('(', "-.--."), (')', "-.--.-"), ('&', ".-..."), ('-', "-....-"),
    ('_', "..--.-"), ('.', ".-.-.-"), ('/', "-..-."), (';', "-.-.-."),
];

/// Result of a character lookup
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Code {
    /// Character maps to this pattern
    Letter(Pattern),
    /// Whitespace: separates words
    WordGap,
}

/// Immutable bijection between characters and patterns
///
/// Only obtainable through [`TableBuilder::build`] and the constructors that
/// wrap it, so every instance satisfies the uniqueness and count checks.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    by_char: FnvIndexMap<char, Pattern, TABLE_CAPACITY>,
    by_pattern: FnvIndexMap<Pattern, char, TABLE_CAPACITY>,
}

impl SymbolTable {
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Build the built-in ITU table
    pub fn itu() -> Result<Self, TableError> {
        ITU_ENTRIES
            .iter()
            .fold(TableBuilder::new().expect_len(ITU_ENTRY_COUNT), |builder, &(c, p)| {
                builder.entry(c, p)
            })
            .build()
    }

    /// Process-wide ITU table, built on first use
    #[cfg(feature = "std")]
    pub fn standard() -> Result<&'static SymbolTable, TableError> {
        use std::sync::OnceLock;

        static STANDARD: OnceLock<Result<SymbolTable, TableError>> = OnceLock::new();
        STANDARD.get_or_init(SymbolTable::itu).as_ref().map_err(|error| *error)
    }

    /// Build from parallel character and pattern lists
    pub fn from_lists(characters: &str, patterns: &[&str], expected_len: usize) -> Result<Self, TableError> {
        let count = characters.chars().count();
        if count != patterns.len() {
            return Err(TableError::LengthMismatch {
                characters: count,
                patterns: patterns.len(),
            });
        }
        characters
            .chars()
            .zip(patterns.iter())
            .fold(TableBuilder::new().expect_len(expected_len), |builder, (c, p)| {
                builder.entry(c, p)
            })
            .build()
    }

    /// Build from text with one `<character> <pattern>` pair per line
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(source: &str, expected_len: usize) -> Result<Self, TableError> {
        let mut builder = TableBuilder::new().expect_len(expected_len);
        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let syntax = TableError::Syntax { line: index + 1 };
            let mut fields = line.split_whitespace();
            let (Some(character), Some(pattern), None) = (fields.next(), fields.next(), fields.next()) else {
                return Err(syntax);
            };
            let mut chars = character.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(syntax);
            };
            builder = builder.entry(c, pattern);
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }

    /// Case-insensitive lookup; whitespace maps to the word gap
    pub fn pattern_for(&self, character: char) -> Option<Code> {
        if character.is_whitespace() {
            return Some(Code::WordGap);
        }
        self.by_char.get(&normalize(character)).copied().map(Code::Letter)
    }

    /// Exact match on a dot/dash string
    pub fn character_for(&self, pattern: &str) -> Option<char> {
        Pattern::parse(pattern).ok().and_then(|p| self.character_for_pattern(p))
    }

    pub fn character_for_pattern(&self, pattern: Pattern) -> Option<char> {
        self.by_pattern.get(&pattern).copied()
    }

    pub fn contains(&self, character: char) -> bool {
        self.by_char.contains_key(&normalize(character))
    }

    /// Entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (char, Pattern)> + '_ {
        self.by_char.iter().map(|(&c, &p)| (c, p))
    }
}

/// Case normalization applied to every table key and lookup
pub fn normalize(character: char) -> char {
    character.to_ascii_uppercase()
}

/// Collects entries and validates them once in [`build`](Self::build)
///
/// The first error is kept and later entries are ignored.
#[derive(Debug)]
pub struct TableBuilder {
    by_char: FnvIndexMap<char, Pattern, TABLE_CAPACITY>,
    by_pattern: FnvIndexMap<Pattern, char, TABLE_CAPACITY>,
    expected_len: Option<usize>,
    error: Option<TableError>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            by_char: FnvIndexMap::new(),
            by_pattern: FnvIndexMap::new(),
            expected_len: None,
            error: None,
        }
    }

    /// Require exactly `len` entries at build time
    pub fn expect_len(mut self, len: usize) -> Self {
        self.expected_len = Some(len);
        self
    }

    pub fn entry(mut self, character: char, pattern: &str) -> Self {
        if self.error.is_none() {
            if let Err(error) = self.insert(character, pattern) {
                self.error = Some(error);
            }
        }
        self
    }

    fn insert(&mut self, character: char, pattern: &str) -> Result<(), TableError> {
        if character.is_whitespace() {
            return Err(TableError::ReservedCharacter(character));
        }
        let character = normalize(character);
        let pattern = Pattern::parse(pattern)
            .map_err(|error| TableError::InvalidPattern { character, error })?;

        if self.by_char.contains_key(&character) {
            return Err(TableError::DuplicateCharacter(character));
        }
        if let Some(&first) = self.by_pattern.get(&pattern) {
            return Err(TableError::DuplicatePattern {
                pattern,
                first,
                second: character,
            });
        }

        self.by_char
            .insert(character, pattern)
            .map_err(|_| TableError::CapacityExceeded)?;
        self.by_pattern
            .insert(pattern, character)
            .map_err(|_| TableError::CapacityExceeded)?;
        Ok(())
    }

    pub fn build(self) -> Result<SymbolTable, TableError> {
        if let Some(error) = self.error {
            #[cfg(feature = "defmt")]
            defmt::error!("Symbol table rejected: {}", error);
            return Err(error);
        }
        if let Some(expected) = self.expected_len {
            let actual = self.by_char.len();
            if actual != expected {
                return Err(TableError::CountMismatch { expected, actual });
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Symbol table built with {} entries", self.by_char.len());

        Ok(SymbolTable {
            by_char: self.by_char,
            by_pattern: self.by_pattern,
        })
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
