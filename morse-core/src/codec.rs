//! Text <-> Morse translation over a [`SymbolTable`]

use heapless::{String, Vec};

use crate::error::{CapacityError, DecodeError, EncodeError, Malformation, PatternError};
use crate::sequence::{MorseSequence, CHAR_SEPARATOR, WORD_SEPARATOR, WORD_SEPARATOR_ALT};
use crate::table::{Code, SymbolTable};
use crate::types::{Element, Pattern};

/// Issues kept per translation; further issues are only counted
pub const MAX_ISSUES: usize = 32;
/// Element capacity of [`Sequence`]
pub const DEFAULT_SEQUENCE_CAPACITY: usize = 1024;
/// Byte capacity of [`Text`]
pub const DEFAULT_TEXT_CAPACITY: usize = 256;

pub type Sequence = MorseSequence<DEFAULT_SEQUENCE_CAPACITY>;
pub type Text = String<DEFAULT_TEXT_CAPACITY>;

/// Bounded list of per-item errors that never loses count
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issues<E> {
    list: Vec<E, MAX_ISSUES>,
    overflow: usize,
}

impl<E> Issues<E> {
    pub const fn new() -> Self {
        Self {
            list: Vec::new(),
            overflow: 0,
        }
    }

    fn push(&mut self, issue: E) {
        if self.list.push(issue).is_err() {
            self.overflow += 1;
        }
    }

    /// Total number of issues, including those not kept
    pub fn len(&self) -> usize {
        self.list.len() + self.overflow
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issues beyond [`MAX_ISSUES`] that were counted but not kept
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn as_slice(&self) -> &[E] {
        &self.list
    }

    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.list.iter()
    }
}

impl<E> Default for Issues<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// How much of the input made it through
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Everything translated (includes empty input)
    Complete,
    /// Some characters translated, some rejected
    Partial { errors: usize },
    /// Nothing translated and at least one rejection
    Impossible { errors: usize },
}

/// Output of a translation together with the issues found on the way
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation<T, E> {
    pub output: T,
    pub issues: Issues<E>,
    /// Characters successfully translated
    pub translated: usize,
}

impl<T, E> Translation<T, E> {
    fn new(output: T) -> Self {
        Self {
            output,
            issues: Issues::new(),
            translated: 0,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match (self.translated, self.issues.len()) {
            (_, 0) => Outcome::Complete,
            (0, errors) => Outcome::Impossible { errors },
            (_, errors) => Outcome::Partial { errors },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

pub type Encoded = Translation<Sequence, EncodeError>;
pub type Decoded = Translation<Text, DecodeError>;

/// Stateless encoder/decoder borrowing a shared table
#[derive(Copy, Clone, Debug)]
pub struct Codec<'t> {
    table: &'t SymbolTable,
}

impl<'t> Codec<'t> {
    pub const fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    /// Encode into a sequence of [`DEFAULT_SEQUENCE_CAPACITY`] elements
    ///
    /// That is roughly 100 to 130 letters. Longer text fails with
    /// [`CapacityError`]; use [`Codec::encode_with`] with a larger `N`.
    pub fn encode(&self, text: &str) -> Result<Encoded, CapacityError> {
        self.encode_with::<DEFAULT_SEQUENCE_CAPACITY>(text)
    }

    /// Encode into a sequence of capacity `N`
    ///
    /// Whitespace runs separate words. Unsupported characters are skipped and
    /// reported with their byte offset.
    pub fn encode_with<const N: usize>(&self, text: &str) -> Result<Translation<MorseSequence<N>, EncodeError>, CapacityError> {
        let mut translation = Translation::new(MorseSequence::<N>::new());

        for (position, character) in text.char_indices() {
            match self.table.pattern_for(character) {
                Some(Code::WordGap) => translation.output.end_word(),
                Some(Code::Letter(pattern)) => {
                    translation.output.push_letter(pattern)?;
                    translation.translated += 1;
                }
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Unsupported character {} at {}", character, position);
                    translation
                        .issues
                        .push(EncodeError::UnsupportedCharacter { character, position });
                }
            }
        }

        Ok(translation)
    }

    pub fn decode(&self, morse: &str) -> Result<Decoded, CapacityError> {
        self.decode_with::<DEFAULT_TEXT_CAPACITY>(morse)
    }

    /// Decode wire text into a string of capacity `N`
    ///
    /// Tokens are separated by single spaces; `/` or `|` tokens are word gaps.
    pub fn decode_with<const N: usize>(&self, morse: &str) -> Result<Translation<String<N>, DecodeError>, CapacityError> {
        let mut decoder = Decoder::<N>::new(self.table);
        if morse.is_empty() {
            return Ok(decoder.translation);
        }

        let mut offset = 0;
        for token in morse.split(CHAR_SEPARATOR) {
            let position = offset;
            offset += token.len() + CHAR_SEPARATOR.len_utf8();

            if token.is_empty() {
                decoder.empty_pattern(position);
            } else if is_word_separator(token) {
                decoder.word_gap(position);
            } else {
                decoder.letter(position, token.len(), Pattern::parse(token))?;
            }
        }

        Ok(decoder.finish(morse.len()))
    }

    /// Decode a sequence of typed elements
    pub fn decode_sequence<const M: usize>(&self, sequence: &MorseSequence<M>) -> Result<Decoded, CapacityError> {
        self.decode_sequence_with::<M, DEFAULT_TEXT_CAPACITY>(sequence)
    }

    /// Decode a sequence of typed elements into a string of capacity `N`
    ///
    /// Positions in reported issues are element indices.
    pub fn decode_sequence_with<const M: usize, const N: usize>(
        &self,
        sequence: &MorseSequence<M>,
    ) -> Result<Translation<String<N>, DecodeError>, CapacityError> {
        let mut decoder = Decoder::<N>::new(self.table);
        let mut current: Option<(usize, usize, Result<Pattern, PatternError>)> = None;
        let mut previous: Option<Element> = None;
        // Symbol gap still waiting for the next dot or dash
        let mut open_gap: Option<usize> = None;

        for (index, &element) in sequence.elements().iter().enumerate() {
            match element {
                Element::Dot | Element::Dash => {
                    open_gap = None;
                    let (_, length, pattern) = current.get_or_insert((index, 0, Ok(Pattern::empty())));
                    *length += 1;
                    if let (Ok(mut p), Some(symbol)) = (*pattern, element.symbol()) {
                        *pattern = p.push(symbol).map(move |()| p);
                    }
                }
                Element::SymbolGap => {
                    if matches!(previous, Some(Element::Dot | Element::Dash)) {
                        open_gap = Some(index);
                    } else {
                        decoder.empty_pattern(index);
                    }
                }
                Element::CharGap => {
                    if let Some(gap) = open_gap.take() {
                        decoder.empty_pattern(gap);
                    }
                    match current.take() {
                        Some((start, length, pattern)) => decoder.letter(start, length, pattern)?,
                        None => decoder.empty_pattern(index),
                    }
                }
                Element::WordGap => {
                    if let Some(gap) = open_gap.take() {
                        decoder.empty_pattern(gap);
                    }
                    if let Some((start, length, pattern)) = current.take() {
                        decoder.letter(start, length, pattern)?;
                    } else if matches!(previous, Some(Element::SymbolGap | Element::CharGap)) {
                        decoder.empty_pattern(index);
                    }
                    decoder.word_gap(index);
                }
            }
            previous = Some(element);
        }

        if let Some(gap) = open_gap.take() {
            decoder.empty_pattern(gap);
        }
        if let Some((start, length, pattern)) = current.take() {
            decoder.letter(start, length, pattern)?;
        } else if matches!(previous, Some(Element::SymbolGap | Element::CharGap)) {
            decoder.empty_pattern(sequence.len());
        }

        Ok(decoder.finish(sequence.len()))
    }
}

fn is_word_separator(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(WORD_SEPARATOR | WORD_SEPARATOR_ALT), None)
    )
}

/// Shared segmentation state for text and element decoding
struct Decoder<'t, const N: usize> {
    table: &'t SymbolTable,
    translation: Translation<String<N>, DecodeError>,
    /// Patterns seen in the current word, known or not
    word_letters: usize,
    after_word_gap: bool,
    space_pending: bool,
}

impl<'t, const N: usize> Decoder<'t, N> {
    fn new(table: &'t SymbolTable) -> Self {
        Self {
            table,
            translation: Translation::new(String::new()),
            word_letters: 0,
            after_word_gap: false,
            space_pending: false,
        }
    }

    fn letter(
        &mut self,
        position: usize,
        length: usize,
        pattern: Result<Pattern, PatternError>,
    ) -> Result<(), CapacityError> {
        self.word_letters += 1;
        self.after_word_gap = false;

        let character = match pattern {
            Ok(pattern) => self.table.character_for_pattern(pattern),
            Err(PatternError::TooLong) => None,
            Err(PatternError::InvalidSymbol(c)) => {
                self.malformed(position, Malformation::InvalidSymbol(c));
                return Ok(());
            }
            Err(PatternError::Empty) => {
                self.malformed(position, Malformation::EmptyPattern);
                return Ok(());
            }
        };

        let Some(character) = character else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unknown pattern at {}", position);
            self.translation
                .issues
                .push(DecodeError::UnknownPattern { position, length });
            return Ok(());
        };

        let output = &mut self.translation.output;
        if self.space_pending && !output.is_empty() {
            output.push(' ').map_err(|_| CapacityError)?;
        }
        output.push(character).map_err(|_| CapacityError)?;
        self.space_pending = false;
        self.translation.translated += 1;
        Ok(())
    }

    fn empty_pattern(&mut self, position: usize) {
        self.malformed(position, Malformation::EmptyPattern);
    }

    fn word_gap(&mut self, position: usize) {
        if self.word_letters == 0 {
            self.malformed(position, Malformation::EmptyWord);
        }
        self.word_letters = 0;
        self.after_word_gap = true;
        self.space_pending = true;
    }

    fn malformed(&mut self, position: usize, reason: Malformation) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Malformed sequence at {}: {}", position, reason);
        self.translation
            .issues
            .push(DecodeError::MalformedSequence { position, reason });
    }

    fn finish(mut self, end: usize) -> Translation<String<N>, DecodeError> {
        if self.after_word_gap {
            self.malformed(end, Malformation::EmptyWord);
        }
        self.translation
    }
}
