//! Morse sequence: letter groups joined by typed gaps

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::error::CapacityError;
use crate::types::{Element, Pattern, Pulse};

/// Wire token separating words
pub const WORD_SEPARATOR: char = '/';
/// Alternative word separator accepted when decoding
pub const WORD_SEPARATOR_ALT: char = '|';
/// Wire separator between characters of one word
pub const CHAR_SEPARATOR: char = ' ';

/// Fixed-capacity sequence of [`Element`]s
///
/// Sequences built with [`push_letter`](Self::push_letter) and
/// [`end_word`](Self::end_word) never start or end with a gap and never hold
/// two adjacent gaps. [`from_elements`](Self::from_elements) accepts any
/// element stream (e.g. from an input segmenter); decoding validates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MorseSequence<const N: usize> {
    elements: Vec<Element, N>,
    letters: usize,
    word_pending: bool,
}

impl<const N: usize> MorseSequence<N> {
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            letters: 0,
            word_pending: false,
        }
    }

    /// Wrap a raw element stream without checking gap placement
    pub fn from_elements(elements: &[Element]) -> Result<Self, CapacityError> {
        let elements = Vec::from_slice(elements).map_err(|_| CapacityError)?;
        let mut letters = 0;
        let mut in_letter = false;
        for element in &elements {
            if element.is_keyed() {
                if !in_letter {
                    letters += 1;
                }
                in_letter = true;
            } else if *element != Element::SymbolGap {
                in_letter = false;
            }
        }
        Ok(Self {
            elements,
            letters,
            word_pending: false,
        })
    }

    /// Append one letter, preceded by a char or word gap as needed
    ///
    /// Either the whole letter fits or nothing is written.
    pub fn push_letter(&mut self, pattern: Pattern) -> Result<(), CapacityError> {
        if pattern.is_empty() {
            return Ok(());
        }
        let separator = if self.elements.is_empty() {
            None
        } else if self.word_pending {
            Some(Element::WordGap)
        } else {
            Some(Element::CharGap)
        };
        let needed = separator.is_some() as usize + pattern.len() * 2 - 1;
        if self.elements.len() + needed > N {
            return Err(CapacityError);
        }

        if let Some(gap) = separator {
            self.push(gap)?;
        }
        for (i, symbol) in pattern.symbols().enumerate() {
            if i > 0 {
                self.push(Element::SymbolGap)?;
            }
            self.push(symbol.to_element())?;
        }
        self.letters += 1;
        self.word_pending = false;
        Ok(())
    }

    /// Close the current word; the next letter starts after a word gap
    pub fn end_word(&mut self) {
        if !self.elements.is_empty() {
            self.word_pending = true;
        }
    }

    fn push(&mut self, element: Element) -> Result<(), CapacityError> {
        self.elements.push(element).map_err(|_| CapacityError)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of letter groups
    pub fn letter_count(&self) -> usize {
        self.letters
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.letters = 0;
        self.word_pending = false;
    }

    /// `(signal_on, units)` pulses for an output renderer, one per element
    pub fn pulses(&self) -> impl Iterator<Item = Pulse> + '_ {
        self.elements.iter().map(Element::to_pulse)
    }

    /// Total length in units
    pub fn duration_units(&self) -> u32 {
        self.elements.iter().map(Element::duration_units).sum()
    }

    /// Render the wire format into a fixed-capacity string
    pub fn to_text<const M: usize>(&self) -> Result<String<M>, CapacityError> {
        let mut text = String::new();
        write!(text, "{}", self).map_err(|_| CapacityError)?;
        Ok(text)
    }
}

impl<const N: usize> Default for MorseSequence<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire format: `.`/`-` symbols, one space between letters, ` / ` between words
impl<const N: usize> fmt::Display for MorseSequence<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            match element {
                Element::Dot => f.write_char('.')?,
                Element::Dash => f.write_char('-')?,
                Element::SymbolGap => {}
                Element::CharGap => f.write_char(CHAR_SEPARATOR)?,
                Element::WordGap => {
                    f.write_char(CHAR_SEPARATOR)?;
                    f.write_char(WORD_SEPARATOR)?;
                    f.write_char(CHAR_SEPARATOR)?;
                }
            }
        }
        Ok(())
    }
}
