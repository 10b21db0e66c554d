//! Concrete encode/decode scenarios

use morse_core::{
    DecodeError, Element, EncodeError, Malformation, MorseSequence, Outcome, SymbolTable, TableError,
};
use rstest::rstest;

use crate::fixtures::{codec, encode_text, SUPPORTED};

#[rstest]
#[case("SOS", "... --- ...")]
#[case("sos", "... --- ...")]
#[case("E", ".")]
#[case("PARIS", ".--. .- .-. .. ...")]
#[case("HELLO WORLD", ".... . .-.. .-.. --- / .-- --- .-. .-.. -..")]
#[case("sos!", "... --- ... -.-.--")]
#[case("  cq   de  ", "-.-. --.- / -.. .")]
#[case("A;B", ".- -.-.-. -...")]
#[case("", "")]
fn test_encode(#[case] text: &str, #[case] expected: &str) {
    let codec = codec().unwrap();
    assert_eq!(encode_text(&codec, text), expected);
}

#[rstest]
#[case("... --- ...", "SOS")]
#[case(".... . .-.. .-.. --- / .-- --- .-. .-.. -..", "HELLO WORLD")]
#[case("-.-. --.- | -.. .", "CQ DE")]
#[case(".--.-. -..-. ..--..", "@/?")]
#[case("", "")]
fn test_decode(#[case] morse: &str, #[case] expected: &str) {
    let codec = codec().unwrap();
    let decoded = codec.decode(morse).unwrap();
    assert_eq!(decoded.output.as_str(), expected);
    assert_eq!(decoded.outcome(), Outcome::Complete);
}

#[test]
fn test_empty_input_is_not_an_error() {
    let codec = codec().unwrap();

    let encoded = codec.encode("").unwrap();
    assert!(encoded.output.is_empty());
    assert_eq!(encoded.outcome(), Outcome::Complete);

    let decoded = codec.decode("").unwrap();
    assert!(decoded.output.is_empty());
    assert_eq!(decoded.outcome(), Outcome::Complete);
}

#[test]
fn test_hello_world_has_two_word_groups() {
    let codec = codec().unwrap();
    let encoded = codec.encode("HELLO WORLD").unwrap();

    let word_gaps = encoded
        .output
        .elements()
        .iter()
        .filter(|e| **e == Element::WordGap)
        .count();
    assert_eq!(word_gaps, 1);
    assert_eq!(encoded.output.letter_count(), 10);

    let decoded = codec.decode_sequence(&encoded.output).unwrap();
    assert_eq!(decoded.output.as_str(), "HELLO WORLD");
}

#[test]
fn test_missing_gaps_not_silently_decoded() {
    let codec = codec().unwrap();
    let decoded = codec.decode("...---...").unwrap();

    assert!(decoded.output.is_empty());
    assert_eq!(
        decoded.issues.as_slice(),
        &[DecodeError::UnknownPattern { position: 0, length: 9 }]
    );
    assert_eq!(decoded.outcome(), Outcome::Impossible { errors: 1 });
}

#[rstest]
#[case("...  ---", 4, Malformation::EmptyPattern)]
#[case(" ...", 0, Malformation::EmptyPattern)]
#[case("... ", 4, Malformation::EmptyPattern)]
#[case("... / / ---", 6, Malformation::EmptyWord)]
#[case("... .*.", 4, Malformation::InvalidSymbol('*'))]
fn test_malformed_sequences(#[case] morse: &str, #[case] position: usize, #[case] reason: Malformation) {
    let codec = codec().unwrap();
    let decoded = codec.decode(morse).unwrap();

    assert!(decoded
        .issues
        .iter()
        .any(|issue| *issue == DecodeError::MalformedSequence { position, reason }));
}

#[test]
fn test_partial_decode_keeps_known_letters() {
    let codec = codec().unwrap();
    let decoded = codec.decode("... ........ --- / ..--.. ...").unwrap();

    assert_eq!(decoded.output.as_str(), "SO ?S");
    assert_eq!(decoded.outcome(), Outcome::Partial { errors: 1 });
    assert_eq!(decoded.issues.as_slice()[0].position(), 4);
}

#[test]
fn test_partial_encode_reports_positions() {
    let codec = codec().unwrap();
    let encoded = codec.encode("a+b=c").unwrap();

    assert_eq!(encoded.translated, 3);
    assert_eq!(
        encoded.issues.as_slice(),
        &[
            EncodeError::UnsupportedCharacter { character: '+', position: 1 },
            EncodeError::UnsupportedCharacter { character: '=', position: 3 },
        ]
    );
    assert_eq!(encoded.outcome(), Outcome::Partial { errors: 2 });
}

#[test]
fn test_multibyte_positions() {
    let codec = codec().unwrap();
    let encoded = codec.encode("éA").unwrap();

    assert_eq!(
        encoded.issues.as_slice(),
        &[EncodeError::UnsupportedCharacter { character: 'é', position: 0 }]
    );
    assert_eq!(encode_text(&codec, "éA"), ".-");
}

#[test]
fn test_every_supported_character_encodes() {
    let codec = codec().unwrap();
    let encoded = codec.encode(SUPPORTED).unwrap();
    assert_eq!(encoded.translated, SUPPORTED.chars().count());
    assert!(encoded.is_complete());

    let decoded = codec.decode_sequence(&encoded.output).unwrap();
    assert_eq!(decoded.output.as_str(), SUPPORTED);
}

#[test]
fn test_decode_sequence_with_dangling_gaps() {
    let codec = codec().unwrap();
    let sequence = MorseSequence::<8>::from_elements(&[
        Element::WordGap,
        Element::Dot,
        Element::CharGap,
    ])
    .unwrap();

    let decoded = codec.decode_sequence(&sequence).unwrap();
    assert_eq!(decoded.output.as_str(), "E");
    assert_eq!(
        decoded.issues.as_slice(),
        &[
            DecodeError::MalformedSequence { position: 0, reason: Malformation::EmptyWord },
            DecodeError::MalformedSequence { position: 3, reason: Malformation::EmptyPattern },
        ]
    );
}

#[rstest]
#[case(&[Element::Dot, Element::SymbolGap, Element::CharGap, Element::Dash], "ET", 1)]
#[case(&[Element::Dot, Element::SymbolGap], "E", 1)]
#[case(&[Element::Dot, Element::SymbolGap, Element::WordGap, Element::Dash], "E T", 1)]
#[case(&[Element::Dot, Element::CharGap, Element::SymbolGap, Element::Dash], "ET", 2)]
fn test_adjacent_gaps_in_sequence(#[case] elements: &[Element], #[case] expected: &str, #[case] position: usize) {
    let codec = codec().unwrap();
    let sequence = MorseSequence::<8>::from_elements(elements).unwrap();

    let decoded = codec.decode_sequence(&sequence).unwrap();
    assert_eq!(decoded.output.as_str(), expected);
    assert_eq!(
        decoded.issues.as_slice(),
        &[DecodeError::MalformedSequence { position, reason: Malformation::EmptyPattern }]
    );
    assert_eq!(decoded.outcome(), Outcome::Partial { errors: 1 });
}

#[test]
fn test_duplicated_pattern_aborts_construction() {
    let patterns = [".-", "-...", "-.-.", ".-"];
    let result = SymbolTable::from_lists("ABCD", &patterns, 4);
    assert!(matches!(result, Err(TableError::DuplicatePattern { first: 'A', second: 'D', .. })));
}

#[test]
fn test_table_source_loader() {
    let source = "\
# Letters used for calling CQ
C -.-.
Q --.-
D -..
E .
";
    let table = SymbolTable::parse(source, 4).unwrap();
    let codec = morse_core::Codec::new(&table);

    assert_eq!(encode_text(&codec, "cq de"), "-.-. --.- / -.. .");
    let encoded = codec.encode("SOS").unwrap();
    assert_eq!(encoded.outcome(), Outcome::Impossible { errors: 3 });
}
