//! Round-trip and table laws

use morse_core::{Code, Outcome};
use proptest::prelude::*;

use crate::fixtures::{codec, table, SUPPORTED};

/// Words of supported characters joined by single spaces
fn supported_text() -> impl Strategy<Value = String> {
    let alphabet: Vec<char> = SUPPORTED.chars().chain("abcdefghijklmnopqrstuvwxyz".chars()).collect();
    let word = prop::collection::vec(prop::sample::select(alphabet), 1..8)
        .prop_map(|chars| chars.into_iter().collect::<String>());
    prop::collection::vec(word, 0..6).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn prop_round_trip(text in supported_text()) {
        let codec = codec().unwrap();
        let encoded = codec.encode(&text).unwrap();
        prop_assert_eq!(encoded.outcome(), Outcome::Complete);

        let wire = encoded.output.to_string();
        let decoded = codec.decode(&wire).unwrap();
        prop_assert!(decoded.is_complete());
        prop_assert_eq!(decoded.output.as_str(), text.to_ascii_uppercase());
    }

    #[test]
    fn prop_sequence_round_trip(text in supported_text()) {
        let codec = codec().unwrap();
        let encoded = codec.encode(&text).unwrap();
        let decoded = codec.decode_sequence(&encoded.output).unwrap();
        prop_assert_eq!(decoded.output.as_str(), text.to_ascii_uppercase());
    }

    #[test]
    fn prop_encode_ignores_case(text in supported_text()) {
        let codec = codec().unwrap();
        let lower = codec.encode(&text.to_ascii_lowercase()).unwrap();
        let upper = codec.encode(&text.to_ascii_uppercase()).unwrap();
        prop_assert_eq!(lower.output, upper.output);
    }

    #[test]
    fn prop_whitespace_runs_collapse(words in prop::collection::vec("[A-Z0-9]{1,5}", 1..5), pad in 1usize..4) {
        let codec = codec().unwrap();
        let single = words.join(" ");
        let padded = words.join(" ".repeat(pad).as_str());
        prop_assert_eq!(
            codec.encode(&single).unwrap().output,
            codec.encode(&padded).unwrap().output
        );
    }

    #[test]
    fn prop_decode_never_panics(morse in "[.\\- /|x]{0,40}") {
        let codec = codec().unwrap();
        let decoded = codec.decode(&morse).unwrap();
        // Every issue points inside the input (or at its end)
        for issue in decoded.issues.iter() {
            prop_assert!(issue.position() <= morse.len());
        }
    }

    #[test]
    fn prop_unsupported_always_reported(text in "[A-Z#$%+=]{0,20}") {
        let codec = codec().unwrap();
        let encoded = codec.encode(&text).unwrap();
        let rejected = text.chars().filter(|c| "#$%+=".contains(*c)).count();
        prop_assert_eq!(encoded.issues.len(), rejected);
        prop_assert_eq!(encoded.translated + rejected, text.chars().count());
    }
}

#[test]
fn test_bijection_over_every_entry() {
    let table = table().unwrap();
    for c in SUPPORTED.chars() {
        let Some(Code::Letter(pattern)) = table.pattern_for(c) else {
            panic!("{:?} missing from table", c);
        };
        assert_eq!(table.character_for(&pattern.to_string()), Some(c));
        assert_eq!(table.character_for_pattern(pattern), Some(c));
    }
}

#[test]
fn test_pulse_units_match_sequence() {
    let codec = codec().unwrap();
    let encoded = codec.encode("PARIS").unwrap();

    // PARIS without the trailing word gap is 43 units
    let units: u32 = encoded.output.pulses().map(|p| p.units).sum();
    assert_eq!(units, 43);
    assert_eq!(encoded.output.duration_units(), 43);
}
