// Host smoke run over the codec and station

use std::error::Error;

use morse_core::{Codec, Outcome, Station, SymbolTable, TimingConfig};

fn main() -> Result<(), Box<dyn Error>> {
    println!("🧪 Morse Codec Smoke Run");

    let table = SymbolTable::standard()?;
    println!("📖 Symbol table: {} entries", table.len());

    // Test 1: Round trip
    test_round_trip(Codec::new(table))?;

    // Test 2: Station protocol
    test_station(table);

    println!("✅ All smoke checks passed!");
    println!();
    println!("📝 Run the full suite with: cargo test");
    Ok(())
}

/// Encode and decode a few classic messages
fn test_round_trip(codec: Codec<'_>) -> Result<(), Box<dyn Error>> {
    println!("📡 Testing Round Trip...");

    for message in ["SOS", "CQ CQ DE", "PARIS", "HELLO WORLD"] {
        let encoded = codec.encode(message)?;
        let wire = encoded.output.to_string();
        let decoded = codec.decode(&wire)?;

        assert_eq!(decoded.outcome(), Outcome::Complete);
        assert_eq!(decoded.output.as_str(), message);
        println!("  {:<12} {}", message, wire);
    }

    println!("  ✅ Round trip working");
    Ok(())
}

/// Drive the station with protocol lines
fn test_station(table: &SymbolTable) {
    println!("⚙️ Testing Station Protocol...");

    let mut station = Station::new(table, TimingConfig::default());
    for line in ["TIMINGS", "WPM 25", "73", "LAST", "STOP", "RESET"] {
        println!("  > {:<8} {}", line, station.handle(line));
    }

    println!("  ✅ Station protocol working");
}
