use coded_errors::{coded_err, CodedError, ErrorRecord};
use std::io;

/// Minimal stand-in for a structured logger.
fn emit(record: &ErrorRecord<'_>) {
    println!("   level=error code={}", record.code());
    println!("   message={:?}", record.message());
    if let (Some(file), Some(line)) = (record.file(), record.line()) {
        println!("   location={}:{}", file, line);
    }
    if let Some(function) = record.function() {
        println!("   function={}", function);
    }
    if let Some(cause) = record.cause() {
        println!("   cause={:?}", cause.to_string());
    }
    if let Some(data) = record.data() {
        println!("   data={}", data);
    }
}

fn charge(card: &str, cents: u64) -> Result<(), CodedError> {
    let gateway = io::Error::new(io::ErrorKind::ConnectionReset, "gateway reset");
    Err(coded_err!(10_100, "charge of {} cents declined", cents)
        .wrap(gateway)
        .with_data(serde_json::json!({"card_suffix": &card[card.len().saturating_sub(4)..]})))
}

fn main() {
    println!("--- Structured Logging Example ---\n");

    let err = charge("4111111111111111", 1999).unwrap_err();

    println!("1. [FIELD MAPPING]");
    err.with_record(emit);

    println!("\n2. [KEY=VALUE LINE]");
    let mut line = String::new();
    if err.record().write_to(&mut line).is_ok() {
        println!("   {}", line);
    }

    println!("\n3. [DEBUG]");
    println!("   {:?}", err);
}
