use coded_errors::definitions::{TIMEOUT, UPSTREAM_FAILED};
use coded_errors::{chain, find_code, has_code, root_cause, CodedError, Result};
use std::io;

fn read_block(block: u64) -> io::Result<Vec<u8>> {
    Err(io::Error::new(
        io::ErrorKind::TimedOut,
        format!("block {} not ready", block),
    ))
}

fn fetch_object(key: &str) -> Result<Vec<u8>> {
    read_block(7).map_err(|e| TIMEOUT.to_error_with(&[&format!("fetch {}", key)]).wrap(e))
}

fn render_page(key: &str) -> Result<String> {
    let bytes = fetch_object(key).map_err(|e| {
        UPSTREAM_FAILED
            .to_error_with(&[&"object-store"])
            .wrap(e)
            .with_data(serde_json::json!({"key": key, "attempt": 1}))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn main() {
    println!("--- Error Chain Example ---\n");

    let err = render_page("avatars/42.png").unwrap_err();

    println!("1. [FLATTENED]");
    println!("   {}\n", err);

    println!("2. [LAYERS]");
    for (depth, layer) in chain::chain(&err).enumerate() {
        match layer.downcast_ref::<CodedError>() {
            Some(coded) => println!("   #{} code={} msg={}", depth, coded.code(), coded.message()),
            None => println!("   #{} foreign: {}", depth, layer),
        }
    }

    println!("\n3. [QUERIES]");
    println!("   timed out somewhere: {}", has_code(&err, TIMEOUT.code()));
    if let Some(timeout) = find_code(&err, TIMEOUT.code()) {
        println!("   timeout message:     {}", timeout.message());
    }
    println!("   root cause:          {}", root_cause(&err));
}
