#![no_main]

use coded_errors::{CallSite, CodedError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let code = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let text = String::from_utf8_lossy(&data[4..]).into_owned();
    let mut mid = text.len() / 2;
    while !text.is_char_boundary(mid) {
        mid -= 1;
    }
    let (message, suffix) = text.split_at(mid);
    let suffix = suffix.to_owned();

    let err = CodedError::at(Some(CallSite::new("fuzz.rs", Some("target"), 1)), code, message)
        .append_msg(&suffix, &[&code])
        .wrap(CodedError::at(None, code.wrapping_add(1), suffix.clone()))
        .with_data(suffix);

    let rendered = err.to_string();
    assert!(rendered.starts_with("file=fuzz.rs:target:1, "));

    let mut line = String::new();
    err.record().write_to(&mut line).unwrap();
    assert_eq!(err.code(), code);
});
