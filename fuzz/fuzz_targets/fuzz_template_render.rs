#![no_main]

use coded_errors::template::{render, Template};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First line is the template, the remaining lines are arguments.
    let mut lines = text.split('\n');
    let template = lines.next().unwrap_or_default();
    let args: Vec<&str> = lines.take(16).collect();
    let displays: Vec<&dyn std::fmt::Display> =
        args.iter().map(|a| a as &dyn std::fmt::Display).collect();

    let parsed = Template::parse(template);
    let _ = parsed.placeholders();
    let rendered = render(template, &displays);

    assert!(std::str::from_utf8(rendered.as_bytes()).is_ok());
    if displays.is_empty() && !template.contains(['{', '}']) {
        assert_eq!(rendered, template);
    }
});
