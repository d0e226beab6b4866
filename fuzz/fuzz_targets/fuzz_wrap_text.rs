#![no_main]

use invoicepro::render::{FontWeight, wrap_text};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, u8)| {
    let (text, width) = data;
    let max_width = f32::from(width.max(1));
    let lines = wrap_text(text, max_width, 10.0, FontWeight::Normal);
    assert!(!lines.is_empty());
});
