#![no_main]

use invoicepro::render::{Align, DrawOp, FontWeight, RenderedDocument, Rgb};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let document = RenderedDocument {
        title: text.to_string(),
        page_width: 210.0,
        page_height: 297.0,
        ops: vec![DrawOp::Text {
            text: text.to_string(),
            x: 20.0,
            y: 20.0,
            size: 10.0,
            weight: FontWeight::Normal,
            color: Rgb::BLACK,
            align: Align::Right,
        }],
    };
    let bytes = invoicepro::pdf::to_pdf(&document).unwrap();
    assert!(lopdf::Document::load_mem(&bytes).is_ok());
});
