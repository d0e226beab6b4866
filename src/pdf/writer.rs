use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use super::encoding::win_ansi;
use crate::core::InvoiceError;
use crate::render::{Align, DrawOp, FontWeight, RenderedDocument, Rgb, text_width};

const MM_TO_PT: f32 = 72.0 / 25.4;
const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Write a rendered document as a one-page PDF.
pub fn to_pdf(document: &RenderedDocument) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(builtin_font("Helvetica"));
    let bold_id = doc.add_object(builtin_font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => Object::Reference(regular_id),
            BOLD_FONT => Object::Reference(bold_id),
        },
    });

    let content = Content {
        operations: page_operations(document),
    };
    let content_bytes = content
        .encode()
        .map_err(|e| InvoiceError::Pdf(format!("failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(document.page_width * MM_TO_PT),
        Object::Real(document.page_height * MM_TO_PT),
    ];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => media_box,
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(win_ansi(&document.title), StringFormat::Literal),
        "Producer" => Object::string_literal("invoicepro"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Pdf(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn builtin_font(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(document: &RenderedDocument) -> Vec<Operation> {
    let height = document.page_height;
    let mut ops = Vec::new();

    for op in &document.ops {
        match op {
            DrawOp::FilledRect {
                x,
                y,
                width,
                height: h,
                color,
            } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![
                        pt(*x),
                        pt(height - y - h),
                        pt(*width),
                        pt(*h),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Text {
                text,
                x,
                y,
                size,
                weight,
                color,
                align,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Right => x - text_width(text, *size, *weight),
                };
                push_text(&mut ops, text, left, height - y, *size, *weight, *color);
            }
            DrawOp::TextBlock {
                lines,
                x,
                y,
                size,
                weight,
                color,
                line_height,
            } => {
                for (i, line) in lines.iter().enumerate() {
                    let baseline = y + i as f32 * line_height;
                    push_text(&mut ops, line, *x, height - baseline, *size, *weight, *color);
                }
            }
        }
    }

    ops
}

fn push_text(
    ops: &mut Vec<Operation>,
    text: &str,
    x_mm: f32,
    y_mm_from_bottom: f32,
    size: f32,
    weight: FontWeight,
    color: Rgb,
) {
    if text.is_empty() {
        return;
    }
    let font = match weight {
        FontWeight::Normal => REGULAR_FONT,
        FontWeight::Bold => BOLD_FONT,
    };
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
    ));
    ops.push(fill_color(color));
    ops.push(Operation::new("Td", vec![pt(x_mm), pt(y_mm_from_bottom)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn fill_color(color: Rgb) -> Operation {
    let channel = |c: u8| Object::Real(f32::from(c) / 255.0);
    Operation::new("rg", vec![channel(color.0), channel(color.1), channel(color.2)])
}

fn pt(mm: f32) -> Object {
    Object::Real(mm * MM_TO_PT)
}
