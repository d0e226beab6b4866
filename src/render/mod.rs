//! Invoice document layout.
//!
//! [`render_invoice`] turns an invoice, its client and the company profile
//! into an ordered list of [`DrawOp`]s describing one A4 page. Positions
//! are millimetres measured from the top-left corner. The list is what the
//! [`pdf`](crate::pdf) module rasterizes, and what a print preview draws.

mod format;
mod layout;
mod text;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use format::{format_money, format_number, round_cents};
pub use layout::render_invoice;
pub use text::{LINE_HEIGHT_FACTOR, PT_TO_MM, line_height, text_width, wrap_text};

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Horizontal anchor of a text run: `x` is its left or right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Right,
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    /// One line of text; `y` is the baseline.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: Align,
    },
    /// A filled rectangle; `(x, y)` is its top-left corner.
    FilledRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// Pre-wrapped, left-aligned lines; `y` is the first baseline.
    TextBlock {
        lines: Vec<String>,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        line_height: f32,
    },
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text {
                text,
                x,
                y,
                size,
                weight,
                color,
                align,
            } => write!(
                f,
                "text {x:.1},{y:.1} {size}pt {} {} {color} {text:?}",
                weight_name(*weight),
                align_name(*align),
            ),
            Self::FilledRect {
                x,
                y,
                width,
                height,
                color,
            } => write!(f, "rect {x:.1},{y:.1} {width:.1}x{height:.1} {color}"),
            Self::TextBlock {
                lines,
                x,
                y,
                size,
                weight,
                color,
                line_height,
            } => {
                write!(
                    f,
                    "block {x:.1},{y:.1} {size}pt {} lh={line_height:.2} {color}",
                    weight_name(*weight)
                )?;
                for line in lines {
                    write!(f, "\n  | {line}")?;
                }
                Ok(())
            }
        }
    }
}

fn weight_name(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Right => "right",
    }
}

/// Page geometry and styling of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page width in millimetres (A4: 210).
    pub page_width: f32,
    /// Page height in millimetres (A4: 297).
    pub page_height: f32,
    /// Left and right page margin in millimetres.
    pub margin: f32,
    /// Symbol placed before every amount.
    pub currency_symbol: String,
    /// Fill colour of the item table header band.
    pub header_color: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 20.0,
            currency_symbol: "$".into(),
            header_color: Rgb(100, 100, 255),
        }
    }
}

/// A laid-out one-page invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Document title (the invoice number).
    pub title: String,
    pub page_width: f32,
    pub page_height: f32,
    /// Draw operations, in painting order.
    pub ops: Vec<DrawOp>,
}

impl RenderedDocument {
    /// All text on the page in painting order, block lines included.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Text { text, .. } => out.push(text.as_str()),
                DrawOp::TextBlock { lines, .. } => out.extend(lines.iter().map(String::as_str)),
                DrawOp::FilledRect { .. } => {}
            }
        }
        out
    }

    /// The first text run whose text equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }

    /// The lowest point drawn on the page, in millimetres from the top:
    /// the last text baseline or the bottom edge of a rectangle.
    pub fn content_bottom(&self) -> f32 {
        self.ops
            .iter()
            .map(|op| match op {
                DrawOp::Text { y, .. } => *y,
                DrawOp::FilledRect { y, height, .. } => y + height,
                DrawOp::TextBlock {
                    lines,
                    y,
                    line_height,
                    ..
                } => y + lines.len().saturating_sub(1) as f32 * line_height,
            })
            .fold(0.0, f32::max)
    }

    /// True when content runs past the bottom edge of the page.
    pub fn overflows_page(&self) -> bool {
        self.content_bottom() > self.page_height
    }

    /// One line per draw operation, for previews and debugging.
    pub fn listing(&self) -> String {
        self.ops
            .iter()
            .map(|op| op.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
