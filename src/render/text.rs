//! Text measurement and wrapping with built-in Helvetica metrics.
//!
//! Widths come from the standard Helvetica and Helvetica-Bold AFM tables
//! (units of 1/1000 em). Characters outside the ASCII range are measured as
//! a digit.

use super::FontWeight;

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

fn glyph_width(c: char) -> u16 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | ']' | '\\' | 'I' | 'f' | 't' => 278,
        '\'' => 191,
        '"' => 355,
        '(' | ')' | '-' | 'r' | '`' => 333,
        '{' | '}' => 334,
        '*' => 389,
        '+' | '<' | '=' | '>' | '~' => 584,
        '%' => 889,
        '&' | 'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        '@' => 1015,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 722,
        'F' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'L' => 556,
        'M' | 'm' => 833,
        'W' => 944,
        'i' | 'j' | 'l' => 222,
        '|' => 260,
        '^' => 469,
        _ => 556,
    }
}

fn bold_glyph_width(c: char) -> u16 {
    match c {
        ' ' | ',' | '.' | '/' | '\\' | 'I' | 'i' | 'j' | 'l' => 278,
        '\'' => 238,
        '"' => 474,
        '!' | '(' | ')' | '-' | ':' | ';' | '[' | ']' | '`' | 'f' | 't' => 333,
        '*' | 'r' | '{' | '}' => 389,
        '+' | '<' | '=' | '>' | '^' | '~' => 584,
        '%' => 889,
        '@' => 975,
        '&' | 'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'F' | 'L' | 'T' | 'Z' | '?' | 'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 611,
        'G' | 'O' | 'Q' | 'w' => 778,
        'M' | 'm' => 889,
        'W' => 944,
        'z' => 500,
        '|' => 280,
        _ => 556,
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let glyph = match weight {
        FontWeight::Normal => glyph_width,
        FontWeight::Bold => bold_glyph_width,
    };
    let units: u32 = text.chars().map(|c| u32::from(glyph(c))).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Distance between baselines in millimetres at `size` points.
pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR * PT_TO_MM
}

/// Wrap `text` into lines no wider than `max_width` millimetres.
///
/// Explicit newlines start a new line. Words are kept whole unless a single
/// word is wider than the line, in which case it is broken between
/// characters.
pub fn wrap_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        wrap_paragraph(paragraph, max_width, size, weight, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f32,
    size: f32,
    weight: FontWeight,
    lines: &mut Vec<String>,
) {
    let fits = |s: &str| text_width(s, size, weight) <= max_width;
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current = word.to_string();
        } else {
            // Hard-break a word that cannot fit on a line of its own.
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && !fits(&next) {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }
    }

    lines.push(current);
}
