//! Terminal output for a colorized buffer.
//!
//! Color classes are semantic; the ANSI codes below are this front end's
//! palette and nothing else in the workspace depends on them.

use std::fmt::Write;

use glyphpad_buffer::{ColorClass, Glyph, GlyphBuffer};

const RESET: &str = "\x1b[0m";

/// ANSI SGR code for a class.
fn ansi_color(class: ColorClass) -> &'static str {
    match class {
        ColorClass::Default => "",
        ColorClass::Keyword => "\x1b[38;5;75m",
        ColorClass::NumberLiteral => "\x1b[38;5;114m",
        ColorClass::StringLiteral | ColorClass::CharLiteral => "\x1b[38;5;173m",
        ColorClass::Punctuation => "\x1b[38;5;250m",
        ColorClass::Preprocessor => "\x1b[38;5;140m",
        ColorClass::Identifier => "\x1b[38;5;255m",
        ColorClass::KnownIdentifier => "\x1b[38;5;79m",
        ColorClass::PreprocessorIdentifier => "\x1b[38;5;176m",
        ColorClass::Comment | ColorClass::MultilineComment => "\x1b[38;5;65m",
    }
}

/// Splits a line into runs of glyphs sharing a class.
fn runs(line: &[Glyph]) -> impl Iterator<Item = (usize, &[Glyph])> {
    let mut start = 0;
    std::iter::from_fn(move || {
        let first = line.get(start)?;
        let len = line[start..]
            .iter()
            .take_while(|g| g.class == first.class)
            .count();
        let run = (start, &line[start..start + len]);
        start += len;
        Some(run)
    })
}

/// Appends a run's text, expanding tabs to `tab_size` spaces.
fn push_text(out: &mut String, glyphs: &[Glyph], tab_size: usize) {
    let bytes: Vec<u8> = glyphs.iter().map(|g| g.ch).collect();
    for ch in String::from_utf8_lossy(&bytes).chars() {
        if ch == '\t' {
            out.extend(std::iter::repeat_n(' ', tab_size));
        } else {
            out.push(ch);
        }
    }
}

/// Renders the buffer with ANSI colors, one terminal line per line.
pub fn highlighted(buffer: &GlyphBuffer, tab_size: usize) -> String {
    let mut out = String::new();
    for line in buffer.lines() {
        for (_, run) in runs(line) {
            let color = ansi_color(run[0].class);
            out.push_str(color);
            push_text(&mut out, run, tab_size);
            if !color.is_empty() {
                out.push_str(RESET);
            }
        }
        out.push('\n');
    }
    out
}

/// Lists every non-default run as `line:column-column class "text"`,
/// 1-based, plus any error markers.
pub fn class_dump(buffer: &GlyphBuffer) -> String {
    let mut out = String::new();
    for (index, line) in buffer.lines().enumerate() {
        for (start, run) in runs(line) {
            let class = run[0].class;
            if class == ColorClass::Default {
                continue;
            }
            let mut text = String::new();
            push_text(&mut text, run, 1);
            let _ = writeln!(
                out,
                "{}:{}-{} {} {:?}",
                index + 1,
                start + 1,
                start + run.len(),
                class.theme_key(),
                text
            );
        }
    }
    for (line, message) in buffer.errors().iter() {
        let _ = writeln!(out, "{} error {:?}", line, message);
    }
    out
}
