//! Glyphs and their semantic color classes.
//!
//! A color class is what a glyph *is* (keyword, comment, ...), not how it
//! looks. Mapping classes to RGBA values is left to whoever renders.

use serde::{Deserialize, Serialize};

/// Semantic category assigned to a glyph by the colorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    #[default]
    Default,
    Keyword,
    NumberLiteral,
    StringLiteral,
    CharLiteral,
    Punctuation,
    Preprocessor,
    Identifier,
    KnownIdentifier,
    PreprocessorIdentifier,
    Comment,
    MultilineComment,
}

impl ColorClass {
    /// Every class, in palette order.
    pub const ALL: [ColorClass; 12] = [
        ColorClass::Default,
        ColorClass::Keyword,
        ColorClass::NumberLiteral,
        ColorClass::StringLiteral,
        ColorClass::CharLiteral,
        ColorClass::Punctuation,
        ColorClass::Preprocessor,
        ColorClass::Identifier,
        ColorClass::KnownIdentifier,
        ColorClass::PreprocessorIdentifier,
        ColorClass::Comment,
        ColorClass::MultilineComment,
    ];

    /// Returns the theme key for this class.
    pub fn theme_key(&self) -> &'static str {
        match self {
            ColorClass::Default => "default",
            ColorClass::Keyword => "keyword",
            ColorClass::NumberLiteral => "number_literal",
            ColorClass::StringLiteral => "string_literal",
            ColorClass::CharLiteral => "char_literal",
            ColorClass::Punctuation => "punctuation",
            ColorClass::Preprocessor => "preprocessor",
            ColorClass::Identifier => "identifier",
            ColorClass::KnownIdentifier => "known_identifier",
            ColorClass::PreprocessorIdentifier => "preprocessor_identifier",
            ColorClass::Comment => "comment",
            ColorClass::MultilineComment => "multiline_comment",
        }
    }
}

/// One character of a line plus its resolved color class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Glyph {
    pub ch: u8,
    pub class: ColorClass,
}

impl Glyph {
    /// Creates a glyph with the default color class.
    pub const fn new(ch: u8) -> Self {
        Self {
            ch,
            class: ColorClass::Default,
        }
    }

    /// Returns true for spaces and tabs.
    pub fn is_blank(&self) -> bool {
        self.ch == b' ' || self.ch == b'\t'
    }
}

/// A line of glyphs. Never contains a newline.
pub type Line = Vec<Glyph>;

/// Builds a line of default-colored glyphs from raw bytes.
pub fn line_from_bytes(bytes: &[u8]) -> Line {
    bytes.iter().copied().map(Glyph::new).collect()
}

/// Collects the characters of a glyph slice back into bytes.
pub fn glyph_bytes(glyphs: &[Glyph]) -> impl Iterator<Item = u8> + '_ {
    glyphs.iter().map(|g| g.ch)
}
