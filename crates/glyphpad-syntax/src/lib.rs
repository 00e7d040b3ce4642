//! # Glyphpad Syntax
//!
//! Turns text into color classes: a [`Tokenizer`] interface, a built-in
//! lexer for the ReShade FX shader language, the [`HighlightTable`] that maps
//! token kinds to classes, and the incremental [`Colorizer`].
//!
//! ## Learning: Trait objects
//!
//! The colorizer never knows which lexer it runs. It holds a
//! `Box<dyn Tokenizer>`, so any grammar can be plugged in at runtime:
//! - `dyn Tokenizer` is dispatched through a vtable
//! - `Box` gives the unsized trait object a fixed-size owner
//! - The trait has no generic methods, which keeps it object-safe

mod colorizer;
mod lexer;
mod table;
mod token;

pub use colorizer::{Colorizer, DEFAULT_BATCH_LINES};
pub use lexer::FxLexer;
pub use table::HighlightTable;
pub use token::{Directive, Token, TokenKind, Tokenizer};

/// Errors that can occur when selecting a language.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

/// Returns a tokenizer for a language name or file extension.
pub fn tokenizer_for(lang: &str) -> Result<Box<dyn Tokenizer>, SyntaxError> {
    match lang.to_ascii_lowercase().as_str() {
        "fx" | "fxh" | "reshade" | "hlsl" => Ok(Box::new(FxLexer::new())),
        _ => Err(SyntaxError::UnknownLanguage(lang.to_string())),
    }
}

/// Returns supported language names.
pub fn supported_languages() -> &'static [&'static str] {
    &["fx", "fxh", "reshade", "hlsl"]
}

impl Colorizer {
    /// Creates a colorizer for a language name or file extension.
    pub fn for_language(lang: &str) -> Result<Self, SyntaxError> {
        let tokenizer = tokenizer_for(lang)?;
        Ok(Self::new(tokenizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpad_buffer::{ColorClass, GlyphBuffer};
    use proptest::prelude::*;

    #[test]
    fn test_language_lookup() {
        assert!(tokenizer_for("fx").is_ok());
        assert!(tokenizer_for("HLSL").is_ok());
        assert!(Colorizer::for_language("fxh").is_ok());
    }

    #[test]
    fn test_unknown_language() {
        let result = Colorizer::for_language("cobol");
        assert!(matches!(result, Err(SyntaxError::UnknownLanguage(name)) if name == "cobol"));
    }

    #[test]
    fn test_shader_snippet() {
        let source = "texture2D Tex { Width = 256; };\nfloat4 main() : SV_Target { return tex2D(s, uv); }";
        let mut buffer = GlyphBuffer::from(source);
        Colorizer::fx().colorize_all(&mut buffer);

        assert_eq!(buffer.class_at(0, 0), Some(ColorClass::Keyword));
        assert_eq!(buffer.class_at(0, 10), Some(ColorClass::Identifier));
        assert_eq!(buffer.class_at(0, 16), Some(ColorClass::KnownIdentifier));
        let tex2d = buffer.line_text(1).find("tex2D").unwrap_or(0);
        assert_eq!(buffer.class_at(1, tex2d), Some(ColorClass::KnownIdentifier));
    }

    fn snapshot(buffer: &GlyphBuffer) -> Vec<Vec<ColorClass>> {
        buffer
            .lines()
            .map(|line| line.iter().map(|g| g.class).collect())
            .collect()
    }

    proptest! {
        #[test]
        fn prop_recolor_is_idempotent(text in "[a-z0-9 #/*\"'.;(){}=+\n-]{0,200}") {
            let colorizer = Colorizer::fx().with_batch_lines(3);
            let mut buffer = GlyphBuffer::from(text.as_str());
            colorizer.colorize_all(&mut buffer);
            let first = snapshot(&buffer);

            buffer.mark_all_dirty();
            colorizer.colorize_all(&mut buffer);
            prop_assert_eq!(first, snapshot(&buffer));
            prop_assert!(buffer.dirty().is_empty());
        }

        #[test]
        fn prop_tokenizer_spans_stay_in_bounds(text in "\\PC{0,120}") {
            for token in FxLexer.tokenize(&text) {
                prop_assert!(token.offset + token.length <= text.len());
            }
        }
    }
}
