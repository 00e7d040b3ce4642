//! The token-kind → color-class table.
//!
//! ## Learning: Data over control flow
//!
//! Instead of a `match` buried in the colorizer, the mapping is a plain
//! `HashMap` built once. Supporting another grammar means building another
//! table, not editing the colorizer.

use std::collections::{HashMap, HashSet};

use glyphpad_buffer::ColorClass;

use crate::token::{Directive, TokenKind};

/// Builtin names highlighted as known identifiers in FX source.
const FX_KNOWN_IDENTIFIERS: &[&str] = &[
    "Width", "Height", "Format", "MipLevels", "Texture", "MinFilter",
    "MagFilter", "MipFilter", "MipLODBias", "MaxMipLevel", "abs", "tex2D",
    "tex2Dlod", "tex2Dfetch",
];

/// Maps token kinds (and identifier literals) to color classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTable {
    classes: HashMap<TokenKind, ColorClass>,
    known_identifiers: HashSet<String>,
}

impl HighlightTable {
    /// An empty table; every token resolves to [`ColorClass::Default`].
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
            known_identifiers: HashSet::new(),
        }
    }

    /// The table for ReShade FX.
    pub fn fx() -> Self {
        let mut table = Self::empty()
            .with(TokenKind::Identifier, ColorClass::Identifier)
            .with(TokenKind::IntLiteral, ColorClass::NumberLiteral)
            .with(TokenKind::UintLiteral, ColorClass::NumberLiteral)
            .with(TokenKind::FloatLiteral, ColorClass::NumberLiteral)
            .with(TokenKind::DoubleLiteral, ColorClass::NumberLiteral)
            .with(TokenKind::StringLiteral, ColorClass::StringLiteral)
            .with(TokenKind::CharLiteral, ColorClass::CharLiteral)
            .with(TokenKind::TrueLiteral, ColorClass::Keyword)
            .with(TokenKind::FalseLiteral, ColorClass::Keyword)
            .with(TokenKind::Keyword, ColorClass::Keyword)
            .with(TokenKind::TypeName, ColorClass::Keyword)
            .with(TokenKind::Punctuation, ColorClass::Punctuation)
            .with(TokenKind::Operator, ColorClass::Punctuation)
            .with(TokenKind::SingleLineComment, ColorClass::Comment)
            .with(TokenKind::MultiLineComment, ColorClass::MultilineComment)
            .with_known_identifiers(FX_KNOWN_IDENTIFIERS.iter().copied());

        for directive in Directive::ALL {
            table.set(TokenKind::Directive(directive), ColorClass::Preprocessor);
        }
        table
    }

    /// Adds or replaces a mapping, builder style.
    pub fn with(mut self, kind: TokenKind, class: ColorClass) -> Self {
        self.set(kind, class);
        self
    }

    pub fn set(&mut self, kind: TokenKind, class: ColorClass) {
        self.classes.insert(kind, class);
    }

    /// Adds names that identifiers are highlighted as known identifiers for.
    pub fn with_known_identifiers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_identifiers.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_known_identifier(&self, name: &str) -> bool {
        self.known_identifiers.contains(name)
    }

    /// Resolves the class for a token of `kind` whose text is `literal`.
    ///
    /// Identifiers found in the known set become
    /// [`ColorClass::KnownIdentifier`]. Unmapped kinds are `Default`.
    pub fn class_for(&self, kind: TokenKind, literal: &str) -> ColorClass {
        if kind == TokenKind::Identifier && self.is_known_identifier(literal) {
            return ColorClass::KnownIdentifier;
        }
        self.classes.get(&kind).copied().unwrap_or_default()
    }
}

impl Default for HighlightTable {
    fn default() -> Self {
        Self::fx()
    }
}
