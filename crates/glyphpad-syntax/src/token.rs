//! Tokens as produced by a [`Tokenizer`].

/// Preprocessor directive names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Define,
    Undef,
    If,
    Ifdef,
    Ifndef,
    Else,
    Elif,
    Endif,
    Error,
    Warning,
    Pragma,
    Include,
    Unknown,
}

impl Directive {
    /// Every directive, for building lookup tables.
    pub const ALL: [Directive; 13] = [
        Directive::Define,
        Directive::Undef,
        Directive::If,
        Directive::Ifdef,
        Directive::Ifndef,
        Directive::Else,
        Directive::Elif,
        Directive::Endif,
        Directive::Error,
        Directive::Warning,
        Directive::Pragma,
        Directive::Include,
        Directive::Unknown,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "define" => Directive::Define,
            "undef" => Directive::Undef,
            "if" => Directive::If,
            "ifdef" => Directive::Ifdef,
            "ifndef" => Directive::Ifndef,
            "else" => Directive::Else,
            "elif" => Directive::Elif,
            "endif" => Directive::Endif,
            "error" => Directive::Error,
            "warning" => Directive::Warning,
            "pragma" => Directive::Pragma,
            "include" => Directive::Include,
            _ => Directive::Unknown,
        }
    }

    /// Directives whose first argument is a macro name.
    pub fn names_macro(&self) -> bool {
        matches!(
            self,
            Directive::Define | Directive::Undef | Directive::Ifdef | Directive::Ifndef
        )
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    IntLiteral,
    UintLiteral,
    FloatLiteral,
    DoubleLiteral,
    StringLiteral,
    CharLiteral,
    TrueLiteral,
    FalseLiteral,
    /// Control flow, storage and interpolation qualifiers, declarations
    Keyword,
    /// Built-in scalar, vector, matrix and object types
    TypeName,
    /// Brackets, separators
    Punctuation,
    /// Arithmetic, logical and assignment operators
    Operator,
    /// `#name`; the token span excludes the `#`
    Directive(Directive),
    SingleLineComment,
    MultiLineComment,
    /// Anything the lexer could not classify
    Unknown,
}

impl TokenKind {
    pub fn is_directive(&self) -> bool {
        matches!(self, TokenKind::Directive(_))
    }
}

/// A token span within the tokenized text.
///
/// `line` and `column` are 1-based and relative to the text handed to the
/// tokenizer. `offset` and `length` are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    /// The token's text within `source`, empty if out of range.
    pub fn literal<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.offset..self.offset + self.length).unwrap_or("")
    }
}

/// Turns flat text into an ordered sequence of tokens.
///
/// Implementations must never fail: input they cannot make sense of comes
/// back as [`TokenKind::Unknown`] or is skipped.
pub trait Tokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        (**self).tokenize(source)
    }
}
