//! Lexer for the ReShade FX shader language.
//!
//! A hand-written byte scanner: the language is C-like, tokens never
//! depend on parse state, and every byte is one column. Whitespace is
//! skipped; everything else becomes a token, so the colorizer can cover
//! the whole text.

use crate::token::{Directive, Token, TokenKind, Tokenizer};

const KEYWORDS: &[&str] = &[
    "namespace", "struct", "technique", "pass", "for", "while", "do", "if",
    "else", "switch", "case", "default", "break", "continue", "return",
    "discard", "extern", "static", "uniform", "volatile", "precise", "in",
    "out", "inout", "const", "linear", "noperspective", "centroid",
    "nointerpolation",
];

const TYPE_NAMES: &[&str] = &[
    "void", "bool", "bool2", "bool3", "bool4", "bool2x2", "bool3x3", "bool4x4",
    "int", "int2", "int3", "int4", "int2x2", "int3x3", "int4x4",
    "uint", "uint2", "uint3", "uint4", "uint2x2", "uint3x3", "uint4x4",
    "float", "float2", "float3", "float4", "float2x2", "float3x3", "float4x4",
    "vector", "matrix", "string", "texture", "texture1D", "texture2D",
    "texture3D", "sampler", "sampler1D", "sampler2D", "sampler3D",
];

/// Multi-byte operators, longest first.
const COMPOUND_OPERATORS: &[&str] = &[
    "<<=", ">>=", "...", "::", "->", "<<", ">>", "<=", ">=", "==", "!=",
    "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
];

/// Tokenizer for ReShade FX / HLSL-flavored source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FxLexer;

impl FxLexer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for FxLexer {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        Scanner::new(source.as_bytes()).run()
    }
}

/// Scanning state over one input.
struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) {
        if let Some(byte) = self.peek(0) {
            self.pos += 1;
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn bump_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek(0).is_some_and(&pred) {
            self.bump();
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(byte) = self.peek(0) {
            if byte.is_ascii_whitespace() {
                self.bump();
                continue;
            }

            // The `#` of a directive is not part of its token.
            if byte == b'#' {
                self.bump();
            }
            let (start, line, column) = (self.pos, self.line, self.column);
            let kind = if byte == b'#' {
                self.scan_directive()
            } else {
                self.scan_token(byte)
            };
            self.tokens.push(Token {
                kind,
                line,
                column,
                offset: start,
                length: self.pos - start,
            });
        }
        self.tokens
    }

    fn scan_token(&mut self, byte: u8) -> TokenKind {
        match byte {
            b'/' if self.peek(1) == Some(b'/') => {
                self.bump_while(|b| b != b'\n');
                TokenKind::SingleLineComment
            }
            b'/' if self.peek(1) == Some(b'*') => {
                self.bump();
                self.bump();
                while let Some(b) = self.peek(0) {
                    if b == b'*' && self.peek(1) == Some(b'/') {
                        self.bump();
                        self.bump();
                        break;
                    }
                    self.bump();
                }
                TokenKind::MultiLineComment
            }
            b'"' => {
                self.scan_quoted(b'"');
                TokenKind::StringLiteral
            }
            b'\'' => {
                self.scan_quoted(b'\'');
                TokenKind::CharLiteral
            }
            b if b.is_ascii_digit() => self.scan_number(),
            b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => self.scan_number(),
            b if is_ident_start(b) => self.scan_word(),
            _ => self.scan_symbol(),
        }
    }

    /// Scans the name after a `#`. A bare `#` yields an empty
    /// unknown directive positioned just past it.
    fn scan_directive(&mut self) -> TokenKind {
        let start = self.pos;
        self.bump_while(is_ident_continue);
        let name = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("");
        TokenKind::Directive(Directive::from_name(name))
    }

    fn scan_quoted(&mut self, quote: u8) {
        self.bump();
        while let Some(b) = self.peek(0) {
            match b {
                b'\n' => break,
                b'\\' => {
                    self.bump();
                    if self.peek(0) != Some(b'\n') {
                        self.bump();
                    }
                }
                _ if b == quote => {
                    self.bump();
                    break;
                }
                _ => self.bump(),
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        if self.peek(0) == Some(b'0') && matches!(self.peek(1), Some(b'x' | b'X')) {
            self.bump();
            self.bump();
            self.bump_while(|b| b.is_ascii_hexdigit());
            return self.integer_suffix();
        }

        let mut is_float = false;
        self.bump_while(|b| b.is_ascii_digit());
        if self.peek(0) == Some(b'.') {
            is_float = true;
            self.bump();
            self.bump_while(|b| b.is_ascii_digit());
        }
        if matches!(self.peek(0), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek(1), Some(b'+' | b'-')));
            if self.peek(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                for _ in 0..=sign {
                    self.bump();
                }
                self.bump_while(|b| b.is_ascii_digit());
            }
        }

        match self.peek(0) {
            Some(b'f' | b'F' | b'h' | b'H') => {
                self.bump();
                TokenKind::FloatLiteral
            }
            Some(b'l' | b'L') => {
                self.bump();
                if matches!(self.peek(0), Some(b'f' | b'F')) {
                    self.bump();
                }
                TokenKind::DoubleLiteral
            }
            _ if is_float => TokenKind::FloatLiteral,
            _ => self.integer_suffix(),
        }
    }

    fn integer_suffix(&mut self) -> TokenKind {
        if matches!(self.peek(0), Some(b'u' | b'U')) {
            self.bump();
            TokenKind::UintLiteral
        } else {
            TokenKind::IntLiteral
        }
    }

    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        self.bump_while(is_ident_continue);
        let word = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("");
        match word {
            "true" => TokenKind::TrueLiteral,
            "false" => TokenKind::FalseLiteral,
            w if KEYWORDS.contains(&w) => TokenKind::Keyword,
            w if TYPE_NAMES.contains(&w) => TokenKind::TypeName,
            _ => TokenKind::Identifier,
        }
    }

    fn scan_symbol(&mut self) -> TokenKind {
        let rest = &self.src[self.pos..];
        if let Some(op) = COMPOUND_OPERATORS.iter().find(|op| rest.starts_with(op.as_bytes())) {
            for _ in 0..op.len() {
                self.bump();
            }
            return TokenKind::Operator;
        }

        let byte = rest[0];
        self.bump();
        match byte {
            b'(' | b')' | b'[' | b']' | b'{' | b'}' | b',' | b';' | b'.' | b':' | b'?'
            | b'\\' => TokenKind::Punctuation,
            b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'<' | b'>' | b'!' | b'&' | b'|'
            | b'^' | b'~' => TokenKind::Operator,
            _ => TokenKind::Unknown,
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
