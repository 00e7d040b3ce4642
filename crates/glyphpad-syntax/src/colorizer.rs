//! Incremental, batched colorization of a [`GlyphBuffer`].
//!
//! ## How a batch works
//!
//! 1. Take at most `batch_lines` lines off the front of the buffer's dirty
//!    range.
//! 2. Reset their glyphs to the default class.
//! 3. Join the batch into flat text and hand it to the tokenizer.
//! 4. Paint each token's class onto the glyphs it covers. Token
//!    coordinates are relative to the batch, so the batch start is added.
//!
//! The host calls [`Colorizer::colorize`] once per frame; a large paste
//! is then recolored over several frames instead of stalling one.

use std::fmt;
use std::ops::Range;

use glyphpad_buffer::{ColorClass, GlyphBuffer};
use tracing::debug;

use crate::lexer::FxLexer;
use crate::table::HighlightTable;
use crate::token::{Token, TokenKind, Tokenizer};

/// Lines recolored per call by default.
pub const DEFAULT_BATCH_LINES: usize = 1000;

/// Stands in for non-ASCII bytes when the batch is not valid UTF-8, keeping
/// one byte per glyph.
const SUBSTITUTE: char = '\u{1a}';

/// Drives a tokenizer over a buffer's dirty lines.
pub struct Colorizer {
    tokenizer: Box<dyn Tokenizer>,
    table: HighlightTable,
    batch_lines: usize,
}

impl Colorizer {
    /// Creates a colorizer with the FX highlight table.
    pub fn new(tokenizer: impl Tokenizer + 'static) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            table: HighlightTable::fx(),
            batch_lines: DEFAULT_BATCH_LINES,
        }
    }

    /// The built-in ReShade FX colorizer.
    pub fn fx() -> Self {
        Self::new(FxLexer::new())
    }

    pub fn with_table(mut self, table: HighlightTable) -> Self {
        self.table = table;
        self
    }

    /// Sets the batch size; at least one line.
    pub fn with_batch_lines(mut self, lines: usize) -> Self {
        self.batch_lines = lines.max(1);
        self
    }

    pub fn table(&self) -> &HighlightTable {
        &self.table
    }

    pub fn batch_lines(&self) -> usize {
        self.batch_lines
    }

    /// Recolors the next batch of dirty lines.
    ///
    /// Returns the lines processed, or `None` when nothing was pending.
    pub fn colorize(&self, buffer: &mut GlyphBuffer) -> Option<Range<usize>> {
        let batch = buffer.take_dirty_batch(self.batch_lines)?;
        if batch.is_empty() {
            return Some(batch);
        }

        buffer.reset_classes(batch.clone());
        let source = batch_source(buffer, &batch);
        let tokens = self.tokenizer.tokenize(&source);

        // Line (batch-relative) of a directive that names a macro
        let mut macro_directive: Option<usize> = None;

        for token in &tokens {
            let literal = token.literal(&source);
            let class = match macro_directive.take() {
                Some(line) if line == token.line && token.kind == TokenKind::Identifier => {
                    ColorClass::PreprocessorIdentifier
                }
                _ => self.table.class_for(token.kind, literal),
            };
            if let TokenKind::Directive(directive) = token.kind {
                if directive.names_macro() {
                    macro_directive = Some(token.line);
                }
            }

            paint(buffer, &batch, token, class);
        }

        debug!(
            begin = batch.start,
            end = batch.end,
            tokens = tokens.len(),
            "colorized batch"
        );
        Some(batch)
    }

    /// Drains the dirty range batch by batch. Returns the number of batches.
    pub fn colorize_all(&self, buffer: &mut GlyphBuffer) -> usize {
        let mut batches = 0;
        while self.colorize(buffer).is_some() {
            batches += 1;
        }
        batches
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::fx()
    }
}

impl fmt::Debug for Colorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colorizer")
            .field("table", &self.table)
            .field("batch_lines", &self.batch_lines)
            .finish_non_exhaustive()
    }
}

/// Joins the batch lines with `'\n'`.
fn batch_source(buffer: &GlyphBuffer, batch: &Range<usize>) -> String {
    let mut bytes = Vec::new();
    for (i, line) in batch.clone().enumerate() {
        if i > 0 {
            bytes.push(b'\n');
        }
        if let Some(glyphs) = buffer.line(line) {
            bytes.extend(glyphs.iter().map(|g| g.ch));
        }
    }

    String::from_utf8(bytes).unwrap_or_else(|err| {
        err.into_bytes()
            .into_iter()
            .map(|b| if b.is_ascii() { char::from(b) } else { SUBSTITUTE })
            .collect()
    })
}

/// Writes `class` over the glyphs a token covers.
///
/// Directive spans are widened one column left to cover the `#` the
/// tokenizer leaves out. A span running past the end of its line continues
/// at column 0 of the next; the line break uses up one unit of length.
fn paint(buffer: &mut GlyphBuffer, batch: &Range<usize>, token: &Token, class: ColorClass) {
    let mut line = batch.start + token.line.saturating_sub(1);
    let mut column = token.column.saturating_sub(1);
    let mut remaining = token.length;

    if token.kind.is_directive() && column > 0 {
        column -= 1;
        remaining += 1;
    }

    while remaining > 0 && line < batch.end {
        if column < buffer.line_len(line) {
            buffer.set_class(line, column, class);
            column += 1;
        } else {
            line += 1;
            column = 0;
        }
        remaining -= 1;
    }
}
