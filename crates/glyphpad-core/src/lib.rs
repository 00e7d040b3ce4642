//! # Glyphpad Core
//!
//! The editing session that sits between a host (renderer, input decoder)
//! and the document model.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                    Editor                     │
//! │  cursor · anchors · selection · tab/overwrite │
//! │        │                 │                    │
//! │  ┌─────┴───────┐   ┌─────┴──────┐  ┌─────────┐│
//! │  │ GlyphBuffer │◄──│ Colorizer  │  │Clipboard││
//! │  └─────────────┘   └────────────┘  └─────────┘│
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Intents come in as method calls (`move_left`, `insert_character`, ...),
//! mutate the buffer and mark lines dirty; the host then calls
//! `colorize` once per frame and renders from `buffer()`.
//!
//! ## Learning: Module Organization
//!
//! - `mod foo;` looks for `foo.rs` or `foo/mod.rs`
//! - One type's `impl` blocks can be spread over several files, as
//!   `editor/` does for navigation and editing
//! - `pub use` re-exports items for cleaner public APIs

pub mod clipboard;
pub mod config;
pub mod editor;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use config::{Config, ConfigError, EditorConfig};
pub use editor::Editor;

pub use glyphpad_buffer::{ColorClass, Position, Selection, SelectionMode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_session() {
        let mut editor = Editor::with_config(Config::default().editor);
        editor.insert_text("float4 main()\n{\n    return 0;\n}");
        editor.colorize_all();

        assert_eq!(editor.buffer().line_count(), 4);
        assert_eq!(editor.buffer().class_at(0, 0), Some(ColorClass::Keyword));
        assert_eq!(editor.buffer().class_at(2, 4), Some(ColorClass::Keyword));
        assert!(editor.buffer().dirty().is_empty());

        editor.move_up(1, false);
        editor.move_end(false);
        editor.insert_character(b'\n', false);
        assert_eq!(editor.current_line_text(), "    ");
    }
}
