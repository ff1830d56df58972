//! Minimal string-building HTML writer.
//!
//! Pages are built by appending to a single buffer in document order, which
//! keeps output deterministic: the same manifest tree and file-system
//! contents produce byte-identical pages. [`escape`] is the one escaping
//! function; the renderer applies it at every text-insertion point except
//! the see-also inline block, which is intentionally emitted verbatim.

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escape `&`, `<` and `>` to HTML entities.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Html
// ---------------------------------------------------------------------------

/// An HTML output buffer with deterministic push order.
#[derive(Debug)]
pub struct Html {
    buf: String,
}

impl Html {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(16 * 1024),
        }
    }

    /// Append raw markup.
    pub fn push(&mut self, markup: &str) {
        self.buf.push_str(markup);
    }

    /// Append text content, escaped.
    pub fn text(&mut self, text: &str) {
        self.buf.push_str(&escape(text));
    }

    /// Consume the buffer and return the document.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for Html {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// The fixed style block embedded in every page.
pub const STYLE: &str = "\
body { font-family: system-ui, sans-serif; line-height: 1.5; margin: 2em auto; max-width: 60em; color: #111; }\n\
h1 { border-bottom: 2px solid #ccc; padding-bottom: 0.3em; }\n\
table.props { border-collapse: collapse; margin: 1em 0; }\n\
table.props th { text-align: left; padding-right: 1em; font-weight: 600; }\n\
table.props td, table.props th { padding: 0.15em 0.5em; border-bottom: 1px solid #eee; }\n\
pre { background: #f6f6f6; border: 1px solid #ddd; padding: 0.5em; overflow-x: auto; }\n\
section.entry { border-top: 1px solid #ccc; margin-top: 2em; padding-top: 0.5em; }\n\
ul.tests li.approved a { color: #116611; }\n\
ul.tests li.proposed a { color: #666611; }\n\
ul.tests li.rejected a { color: #661111; text-decoration: line-through; }\n\
a.permalink { text-decoration: none; color: #999; }\n\
p.expect { font-weight: 600; }\n";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
