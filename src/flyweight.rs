//! Shared glyphs.
//!
//! A `GlyphFactory` hands out one `Glyph` per character and reuses it for
//! every later request. The font is extrinsic state supplied at render time.
//! The factory is an ordinary value: whoever owns it owns the cache.

use crate::core::{Record, Sink, SinkError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Intrinsic state of one rendered character.
#[derive(Debug, PartialEq, Eq)]
pub struct Glyph {
    symbol: char,
}

impl Glyph {
    pub fn render(&self, font: &str, sink: &dyn Sink) -> Result<(), SinkError> {
        sink.emit(Record::new(
            "Glyph",
            format!("Rendering character {} with font {}", self.symbol, font),
        ))
    }
}

#[derive(Debug, Default)]
pub struct GlyphFactory {
    glyphs: HashMap<char, Arc<Glyph>>,
}

impl GlyphFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared glyph for `symbol`, creating it on first use.
    pub fn glyph(&mut self, symbol: char) -> Arc<Glyph> {
        self.glyphs
            .entry(symbol)
            .or_insert_with(|| {
                trace!(%symbol, "Creating glyph");
                Arc::new(Glyph { symbol })
            })
            .clone()
    }

    /// Renders every character of `text` in `font`, reusing shared glyphs.
    pub fn render_text(&mut self, text: &str, font: &str, sink: &dyn Sink) -> Result<(), SinkError> {
        for symbol in text.chars() {
            self.glyph(symbol).render(font, sink)?;
        }
        Ok(())
    }

    /// Number of distinct glyphs created so far.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::MemorySink;

    #[test]
    fn test_same_symbol_shares_instance() {
        let mut factory = GlyphFactory::new();
        let a1 = factory.glyph('A');
        let a2 = factory.glyph('A');
        let b = factory.glyph('B');

        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_render_text_reuses_glyphs() {
        let sink = MemorySink::new();
        let mut factory = GlyphFactory::new();

        factory.render_text("AABBC", "Arial", &sink).unwrap();
        factory.render_text("AABBC", "Times New Roman", &sink).unwrap();

        assert_eq!(factory.len(), 3);
        let lines = sink.lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Rendering character A with font Arial");
        assert_eq!(lines[4], "Rendering character C with font Arial");
        assert_eq!(lines[5], "Rendering character A with font Times New Roman");
    }

    #[test]
    fn test_separate_factories_do_not_share() {
        let mut first = GlyphFactory::new();
        let mut second = GlyphFactory::new();
        assert!(!Arc::ptr_eq(&first.glyph('x'), &second.glyph('x')));
        assert!(GlyphFactory::new().is_empty());
    }
}
