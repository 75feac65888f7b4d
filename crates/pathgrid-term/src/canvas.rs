//! The [`Canvas`] a model draws into, and [`Frame`] diffs between canvases.

use pathgrid_core::{Bounds, Coord};

use crate::style::Style;

/// A styled character on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// A screen-sized buffer of [`Glyph`]s addressed by `(row, col)`.
#[derive(Clone, Debug)]
pub struct Canvas {
    bounds: Bounds,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        let bounds = Bounds::new(i32::from(height), i32::from(width));
        Self {
            bounds,
            glyphs: vec![Glyph::default(); bounds.len()],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Glyph at `p`; blank outside the canvas.
    pub fn at(&self, p: Coord) -> Glyph {
        self.bounds
            .index(p)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// No-op outside the canvas.
    pub fn set(&mut self, p: Coord, glyph: Glyph) {
        if let Some(i) = self.bounds.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` starting at `p`, clipped at the right edge. Returns the
    /// number of glyphs written.
    pub fn text(&mut self, p: Coord, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(0, i as i32);
            if !self.bounds.contains(q) {
                break;
            }
            self.set(q, Glyph::new(ch, style));
            written += 1;
        }
        written
    }

    /// Resize, clearing the contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }
}

/// A glyph that changed between two canvases.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameGlyph {
    pub pos: Coord,
    pub glyph: Glyph,
}

/// The set of changes to push to the screen.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub glyphs: Vec<FrameGlyph>,
}

impl Frame {
    /// Every glyph of `curr` whose value differs from `prev` at the same
    /// position. A size change yields every glyph of `curr`.
    pub fn diff(prev: &Canvas, curr: &Canvas) -> Self {
        let full = prev.bounds != curr.bounds;
        let glyphs = curr
            .bounds
            .iter()
            .zip(curr.glyphs.iter())
            .filter(|(p, g)| full || prev.at(*p) != **g)
            .map(|(pos, &glyph)| FrameGlyph { pos, glyph })
            .collect();
        Self { glyphs }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
