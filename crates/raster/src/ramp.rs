//! Brightness to glyph mapping.

/// Glyphs ordered from emptiest to densest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharRamp {
    glyphs: Vec<char>,
}

impl CharRamp {
    /// An empty string yields a one-glyph ramp of a single space.
    pub fn new(glyphs: &str) -> Self {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Self { glyphs: vec![' '] };
        }
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Glyph for a brightness in `[0, 1]` (clamped; NaN reads as 0).
    pub fn glyph(&self, brightness: f32, invert: bool) -> char {
        let b = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        let b = if invert { 1.0 - b } else { b };
        let last = self.glyphs.len() - 1;
        let idx = ((b * last as f32) + 0.5).floor() as usize;
        self.glyphs[idx.min(last)]
    }

    /// Like [`Self::glyph`], but a space is replaced by the sparsest
    /// non-space glyph. Surfaces that were hit must not read as empty.
    pub fn visible_glyph(&self, brightness: f32, invert: bool) -> char {
        let ch = self.glyph(brightness, invert);
        if ch != ' ' {
            return ch;
        }
        self.glyphs
            .iter()
            .copied()
            .find(|c| *c != ' ')
            .unwrap_or(ch)
    }
}
