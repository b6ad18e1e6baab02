use std::collections::HashMap;

use fontdue::{Font, FontSettings, Metrics};

/// Rasterized glyph: metrics plus one coverage byte per pixel.
#[derive(Clone, Debug)]
pub struct Glyph {
    pub metrics: Metrics,
    pub coverage: Vec<u8>,
}

/// Glyph rasterizer with a per-size cache.
pub struct TextRasterizer {
    font: Font,
    size: f32,
    ascent: f32,
    glyphs: HashMap<char, Glyph>,
}

impl TextRasterizer {
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default())?;
        let mut text = Self {
            font,
            size,
            ascent: size,
            glyphs: HashMap::new(),
        };
        text.set_size(size);
        Ok(text)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Changes the pixel size, dropping cached glyphs.
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.ascent = self
            .font
            .horizontal_line_metrics(size)
            .map(|metrics| metrics.ascent)
            .unwrap_or(size);
        self.glyphs.clear();
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    pub fn glyph(&mut self, ch: char) -> &Glyph {
        let font = &self.font;
        let size = self.size;
        self.glyphs.entry(ch).or_insert_with(|| {
            let (metrics, coverage) = font.rasterize(ch, size);
            Glyph { metrics, coverage }
        })
    }
}
