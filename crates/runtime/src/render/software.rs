use script_engine::{Color, Graphics, ImageHandle, Rect};
use tracing::warn;

use super::framebuffer::Framebuffer;
use super::text::TextRasterizer;
use crate::assets::{AssetStore, Sprite};

/// `Graphics` backend drawing into an in-memory RGBA framebuffer that the
/// window loop presents through `pixels`.
pub struct SoftwareGraphics<S> {
    store: S,
    frame: Framebuffer,
    sprites: Vec<Sprite>,
    text: Option<TextRasterizer>,
    cursor_visible: bool,
}

impl<S: AssetStore> SoftwareGraphics<S> {
    pub fn new(width: u32, height: u32, store: S) -> Self {
        Self {
            store,
            frame: Framebuffer::new(width, height),
            sprites: Vec::new(),
            text: None,
            cursor_visible: true,
        }
    }

    /// Without a font, strings are not drawn.
    pub fn with_text(mut self, text: TextRasterizer) -> Self {
        self.text = Some(text);
        self
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn begin_frame(&mut self, background: [u8; 4]) {
        self.frame.set_clip(None);
        self.frame.clear(background);
    }

    /// Whether the engine asked for the OS cursor to stay visible.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn sprite(&self, handle: ImageHandle) -> Option<&Sprite> {
        self.sprites.get(handle.0 as usize)
    }
}

impl<S: AssetStore> Graphics for SoftwareGraphics<S> {
    fn load_image(&mut self, path: &str) -> Option<ImageHandle> {
        let sprite = match self
            .store
            .load_bytes(path)
            .and_then(|bytes| Sprite::decode(&bytes))
        {
            Ok(sprite) => sprite,
            Err(err) => {
                warn!(path, %err, "image load failed");
                return None;
            }
        };
        let handle = ImageHandle(u32::try_from(self.sprites.len()).ok()?);
        self.sprites.push(sprite);
        Some(handle)
    }

    fn screen_size(&self) -> Option<(i32, i32)> {
        let width = i32::try_from(self.frame.width()).ok()?;
        let height = i32::try_from(self.frame.height()).ok()?;
        Some((width, height))
    }

    fn draw_image(&mut self, x: i32, y: i32, handle: ImageHandle) {
        if let Some(sprite) = self.sprites.get(handle.0 as usize) {
            self.frame.blit(x, y, sprite);
        }
    }

    fn draw_box(&mut self, rect: Rect, color: Color, alpha: u8) {
        self.frame.fill_rect(rect, color.into(), alpha);
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let Some(rasterizer) = self.text.as_mut() else {
            return;
        };
        let rgb: [u8; 3] = color.into();
        let baseline = y as f32 + rasterizer.ascent();
        let mut pen_x = x as f32;

        for ch in text.chars() {
            let glyph = rasterizer.glyph(ch);
            let metrics = glyph.metrics;
            let left = pen_x.round() as i32 + metrics.xmin;
            let top = baseline.round() as i32 - metrics.height as i32 - metrics.ymin;
            if metrics.width > 0 {
                for (row, line) in glyph.coverage.chunks_exact(metrics.width).enumerate() {
                    for (col, &coverage) in line.iter().enumerate() {
                        self.frame
                            .blend(left + col as i32, top + row as i32, rgb, coverage);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
    }

    fn set_clip(&mut self, rect: Option<Rect>) {
        self.frame.set_clip(rect);
    }

    fn set_font_size(&mut self, size: i32) {
        if let Some(text) = self.text.as_mut() {
            text.set_size(size as f32);
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}
