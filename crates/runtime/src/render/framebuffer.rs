use script_engine::Rect;

use crate::assets::Sprite;

/// RGBA8 frame with an optional clip rectangle.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    clip: Option<Rect>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            clip: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    /// Drawable region: the screen, narrowed by the clip rectangle.
    pub fn bounds(&self) -> Rect {
        let screen = Rect::new(0, 0, self.width as i32, self.height as i32);
        match self.clip {
            Some(clip) => intersect(screen, clip),
            None => screen,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(out)
    }

    /// Blends `rgb` over pixel `(x, y)` if it lies inside [`Self::bounds`].
    pub fn blend(&mut self, x: i32, y: i32, rgb: [u8; 3], alpha: u8) {
        if alpha == 0 || !self.bounds().contains(x, y) {
            return;
        }
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let dst = &mut self.pixels[idx..idx + 4];
        for channel in 0..3 {
            dst[channel] = mix(rgb[channel], dst[channel], alpha);
        }
        dst[3] = 255;
    }

    pub fn fill_rect(&mut self, rect: Rect, rgb: [u8; 3], alpha: u8) {
        let area = intersect(rect, self.bounds());
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                self.blend(x, y, rgb, alpha);
            }
        }
    }

    /// Draws `sprite` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, x: i32, y: i32, sprite: &Sprite) {
        let target = Rect::new(x, y, x + sprite.width as i32, y + sprite.height as i32);
        let area = intersect(target, self.bounds());
        for py in area.top..area.bottom {
            for px in area.left..area.right {
                let [r, g, b, a] = sprite.pixel((px - x) as u32, (py - y) as u32);
                self.blend(px, py, [r, g, b], a);
            }
        }
    }

    /// Copies the frame into `target`, which must have the same length.
    pub fn copy_to(&self, target: &mut [u8]) {
        if target.len() == self.pixels.len() {
            target.copy_from_slice(&self.pixels);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(((y as u32 * self.width + x as u32) * 4) as usize)
    }
}

fn mix(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(src) * a + u32::from(dst) * (255 - a) + 127) / 255) as u8
}

fn intersect(a: Rect, b: Rect) -> Rect {
    let left = a.left.max(b.left);
    let top = a.top.max(b.top);
    Rect::new(
        left,
        top,
        a.right.min(b.right).max(left),
        a.bottom.min(b.bottom).max(top),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_respects_clip() {
        let mut frame = Framebuffer::new(8, 8);
        frame.clear([0, 0, 0, 255]);
        frame.set_clip(Some(Rect::new(2, 2, 4, 4)));
        frame.fill_rect(Rect::new(0, 0, 8, 8), [255, 0, 0], 255);
        assert_eq!(frame.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(4, 4), Some([0, 0, 0, 255]));
        assert_eq!(frame.pixel(1, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn translucent_fill_blends() {
        let mut frame = Framebuffer::new(1, 1);
        frame.clear([0, 0, 0, 255]);
        frame.fill_rect(Rect::new(0, 0, 1, 1), [255, 255, 255], 64);
        assert_eq!(frame.pixel(0, 0), Some([64, 64, 64, 255]));
    }

    #[test]
    fn blit_clips_to_screen() {
        let sprite = Sprite {
            width: 2,
            height: 2,
            pixels: vec![10, 20, 30, 255].repeat(4),
        };
        let mut frame = Framebuffer::new(3, 3);
        frame.blit(2, -1, &sprite);
        assert_eq!(frame.pixel(2, 0), Some([10, 20, 30, 255]));
        assert_eq!(frame.pixel(1, 0), Some([0, 0, 0, 0]));
    }
}
