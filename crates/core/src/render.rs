//! Per-frame draw pass over the engine's display lists.

use crate::backend::Graphics;
use crate::engine::ScriptEngine;

/// Alpha used for boxes drawn fully opaque.
pub const OPAQUE: u8 = 255;

impl ScriptEngine {
    /// Issues the frame's draw calls. Pure with respect to engine state.
    pub fn render<G: Graphics + ?Sized>(&self, graphics: &mut G) {
        self.render_images(graphics);
        self.render_message_window(graphics);
        self.render_messages(graphics);
        self.render_choices(graphics);
        self.render_cursor(graphics);
    }

    fn render_images<G: Graphics + ?Sized>(&self, graphics: &mut G) {
        for draw in self.draws() {
            if let Some(handle) = draw.handle() {
                let (x, y) = draw.position();
                graphics.draw_image(x, y, handle);
            }
        }
    }

    fn render_message_window<G: Graphics + ?Sized>(&self, graphics: &mut G) {
        let config = self.config();
        let alpha = config.message.window_alpha;
        graphics.draw_box(
            self.layout().message_window,
            config.palette.message_window,
            alpha,
        );

        if config.runtime.debug_areas {
            for message in self.messages() {
                graphics.draw_box(message.area(), config.palette.debug_area, alpha);
            }
        }
    }

    fn render_messages<G: Graphics + ?Sized>(&self, graphics: &mut G) {
        let color = self.config().palette.message_text;
        for message in self.messages() {
            let area = message.area();
            graphics.set_clip(Some(area));
            graphics.draw_string(area.left, area.top, message.text(), color);
        }
        graphics.set_clip(None);

        if self.is_click_wait_visible() {
            if let Some(handle) = self.click_wait_image() {
                let layout = self.layout();
                graphics.draw_image(layout.click_wait_x, layout.click_wait_y, handle);
            }
        }
    }

    fn render_choices<G: Graphics + ?Sized>(&self, graphics: &mut G) {
        for choice in self.choices() {
            graphics.draw_box(choice.area(), choice.color(), OPAQUE);
        }
        let color = self.config().palette.message_text;
        for choice in self.choices() {
            let area = choice.area();
            graphics.draw_string(area.left, area.top, choice.text(), color);
        }
    }

    fn render_cursor<G: Graphics + ?Sized>(&self, graphics: &mut G) {
        let (x, y) = self.cursor();
        graphics.draw_image(x, y, self.cursor_image());
    }
}
