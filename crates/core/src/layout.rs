//! Screen geometry derived once from the config and the screen metrics.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Pixel bounds, right and bottom exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Fixed window and slot geometry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub screen_width: i32,
    pub screen_height: i32,
    pub message_window: Rect,
    pub click_wait_x: i32,
    pub click_wait_y: i32,
    pub choice_left: i32,
    pub choice_right: i32,
    pub choice_top: i32,
    message_grid: i32,
    message_line_height: i32,
    choice_grid: i32,
    choice_line_height: i32,
    half_width: i32,
}

impl Layout {
    /// Returns `None` when the screen metrics are not positive.
    pub fn new(config: &EngineConfig, screen_width: i32, screen_height: i32) -> Option<Self> {
        if screen_width <= 0 || screen_height <= 0 {
            return None;
        }
        let font_size = config.text.font_size;
        let center_x = screen_width / 2;

        let message = &config.message;
        let message_grid = message.line_height + message.line_gap;
        let message_width = message.word_max * font_size;
        let message_height = message_grid * message.line_max as i32 - message.line_gap;
        let message_top = message.center_y - message_height / 2;
        let message_left = center_x - message_width / 2;
        let message_window = Rect::new(
            message_left,
            message_top,
            message_left + message_width,
            message_top + message_height,
        );

        let choice = &config.choice;
        let choice_grid = choice.line_height + choice.line_gap;
        let choice_width = choice.word_max * font_size;
        let choice_height = choice_grid * choice.line_max as i32 - choice.line_gap;
        let choice_left = center_x - choice_width / 2;

        Some(Self {
            screen_width,
            screen_height,
            message_window,
            click_wait_x: message_window.right,
            click_wait_y: message_window.bottom - message.click_wait_offset_y,
            choice_left,
            choice_right: choice_left + choice_width,
            choice_top: choice.center_y - choice_height / 2,
            message_grid,
            message_line_height: message.line_height,
            choice_grid,
            choice_line_height: choice.line_height,
            half_width: config.half_width(),
        })
    }

    pub fn screen(&self) -> Rect {
        Rect::new(0, 0, self.screen_width, self.screen_height)
    }

    /// Area of message line `slot`, collapsed to zero width.
    pub fn message_slot(&self, slot: usize) -> Rect {
        let left = self.message_window.left;
        let top = self.message_window.top + self.message_grid * slot as i32;
        Rect::new(left, top, left, top + self.message_line_height)
    }

    /// Right edge a message of `text` reveals up to.
    pub fn message_right_goal(&self, text: &str) -> i32 {
        self.message_window.left + (text_units(text) + 1) * self.half_width
    }

    pub fn choice_slot(&self, slot: usize) -> Rect {
        let top = self.choice_top + self.choice_grid * slot as i32;
        Rect::new(
            self.choice_left,
            top,
            self.choice_right,
            top + self.choice_line_height,
        )
    }
}

/// Width of `text` in half-width cells: ASCII takes one, anything else two.
pub fn text_units(text: &str) -> i32 {
    text.chars()
        .map(|ch| if ch.is_ascii() { 1 } else { 2 })
        .sum()
}
