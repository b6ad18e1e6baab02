//! Collaborator interfaces consumed by the interpreter.
//!
//! The engine never talks to a window system directly. A frame loop owns a
//! [`Graphics`] sink and an [`InputDevice`] and lends them to the engine for
//! the duration of each call.

use serde::{Deserialize, Serialize};

use crate::layout::Rect;

/// Opaque handle to an image loaded by the graphics backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// 24-bit color, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Bitmask of mouse buttons currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(1 << 1);
    pub const MIDDLE: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for MouseButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Drawing sink and image loader.
pub trait Graphics {
    /// Loads an image from `path`. `None` means the load failed.
    fn load_image(&mut self, path: &str) -> Option<ImageHandle>;

    /// Screen width and height in pixels, if the backend can report them.
    fn screen_size(&self) -> Option<(i32, i32)>;

    fn draw_image(&mut self, x: i32, y: i32, handle: ImageHandle);

    /// Fills `rect`. `alpha` of 255 is opaque.
    fn draw_box(&mut self, rect: Rect, color: Color, alpha: u8);

    fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Color);

    /// Restricts subsequent drawing to `rect`; `None` restores the full screen.
    fn set_clip(&mut self, rect: Option<Rect>);

    fn set_font_size(&mut self, _size: i32) {}

    fn set_cursor_visible(&mut self, _visible: bool) {}
}

/// Raw input state, sampled once per frame. Edge detection happens in the
/// engine, so implementations report only what is held right now.
pub trait InputDevice {
    fn mouse_position(&self) -> (i32, i32);

    fn mouse_buttons(&self) -> MouseButtons;

    fn exit_key_down(&self) -> bool;
}
