//! Window-less collaborators for tests, benchmarks and offline tooling.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::backend::{Color, Graphics, ImageHandle, InputDevice, MouseButtons};
use crate::layout::Rect;

/// A recorded draw primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Image {
        x: i32,
        y: i32,
        handle: ImageHandle,
    },
    Box {
        rect: Rect,
        color: Color,
        alpha: u8,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
    Clip(Option<Rect>),
}

/// Graphics sink that records calls instead of drawing.
///
/// Every image load succeeds unless its path was rejected, or, when an asset
/// root is set, unless the file is missing under that root.
#[derive(Clone, Debug)]
pub struct HeadlessGraphics {
    screen: Option<(i32, i32)>,
    asset_root: Option<PathBuf>,
    rejected: BTreeSet<String>,
    loaded: Vec<String>,
    calls: Vec<DrawCall>,
    font_size: i32,
    cursor_visible: bool,
}

impl HeadlessGraphics {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            screen: Some((width, height)),
            asset_root: None,
            rejected: BTreeSet::new(),
            loaded: Vec::new(),
            calls: Vec::new(),
            font_size: 0,
            cursor_visible: true,
        }
    }

    /// A backend that cannot report screen metrics.
    pub fn without_screen() -> Self {
        Self {
            screen: None,
            ..Self::new(0, 0)
        }
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    /// Makes loads of `path` fail.
    pub fn reject(mut self, path: impl Into<String>) -> Self {
        self.rejected.insert(path.into());
        self
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Path the handle was loaded from.
    pub fn path_of(&self, handle: ImageHandle) -> Option<&str> {
        self.loaded.get(handle.0 as usize).map(String::as_str)
    }

    pub fn loaded_paths(&self) -> &[String] {
        &self.loaded
    }

    pub fn font_size(&self) -> i32 {
        self.font_size
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

impl Default for HeadlessGraphics {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl Graphics for HeadlessGraphics {
    fn load_image(&mut self, path: &str) -> Option<ImageHandle> {
        if self.rejected.contains(path) {
            return None;
        }
        if let Some(root) = &self.asset_root {
            if !root.join(path).is_file() {
                return None;
            }
        }
        let handle = ImageHandle(u32::try_from(self.loaded.len()).ok()?);
        self.loaded.push(path.to_string());
        Some(handle)
    }

    fn screen_size(&self) -> Option<(i32, i32)> {
        self.screen
    }

    fn draw_image(&mut self, x: i32, y: i32, handle: ImageHandle) {
        self.calls.push(DrawCall::Image { x, y, handle });
    }

    fn draw_box(&mut self, rect: Rect, color: Color, alpha: u8) {
        self.calls.push(DrawCall::Box { rect, color, alpha });
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn set_clip(&mut self, rect: Option<Rect>) {
        self.calls.push(DrawCall::Clip(rect));
    }

    fn set_font_size(&mut self, size: i32) {
        self.font_size = size;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

/// Input sample set directly by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    pub cursor: (i32, i32),
    pub buttons: MouseButtons,
    pub exit: bool,
}

impl ScriptedInput {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Left button held with the cursor at `(x, y)`.
    pub fn left_down_at(x: i32, y: i32) -> Self {
        Self {
            cursor: (x, y),
            buttons: MouseButtons::LEFT,
            exit: false,
        }
    }

    pub fn hover(x: i32, y: i32) -> Self {
        Self {
            cursor: (x, y),
            ..Self::default()
        }
    }

    pub fn exit() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }
}

impl InputDevice for ScriptedInput {
    fn mouse_position(&self) -> (i32, i32) {
        self.cursor
    }

    fn mouse_buttons(&self) -> MouseButtons {
        self.buttons
    }

    fn exit_key_down(&self) -> bool {
        self.exit
    }
}
