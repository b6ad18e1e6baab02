pub mod framebuffer;
pub mod software;
pub mod text;

pub use framebuffer::Framebuffer;
pub use software::SoftwareGraphics;
pub use text::{Glyph, TextRasterizer};
