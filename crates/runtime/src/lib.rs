//! Runtime layer for driving the script engine with a winit + pixels loop.

pub mod assets;
pub mod config;
pub mod error;
pub mod input;
pub mod render;

use std::path::Path;
use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use script_engine::{ScriptEngine, ScriptSource};
use tracing::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

pub use self::assets::{AssetError, AssetStore, FileAssetStore, MemoryAssetStore, Sprite};
pub use self::config::{RuntimeConfig, WindowSettings};
pub use self::error::{RuntimeError, RuntimeResult};
pub use self::input::WindowInput;
pub use self::render::{Framebuffer, SoftwareGraphics, TextRasterizer};

/// Color the frame is cleared to before the engine draws.
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Result of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

/// Engine plus the collaborators it draws and reads input through.
pub struct RuntimeApp<S> {
    engine: ScriptEngine,
    graphics: SoftwareGraphics<S>,
    input: WindowInput,
}

impl<S: AssetStore> RuntimeApp<S> {
    pub fn new<Src>(
        source: Src,
        config: &RuntimeConfig,
        store: S,
        text: Option<TextRasterizer>,
    ) -> RuntimeResult<Self>
    where
        Src: ScriptSource + 'static,
    {
        let mut graphics =
            SoftwareGraphics::new(config.window.width, config.window.height, store);
        match text {
            Some(text) => graphics = graphics.with_text(text),
            None => warn!("no font configured, text will not be drawn"),
        }
        let engine = ScriptEngine::initialize(source, &mut graphics, config.engine.clone())?;
        Ok(Self {
            engine,
            graphics,
            input: WindowInput::default(),
        })
    }

    pub fn engine(&self) -> &ScriptEngine {
        &self.engine
    }

    pub fn graphics(&self) -> &SoftwareGraphics<S> {
        &self.graphics
    }

    pub fn input_mut(&mut self) -> &mut WindowInput {
        &mut self.input
    }

    /// Updates the engine with the current input and redraws the frame.
    pub fn frame(&mut self) -> FrameOutcome {
        self.engine.update(&self.input);
        if self.engine.is_exit() || self.engine.is_end() {
            return FrameOutcome::Exit;
        }
        self.graphics.begin_frame(BACKGROUND);
        self.engine.render(&mut self.graphics);
        FrameOutcome::Continue
    }
}

/// Loads the font at `path` for use at `size` pixels.
pub fn load_font(path: &Path, size: f32) -> RuntimeResult<TextRasterizer> {
    let font_error = |message: String| RuntimeError::Font {
        path: path.display().to_string(),
        message,
    };
    let bytes = std::fs::read(path).map_err(|err| font_error(err.to_string()))?;
    TextRasterizer::from_bytes(&bytes, size).map_err(font_error)
}

/// Runs the window loop until the script ends, the exit key is pressed or
/// the window closes.
pub fn run_winit<S>(mut app: RuntimeApp<S>, window: &WindowSettings) -> RuntimeResult<()>
where
    S: AssetStore + 'static,
{
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(window.title.clone())
            .with_inner_size(LogicalSize::new(window.width, window.height))
            .with_min_inner_size(LogicalSize::new(window.width / 2, window.height / 2))
            .build(&event_loop)?,
    );
    window.set_cursor_visible(app.graphics.cursor_visible());

    let frame_size = (app.graphics.frame().width(), app.graphics.frame().height());
    let size = window.inner_size();
    let surface = SurfaceTexture::new(size.width, size.height, window.clone());
    let mut pixels = Pixels::new(frame_size.0, frame_size.1, surface)?;

    info!(width = frame_size.0, height = frame_size.1, "window ready");
    event_loop.set_control_flow(ControlFlow::Poll);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    error!(%err, "surface resize failed");
                    elwt.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = match pixels.window_pos_to_pixel((position.x as f32, position.y as f32))
                {
                    Ok((x, y)) => (x as i32, y as i32),
                    Err((x, y)) => (x as i32, y as i32),
                };
                app.input.set_cursor(x, y);
            }
            WindowEvent::RedrawRequested => {
                if app.frame() == FrameOutcome::Exit {
                    info!("exit requested");
                    elwt.exit();
                    return;
                }
                app.graphics.frame().copy_to(pixels.frame_mut());
                if let Err(err) = pixels.render() {
                    error!(%err, "present failed");
                    elwt.exit();
                }
            }
            other => app.input.handle_window_event(&other),
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
