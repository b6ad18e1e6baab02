#![allow(dead_code)]

use script_engine::{
    EngineConfig, HeadlessGraphics, ScriptEngine, ScriptLines, ScriptedInput,
};

pub const CURSOR: &str = "i, cursor, cursor.png";

/// Builds an engine over `lines` with the stock configuration.
pub fn engine(lines: &[&str]) -> (ScriptEngine, HeadlessGraphics) {
    engine_with(lines, EngineConfig::default())
}

pub fn engine_with(lines: &[&str], config: EngineConfig) -> (ScriptEngine, HeadlessGraphics) {
    let mut graphics = HeadlessGraphics::default();
    let engine = ScriptEngine::initialize(
        ScriptLines::new(lines.iter().copied()),
        &mut graphics,
        config,
    )
    .expect("initialize engine");
    (engine, graphics)
}

pub fn idle(engine: &mut ScriptEngine, frames: usize) {
    for _ in 0..frames {
        engine.update(&ScriptedInput::idle());
    }
}

/// A full press and release at `(x, y)`.
pub fn click_at(engine: &mut ScriptEngine, x: i32, y: i32) {
    engine.update(&ScriptedInput::left_down_at(x, y));
    engine.update(&ScriptedInput::hover(x, y));
}
