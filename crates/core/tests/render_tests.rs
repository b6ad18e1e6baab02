mod common;

use common::{engine, engine_with, idle, CURSOR};
use script_engine::{Color, DrawCall, EngineConfig, Rect, ScriptedInput, OPAQUE};

const WHITE: Color = Color::rgb(255, 255, 255);
const WINDOW: Color = Color::rgb(128, 128, 255);

#[test]
fn click_wait_frame_draws_in_layer_order() {
    let lines = [
        CURSOR,
        "i, click_wait, click_wait.png",
        "i, bg, bg.png",
        "d, 0, bg, 10, 20",
        "m, Hi",
        "@",
    ];
    let (mut engine, mut graphics) = engine(&lines);
    idle(&mut engine, 4);
    engine.update(&ScriptedInput::hover(5, 6));
    assert!(engine.is_click_wait_visible());

    let bg = engine.images().handle_of("bg").expect("bg");
    let click_wait = engine.click_wait_image().expect("click wait icon");
    let message_area = Rect::new(136, 548, 172, 572);

    engine.render(&mut graphics);
    assert_eq!(
        graphics.take_calls(),
        vec![
            DrawCall::Image { x: 10, y: 20, handle: bg },
            DrawCall::Box {
                rect: Rect::new(136, 548, 1144, 652),
                color: WINDOW,
                alpha: 64,
            },
            DrawCall::Clip(Some(message_area)),
            DrawCall::Text {
                x: 136,
                y: 548,
                text: "Hi".to_string(),
                color: WHITE,
            },
            DrawCall::Clip(None),
            DrawCall::Image {
                x: 1144,
                y: 624,
                handle: click_wait,
            },
            DrawCall::Image {
                x: 5,
                y: 6,
                handle: engine.cursor_image(),
            },
        ]
    );
}

#[test]
fn choice_frame_draws_boxes_then_labels() {
    let (mut engine, mut graphics) = engine(&[CURSOR, "l, x", "c, x, Pick", "@"]);
    idle(&mut engine, 1);

    engine.render(&mut graphics);
    let calls = graphics.take_calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[1], DrawCall::Clip(None));
    assert_eq!(
        calls[2],
        DrawCall::Box {
            rect: Rect::new(352, 308, 928, 332),
            color: Color::rgb(64, 64, 255),
            alpha: OPAQUE,
        }
    );
    assert_eq!(
        calls[3],
        DrawCall::Text {
            x: 352,
            y: 308,
            text: "Pick".to_string(),
            color: WHITE,
        }
    );
}

#[test]
fn debug_areas_outline_each_message() {
    let mut config = EngineConfig::default();
    config.runtime.debug_areas = true;
    let (mut engine, mut graphics) = engine_with(&[CURSOR, "m, a", "m, b", "@"], config);
    idle(&mut engine, 1);

    engine.render(&mut graphics);
    let debug_boxes = graphics
        .calls()
        .iter()
        .filter(|call| {
            matches!(call, DrawCall::Box { color, .. } if *color == Color::rgb(255, 0, 0))
        })
        .count();
    assert_eq!(debug_boxes, 2);
}

#[test]
fn render_does_not_change_engine_state() {
    let (mut engine, mut graphics) = engine(&[CURSOR, "m, Hello", "@"]);
    idle(&mut engine, 2);
    let before = engine.snapshot();
    engine.render(&mut graphics);
    engine.render(&mut graphics);
    assert_eq!(engine.snapshot(), before);
}
