//! Brickout entry point
//!
//! No windowing backend ships with the crate, so the native binary plays a
//! scripted session on the headless surface and logs how it went.
//!
//! Usage: `brickout [layout.json] [frames]`

use brickout::renderer::{HeadlessSurface, Key, ScriptedFrame};
use brickout::{Game, Layout};

/// Frames to play when none are given
const DEFAULT_FRAMES: usize = 600;

/// Unpause, then sweep the paddle back and forth
fn demo_script(frames: usize) -> Vec<ScriptedFrame> {
    (0..frames)
        .map(|frame| match frame {
            0 => ScriptedFrame::holding(&[Key::P]),
            f if (f / 90) % 2 == 0 => ScriptedFrame::holding(&[Key::Left]),
            _ => ScriptedFrame::holding(&[Key::Right]),
        })
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brickout (headless) starting...");

    let mut args = std::env::args().skip(1);

    let layout = match args.next() {
        Some(path) => match Layout::load(&path) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("Ignoring layout {}: {}; using defaults", path, e);
                Layout::default()
            }
        },
        None => Layout::default(),
    };

    let frames = match args.next().map(|s| s.parse::<usize>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            log::warn!("Bad frame count ({}); playing {} frames", e, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };

    let mut surface = HeadlessSurface::new(demo_script(frames)).with_pacing(true);
    let mut game = Game::new(layout);
    let ticked = game.run(&mut surface);

    log::info!(
        "Played {} frames ({} draw calls), {} of {} bricks left, state {:?}",
        ticked,
        surface.total_draw_calls(),
        game.bricks_remaining(),
        game.layout().brick_count(),
        game.state()
    );
}
