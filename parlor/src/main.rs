//! # parlor
//!
//! Minimal headless host for the `parlor-core` engines: replays a scripted
//! drawing session, exports the PNG, and walks the game engines through a
//! few moves so their status reporting shows up in the logs. A windowed
//! shell would feed the same APIs from real input events.

use anyhow::Context;
use parlor_core::clock::{Clock, WallClock};
use parlor_core::color::Rgb8;
use parlor_core::editor::Editor;
use parlor_core::filter::Filter;
use parlor_core::games::{checkers, memory, minesweeper, tictactoe};
use parlor_core::state::session::Tool;
use parlor_core::tools::PointerEvent;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 500;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "parlor.png".into());

    let editor = scripted_drawing()?;
    let png = editor.export_png().context("exporting the canvas")?;
    std::fs::write(&out_path, &png)
        .with_context(|| format!("writing {out_path}"))?;
    log::info!(
        "wrote {out_path}: {}x{}, {} bytes",
        editor.display().width(),
        editor.display().height(),
        png.len()
    );

    play_games();
    Ok(())
}

/// A few strokes, a shape on its own layer, and a filter — enough to
/// exercise every editor surface end to end.
fn scripted_drawing() -> anyhow::Result<Editor> {
    let mut editor = Editor::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    // A rolling brush line across the canvas.
    editor.session.color = Rgb8::from_hex("#2a6fb0")?;
    editor.session.set_brush_size(12);
    editor.pointer(PointerEvent::Down([40.0, 250.0]));
    for step in 0..=60 {
        let x = 40.0 + step as f32 * 12.0;
        let y = 250.0 + (step as f32 * 0.35).sin() * 80.0;
        editor.pointer(PointerEvent::Move([x, y]));
    }
    editor.pointer(PointerEvent::Up);

    // Shapes get their own layer.
    editor.add_layer();
    editor.session.color = Rgb8::from_hex("#d1495b")?;
    editor.session.set_brush_size(6);
    editor.session.tool = Tool::Circle;
    editor.pointer(PointerEvent::Down([400.0, 250.0]));
    editor.pointer(PointerEvent::Move([400.0, 150.0]));
    editor.pointer(PointerEvent::Up);

    editor.session.tool = Tool::Rectangle;
    editor.session.set_opacity(60);
    editor.pointer(PointerEvent::Down([120.0, 80.0]));
    editor.pointer(PointerEvent::Move([300.0, 180.0]));
    editor.pointer(PointerEvent::Up);

    editor.set_filter(Filter::Sepia);
    Ok(editor)
}

fn play_games() {
    // Checkers: open with a legal red step.
    let mut checkers = checkers::CheckersGame::new();
    checkers.click(checkers::Pos { row: 5, col: 0 });
    checkers.click(checkers::Pos { row: 4, col: 1 });
    log::info!(
        "checkers: {:?}, {} to move",
        checkers.status(),
        checkers.turn().as_ref()
    );

    // Memory: flip the first two cards and let the verdict land.
    let clock = WallClock::new();
    let mut memory = memory::MemoryGame::new(memory::Difficulty::Easy);
    memory.flip(0, clock.now());
    memory.flip(1, clock.now());
    memory.poll(clock.now() + memory::MISMATCH_DELAY);
    log::info!(
        "memory: {} moves, {}/{} pairs",
        memory.moves(),
        memory.matched_pairs(),
        memory.difficulty().pairs()
    );

    // Minesweeper: one brave click.
    let mut minefield = minesweeper::Minesweeper::new();
    minefield.reveal(3, 3);
    log::info!("minesweeper: {:?}", minefield.status());

    // Tic-tac-toe: X opens in the center.
    let mut tictactoe = tictactoe::TicTacToe::new();
    tictactoe.play(4);
    log::info!(
        "tic-tac-toe: {:?}, next {}",
        tictactoe.status(),
        tictactoe.next_player().as_ref()
    );
}
