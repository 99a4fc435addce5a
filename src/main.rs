//! Terminal runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, and the high-score
//! table in `highscores.txt` in the working directory.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::app::App;
use blockfall::core::GameEngine;
use blockfall::engine::{FileHighScores, Session};
use blockfall::term::{FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1);

    let session = Session::new(GameEngine::new(seed), FileHighScores::default());
    let mut app = App::new(session);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_frame = Instant::now();

    while !app.should_quit() {
        let (w, h) = term.size();
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            app.update(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }

    Ok(())
}
