//! ascii-grove terminal runner (default binary).
//!
//! Walk a scattered forest rendered as ASCII art. WASD or arrows to move and
//! pan, `c` toggles color drift, `v` toggles layered/single rendering, `q`
//! quits.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ascii_grove::input::{handle_key_event, should_quit, InputTracker};
use ascii_grove::term::TerminalRenderer;
use ascii_grove::types::{Resizable, FRAME_MS};
use ascii_grove::{dispatch_resize, Session, ViewerConfig};

fn main() -> Result<()> {
    let config = ViewerConfig::from_env();
    init_tracing(config.log_path.as_deref())?;

    let mut session = Session::init(config)?;
    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = enable_release_events();

    let result = run(&mut session, &mut term);

    // Always try to restore terminal state.
    if enhanced {
        let _ = crossterm::execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();
    session.teardown();
    if let Err(err) = &result {
        warn!(error = %err, "viewer stopped with an error");
    }
    result
}

/// Log to a file when one is configured; the terminal belongs to the viewer.
fn init_tracing(log_path: Option<&Path>) -> Result<()> {
    let Some(path) = log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Ask the terminal for key release events. Returns whether flags were pushed.
fn enable_release_events() -> bool {
    if !matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
        return false;
    }
    crossterm::execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}

fn run(session: &mut Session, term: &mut TerminalRenderer) -> Result<()> {
    let started = Instant::now();
    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut tracker = InputTracker::new();
    let mut last_frame = Instant::now();

    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    dispatch_resize(&mut [&mut *session as &mut dyn Resizable, &mut *term], cols, rows);
    info!(cols, rows, "viewer running");

    loop {
        // Input until the next frame is due.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let now_ms = started.elapsed().as_millis() as u64;
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match key.kind {
                            KeyEventKind::Press => {
                                if let Some(toggle) = tracker.press(action, now_ms) {
                                    session.apply_toggle(toggle);
                                }
                            }
                            KeyEventKind::Repeat => tracker.repeat(action, now_ms),
                            KeyEventKind::Release => tracker.release(action),
                        }
                    }
                }
                Event::Resize(cols, rows) => {
                    dispatch_resize(&mut [&mut *session as &mut dyn Resizable, &mut *term], cols, rows);
                }
                Event::FocusLost => tracker.reset(),
                _ => {}
            }
        }

        // Frame.
        if last_frame.elapsed() >= frame_duration {
            let delta = last_frame.elapsed().as_secs_f32();
            last_frame = Instant::now();

            let input = tracker.snapshot(started.elapsed().as_millis() as u64);
            session.frame(&input, delta);
            term.draw(session.last_frame(), &session.palette(), &session.status_line())?;
        }
    }
}
