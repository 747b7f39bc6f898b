//! TerminalRenderer: flushes composited frames to a real terminal.
//!
//! Encoding is split from I/O so the byte stream can be checked in tests.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{CompositeFrame, StyledRun};
use crate::palette::{Palette, Rgb};
use crate::types::Resizable;

const STATUS_COLOR: Rgb = Rgb::new(0xc0, 0xc0, 0xc0);

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last_rows: Vec<Vec<StyledRun>>,
    last_status: String,
    last_palette: Option<Palette>,
    /// Set until the first draw and after `invalidate`.
    needs_clear: bool,
    buf: Vec<u8>,
}

/// How much of the screen a draw rewrites.
#[derive(Debug, Clone, Copy)]
pub enum Redraw<'a> {
    /// Clear the screen, then write every row.
    Clear,
    /// Write every row over the existing screen.
    Repaint,
    /// Write only rows that differ from these.
    Diff(&'a [Vec<StyledRun>]),
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last_rows: Vec::new(),
            last_status: String::new(),
            last_palette: None,
            needs_clear: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to clear the screen and redraw everything.
    pub fn invalidate(&mut self) {
        self.last_rows.clear();
        self.last_status.clear();
        self.last_palette = None;
        self.needs_clear = true;
    }

    /// Draw `frame` with `status` on the row below it.
    ///
    /// Only rows that changed since the previous call are rewritten. A
    /// palette change rewrites every row in place; the screen is cleared only
    /// after `invalidate`.
    pub fn draw(&mut self, frame: &CompositeFrame, palette: &Palette, status: &str) -> Result<()> {
        self.buf.clear();
        self.encode_draw(frame, palette, status)?;
        self.flush_buf()
    }

    fn encode_draw(&mut self, frame: &CompositeFrame, palette: &Palette, status: &str) -> Result<()> {
        let mode = if self.needs_clear {
            Redraw::Clear
        } else if self.last_palette != Some(*palette) {
            Redraw::Repaint
        } else {
            Redraw::Diff(self.last_rows.as_slice())
        };
        let full = !matches!(mode, Redraw::Diff(_));

        encode_frame_into(mode, frame, palette, &mut self.buf)?;
        if full || status != self.last_status {
            encode_status_into(frame.height(), status, &mut self.buf)?;
        }

        self.needs_clear = false;
        self.last_rows.clear();
        self.last_rows.extend_from_slice(frame.rows());
        self.last_status.clear();
        self.last_status.push_str(status);
        self.last_palette = Some(*palette);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Resizable for TerminalRenderer {
    fn resize(&mut self, _cols: u16, _rows: u16) {
        self.invalidate();
    }
}

/// Encode `frame` into `out`.
pub fn encode_frame_into(
    mode: Redraw<'_>,
    frame: &CompositeFrame,
    palette: &Palette,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(SetBackgroundColor(rgb_to_color(palette.background)))?;
    if let Redraw::Clear = mode {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }
    let prev = match mode {
        Redraw::Diff(rows) => Some(rows),
        Redraw::Clear | Redraw::Repaint => None,
    };

    let mut current: Option<Rgb> = None;
    for (y, runs) in frame.rows().iter().enumerate() {
        if prev.and_then(|p| p.get(y)) == Some(runs) {
            continue;
        }
        out.queue(cursor::MoveTo(0, row_index(y)))?;
        for run in runs {
            let color = palette.color(run.tag);
            if current != Some(color) {
                out.queue(SetForegroundColor(rgb_to_color(color)))?;
                current = Some(color);
            }
            out.queue(Print(&run.text))?;
        }
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    }

    out.queue(ResetColor)?;
    Ok(())
}

fn encode_status_into(y: usize, status: &str, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, row_index(y)))?;
    out.queue(SetForegroundColor(rgb_to_color(STATUS_COLOR)))?;
    out.queue(Print(status))?;
    out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn row_index(y: usize) -> u16 {
    u16::try_from(y).unwrap_or(u16::MAX)
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{composite, TextGrid};
    use crate::types::StyleTag;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn frame(ground: &[&str], trees: &[&str]) -> CompositeFrame {
        let g = TextGrid::new(ground.iter().map(|s| s.to_string()).collect());
        let t = TextGrid::new(trees.iter().map(|s| s.to_string()).collect());
        composite(&g, StyleTag::Ground, &t, StyleTag::Tree).unwrap()
    }

    fn encode(mode: Redraw<'_>, f: &CompositeFrame) -> String {
        let mut out = Vec::new();
        encode_frame_into(mode, f, &Palette::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_redraw_writes_every_run() {
        let f = frame(&["..##..", "::::::"], &["  TT  ", "      "]);
        let s = encode(Redraw::Clear, &f);
        assert!(s.contains(".."));
        assert!(s.contains("TT"));
        assert!(s.contains("::::::"));
    }

    #[test]
    fn one_color_change_per_run() {
        let f = frame(&["..##.."], &["  TT  "]);
        let s = encode(Redraw::Clear, &f);
        // ground, tree, ground
        assert_eq!(s.matches("\x1b[38;2;").count(), 3);
        assert_eq!(s.matches("\x1b[38;2;96;255;96m").count(), 1);
    }

    #[test]
    fn unchanged_rows_are_skipped() {
        let before = frame(&["aaaa", "bbbb"], &["    ", "    "]);
        let after = frame(&["aaaa", "bbbb"], &["    ", " X  "]);

        let s = encode(Redraw::Diff(before.rows()), &after);
        assert!(!s.contains("aaaa"));
        assert!(s.contains("X"));

        let s = encode(Redraw::Diff(after.rows()), &after);
        assert!(!s.contains("aaaa"));
        assert!(!s.contains("X"));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut r = TerminalRenderer::new();
        r.last_palette = Some(Palette::default());
        r.last_rows = frame(&["ab"], &["  "]).rows().to_vec();
        r.needs_clear = false;
        r.resize(80, 24);
        assert!(r.last_palette.is_none());
        assert!(r.last_rows.is_empty());
        assert!(r.needs_clear);
    }

    fn draw_to_buf(r: &mut TerminalRenderer, f: &CompositeFrame, palette: &Palette) -> String {
        r.buf.clear();
        r.encode_draw(f, palette, "status").unwrap();
        String::from_utf8(r.buf.clone()).unwrap()
    }

    #[test]
    fn palette_change_repaints_without_clearing() {
        let f = frame(&["aaaa", "bbbb"], &["    ", " X  "]);
        let mut r = TerminalRenderer::new();
        let first = draw_to_buf(&mut r, &f, &Palette::default());
        assert!(first.contains(CLEAR_ALL));

        let same = draw_to_buf(&mut r, &f, &Palette::default());
        assert!(!same.contains("aaaa"));

        let tinted = Palette::default().tinted(Rgb::new(10, 20, 30));
        let s = draw_to_buf(&mut r, &f, &tinted);
        assert!(!s.contains(CLEAR_ALL));
        assert!(s.contains("aaaa"));
        assert!(s.contains("bbbb"));
        assert!(s.contains("status"));
        assert!(s.contains("\x1b[38;2;10;20;30m"));
    }

    #[test]
    fn invalidate_clears_on_next_draw() {
        let f = frame(&["ab"], &["  "]);
        let mut r = TerminalRenderer::new();
        draw_to_buf(&mut r, &f, &Palette::default());
        assert!(!draw_to_buf(&mut r, &f, &Palette::default()).contains(CLEAR_ALL));

        r.invalidate();
        let s = draw_to_buf(&mut r, &f, &Palette::default());
        assert!(s.contains(CLEAR_ALL));
        assert!(s.contains("ab"));

        r.resize(100, 40);
        assert!(draw_to_buf(&mut r, &f, &Palette::default()).contains(CLEAR_ALL));
    }
}
