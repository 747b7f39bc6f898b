//! Two-layer ASCII compositing with run-length styling.
//!
//! The foreground layer uses space as its "empty" sentinel: any non-space
//! foreground character replaces the background character in that cell.
//! Output rows are grouped into runs of cells that came from the same layer,
//! so a sink styles one run at a time instead of one character at a time.

use std::borrow::Cow;
use std::iter;

use crate::error::GridMismatchError;
use crate::types::StyleTag;

/// Empty-cell sentinel of a rendered layer.
pub const EMPTY: char = ' ';

/// One layer's ASCII output, row by row.
///
/// Rows are usually equal length; the compositor pads short rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextGrid {
    rows: Vec<String>,
}

impl TextGrid {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    /// Split newline-separated text into rows.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            rows: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// `height` rows of `width` spaces.
    pub fn blank(width: usize, height: usize) -> Self {
        let row: String = iter::repeat(EMPTY).take(width).collect();
        Self {
            rows: vec![row; height],
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, in characters.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn push_row(&mut self, row: String) {
        self.rows.push(row);
    }
}

/// A maximal horizontal run of cells sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub tag: StyleTag,
    pub text: String,
}

impl StyledRun {
    pub fn new(tag: StyleTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

/// Composited output: rows of styled runs, every row `width` cells wide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeFrame {
    rows: Vec<Vec<StyledRun>>,
    width: usize,
}

impl CompositeFrame {
    pub fn rows(&self) -> &[Vec<StyledRun>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row text with styling dropped.
    pub fn row_text(&self, y: usize) -> Option<String> {
        self.rows
            .get(y)
            .map(|runs| runs.iter().map(|r| r.text.as_str()).collect())
    }

    /// Render as HTML: one `<span class="..">` per run, rows joined by `\n`.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (y, runs) in self.rows.iter().enumerate() {
            if y > 0 {
                html.push('\n');
            }
            for run in runs {
                html.push_str("<span class=\"");
                html.push_str(run.tag.class_name());
                html.push_str("\">");
                html.push_str(&escape_markup(&run.text));
                html.push_str("</span>");
            }
        }
        html
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Background,
    Foreground,
}

/// Merge `foreground` over `background`.
///
/// Every row is padded with spaces to the widest row found in either grid,
/// computed once per frame. Cells take the foreground character unless it is
/// the space sentinel. Consecutive cells resolved from the same layer form one
/// run. Row counts must match.
pub fn composite(
    background: &TextGrid,
    background_tag: StyleTag,
    foreground: &TextGrid,
    foreground_tag: StyleTag,
) -> Result<CompositeFrame, GridMismatchError> {
    if background.height() != foreground.height() {
        return Err(GridMismatchError {
            background_rows: background.height(),
            foreground_rows: foreground.height(),
        });
    }

    let width = background.width().max(foreground.width());
    let mut rows = Vec::with_capacity(background.height());

    for (bg_row, fg_row) in background.rows.iter().zip(&foreground.rows) {
        let mut runs: Vec<StyledRun> = Vec::new();
        let mut current: Option<Source> = None;

        for (bg, fg) in padded(bg_row, width).zip(padded(fg_row, width)) {
            let (source, ch) = if fg != EMPTY {
                (Source::Foreground, fg)
            } else {
                (Source::Background, bg)
            };

            if current == Some(source) {
                if let Some(run) = runs.last_mut() {
                    run.text.push(ch);
                    continue;
                }
            }

            let tag = match source {
                Source::Background => background_tag,
                Source::Foreground => foreground_tag,
            };
            runs.push(StyledRun::new(tag, ch.to_string()));
            current = Some(source);
        }

        rows.push(runs);
    }

    Ok(CompositeFrame { rows, width })
}

fn padded(row: &str, width: usize) -> impl Iterator<Item = char> + '_ {
    row.chars().chain(iter::repeat(EMPTY)).take(width)
}

/// Present one layer as-is: each row padded to the frame width and emitted as
/// a single run.
pub fn single_layer(grid: &TextGrid, tag: StyleTag) -> CompositeFrame {
    let width = grid.width();
    let rows = grid
        .rows
        .iter()
        .map(|row| {
            if width == 0 {
                return Vec::new();
            }
            let text: String = padded(row, width).collect();
            vec![StyledRun::new(tag, text)]
        })
        .collect();
    CompositeFrame { rows, width }
}

/// Compositor that keeps the last good frame.
///
/// When a composite fails the previous output stays current, so the display
/// keeps showing something instead of going blank.
#[derive(Debug, Clone, Default)]
pub struct AsciiCompositor {
    last: CompositeFrame,
}

impl AsciiCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composite(
        &mut self,
        background: &TextGrid,
        background_tag: StyleTag,
        foreground: &TextGrid,
        foreground_tag: StyleTag,
    ) -> Result<&CompositeFrame, GridMismatchError> {
        self.last = composite(background, background_tag, foreground, foreground_tag)?;
        Ok(&self.last)
    }

    /// Replace the current output with an uncomposited layer.
    pub fn present_single(&mut self, grid: &TextGrid, tag: StyleTag) -> &CompositeFrame {
        self.last = single_layer(grid, tag);
        &self.last
    }

    pub fn last(&self) -> &CompositeFrame {
        &self.last
    }
}

/// Escape the characters HTML reserves inside element text.
pub fn escape_markup(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape_markup`].
pub fn unescape_markup(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        let (decoded, used) = if tail.starts_with("&amp;") {
            ('&', 5)
        } else if tail.starts_with("&lt;") {
            ('<', 4)
        } else if tail.starts_with("&gt;") {
            ('>', 4)
        } else {
            ('&', 1)
        };
        out.push(decoded);
        rest = &tail[used..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> TextGrid {
        TextGrid::new(rows.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn trees_occlude_ground_in_three_runs() {
        let frame = composite(
            &grid(&["..##.."]),
            StyleTag::Ground,
            &grid(&["  TT  "]),
            StyleTag::Tree,
        )
        .unwrap();

        assert_eq!(
            frame.rows()[0],
            vec![
                StyledRun::new(StyleTag::Ground, ".."),
                StyledRun::new(StyleTag::Tree, "TT"),
                StyledRun::new(StyleTag::Ground, ".."),
            ]
        );
        assert_eq!(frame.width(), 6);
    }

    #[test]
    fn blank_foreground_passes_background_through() {
        let bg = grid(&[".:-=", "+*#%"]);
        let frame = composite(&bg, StyleTag::Ground, &TextGrid::blank(4, 2), StyleTag::Tree).unwrap();

        for (y, row) in bg.rows().iter().enumerate() {
            assert_eq!(frame.rows()[y], vec![StyledRun::new(StyleTag::Ground, row.clone())]);
        }
    }

    #[test]
    fn rows_pad_to_one_frame_width() {
        let frame = composite(
            &grid(&["..", "....."]),
            StyleTag::Ground,
            &grid(&["", " T"]),
            StyleTag::Tree,
        )
        .unwrap();

        assert_eq!(frame.width(), 5);
        assert_eq!(frame.row_text(0).unwrap(), "..   ");
        assert_eq!(frame.row_text(1).unwrap(), ".T...");
    }

    #[test]
    fn foreground_wider_than_background() {
        let frame = composite(&grid(&[".."]), StyleTag::Ground, &grid(&["   ▓"]), StyleTag::Tree).unwrap();
        assert_eq!(
            frame.rows()[0],
            vec![
                StyledRun::new(StyleTag::Ground, ".. "),
                StyledRun::new(StyleTag::Tree, "▓"),
            ]
        );
    }

    #[test]
    fn runs_follow_layer_even_when_tags_match() {
        let frame = composite(&grid(&["ab"]), StyleTag::Ground, &grid(&[" X"]), StyleTag::Ground).unwrap();
        assert_eq!(frame.rows()[0].len(), 2);
    }

    #[test]
    fn mismatched_heights_are_rejected() {
        let err = composite(&grid(&["a", "b"]), StyleTag::Ground, &grid(&["c"]), StyleTag::Tree)
            .unwrap_err();
        assert_eq!(
            err,
            GridMismatchError {
                background_rows: 2,
                foreground_rows: 1
            }
        );
    }

    #[test]
    fn compositor_keeps_last_frame_on_mismatch() {
        let mut c = AsciiCompositor::new();
        c.composite(&grid(&["ab"]), StyleTag::Ground, &grid(&[" X"]), StyleTag::Tree)
            .unwrap();
        let before = c.last().clone();

        assert!(c
            .composite(&grid(&["ab", "cd"]), StyleTag::Ground, &grid(&["zz"]), StyleTag::Tree)
            .is_err());
        assert_eq!(c.last(), &before);
    }

    #[test]
    fn empty_grids_compose_to_empty_frame() {
        let frame = composite(&TextGrid::default(), StyleTag::Ground, &TextGrid::default(), StyleTag::Tree)
            .unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.width(), 0);
    }

    #[test]
    fn single_layer_emits_one_run_per_row() {
        let frame = single_layer(&grid(&["@@", "#"]), StyleTag::Ground);
        assert_eq!(frame.rows()[1], vec![StyledRun::new(StyleTag::Ground, "# ")]);
    }

    #[test]
    fn html_spans_escape_reserved_characters() {
        let frame = composite(&grid(&["<&"]), StyleTag::Ground, &grid(&[" >"]), StyleTag::Tree).unwrap();
        assert_eq!(
            frame.to_html(),
            "<span class=\"g\">&lt;</span><span class=\"t\">&gt;</span>"
        );
    }

    #[test]
    fn escaping_is_reversible() {
        for s in ["plain", "a<b>&c", "&amp;", "&lt;&gt;", "&&", "░▒<▓█"] {
            assert_eq!(unescape_markup(&escape_markup(s)), s);
        }
    }
}
