//! Compositing through the facade crate.

use proptest::prelude::*;

use ascii_grove::core::{composite, unescape_markup, AsciiCompositor, StyledRun, TextGrid};
use ascii_grove::types::StyleTag;

fn grid(rows: &[&str]) -> TextGrid {
    TextGrid::new(rows.iter().map(|r| r.to_string()).collect())
}

#[test]
fn test_tree_columns_split_ground_runs() {
    let frame = composite(&grid(&["..##.."]), StyleTag::Ground, &grid(&["  TT  "]), StyleTag::Tree)
        .unwrap();
    assert_eq!(
        frame.rows(),
        &[vec![
            StyledRun::new(StyleTag::Ground, ".."),
            StyledRun::new(StyleTag::Tree, "TT"),
            StyledRun::new(StyleTag::Ground, ".."),
        ]]
    );
}

#[test]
fn test_blank_trees_leave_ground_untouched() {
    let ground = grid(&["@%#*", "+=-:", ".   "]);
    let frame = composite(&ground, StyleTag::Ground, &TextGrid::blank(4, 3), StyleTag::Tree).unwrap();

    for (y, runs) in frame.rows().iter().enumerate() {
        assert!(runs.iter().all(|r| r.tag == StyleTag::Ground));
        assert_eq!(frame.row_text(y).unwrap(), ground.rows()[y]);
    }
}

#[test]
fn test_html_round_trips_text() {
    let frame = composite(
        &grid(&["a<b>c", "&&&&&"]),
        StyleTag::Ground,
        &grid(&["  ▓  ", " <>  "]),
        StyleTag::Tree,
    )
    .unwrap();
    let html = frame.to_html();

    let mut text = String::new();
    for line in html.split('\n') {
        let mut rest = line;
        while let Some(start) = rest.find("\">") {
            let body = &rest[start + 2..];
            let end = body.find("</span>").unwrap();
            text.push_str(&unescape_markup(&body[..end]));
            rest = &body[end..];
        }
        text.push('\n');
    }
    assert_eq!(text, "a<▓>c\n&<>&&\n");
}

#[test]
fn test_compositor_survives_mismatch() {
    let mut compositor = AsciiCompositor::new();
    compositor
        .composite(&grid(&["..", ".."]), StyleTag::Ground, &grid(&["T ", " T"]), StyleTag::Tree)
        .unwrap();
    let good = compositor.last().clone();

    let err = compositor
        .composite(&grid(&[".."]), StyleTag::Ground, &grid(&["T ", " T"]), StyleTag::Tree)
        .unwrap_err();
    assert_eq!((err.background_rows, err.foreground_rows), (1, 2));
    assert_eq!(compositor.last(), &good);
}

fn row() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '.', '#', 'T', '▓']), 0..12)
        .prop_map(|chars| chars.into_iter().collect())
}

fn grids() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (0usize..6).prop_flat_map(|h| {
        (
            prop::collection::vec(row(), h..=h),
            prop::collection::vec(row(), h..=h),
        )
    })
}

proptest! {
    #[test]
    fn non_space_foreground_always_wins((bg, fg) in grids()) {
        let frame = composite(
            &TextGrid::new(bg.clone()),
            StyleTag::Ground,
            &TextGrid::new(fg.clone()),
            StyleTag::Tree,
        ).unwrap();

        let width = bg.iter().chain(&fg).map(|r| r.chars().count()).max().unwrap_or(0);
        prop_assert_eq!(frame.width(), width);

        for (y, fg_row) in fg.iter().enumerate() {
            let cells: Vec<(StyleTag, char)> = frame.rows()[y]
                .iter()
                .flat_map(|run| run.text.chars().map(move |c| (run.tag, c)))
                .collect();
            prop_assert_eq!(cells.len(), width);

            for (x, ch) in fg_row.chars().enumerate() {
                if ch != ' ' {
                    prop_assert_eq!(cells[x], (StyleTag::Tree, ch));
                }
            }
        }
    }

    #[test]
    fn adjacent_runs_come_from_different_layers((bg, fg) in grids()) {
        let frame = composite(
            &TextGrid::new(bg),
            StyleTag::Ground,
            &TextGrid::new(fg),
            StyleTag::Tree,
        ).unwrap();
        for runs in frame.rows() {
            for pair in runs.windows(2) {
                prop_assert_ne!(pair[0].tag, pair[1].tag);
            }
            prop_assert!(runs.iter().all(|r| !r.text.is_empty()));
        }
    }
}
