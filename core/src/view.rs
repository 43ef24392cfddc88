use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Skip masking of hidden cells, for diagnostics.
    pub cheat: bool,
}

impl ViewOptions {
    pub const fn cheat() -> Self {
        Self { cheat: true }
    }
}

/// Player-facing copy of a cell. Hidden cells carry no mine or touch information unless cheating.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub reveal_state: RevealState,
    pub is_mine: Option<bool>,
    pub touch_count: Option<u8>,
}

impl CellView {
    pub fn new(cell: Cell, options: ViewOptions) -> Self {
        if cell.is_hidden() && !options.cheat {
            Self {
                reveal_state: cell.reveal_state,
                is_mine: None,
                touch_count: None,
            }
        } else {
            Self {
                reveal_state: cell.reveal_state,
                is_mine: Some(cell.is_mine),
                touch_count: Some(cell.touch_count),
            }
        }
    }

    pub const fn is_masked(&self) -> bool {
        self.is_mine.is_none()
    }
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_mine, self.touch_count) {
            (Some(true), _) => f.write_str("*"),
            (Some(false), Some(0)) => f.write_str(" "),
            (Some(false), Some(count)) => write!(f, "{}", count),
            _ => f.write_str("#"),
        }
    }
}

impl Game {
    /// Fresh `height x width` matrix of cell views, row-major.
    pub fn to_rows(&self, options: ViewOptions) -> Vec<Vec<CellView>> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|&cell| CellView::new(cell, options))
                    .collect()
            })
            .collect()
    }

    /// One line per row, see [`CellView`]'s `Display` for the glyphs.
    pub fn render_text(&self, options: ViewOptions) -> String {
        self.to_rows(options)
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
