use core::fmt;

use serde::{Deserialize, Serialize};

/// State of a single board position.
///
/// Before mines are placed every cell reads as a safe cell with zero adjacent mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) exploded: bool,
    pub(crate) misflagged: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Number of mines among the neighbors, `None` for mine cells.
    pub const fn adjacent_mine_count(&self) -> Option<u8> {
        if self.is_mine {
            None
        } else {
            Some(self.adjacent_mines)
        }
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// The mine that ended the game.
    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// A flag that turned out to be on a safe cell, only set once the game is lost.
    pub const fn is_misflagged(&self) -> bool {
        self.misflagged
    }

    pub(crate) const fn view(&self) -> CellView {
        match *self {
            Self { exploded: true, .. } => CellView::Exploded,
            Self {
                misflagged: true, ..
            } => CellView::Misflagged,
            Self { flagged: true, .. } => CellView::Flagged,
            Self {
                revealed: false, ..
            } => CellView::Hidden,
            Self { is_mine: true, .. } => CellView::Mine,
            Self { adjacent_mines, .. } => CellView::Revealed(adjacent_mines),
        }
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Exploded,
    Mine,
    Misflagged,
}

impl CellView {
    pub const fn glyph(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Revealed(0) => '.',
            Self::Revealed(count) => (b'0' + count) as char,
            Self::Exploded => 'X',
            Self::Mine => '*',
            Self::Misflagged => 'x',
        }
    }
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_hidden() {
        let cell = Cell::default();

        assert_eq!(cell.view(), CellView::Hidden);
        assert_eq!(cell.adjacent_mine_count(), Some(0));
    }

    #[test]
    fn flag_wins_over_hidden_mine() {
        let cell = Cell {
            is_mine: true,
            flagged: true,
            ..Default::default()
        };

        assert_eq!(cell.view(), CellView::Flagged);
        assert_eq!(cell.adjacent_mine_count(), None);
    }

    #[test]
    fn misflagged_cell_is_drawn_distinctly() {
        let cell = Cell {
            flagged: true,
            revealed: true,
            misflagged: true,
            adjacent_mines: 2,
            ..Default::default()
        };

        assert_eq!(cell.view(), CellView::Misflagged);
        assert_eq!(cell.view().glyph(), 'x');
    }

    #[test]
    fn revealed_counts_render_as_digits() {
        assert_eq!(CellView::Revealed(0).glyph(), '.');
        assert_eq!(CellView::Revealed(3).glyph(), '3');
        assert_eq!(CellView::Revealed(8).glyph(), '8');
    }
}
