use std::io::{self, Write};

use sapper_core::{Board, Phase};

/// Draws the board with column and row labels, columns labelled by their last digit.
pub(crate) fn draw_board(out: &mut impl Write, board: &Board) -> io::Result<()> {
    let (size_x, size_y) = board.size();
    let label_width = (size_y - 1).to_string().len();

    write!(out, "{:label_width$} ", "")?;
    for x in 0..size_x {
        write!(out, "{}", x % 10)?;
    }
    writeln!(out)?;

    for y in 0..size_y {
        write!(out, "{y:>label_width$} ")?;
        for x in 0..size_x {
            // coordinates come from the board's own size
            if let Ok(view) = board.view_at((x, y)) {
                write!(out, "{view}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn draw_status(out: &mut impl Write, board: &Board) -> io::Result<()> {
    let status = match board.phase() {
        _ if board.is_won() => "won",
        Phase::NotStarted => "not started",
        Phase::InProgress => "in progress",
        Phase::Lost => "lost",
    };
    write!(out, "flags left: {}", board.flags_remaining())?;
    // a loss uncovers wrong flags, the remaining count no longer means anything
    if !board.phase().is_lost() {
        write!(out, "  safe cells left: {}", board.safe_cells_left())?;
    }
    writeln!(out, "  game {status}")
}
