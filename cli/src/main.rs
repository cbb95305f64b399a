use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use sapper_core::*;

use command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: beginner, intermediate, expert or classic
    #[arg(short, long)]
    preset: Option<Difficulty>,

    /// Custom board width, requires --height and --mines
    #[arg(long)]
    width: Option<Coord>,

    /// Custom board height, requires --width and --mines
    #[arg(long)]
    height: Option<Coord>,

    /// Custom mine count, requires --width and --height
    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Result<GameConfig> {
        match (self.preset, self.width, self.height, self.mines) {
            (preset, None, None, None) => Ok(preset.unwrap_or(Difficulty::Classic).config()),
            (None, Some(width), Some(height), Some(mines)) => {
                GameConfig::new((width, height), mines).context("Invalid custom board")
            }
            (Some(_), _, _, _) => bail!("--preset cannot be combined with a custom board size"),
            _ => bail!("--width, --height and --mines must be given together"),
        }
    }
}

fn play(board: &mut Board, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    render::draw_board(out, board)?;
    render::draw_status(out, board)?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let updated = match command {
            Command::Reveal(coords) => board.reveal(coords).map(RevealOutcome::has_update),
            Command::Flag(coords) => board.toggle_flag(coords).map(MarkOutcome::has_update),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        };

        match updated {
            Ok(true) => {
                if let Some(coords) = board.triggered_mine() {
                    writeln!(out, "Boom! Mine at {coords:?}")?;
                }
                render::draw_board(out, board)?;
                render::draw_status(out, board)?;
            }
            Ok(false) => writeln!(out, "Nothing to do there")?,
            Err(err) => {
                log::warn!("Rejected {:?}: {}", command, err);
                let (size_x, size_y) = board.size();
                writeln!(out, "{err}, the board is {size_x}x{size_y}")?;
            }
        }

        if board.is_finished() {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.config()?;
    log::debug!("seed: {:?}", args.seed);
    let mut board = match args.seed {
        Some(seed) => Board::with_seed(config, seed)?,
        None => Board::with_config(config)?,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}")?;
    play(&mut board, stdin.lock(), &mut stdout)?;

    if board.is_won() {
        writeln!(stdout, "You win!")?;
    } else if board.phase().is_lost() {
        writeln!(stdout, "You lose!")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(board: &mut Board, input: &str) -> String {
        let mut out = Vec::new();
        play(board, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn custom_size_needs_all_dimensions() {
        let args = Args::parse_from(["sapper", "--width", "10"]);
        assert!(args.config().is_err());

        let args = Args::parse_from(["sapper", "--width", "10", "--height", "8", "--mines", "12"]);
        assert_eq!(args.config().unwrap(), GameConfig::new((10, 8), 12).unwrap());

        let args = Args::parse_from(["sapper", "-p", "expert"]);
        assert_eq!(args.config().unwrap(), GameConfig::expert());

        let args = Args::parse_from(["sapper"]);
        assert_eq!(args.config().unwrap(), GameConfig::classic());

        let args = Args::parse_from(["sapper", "-p", "beginner", "--mines", "3"]);
        assert!(args.config().is_err());
    }

    #[test]
    fn session_stops_after_loss() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(1, 0)]).unwrap();
        let mut board = Board::with_layout(layout).unwrap();

        let output = run(&mut board, "r 0 0\nf 2 0\nr 1 0\nr 2 0\n");

        assert!(output.contains("Boom!"));
        assert_eq!(board.phase(), Phase::Lost);
        assert_eq!(board.view_at((2, 0)).unwrap(), CellView::Misflagged);
    }

    #[test]
    fn bad_input_is_reported_and_ignored() {
        let mut board = Board::with_seed(GameConfig::beginner(), 1).unwrap();

        let output = run(&mut board, "r 9 9\nzap\nf 1\n");

        assert!(output.contains("Coordinates out of bounds, the board is 9x9"));
        assert!(output.contains("Unknown command"));
        assert!(output.contains("Expected two coordinates"));
        assert_eq!(board.phase(), Phase::NotStarted);
    }

    #[test]
    fn session_reports_win() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap();
        let mut board = Board::with_layout(layout).unwrap();

        let output = run(&mut board, "r 0 0\nr 0 0\nr 1 0\nr 0 1\nr 1 1\n");

        assert!(output.contains("Nothing to do there"));
        assert!(output.ends_with("game won\n"));
        assert!(board.is_won());
    }
}
