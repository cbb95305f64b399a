use std::str::FromStr;

use sapper_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command, type ? for help")]
    Empty,
    #[error("Unknown command {0:?}, type ? for help")]
    Unknown(String),
    #[error("Expected two coordinates, e.g. `{0} 3 4`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
}

pub(crate) const HELP: &str = "\
commands:
  r X Y   reveal the cell at column X, row Y
  f X Y   toggle a flag on the cell at column X, row Y
  ?       show this help
  q       quit";

fn parse_coords<'a>(
    name: &'static str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let arg = args.next().ok_or(CommandError::MissingCoords(name))?;
        arg.parse::<Coord>()
            .map_err(|_| CommandError::InvalidCoord(arg.to_string()))
    };
    let x = next()?;
    let y = next()?;
    Ok((x, y))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => parse_coords("r", words).map(Command::Reveal),
            "f" | "flag" => parse_coords("f", words).map(Command::Flag),
            "?" | "h" | "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  F 0 12 ".parse::<Command>(), Ok(Command::Flag((0, 12))));
        assert_eq!("reveal 1 1".parse::<Command>(), Ok(Command::Reveal((1, 1))));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("r 3".parse::<Command>(), Err(CommandError::MissingCoords("r")));
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(CommandError::InvalidCoord("-1".to_string()))
        );
        assert_eq!(
            "dig 1 2".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_string()))
        );
    }
}
