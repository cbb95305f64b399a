use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Chooses where the mines go once the first cell to reveal is known.
pub trait MineGenerator {
    fn generate(self, config: GameConfig, start: Coord2) -> MineLayout;
}

/// Placement strategy a board holds until its first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    Random { seed: u64 },
    Fixed(MineLayout),
}

impl Placement {
    pub(crate) fn generate(self, config: GameConfig, start: Coord2) -> MineLayout {
        match self {
            Self::Random { seed } => RandomMineGenerator::new(seed).generate(config, start),
            Self::Fixed(layout) => FixedMineGenerator::new(layout).generate(config, start),
        }
    }
}
