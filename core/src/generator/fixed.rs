use super::*;

/// Hands out a predetermined layout, for scripted games and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    layout: MineLayout,
}

impl FixedMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, config: GameConfig, start: Coord2) -> MineLayout {
        if self.layout.game_config() != config {
            log::warn!(
                "Fixed layout {:?} does not match requested config {:?}",
                self.layout.game_config(),
                config
            );
        }
        if self.layout.validate_coords(start).is_ok() && self.layout.contains_mine(start) {
            log::warn!("Fixed layout has a mine under the first reveal at {:?}", start);
        }
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_given_layout() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let config = layout.game_config();

        let generated = FixedMineGenerator::new(layout.clone()).generate(config, (1, 1));

        assert_eq!(generated, layout);
    }
}
