use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Draws allowed per board cell before rejection sampling gives up and shuffles the remaining candidates.
pub const MAX_REJECTIONS_PER_CELL: u32 = 16;

/// Uniformly random placement that never puts a mine on or next to the first revealed cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig, start: Coord2) -> MineLayout {
        let (size_x, _) = config.size;
        let total_cells = config.total_cells();
        let to_coords = |index: CellCount| {
            let width = CellCount::from(size_x);
            ((index % width) as Coord, (index / width) as Coord)
        };
        let is_eligible = |mines: &Array2<bool>, coords: Coord2| {
            !mines[coords.to_nd_index()] && !is_adjacent_or_same(coords, start)
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut draws_left = u32::from(total_cells) * MAX_REJECTIONS_PER_CELL;

        while mines_placed < config.mines && draws_left > 0 {
            draws_left -= 1;
            let coords = to_coords(rng.random_range(0..total_cells));
            if is_eligible(&mines, coords) {
                mines[coords.to_nd_index()] = true;
                mines_placed += 1;
            }
        }

        if mines_placed < config.mines {
            log::warn!(
                "Rejection budget exhausted with {} of {} mines placed, shuffling the rest",
                mines_placed,
                config.mines
            );
            let mut candidates: Vec<Coord2> = (0..total_cells)
                .map(to_coords)
                .filter(|&coords| is_eligible(&mines, coords))
                .collect();
            candidates.shuffle(&mut rng);
            for coords in candidates.into_iter().take(usize::from(config.mines - mines_placed)) {
                mines[coords.to_nd_index()] = true;
                mines_placed += 1;
            }
        }

        // double check mine count
        if mines_placed != config.mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                mines_placed,
                config.mines
            );
        }
        log::debug!(
            "Placed {} mines on a {}x{} board around {:?}",
            mines_placed,
            config.size.0,
            config.size.1,
            start
        );
        MineLayout::new_unchecked(mines, mines_placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_outside_exclusion_zone() {
        let config = GameConfig::classic();
        for seed in 0..20 {
            let layout = RandomMineGenerator::new(seed).generate(config, (12, 12));

            assert_eq!(layout.mine_count(), 100);
            assert_eq!(layout.iter_mines().count(), 100);
            assert!(layout.iter_mines().all(|pos| !is_adjacent_or_same(pos, (12, 12))));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::expert();
        let a = RandomMineGenerator::new(42).generate(config, (0, 0));
        let b = RandomMineGenerator::new(42).generate(config, (0, 0));

        assert_eq!(a, b);
    }

    #[test]
    fn fills_every_eligible_cell_on_dense_board() {
        // 5x5 with a centered zone leaves exactly 16 cells
        let config = GameConfig::new((5, 5), 16).unwrap();
        for seed in 0..10 {
            let layout = RandomMineGenerator::new(seed).generate(config, (2, 2));

            assert_eq!(layout.mine_count(), 16);
            for x in 0..5 {
                for y in 0..5 {
                    assert_eq!(layout.contains_mine((x, y)), !is_adjacent_or_same((x, y), (2, 2)));
                }
            }
        }
    }

    #[test]
    fn corner_start_clips_exclusion_zone() {
        // a centered click would leave 7 cells, the corner leaves 12
        let config = GameConfig::new((4, 4), 7).unwrap();
        let layout = RandomMineGenerator::new(7).generate(config, (0, 0));

        assert_eq!(layout.mine_count(), 7);
        assert!(!layout.contains_mine((0, 0)));
        assert!(!layout.contains_mine((1, 0)));
        assert!(!layout.contains_mine((0, 1)));
        assert!(!layout.contains_mine((1, 1)));
    }
}
