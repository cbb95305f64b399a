use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Coarse game state. A won game stays `InProgress`, see [`Board::is_won`].
///
/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No cell revealed yet, mines not placed
    #[default]
    NotStarted,
    InProgress,
    Lost,
}

impl Phase {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }
}

/// A minesweeper grid with lazily placed mines.
///
/// Mines are placed on the first [`reveal`](Board::reveal), keeping the 3x3 neighborhood of that cell free when the
/// placement is random. Coordinates are `(x, y)` with `x < width` and `y < height`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    placement: Option<Placement>,
    phase: Phase,
    flagged_count: CellCount,
    revealed_safe_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Random board seeded from the thread RNG.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        Self::with_config(GameConfig::new((width, height), mine_count)?)
    }

    pub fn with_config(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        log::debug!(
            "New {}x{} board with {} mines, seed: {}",
            config.size.0,
            config.size.1,
            config.mines,
            seed
        );
        Ok(Self::from_parts(config, Placement::Random { seed }))
    }

    /// Board whose mines will be exactly `layout`, no exclusion zone is applied.
    pub fn with_layout(layout: MineLayout) -> Result<Self> {
        if layout.mine_count() == 0 {
            return Err(GameError::InvalidConfiguration("at least one mine is required"));
        }
        if layout.mine_count() >= layout.total_cells() {
            return Err(GameError::InvalidConfiguration("too many mines for the board"));
        }
        let config = layout.game_config();
        Ok(Self::from_parts(config, Placement::Fixed(layout)))
    }

    fn from_parts(config: GameConfig, placement: Placement) -> Self {
        Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            placement: Some(placement),
            phase: Phase::default(),
            flagged_count: 0,
            revealed_safe_count: 0,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How many flags can still be placed.
    pub fn flags_remaining(&self) -> CellCount {
        self.config.mines - self.flagged_count
    }

    /// Safe cells the player has revealed, wrong flags uncovered by a loss are not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    /// Safe cells the player still has to reveal, based on [`revealed_count`](Board::revealed_count).
    pub fn safe_cells_left(&self) -> CellCount {
        self.config.safe_cells() - self.revealed_safe_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Every safe cell is revealed and no mine went off.
    pub fn is_won(&self) -> bool {
        matches!(self.phase, Phase::InProgress)
            && self.revealed_safe_count == self.config.safe_cells()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_lost() || self.is_won()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (size_x, size_y) = self.config.size;
        if coords.0 < size_x && coords.1 < size_y {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        self.cell(coords).map(Cell::view)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        let (size_x, size_y) = self.config.size;
        (0..size_y).flat_map(move |y| {
            (0..size_x).map(move |x| ((x, y), &self.cells[(x, y).to_nd_index()]))
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;

        if self.cells[coords.to_nd_index()].flagged {
            return Ok(NoChange);
        }
        if self.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game is over", coords);
            return Ok(NoChange);
        }
        if let Some(placement) = self.placement.take() {
            let layout = self.place_mines(placement, coords);
            self.compute_adjacent_counts(&layout);
            self.phase = Phase::InProgress;
            log::debug!("Game started at {:?}", coords);
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.revealed {
            return Ok(NoChange);
        }
        if cell.is_mine {
            self.explode(coords);
            return Ok(HitMine);
        }

        self.reveal_safe_cell(coords);
        if cell.adjacent_mines == 0 {
            self.flood_reveal(coords);
        }

        if self.is_won() {
            log::debug!("All {} safe cells revealed, game won", self.config.safe_cells());
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        let flags_remaining = self.flags_remaining();
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match (cell.revealed, cell.flagged) {
            (true, _) => NoChange,
            (false, true) => {
                cell.flagged = false;
                self.flagged_count -= 1;
                Changed
            }
            (false, false) if flags_remaining > 0 => {
                cell.flagged = true;
                self.flagged_count += 1;
                Changed
            }
            (false, false) => {
                log::debug!("No flags left for {:?}", coords);
                NoChange
            }
        })
    }

    fn place_mines(&mut self, placement: Placement, exclude: Coord2) -> MineLayout {
        let layout = placement.generate(self.config, exclude);
        for coords in layout.iter_mines() {
            self.cells[coords.to_nd_index()].is_mine = true;
        }
        layout
    }

    fn compute_adjacent_counts(&mut self, layout: &MineLayout) {
        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            if !cell.is_mine {
                cell.adjacent_mines = layout.adjacent_mine_count((x as Coord, y as Coord));
            }
        }
    }

    fn reveal_safe_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.revealed = true;
        self.revealed_safe_count += 1;
        log::trace!("Revealed {:?}, adjacent mines: {}", coords, cell.adjacent_mines);
    }

    /// Opens the zero-count region around `origin` and its border, flags are left alone.
    fn flood_reveal(&mut self, origin: Coord2) {
        let mut to_visit = vec![origin];

        while let Some(center) = to_visit.pop() {
            for pos in self.iter_neighbors(center) {
                let cell = self.cells[pos.to_nd_index()];
                if cell.is_mine || cell.revealed || cell.flagged {
                    continue;
                }
                self.reveal_safe_cell(pos);
                if cell.adjacent_mines == 0 {
                    to_visit.push(pos);
                }
            }
        }
    }

    /// Ends the game and uncovers every unflagged mine and every wrong flag.
    fn explode(&mut self, coords: Coord2) {
        log::debug!("Mine hit at {:?}, game lost", coords);
        let triggered = &mut self.cells[coords.to_nd_index()];
        triggered.exploded = true;
        triggered.revealed = true;
        self.triggered_mine = Some(coords);
        self.phase = Phase::Lost;

        for cell in self.cells.iter_mut() {
            match (cell.is_mine, cell.flagged) {
                (true, false) => cell.revealed = true,
                (false, true) => {
                    cell.revealed = true;
                    cell.misflagged = true;
                }
                _ => {}
            }
        }
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.size)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (size_x, size_y) = self.config.size;
        for y in 0..size_y {
            for x in 0..size_x {
                write!(f, "{}", self.cells[(x, y).to_nd_index()].view())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
