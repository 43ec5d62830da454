use alloc::collections::VecDeque;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No reveal yet, mines are not placed
    #[default]
    Pending,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game session: owns the board and applies player commands.
///
/// Invalid commands (out of range, on a finished game, on a flagged or revealed
/// cell) are no-ops reported through the returned outcome.
#[derive(Clone, Debug)]
pub struct Engine<G = RandomMineGenerator> {
    generator: G,
    difficulty: Difficulty,
    board: Array2<Cell>,
    status: GameStatus,
    elapsed_secs: u32,
    mines_armed: bool,
    mine_count: CellCount,
    safe_cells: CellCount,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

impl Engine {
    pub fn new(difficulty: Difficulty) -> Result<Self> {
        Self::with_generator(difficulty, RandomMineGenerator::from_entropy())
    }
}

impl<G: MineGenerator> Engine<G> {
    pub fn with_generator(difficulty: Difficulty, generator: G) -> Result<Self> {
        difficulty.validate()?;
        Ok(Self {
            generator,
            difficulty,
            board: Array2::default(difficulty.size().to_nd_index()),
            status: GameStatus::Pending,
            elapsed_secs: 0,
            mines_armed: false,
            mine_count: difficulty.mines,
            safe_cells: difficulty.safe_cells(),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            triggered_mine: None,
        })
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// An invalid difficulty is rejected before anything changes.
    pub fn reset(&mut self, difficulty: Difficulty) -> Result<()> {
        difficulty.validate()?;
        log::debug!(
            "Reset to {}x{} with {} mines",
            difficulty.rows,
            difficulty.cols,
            difficulty.mines
        );
        self.difficulty = difficulty;
        self.board = Array2::default(difficulty.size().to_nd_index());
        self.status = GameStatus::Pending;
        self.elapsed_secs = 0;
        self.mines_armed = false;
        self.mine_count = difficulty.mines;
        self.safe_cells = difficulty.safe_cells();
        self.revealed_count = Saturating(0);
        self.flagged_count = Saturating(0);
        self.triggered_mine = None;
        Ok(())
    }

    /// Starts over with the current difficulty.
    pub fn restart(&mut self) {
        let difficulty = self.difficulty;
        // the current difficulty was validated when it was set
        if let Err(err) = self.reset(difficulty) {
            log::warn!("Restart failed: {}", err);
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// The caller's once-per-second trigger should only be scheduled while this holds.
    pub fn timer_running(&self) -> bool {
        matches!(self.status, GameStatus::InProgress)
    }

    pub fn mines_armed(&self) -> bool {
        self.mines_armed
    }

    /// Mines on the board once armed, the requested count before that.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count() as isize) - (self.flag_count() as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.in_bounds(coords).then(|| self.board[coords.to_nd_index()])
    }

    /// What the player should see at `coords`.
    pub fn cell_view_at(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.cell_at(coords)?;
        Some(match (cell.revealed, cell.content) {
            (true, CellContent::Mine) if self.triggered_mine == Some(coords) => CellView::Exploded,
            (true, CellContent::Mine) => CellView::Mine,
            (true, CellContent::Adjacent(count)) => CellView::Revealed(count),
            (false, _) if cell.flagged => CellView::Flagged,
            (false, _) => CellView::Hidden,
        })
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn tick(&mut self) -> bool {
        if !self.timer_running() {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.in_bounds(coords) {
            log::warn!("Ignoring flag outside the board at {:?}", coords);
            return FlagOutcome::NoChange;
        }
        if self.status.is_finished() {
            log::debug!("Ignoring flag at {:?} on finished game", coords);
            return FlagOutcome::NoChange;
        }

        let cell = &mut self.board[coords.to_nd_index()];
        if cell.revealed {
            return FlagOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            FlagOutcome::Unflagged
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.in_bounds(coords) {
            log::warn!("Ignoring reveal outside the board at {:?}", coords);
            return RevealOutcome::NoChange;
        }
        if self.status.is_finished() {
            log::debug!("Ignoring reveal at {:?} on finished game", coords);
            return RevealOutcome::NoChange;
        }
        if self.board[coords.to_nd_index()].flagged {
            return RevealOutcome::NoChange;
        }

        if self.status.is_pending() {
            self.place_mines(coords);
            self.status = GameStatus::InProgress;
            log::debug!("Game started at {:?}", coords);
        }

        if self.board[coords.to_nd_index()].revealed {
            return RevealOutcome::NoChange;
        }

        if self.board[coords.to_nd_index()].is_mine() {
            self.board[coords.to_nd_index()].revealed = true;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(coords);

        if self.revealed_count.0 >= self.safe_cells {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn place_mines(&mut self, exclude: Coord2) {
        let mut layout = self.generator.generate(self.difficulty, exclude);

        if layout.size() != self.difficulty.size() {
            log::warn!(
                "Generator returned a {:?} board for {:?}, using no mines",
                layout.size(),
                self.difficulty.size()
            );
            layout = MineLayout::empty(self.difficulty.size());
        }
        if layout.set_mine(exclude, false) {
            match layout.first_free_cell(exclude) {
                Some(free) => {
                    layout.set_mine(free, true);
                    log::warn!(
                        "Generator placed a mine under the first reveal at {:?}, moved to {:?}",
                        exclude,
                        free
                    );
                }
                None => {
                    log::warn!("Dropped mine under the first reveal at {:?}", exclude);
                }
            }
        }
        if layout.mine_count() != self.difficulty.mines {
            log::warn!(
                "Generated mine count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                self.difficulty.mines
            );
        }

        let contents = layout.contents();
        for (cell, &content) in self.board.iter_mut().zip(contents.iter()) {
            cell.content = content;
        }
        self.mine_count = layout.mine_count();
        self.safe_cells = layout.safe_cell_count();
        self.mines_armed = true;
        log::debug!("Armed {} mines", layout.mine_count());
    }

    /// Reveals a safe cell and, if it has no adjacent mines, the zero region around it.
    fn flood_reveal(&mut self, origin: Coord2) {
        let bounds = self.size();
        let mut to_visit = VecDeque::from([origin]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.board[coords.to_nd_index()];
            // queued twice, or flagged neighbours which block propagation
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            cell.revealed = true;
            self.revealed_count += 1;
            log::trace!("Revealed {:?} ({:?})", coords, cell.content);

            if cell.content.is_zero() {
                to_visit.extend(
                    NeighborIter::new(coords, bounds)
                        .filter(|&pos| self.board[pos.to_nd_index()].is_hidden()),
                );
            }
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!(
            "Game {} after {}s",
            if won { "won" } else { "lost" },
            self.elapsed_secs
        );

        // final sweep ignores flags: every mine on a loss, every safe cell on a win
        for cell in self.board.iter_mut() {
            let swept = if won { !cell.is_mine() } else { cell.is_mine() };
            if !swept || cell.revealed {
                continue;
            }
            cell.revealed = true;
            if won {
                self.revealed_count += 1;
            }
        }
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }
}
