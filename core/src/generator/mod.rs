use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout of a game once the first cell to open is known.
///
/// Implementations must place `difficulty.mines` mines and keep `exclude` free,
/// the engine repairs and logs layouts that break either rule.
pub trait MineGenerator {
    fn generate(&mut self, difficulty: Difficulty, exclude: Coord2) -> MineLayout;
}

/// Generator that always yields the same predetermined mines.
///
/// Coordinates outside the board are dropped with a warning.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, difficulty: Difficulty, _exclude: Coord2) -> MineLayout {
        let size = difficulty.size();
        let mut layout = MineLayout::empty(size);
        for &coords in &self.mines {
            if in_bounds(coords, size) {
                layout.set_mine(coords, true);
            } else {
                log::warn!("Dropping fixed mine at {:?}, board is {:?}", coords, size);
            }
        }
        layout
    }
}
