use rand::prelude::*;
use rand::rngs::SmallRng;
use web_time::{SystemTime, UNIX_EPOCH};

use super::*;

/// Uniform placement by rejection sampling: draw any cell, redraw on the excluded
/// cell or an existing mine.
///
/// Terminates because a validated difficulty always leaves a free cell besides the
/// excluded one, though the number of draws grows as the board fills up.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock, which is available both natively and in the browser.
    pub fn from_entropy() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_seed_u64(seed)
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, difficulty: Difficulty, exclude: Coord2) -> MineLayout {
        let (rows, cols) = difficulty.size();
        let mut layout = MineLayout::empty((rows, cols));

        // never loop forever on a board without room for the requested mines
        let mut free_cells = difficulty.total_cells();
        if in_bounds(exclude, (rows, cols)) {
            free_cells -= 1;
        }
        let target = if difficulty.mines > free_cells {
            log::warn!(
                "Requested {} mines but only {} cells are free",
                difficulty.mines,
                free_cells
            );
            free_cells
        } else {
            difficulty.mines
        };

        let mut draws: u32 = 0;
        while layout.mine_count() < target {
            let coords = (self.rng.random_range(0..rows), self.rng.random_range(0..cols));
            draws += 1;
            if coords == exclude {
                continue;
            }
            layout.set_mine(coords, true);
        }
        log::trace!("Placed {} mines in {} draws", target, draws);

        layout
    }
}
