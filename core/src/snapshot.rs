use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to redraw after a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub status: GameStatus,
    pub elapsed_secs: u32,
    pub mine_count: CellCount,
    pub flag_count: CellCount,
    pub mines_left: isize,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_engine<G: MineGenerator>(engine: &Engine<G>) -> Self {
        let size = engine.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            engine
                .cell_view_at((row as Coord, col as Coord))
                .unwrap_or_default()
        });

        Self {
            size,
            status: engine.status(),
            elapsed_secs: engine.elapsed_secs(),
            mine_count: engine.mine_count(),
            flag_count: engine.flag_count(),
            mines_left: engine.mines_left(),
            cells,
        }
    }

    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }
}
