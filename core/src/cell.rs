use serde::{Deserialize, Serialize};

/// What lies under a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Adjacent(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Adjacent(0))
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Adjacent(0)
    }
}

/// Full engine-side state of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.content.is_mine()
    }

    /// Unrevealed and unflagged.
    pub const fn is_hidden(&self) -> bool {
        !self.revealed && !self.flagged
    }
}

/// Player-visible state of one cell, content is only exposed once revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    Exploded,
}

impl CellView {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
