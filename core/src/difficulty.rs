use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl Difficulty {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let difficulty = Self::new_unchecked(rows, cols, mines);
        difficulty.validate()?;
        Ok(difficulty)
    }

    /// Mine placement needs at least one free cell besides the first click.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Preset::default().difficulty()
    }
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        preset.difficulty()
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Preset>().map(Preset::difficulty)
    }
}

/// The fixed difficulty catalogue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Easy, Preset::Medium, Preset::Hard];

    pub const fn difficulty(self) -> Difficulty {
        match self {
            Self::Easy => Difficulty::new_unchecked(9, 9, 10),
            Self::Medium => Difficulty::new_unchecked(16, 16, 40),
            Self::Hard => Difficulty::new_unchecked(16, 30, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownPreset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn presets_match_catalogue() {
        assert_eq!(
            Preset::Easy.difficulty(),
            Difficulty::new(9, 9, 10).unwrap()
        );
        assert_eq!(
            Preset::Medium.difficulty(),
            Difficulty::new(16, 16, 40).unwrap()
        );
        assert_eq!(
            Preset::Hard.difficulty(),
            Difficulty::new(16, 30, 99).unwrap()
        );
    }

    #[test]
    fn every_preset_is_valid() {
        for preset in Preset::ALL {
            assert_eq!(preset.difficulty().validate(), Ok(()), "{preset}");
        }
    }

    #[test]
    fn rejects_full_board() {
        assert_eq!(Difficulty::new(2, 2, 4), Err(GameError::TooManyMines));
        assert_eq!(Difficulty::new(2, 2, 5), Err(GameError::TooManyMines));
        assert!(Difficulty::new(2, 2, 3).is_ok());
    }

    #[test]
    fn rejects_empty_board_and_no_mines() {
        assert_eq!(Difficulty::new(0, 5, 1), Err(GameError::InvalidSize));
        assert_eq!(Difficulty::new(5, 0, 1), Err(GameError::InvalidSize));
        assert_eq!(Difficulty::new(5, 5, 0), Err(GameError::NoMines));
    }

    #[test]
    fn parses_preset_names() {
        assert_eq!("easy".parse::<Preset>(), Ok(Preset::Easy));
        assert_eq!(" Medium ".parse::<Preset>(), Ok(Preset::Medium));
        assert_eq!("HARD".parse::<Preset>(), Ok(Preset::Hard));
        assert_eq!("expert".parse::<Preset>(), Err(GameError::UnknownPreset));
        assert_eq!(
            "hard".parse::<Difficulty>(),
            Ok(Difficulty::new_unchecked(16, 30, 99))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Preset::Medium).unwrap(),
            "\"medium\""
        );
        let difficulty: Difficulty =
            serde_json::from_str(r#"{"rows":16,"cols":30,"mines":99}"#).unwrap();
        assert_eq!(difficulty, Preset::Hard.difficulty());
    }

    #[test]
    fn safe_cells_excludes_mines() {
        assert_eq!(Preset::Easy.difficulty().safe_cells(), 71);
        assert_eq!(Preset::Hard.difficulty().total_cells(), 480);
    }
}
