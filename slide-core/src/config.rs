use serde::{Deserialize, Serialize};

use crate::Error;
use crate::geometry::Grid;
use crate::palette::GRID_COLOR;
use crate::shuffle::Shuffler;

/// Settings the host page may override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Tiles per side.
    pub size: usize,
    /// Length of the shuffling walk; derived from `size` when unset.
    pub shuffle_moves: Option<usize>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub grid_color: String,
    pub log_level: String,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            size: 3,
            shuffle_moves: None,
            canvas_width: 300,
            canvas_height: 300,
            grid_color: GRID_COLOR.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PuzzleConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn grid(&self) -> Result<Grid, Error> {
        Grid::new(self.size)
    }

    pub fn shuffler(&self, grid: Grid) -> Shuffler {
        match self.shuffle_moves {
            Some(moves) => Shuffler::new(moves),
            None => Shuffler::for_grid(grid),
        }
    }

    /// Unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Replace an unusable size with the default one, logging what happened.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.grid() {
            let fallback = PuzzleConfig::default().size;
            log::warn!("{e}, using {fallback}");
            self.size = fallback;
        }
        self
    }
}
