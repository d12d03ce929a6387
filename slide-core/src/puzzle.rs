use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arrangement::Arrangement;
use crate::geometry::{CanvasSize, Grid};
use crate::shuffle::Shuffler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Solved,
}

/// What a click did to the board. Anything but `Ignored` needs a redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    /// The tile in slot `from` slid into the empty slot `to`.
    Moved { from: usize, to: usize },
    /// Like `Moved`, and this move completed the picture.
    Solved { from: usize, to: usize },
}

impl ClickOutcome {
    pub fn changed(self) -> bool {
        self != ClickOutcome::Ignored
    }
}

/// Read-only view of a puzzle for the host page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    pub slots: Vec<Option<usize>>,
    pub solved: bool,
    pub moves: u32,
}

/// The sliding puzzle: owns the arrangement and is the only thing that
/// changes it.
#[derive(Clone, Debug)]
pub struct Puzzle {
    shuffler: Shuffler,
    arrangement: Arrangement,
    status: Status,
    moves: u32,
}

impl Puzzle {
    /// A freshly shuffled puzzle.
    pub fn new<R: Rng + ?Sized>(grid: Grid, shuffler: Shuffler, rng: &mut R) -> Self {
        Puzzle::from_arrangement(shuffler.shuffled(grid, rng), shuffler)
    }

    /// Start from a given arrangement. The puzzle is active even if the
    /// arrangement happens to be solved; it only becomes solved by a move.
    pub fn from_arrangement(arrangement: Arrangement, shuffler: Shuffler) -> Self {
        Puzzle {
            shuffler,
            arrangement,
            status: Status::Active,
            moves: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.arrangement.grid()
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status == Status::Solved
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.arrangement.legal_moves()
    }

    /// Handle a click at (`px`, `py`) on a canvas of the given size.
    pub fn apply_click(&mut self, px: f64, py: f64, canvas: CanvasSize) -> ClickOutcome {
        let index = self.grid().pointer_to_index(px, py, canvas);
        self.slide(index)
    }

    /// Slide the tile at `index` into the empty slot if it is next to it.
    pub fn slide(&mut self, index: usize) -> ClickOutcome {
        if self.is_solved() {
            return ClickOutcome::Ignored;
        }
        let Some(to) = self.arrangement.slide(index) else {
            return ClickOutcome::Ignored;
        };
        self.moves += 1;
        if self.check_solved() {
            ClickOutcome::Solved { from: index, to }
        } else {
            ClickOutcome::Moved { from: index, to }
        }
    }

    /// Move to `Solved` once the picture is complete. Idempotent.
    pub fn check_solved(&mut self) -> bool {
        if self.status == Status::Active && self.arrangement.is_solved() {
            self.status = Status::Solved;
            log::info!("puzzle solved in {} moves", self.moves);
        }
        self.is_solved()
    }

    /// Start over with a new shuffle of the same grid.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.arrangement = self.shuffler.shuffled(self.grid(), rng);
        self.status = Status::Active;
        self.moves = 0;
        log::info!("reshuffled {}x{} puzzle", self.grid().size(), self.grid().size());
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.grid().size(),
            slots: self.arrangement.to_ids(),
            solved: self.is_solved(),
            moves: self.moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn grid(n: usize) -> Grid {
        Grid::new(n).unwrap()
    }

    fn solved_puzzle(n: usize) -> Puzzle {
        Puzzle::from_arrangement(Arrangement::solved(grid(n)), Shuffler::for_grid(grid(n)))
    }

    fn canvas() -> CanvasSize {
        CanvasSize::from((300.0, 300.0))
    }

    /// Center of slot `index` on a 300x300 canvas with a 3x3 grid.
    fn center(index: usize) -> (f64, f64) {
        let (x, y) = grid(3).index_to_xy(index);
        (x as f64 * 100.0 + 50.0, y as f64 * 100.0 + 50.0)
    }

    #[test]
    fn starts_active() {
        let p = solved_puzzle(3);
        assert_eq!(p.status(), Status::Active);
        assert_eq!(p.moves(), 0);

        let mut rng = SmallRng::seed_from_u64(5);
        let p = Puzzle::new(grid(3), Shuffler::for_grid(grid(3)), &mut rng);
        assert_eq!(p.status(), Status::Active);
    }

    #[test]
    fn click_on_non_adjacent_tile_is_ignored() {
        let mut p = solved_puzzle(3);
        let before = p.arrangement().clone();
        for i in [0, 1, 2, 3, 4, 6] {
            let (x, y) = center(i);
            assert_eq!(p.apply_click(x, y, canvas()), ClickOutcome::Ignored);
        }
        // clicking the empty slot itself
        let (x, y) = center(8);
        assert_eq!(p.apply_click(x, y, canvas()), ClickOutcome::Ignored);
        assert_eq!(p.arrangement(), &before);
        assert_eq!(p.moves(), 0);
    }

    #[test]
    fn legal_click_swaps_exactly_two_slots() {
        let mut p = solved_puzzle(3);
        let before = p.arrangement().clone();
        let (x, y) = center(5);
        assert_eq!(p.apply_click(x, y, canvas()), ClickOutcome::Moved { from: 5, to: 8 });
        let after = p.arrangement();
        assert_eq!(after.get(8), before.get(5));
        assert!(after.get(5).is_empty());
        for i in (0..9).filter(|i| *i != 5 && *i != 8) {
            assert_eq!(after.get(i), before.get(i));
        }
        assert_eq!(p.moves(), 1);
        assert!(!p.check_solved());
    }

    #[test]
    fn move_back_solves_and_freezes() {
        let mut p = solved_puzzle(3);
        assert!(p.slide(7).changed());
        assert_eq!(p.slide(8), ClickOutcome::Solved { from: 8, to: 7 });
        assert_eq!(p.status(), Status::Solved);
        assert_eq!(p.moves(), 2);

        let before = p.arrangement().clone();
        assert_eq!(p.slide(5), ClickOutcome::Ignored);
        assert_eq!(p.arrangement(), &before);
        // re-checking while solved changes nothing
        assert!(p.check_solved());
        assert_eq!(p.status(), Status::Solved);
    }

    #[test]
    fn reshuffle_returns_to_active() {
        let mut p = solved_puzzle(2);
        p.slide(2);
        p.slide(3);
        assert!(p.is_solved());

        let mut rng = SmallRng::seed_from_u64(11);
        p.reshuffle(&mut rng);
        assert_eq!(p.status(), Status::Active);
        assert_eq!(p.moves(), 0);
        assert!(Arrangement::from_slots(grid(2), p.arrangement().slots().to_vec()).is_ok());
    }

    #[test]
    fn snapshot_serializes_empty_as_null() {
        let p = solved_puzzle(2);
        let json = serde_json::to_string(&p.snapshot()).unwrap();
        assert_eq!(json, r#"{"size":2,"slots":[0,1,2,null],"solved":false,"moves":0}"#);
    }
}
