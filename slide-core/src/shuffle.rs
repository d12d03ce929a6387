use rand::Rng;
use rand::seq::IndexedRandom;

use crate::arrangement::Arrangement;
use crate::geometry::Grid;

/// Lower bound on the default walk length, so that 2x2 and 3x3 boards still
/// get a thorough mix.
pub const MIN_DEFAULT_MOVES: usize = 500;

/// Scrambles an arrangement with a random walk of legal moves.
///
/// Every step is a legal slide, so the result can always be solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shuffler {
    moves: usize,
}

impl Shuffler {
    pub fn new(moves: usize) -> Self {
        Shuffler { moves }
    }

    /// `(N²)²` moves, and never fewer than [`MIN_DEFAULT_MOVES`].
    pub fn for_grid(grid: Grid) -> Self {
        Shuffler::new(grid.slots().pow(2).max(MIN_DEFAULT_MOVES))
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn shuffle<R: Rng + ?Sized>(&self, arrangement: &mut Arrangement, rng: &mut R) {
        // slot the empty square just left; sliding that tile back would undo the step
        let mut previous: Option<usize> = None;
        for _ in 0..self.moves {
            let legal = arrangement.legal_moves();
            let candidates: Vec<usize> = legal
                .iter()
                .copied()
                .filter(|&m| Some(m) != previous)
                .collect();
            let pool = if candidates.is_empty() { &legal } else { &candidates };
            let Some(&pick) = pool.choose(rng) else {
                unreachable!("empty square without neighbours");
            };
            previous = arrangement.slide(pick);
        }
        log::debug!(
            "shuffled {}x{} grid with {} moves, {} tiles misplaced",
            arrangement.grid().size(),
            arrangement.grid().size(),
            self.moves,
            arrangement.misplaced()
        );
    }

    /// A freshly shuffled arrangement for `grid`.
    pub fn shuffled<R: Rng + ?Sized>(&self, grid: Grid, rng: &mut R) -> Arrangement {
        let mut arrangement = Arrangement::solved(grid);
        self.shuffle(&mut arrangement, rng);
        arrangement
    }
}
