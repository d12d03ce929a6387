use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::geometry::Grid;

/// Identity of a tile: the slot it occupies when the picture is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(usize);

impl TileId {
    pub fn new(id: usize) -> Self {
        TileId(id)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Content of one grid slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<TileId>", into = "Option<TileId>")]
pub enum Slot {
    Tile(TileId),
    Empty,
}

impl Slot {
    pub fn tile(self) -> Option<TileId> {
        match self {
            Slot::Tile(id) => Some(id),
            Slot::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Slot::Empty
    }
}

impl From<Option<TileId>> for Slot {
    fn from(v: Option<TileId>) -> Self {
        v.map_or(Slot::Empty, Slot::Tile)
    }
}

impl From<Slot> for Option<TileId> {
    fn from(s: Slot) -> Self {
        s.tile()
    }
}

/// Placement of every tile on the grid.
///
/// Holds exactly one [`Slot::Empty`] and every [`TileId`] below `N² - 1`
/// exactly once. Constructors check this; mutations preserve it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrangement {
    grid: Grid,
    slots: Vec<Slot>,
}

impl Arrangement {
    /// Tile `i` in slot `i`, the empty slot last.
    pub fn solved(grid: Grid) -> Self {
        let last = grid.slots() - 1;
        let slots = (0..grid.slots())
            .map(|i| {
                if i == last {
                    Slot::Empty
                } else {
                    Slot::Tile(TileId(i))
                }
            })
            .collect();
        Arrangement { grid, slots }
    }

    pub fn from_slots(grid: Grid, slots: Vec<Slot>) -> Result<Self, Error> {
        let expected = grid.slots();
        if slots.len() != expected {
            return Err(Error::WrongLength {
                expected,
                actual: slots.len(),
            });
        }
        let empties = slots.iter().filter(|s| s.is_empty()).count();
        if empties != 1 {
            return Err(Error::EmptyCount { count: empties });
        }
        let mut seen = vec![false; expected - 1];
        for id in slots.iter().filter_map(|s| s.tile()) {
            let i = id.index();
            if i >= seen.len() {
                return Err(Error::TileOutOfRange { id: i, slots: expected });
            }
            if seen[i] {
                return Err(Error::DuplicateTile { id: i });
            }
            seen[i] = true;
        }
        Ok(Arrangement { grid, slots })
    }

    /// Build from `None`-for-empty tile numbers.
    pub fn from_ids(grid: Grid, ids: &[Option<usize>]) -> Result<Self, Error> {
        let slots = ids.iter().map(|v| Slot::from(v.map(TileId))).collect();
        Self::from_slots(grid, slots)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Slot {
        self.slots[index]
    }

    /// Slot index currently holding the empty square.
    pub fn empty_index(&self) -> usize {
        match self.slots.iter().position(|s| s.is_empty()) {
            Some(i) => i,
            None => panic!("arrangement lost its empty slot: {:?}", self.slots),
        }
    }

    /// Slots whose tile may slide into the empty square.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.grid.neighbors(self.empty_index())
    }

    pub fn is_legal(&self, index: usize) -> bool {
        index < self.slots.len() && self.legal_moves().contains(&index)
    }

    /// Swap the tile at `index` with the empty square if that is a legal move.
    /// Returns the slot the empty square left.
    pub fn slide(&mut self, index: usize) -> Option<usize> {
        if !self.is_legal(index) {
            return None;
        }
        let from = self.empty_index();
        self.slots.swap(from, index);
        Some(from)
    }

    /// Every tile sits in its home slot. The empty square may be anywhere.
    pub fn is_solved(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, s)| s.tile().is_none_or(|id| id.index() == i))
    }

    /// Number of tiles outside their home slot.
    pub fn misplaced(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, s)| s.tile().is_some_and(|id| id.index() != *i))
            .count()
    }

    pub fn to_ids(&self) -> Vec<Option<usize>> {
        self.slots.iter().map(|s| s.tile().map(TileId::index)).collect()
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.grid.size();
        for row in self.slots.chunks(n) {
            for (x, s) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                match s {
                    Slot::Tile(id) => write!(f, "{:>2}", id.index())?,
                    Slot::Empty => f.write_str(" .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
