use serde::{Deserialize, Serialize};

use crate::Error;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 9;

/// Size of the canvas the pointer coordinates are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl From<(f64, f64)> for CanvasSize {
    fn from(v: (f64, f64)) -> Self {
        CanvasSize {
            width: v.0,
            height: v.1,
        }
    }
}

/// Square N×N grid of slots, indexed row-major from the top left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, Error> {
        if (MIN_SIZE..=MAX_SIZE).contains(&size) {
            Ok(Grid { size })
        } else {
            Err(Error::SizeOutOfRange { size })
        }
    }

    /// Tiles per row (and per column).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of slots, including the empty one.
    pub fn slots(&self) -> usize {
        self.size * self.size
    }

    pub fn index_to_xy(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.slots(), "slot {index} outside the grid");
        (index % self.size, index / self.size)
    }

    pub fn xy_to_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size, "({x}, {y}) outside the grid");
        y * self.size + x
    }

    /// Orthogonally adjacent slots, in left, up, right, down order.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let (x, y) = self.index_to_xy(index);
        let mut out = Vec::with_capacity(4);
        if x > 0 {
            out.push(self.xy_to_index(x - 1, y));
        }
        if y > 0 {
            out.push(self.xy_to_index(x, y - 1));
        }
        if x + 1 < self.size {
            out.push(self.xy_to_index(x + 1, y));
        }
        if y + 1 < self.size {
            out.push(self.xy_to_index(x, y + 1));
        }
        out
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Map a pointer position on the canvas to the slot under it.
    ///
    /// Positions outside the canvas (or NaN) are clamped to the nearest slot.
    pub fn pointer_to_index(&self, px: f64, py: f64, canvas: CanvasSize) -> usize {
        let x = self.axis_cell(px, canvas.width);
        let y = self.axis_cell(py, canvas.height);
        self.xy_to_index(x, y)
    }

    fn axis_cell(&self, pos: f64, extent: f64) -> usize {
        let cell = extent / self.size as f64;
        // `as` saturates: negatives and NaN land on 0, infinities on usize::MAX
        let i = (pos / cell).floor().max(0.0) as usize;
        i.min(self.size - 1)
    }
}

impl TryFrom<usize> for Grid {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Grid::new(size)
    }
}

impl From<Grid> for usize {
    fn from(grid: Grid) -> usize {
        grid.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid(n: usize) -> Grid {
        Grid::new(n).unwrap()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(10)]
    fn rejects_sizes_out_of_range(#[case] n: usize) {
        assert_eq!(Grid::new(n), Err(Error::SizeOutOfRange { size: n }));
    }

    #[test]
    fn index_and_xy_are_inverse() {
        let g = grid(4);
        for i in 0..g.slots() {
            let (x, y) = g.index_to_xy(i);
            assert_eq!(g.xy_to_index(x, y), i);
        }
        assert_eq!(g.index_to_xy(7), (3, 1));
        assert_eq!(g.xy_to_index(1, 2), 9);
    }

    #[rstest]
    #[case(3, 8, vec![7, 5])]
    #[case(3, 0, vec![1, 3])]
    #[case(3, 4, vec![3, 1, 5, 7])]
    #[case(3, 5, vec![4, 2, 8])]
    #[case(2, 1, vec![0, 3])]
    #[case(4, 13, vec![12, 9, 14])]
    fn neighbors_stay_inside(#[case] n: usize, #[case] index: usize, #[case] expected: Vec<usize>) {
        assert_eq!(grid(n).neighbors(index), expected);
    }

    #[test]
    fn no_wraparound_between_rows() {
        let g = grid(3);
        assert!(!g.are_adjacent(2, 3));
        assert!(!g.are_adjacent(5, 6));
        assert!(g.are_adjacent(3, 6));
    }

    #[rstest]
    #[case(150.0, 150.0, 4)]
    #[case(0.0, 0.0, 0)]
    #[case(299.9, 299.9, 8)]
    #[case(99.9, 100.0, 3)]
    #[case(250.0, 10.0, 2)]
    fn pointer_maps_to_slot(#[case] px: f64, #[case] py: f64, #[case] expected: usize) {
        let canvas = CanvasSize::from((300.0, 300.0));
        assert_eq!(grid(3).pointer_to_index(px, py, canvas), expected);
    }

    #[test]
    fn pointer_handles_non_square_canvas() {
        let canvas = CanvasSize::from((400.0, 200.0));
        // columns are 100px wide, rows 50px high
        assert_eq!(grid(4).pointer_to_index(310.0, 60.0, canvas), 7);
    }

    #[rstest]
    #[case(-5.0, -5.0, 0)]
    #[case(300.0, 300.0, 8)]
    #[case(1e9, 0.0, 2)]
    #[case(f64::NAN, f64::NAN, 0)]
    #[case(f64::INFINITY, f64::NEG_INFINITY, 2)]
    fn pointer_clamps_out_of_range(#[case] px: f64, #[case] py: f64, #[case] expected: usize) {
        let canvas = CanvasSize::from((300.0, 300.0));
        assert_eq!(grid(3).pointer_to_index(px, py, canvas), expected);
    }

    #[test]
    fn pointer_on_zero_sized_canvas_does_not_panic() {
        let idx = grid(3).pointer_to_index(10.0, 10.0, CanvasSize::default());
        assert!(idx < 9);
    }

    #[test]
    fn grid_deserializes_through_validation() {
        let g: Grid = serde_json::from_str("4").unwrap();
        assert_eq!(g.size(), 4);
        assert!(serde_json::from_str::<Grid>("12").is_err());
    }
}
