use crate::geometry::{MAX_SIZE, MIN_SIZE};

/// Everything the puzzle engine can reject when handed foreign data.
///
/// Broken invariants inside a live puzzle are not reported through this
/// type; they panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("puzzle size {size} is out of range ({min}..={max})", min = MIN_SIZE, max = MAX_SIZE)]
    SizeOutOfRange { size: usize },
    #[error("arrangement has {actual} slots, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
    #[error("arrangement has {count} empty slots, expected exactly one")]
    EmptyCount { count: usize },
    #[error("tile {id} appears more than once")]
    DuplicateTile { id: usize },
    #[error("tile {id} does not fit a grid of {slots} slots")]
    TileOutOfRange { id: usize, slots: usize },
    #[error("a {width}x{height} pixel buffer needs {expected} bytes, got {actual}")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("a {width}x{height} image is too small to cut into a {size}x{size} grid")]
    ImageTooSmall { width: u32, height: u32, size: usize },
}
