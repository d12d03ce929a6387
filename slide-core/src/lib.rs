//! Sliding-tile picture puzzle engine.
//!
//! Everything in here is plain data and synchronous functions; the browser
//! side (canvas drawing, DOM events, timers) lives in `slide-wasm`.

pub mod arrangement;
pub mod config;
mod error;
pub mod geometry;
pub mod palette;
pub mod puzzle;
pub mod shuffle;
pub mod slicer;
pub mod stage;
pub mod stopwatch;
pub mod viewport;

pub use arrangement::{Arrangement, Slot, TileId};
pub use config::PuzzleConfig;
pub use error::Error;
pub use geometry::{CanvasSize, Grid};
pub use puzzle::{ClickOutcome, Puzzle, Snapshot, Status};
pub use shuffle::Shuffler;
pub use slicer::{PixelBuffer, TileSet, slice};
pub use stage::Stage;
pub use stopwatch::Stopwatch;
pub use viewport::{CropRect, Viewport};
