//! Core automaton logic: species, grids, randomness and the step kernel.
//!
//! Nothing in here knows about ownership between contexts or frame pacing.
//! The engine wraps these pieces with the interop protocol.

pub mod buffers;
pub mod field;
pub mod grid;
pub mod species;
pub mod stepping;

pub use buffers::{BufferId, DoubleBuffer};
pub use field::RandomField;
pub use grid::Grid;
pub use species::{Species, EMPTY};
pub use stepping::step_into;
