//! RPS Automata - rock-paper-scissors cellular automaton
//!
//! A toroidal grid of three cyclically dominant species, stepped in parallel
//! on a compute pool and handed back to a graphics context once per frame.
//! The library exposes a Rust API (`Session`, `FrameScheduler`) and a C ABI
//! (`ffi`) for hosts that own the window.

pub mod automaton;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod input;
pub mod interop;
pub mod scheduler;
pub mod state;
pub mod viewport;

pub use automaton::{Grid, Species, EMPTY};
pub use config::Config;
pub use device::{ComputeDevice, ThreadPoolDevice};
pub use engine::Engine;
pub use error::{ConfigError, DispatchError, EngineError, InitError, InteropError};
pub use scheduler::{EventSource, FrameScheduler, NoInput, Renderer};
pub use state::Session;
