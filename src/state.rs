//! Session state and input dispatch.
//!
//! A `Session` is the single context object of a run: the engine, the selected
//! tool, the pause and exit flags, pointer and viewport state, and the frame
//! counter. Input events are dispatched into it one at a time from the frame
//! loop; each handler runs to completion before the next tick phase.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::automaton::Species;
use crate::config::Config;
use crate::device::{ComputeDevice, ThreadPoolDevice};
use crate::engine::Engine;
use crate::error::{EngineError, InitError};
use crate::input::{Buttons, InputEvent, Key, MouseButton};
use crate::scheduler::Renderer;
use crate::viewport::{CellPos, Viewport};

/// Last known pointer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    /// Window pixel position, top-left origin.
    pub x: i32,
    pub y: i32,
    /// The world cell under the pointer, if any.
    pub cell: Option<CellPos>,
    pub buttons: Buttons,
}

pub struct Session<D: ComputeDevice = ThreadPoolDevice> {
    engine: Engine<D>,
    tool: Species,
    paused: bool,
    exit: Arc<AtomicBool>,
    viewport: Viewport,
    pointer: Pointer,
    frame: u64,
}

impl Session<ThreadPoolDevice> {
    pub fn new(config: &Config) -> Result<Self, InitError> {
        Ok(Session::with_engine(Engine::new(config)?, config))
    }
}

impl<D: ComputeDevice> Session<D> {
    pub fn with_engine(engine: Engine<D>, config: &Config) -> Self {
        Session {
            engine,
            tool: Species::Empty,
            paused: false,
            exit: Arc::new(AtomicBool::new(false)),
            viewport: Viewport {
                cell_size: config.cell_size.max(1),
                ..Viewport::default()
            },
            pointer: Pointer::default(),
            frame: 0,
        }
    }

    pub fn engine(&self) -> &Engine<D> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<D> {
        &mut self.engine
    }

    pub fn tool(&self) -> Species {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Species) {
        self.tool = tool;
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Frames displayed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Shared exit flag, for wiring to an interrupt handler on another thread.
    pub fn exit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.exit)
    }

    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::SeqCst);
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    /// Hand the current grid to the renderer and bump the frame counter.
    pub fn display<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), EngineError> {
        let grid = self.engine.current_grid()?;
        renderer.display(grid, self.frame);
        self.frame += 1;
        Ok(())
    }

    /// Run one step unless paused. Returns whether the buffers were swapped.
    pub fn advance(&mut self) -> bool {
        if self.paused {
            return false;
        }
        let result = self.engine.step();
        self.settle("step", result)
    }

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(Key::Escape) | InputEvent::CloseRequested => {
                info!("exit requested");
                self.request_exit();
            }
            InputEvent::KeyPressed(Key::Space) => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
            }
            InputEvent::KeyPressed(Key::Other) => {}
            InputEvent::CharPressed(ch) => self.handle_char(ch),
            InputEvent::ButtonPressed(button) => {
                self.pointer.buttons.set(button, true);
                if button == MouseButton::Primary {
                    self.paint_under_pointer();
                }
            }
            InputEvent::ButtonReleased(button) => self.pointer.buttons.set(button, false),
            InputEvent::PointerMoved { x, y } => self.handle_pointer(x, y),
            InputEvent::Scrolled(steps) => {
                self.viewport.zoom(steps);
                debug!(cell_size = self.viewport.cell_size, "zoom changed");
            }
            InputEvent::Resized { width, height } => self.viewport.resize(width, height),
        }
    }

    fn handle_char(&mut self, ch: char) {
        if let Some(tool) = Species::from_tool_char(ch) {
            self.tool = tool;
            debug!(tool = ?tool, "tool selected");
            return;
        }
        match ch {
            'c' => {
                let result = self.engine.clear();
                self.settle("clear", result);
            }
            'r' => {
                let result = self.engine.reseed();
                self.settle("reseed", result);
            }
            _ => {}
        }
    }

    fn handle_pointer(&mut self, x: i32, y: i32) {
        let cell = self
            .viewport
            .resolve(x, y, self.engine.width(), self.engine.height());
        if cell != self.pointer.cell {
            self.pointer.cell = cell;
            if self.pointer.buttons.primary {
                self.paint_under_pointer();
            }
        }

        if (x, y) != (self.pointer.x, self.pointer.y) {
            if self.pointer.buttons.panning() {
                // Window y grows downwards, the world grows upwards.
                self.viewport.pan_by(x - self.pointer.x, self.pointer.y - y);
            }
            self.pointer.x = x;
            self.pointer.y = y;
        }
    }

    fn paint_under_pointer(&mut self) {
        let Some(CellPos { row, col }) = self.pointer.cell else {
            return;
        };
        let result = self.engine.paint(row, col, self.tool);
        self.settle("paint", result);
    }

    /// Log the outcome of an engine operation. Fatal errors stop the loop.
    fn settle(&self, op: &'static str, result: Result<(), EngineError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) if err.is_fatal() => {
                error!(op, %err, "fatal engine error, stopping");
                self.request_exit();
                false
            }
            Err(err) => {
                warn!(op, %err, "operation skipped");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{Grid, EMPTY};

    struct Frames(Vec<u64>);

    impl Renderer for Frames {
        fn display(&mut self, _grid: &Grid, frame: u64) {
            self.0.push(frame);
        }
    }

    fn session() -> Session {
        let config = Config {
            seed: Some(3),
            worker_threads: 1,
            ..Config::with_world(64, 64)
        };
        Session::new(&config).unwrap()
    }

    fn cell(session: &Session, row: usize, col: usize) -> u8 {
        session.engine().current_grid().unwrap().get(row, col).unwrap()
    }

    #[test]
    fn test_keys() {
        let mut session = session();
        assert!(!session.paused());
        session.handle_event(InputEvent::KeyPressed(Key::Space));
        assert!(session.paused());
        session.handle_event(InputEvent::KeyPressed(Key::Space));
        assert!(!session.paused());

        assert!(!session.exit_requested());
        session.handle_event(InputEvent::KeyPressed(Key::Escape));
        assert!(session.exit_requested());
    }

    #[test]
    fn test_close_and_external_exit() {
        let mut closing = session();
        closing.handle_event(InputEvent::CloseRequested);
        assert!(closing.exit_requested());

        let interrupted = session();
        interrupted.exit_flag().store(true, Ordering::SeqCst);
        assert!(interrupted.exit_requested());
    }

    #[test]
    fn test_tool_selection() {
        let mut session = session();
        assert_eq!(session.tool(), Species::Empty);
        session.handle_event(InputEvent::CharPressed('2'));
        assert_eq!(session.tool(), Species::B);
        session.handle_event(InputEvent::CharPressed('3'));
        assert_eq!(session.tool(), Species::C);
        session.handle_event(InputEvent::CharPressed('x'));
        assert_eq!(session.tool(), Species::C);
        session.handle_event(InputEvent::CharPressed('0'));
        assert_eq!(session.tool(), Species::Empty);
    }

    #[test]
    fn test_click_paints_under_pointer() {
        let mut session = session();
        session.handle_event(InputEvent::CharPressed('1'));
        // Bottom-left cell of a 512px window at 8px cells
        session.handle_event(InputEvent::PointerMoved { x: 3, y: 508 });
        assert_eq!(session.pointer().cell, Some(CellPos { row: 0, col: 0 }));
        assert_eq!(cell(&session, 0, 0), EMPTY);

        session.handle_event(InputEvent::ButtonPressed(MouseButton::Primary));
        assert_eq!(cell(&session, 0, 0), Species::A.code());
    }

    #[test]
    fn test_drag_paints_each_new_cell() {
        let mut session = session();
        session.handle_event(InputEvent::CharPressed('3'));
        session.handle_event(InputEvent::PointerMoved { x: 3, y: 508 });
        session.handle_event(InputEvent::ButtonPressed(MouseButton::Primary));
        session.handle_event(InputEvent::PointerMoved { x: 11, y: 508 });
        session.handle_event(InputEvent::PointerMoved { x: 19, y: 508 });
        session.handle_event(InputEvent::ButtonReleased(MouseButton::Primary));
        session.handle_event(InputEvent::PointerMoved { x: 27, y: 508 });

        let code = Species::C.code();
        assert_eq!(cell(&session, 0, 0), code);
        assert_eq!(cell(&session, 0, 1), code);
        assert_eq!(cell(&session, 0, 2), code);
        assert_eq!(cell(&session, 0, 3), EMPTY);
    }

    #[test]
    fn test_click_off_world_paints_nothing() {
        let mut session = session();
        session.handle_event(InputEvent::CharPressed('1'));
        session.handle_event(InputEvent::PointerMoved { x: -20, y: 508 });
        session.handle_event(InputEvent::ButtonPressed(MouseButton::Primary));
        assert!(session
            .engine()
            .current_grid()
            .unwrap()
            .cells()
            .iter()
            .all(|&c| c == EMPTY));
        let (acquired, released) = session.engine().transfers();
        assert_eq!(acquired, released);
    }

    #[test]
    fn test_pan_with_secondary_button() {
        let mut session = session();
        session.handle_event(InputEvent::PointerMoved { x: 100, y: 100 });
        session.handle_event(InputEvent::ButtonPressed(MouseButton::Secondary));
        session.handle_event(InputEvent::PointerMoved { x: 116, y: 92 });
        assert_eq!(session.viewport().pan_x, 16.0);
        assert_eq!(session.viewport().pan_y, 8.0);

        session.handle_event(InputEvent::ButtonReleased(MouseButton::Secondary));
        session.handle_event(InputEvent::PointerMoved { x: 200, y: 200 });
        assert_eq!(session.viewport().pan_x, 16.0);
    }

    #[test]
    fn test_scroll_and_resize() {
        let mut session = session();
        session.handle_event(InputEvent::Scrolled(1));
        assert_eq!(session.viewport().cell_size, 9);
        session.handle_event(InputEvent::Scrolled(-1));
        session.handle_event(InputEvent::Scrolled(-1));
        assert_eq!(session.viewport().cell_size, 7);
        session.handle_event(InputEvent::Resized {
            width: 640,
            height: 480,
        });
        assert_eq!(session.viewport().window_height, 480);
    }

    #[test]
    fn test_clear_char() {
        let mut session = session();
        session.engine_mut().paint(5, 5, Species::B).unwrap();
        session.handle_event(InputEvent::CharPressed('c'));
        assert_eq!(cell(&session, 5, 5), EMPTY);
    }

    #[test]
    fn test_reseed_char() {
        let mut session = session();
        let before = session.engine().random_field().clone();
        session.handle_event(InputEvent::CharPressed('r'));
        assert_ne!(session.engine().random_field(), &before);
    }

    #[test]
    fn test_display_counts_frames_even_when_paused() {
        let mut session = session();
        let mut frames = Frames(Vec::new());
        session.set_paused(true);

        session.display(&mut frames).unwrap();
        assert!(!session.advance());
        session.display(&mut frames).unwrap();

        assert_eq!(frames.0, vec![0, 1]);
        assert_eq!(session.frame(), 2);
        assert_eq!(session.engine().generation(), 0);

        session.set_paused(false);
        assert!(session.advance());
        assert_eq!(session.engine().generation(), 1);
    }
}
