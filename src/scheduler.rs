//! Fixed-budget frame loop.
//!
//! Each tick: display FRONT, dispatch pending input, step unless paused, then
//! sleep whatever is left of the frame budget. An over-budget tick does not
//! sleep and the deficit is not carried into the next tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::automaton::Grid;
use crate::device::ComputeDevice;
use crate::input::InputEvent;
use crate::state::Session;

/// Draws the current grid. Implemented by the window/graphics layer.
pub trait Renderer {
    /// `frame` increments once per displayed frame, paused or not.
    fn display(&mut self, grid: &Grid, frame: u64);
}

/// Yields the input events that arrived since the last poll.
pub trait EventSource {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>);
}

impl EventSource for VecDeque<InputEvent> {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) {
        out.extend(self.drain(..));
    }
}

/// Event source for runs without a window.
pub struct NoInput;

impl EventSource for NoInput {
    fn poll_events(&mut self, _out: &mut Vec<InputEvent>) {}
}

/// Sleep budget for a target frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        FramePacer {
            budget: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// How long to sleep after `work`. `None` when the frame used its whole budget.
    pub fn remaining(&self, work: Duration) -> Option<Duration> {
        self.budget.checked_sub(work).filter(|left| !left.is_zero())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Stopped,
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Frame counter value handed to the renderer.
    pub frame: u64,
    pub stepped: bool,
    pub work: Duration,
    pub slept: Option<Duration>,
}

pub struct FrameScheduler {
    pacer: FramePacer,
    phase: Phase,
    pending: Vec<InputEvent>,
}

impl FrameScheduler {
    pub fn new(target_fps: u32) -> Self {
        FrameScheduler {
            pacer: FramePacer::new(target_fps),
            phase: Phase::Running,
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Run one tick. Returns `None` once the loop has stopped.
    ///
    /// The exit flag is only observed here, at the top of a tick, so work
    /// already started in the previous tick always completes.
    pub fn tick<D, R, E, S>(
        &mut self,
        session: &mut Session<D>,
        renderer: &mut R,
        events: &mut E,
        sleep: &mut S,
    ) -> Option<TickReport>
    where
        D: ComputeDevice,
        R: Renderer + ?Sized,
        E: EventSource + ?Sized,
        S: FnMut(Duration),
    {
        if self.phase == Phase::Stopped {
            return None;
        }
        if session.exit_requested() {
            self.phase = Phase::Stopped;
            info!(
                frames = session.frame(),
                generation = session.engine().generation(),
                "frame loop stopped"
            );
            return None;
        }

        let start = Instant::now();
        let frame = session.frame();

        if let Err(err) = session.display(renderer) {
            error!(%err, "cannot display current grid, stopping");
            session.request_exit();
        }

        events.poll_events(&mut self.pending);
        for event in self.pending.drain(..) {
            session.handle_event(event);
        }

        let stepped = session.advance();

        let work = start.elapsed();
        let slept = self.pacer.remaining(work);
        if let Some(left) = slept {
            sleep(left);
        }

        Some(TickReport {
            frame,
            stepped,
            work,
            slept,
        })
    }

    /// Tick until the session asks to exit. Returns the number of ticks run.
    pub fn run<D, R, E>(&mut self, session: &mut Session<D>, renderer: &mut R, events: &mut E) -> u64
    where
        D: ComputeDevice,
        R: Renderer + ?Sized,
        E: EventSource + ?Sized,
    {
        info!(
            budget_us = self.pacer.budget().as_micros() as u64,
            "frame loop running"
        );
        let mut sleep = std::thread::sleep;
        let mut ticks = 0;
        while self.tick(session, renderer, events, &mut sleep).is_some() {
            ticks += 1;
        }
        ticks
    }
}
