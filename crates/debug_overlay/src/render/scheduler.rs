//! Per-frame scheduling
//!
//! Each tick resets every pool cursor, runs the caller's frame function and
//! hides whatever that function did not draw. The tick source is abstracted
//! behind [`TickDriver`] so the same loop runs under a host's render loop or
//! a deterministic stepper.

use std::ops::ControlFlow;

use crate::render::draw::DebugOverlay;
use crate::render::host::HostEngine;

/// Scheduler state within one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    /// Between ticks
    #[default]
    Idle,
    /// Inside the caller's frame function
    Running,
}

/// Drives one frame at a time and counts completed frames
#[derive(Debug, Default)]
pub struct FrameScheduler {
    frame: u64,
    state: FrameState,
}

impl FrameScheduler {
    /// Scheduler at frame 0
    pub const fn new() -> Self {
        Self {
            frame: 0,
            state: FrameState::Idle,
        }
    }

    /// Number of completed frames
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Current state
    pub const fn state(&self) -> FrameState {
        self.state
    }

    /// Run exactly one frame
    ///
    /// The callback receives the overlay and the index of the frame being
    /// drawn. If it fails, the frame is abandoned: pools are not finalized,
    /// the counter does not advance, and the error is handed back as is.
    pub fn tick<H, E, F>(&mut self, overlay: &mut DebugOverlay<H>, callback: F) -> Result<(), E>
    where
        H: HostEngine,
        F: FnOnce(&mut DebugOverlay<H>, u64) -> Result<(), E>,
    {
        overlay.begin_frame();
        self.state = FrameState::Running;
        let result = callback(overlay, self.frame);
        self.state = FrameState::Idle;
        result?;

        overlay.end_frame();
        log::trace!("Frame {} complete", self.frame);
        self.frame += 1;
        Ok(())
    }
}

/// Source of frame ticks
pub trait TickDriver {
    /// Call `tick` once per frame until it breaks or the driver runs out
    fn run(&mut self, tick: &mut dyn FnMut() -> ControlFlow<()>);
}

/// Deterministic driver that offers a fixed number of ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDriver {
    remaining: u64,
}

impl StepDriver {
    /// Driver offering `ticks` ticks
    pub const fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }

    /// Ticks not yet offered
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickDriver for StepDriver {
    fn run(&mut self, tick: &mut dyn FnMut() -> ControlFlow<()>) {
        while self.remaining > 0 {
            self.remaining -= 1;
            if tick().is_break() {
                break;
            }
        }
    }
}

/// Run `callback` once per tick offered by `driver`
///
/// Returns the number of completed frames once the driver stops. The first
/// callback error stops the loop and is returned unmodified.
pub fn run_per_frame<H, D, E, F>(
    overlay: &mut DebugOverlay<H>,
    driver: &mut D,
    mut callback: F,
) -> Result<u64, E>
where
    H: HostEngine,
    D: TickDriver + ?Sized,
    F: FnMut(&mut DebugOverlay<H>, u64) -> Result<(), E>,
{
    let mut scheduler = FrameScheduler::new();
    let mut failure = None;
    log::debug!("Starting per-frame loop");

    driver.run(&mut || match scheduler.tick(overlay, &mut callback) {
        Ok(()) => ControlFlow::Continue(()),
        Err(err) => {
            failure = Some(err);
            ControlFlow::Break(())
        }
    });

    match failure {
        Some(err) => {
            log::warn!("Frame callback failed at frame {}, loop stopped", scheduler.frame());
            Err(err)
        }
        None => {
            log::debug!("Per-frame loop finished after {} frames", scheduler.frame());
            Ok(scheduler.frame())
        }
    }
}
