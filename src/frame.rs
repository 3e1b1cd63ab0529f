//! The per-frame loop.
//!
//! Every tick reads the elapsed time since start from a [`FrameClock`],
//! hands it to a [`FrameSink`] (which writes it into the time uniforms),
//! advances the camera damping and renders once. The windowed app drives
//! [`FrameLoop::tick`] from its redraw callback; headless callers use
//! [`FrameLoop::run`] with a frame budget. A [`StopSignal`] ends either.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use instant::Instant;

/// Source of elapsed seconds since the loop started.
pub trait FrameClock {
    fn elapsed(&mut self) -> f32;
}

/// Wall clock, started on construction.
#[derive(Clone, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn elapsed(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock that advances by a fixed step on every read. Useful for headless runs.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: f32,
    step: f32,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        Self { now: 0.0, step }
    }

    pub fn set(&mut self, now: f32) {
        self.now = now;
    }
}

impl FrameClock for ManualClock {
    fn elapsed(&mut self) -> f32 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Shared flag that stops a [`FrameLoop`]. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a frame does with the loop's output.
pub trait FrameSink {
    /// Receives the elapsed time of the current frame.
    fn set_elapsed(&mut self, elapsed: f32);
    fn update_controls(&mut self);
    fn render(&mut self) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stopped,
}

#[derive(Debug)]
pub struct FrameLoop<C: FrameClock> {
    clock: C,
    stop: StopSignal,
    last_elapsed: f32,
    frames: u64,
}

impl<C: FrameClock> FrameLoop<C> {
    pub fn new(clock: C, stop: StopSignal) -> Self {
        Self {
            clock,
            stop,
            last_elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_elapsed(&self) -> f32 {
        self.last_elapsed
    }

    /// Runs one frame unless the stop signal is set.
    ///
    /// The elapsed time handed to the sink never decreases, even if the clock does.
    pub fn tick(&mut self, sink: &mut impl FrameSink) -> anyhow::Result<Tick> {
        if self.stop.is_stopped() {
            return Ok(Tick::Stopped);
        }
        let elapsed = self.clock.elapsed().max(self.last_elapsed);
        self.last_elapsed = elapsed;

        sink.set_elapsed(elapsed);
        sink.update_controls();
        sink.render()?;
        self.frames += 1;
        Ok(Tick::Continue)
    }

    /// Ticks until `max_frames` frames ran or the stop signal is set.
    /// Returns the number of frames rendered by this call.
    pub fn run(&mut self, sink: &mut impl FrameSink, max_frames: u64) -> anyhow::Result<u64> {
        let mut rendered = 0;
        while rendered < max_frames {
            match self.tick(sink)? {
                Tick::Continue => rendered += 1,
                Tick::Stopped => {
                    log::info!("Frame loop stopped after {} frames", self.frames);
                    break;
                }
            }
        }
        Ok(rendered)
    }
}
