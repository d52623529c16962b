//! Frame pacing
//!
//! [`FramePacer`] holds the main loop to a target frame rate. Each call to
//! [`FramePacer::tick`] sleeps until the next frame deadline, then measures how
//! long the frame took. Deadlines advance by a fixed interval, so sleep
//! overshoot on one frame is paid back on the next and the average rate does
//! not drift. A frame that runs late by more than one interval resets the
//! deadline instead of scheduling catch-up frames: dropped frames are absorbed,
//! never replayed.
//!
//! Time comes from a [`Clock`]. [`SystemClock`] is the real monotonic clock;
//! [`ManualClock`] only moves when told to, which makes pacing deterministic in
//! tests and headless runs.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::gui::constants::{DEFAULT_MAX_ELAPSED_MS, FPS_WINDOW_MS};

/// Source of monotonic time and the ability to wait on it
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

/// The process monotonic clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that advances only through [`ManualClock::advance`] or `sleep`
///
/// Clones share the same time, so a test can keep one handle while the
/// pacer owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    slept: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate work taking `duration`
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    /// Total time spent in `sleep` so far
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.slept.set(self.slept.get() + duration);
        self.advance(duration);
    }
}

/// Keeps the main loop at a constant frame rate
#[derive(Debug)]
pub struct FramePacer<C: Clock = SystemClock> {
    clock: C,
    interval: Option<Duration>,
    max_elapsed: Duration,
    last_tick: Duration,
    next_deadline: Duration,
    elapsed: Duration,
    window_time: Duration,
    window_frames: u32,
    fps: u32,
}

impl FramePacer<SystemClock> {
    /// Create a pacer on the system clock. `rate <= 0` disables throttling.
    pub fn new(rate: i32) -> Self {
        Self::with_clock(rate, SystemClock::new())
    }
}

impl<C: Clock> FramePacer<C> {
    pub fn with_clock(rate: i32, clock: C) -> Self {
        let interval = if rate > 0 {
            Some(Duration::from_secs_f64(1.0 / rate as f64))
        } else {
            None
        };
        let now = clock.now();
        FramePacer {
            clock,
            interval,
            max_elapsed: Duration::from_millis(DEFAULT_MAX_ELAPSED_MS),
            last_tick: now,
            next_deadline: now,
            elapsed: Duration::ZERO,
            window_time: Duration::ZERO,
            window_frames: 0,
            fps: 0,
        }
    }

    /// Clamp elapsed time reported after a stall
    pub fn set_max_elapsed(&mut self, max: Duration) {
        self.max_elapsed = max;
    }

    /// Reset the internal clock. Call directly before the loop starts.
    pub fn init(&mut self) {
        let now = self.clock.now();
        self.last_tick = now;
        self.next_deadline = now + self.interval.unwrap_or(Duration::ZERO);
        self.elapsed = Duration::ZERO;
        self.window_time = Duration::ZERO;
        self.window_frames = 0;
    }

    /// End the current frame: wait out the remaining budget and measure it.
    ///
    /// Returns the delay that was slept.
    pub fn tick(&mut self) -> Duration {
        let now = self.clock.now();
        let mut delay = Duration::ZERO;

        if let Some(interval) = self.interval {
            if now < self.next_deadline {
                delay = self.next_deadline - now;
                self.clock.sleep(delay);
            }
            self.next_deadline += interval;
            if self.next_deadline <= now {
                // More than a frame behind: drop the missed frames.
                self.next_deadline = now + interval;
            }
        }

        let after = self.clock.now();
        let frame_time = after.saturating_sub(self.last_tick);
        self.last_tick = after;
        self.elapsed = frame_time.min(self.max_elapsed);

        self.window_time += frame_time;
        self.window_frames += 1;
        let window = Duration::from_millis(FPS_WINDOW_MS);
        if self.window_time >= window {
            let secs = self.window_time.as_secs_f64();
            self.fps = (self.window_frames as f64 / secs).round() as u32;
            self.window_time = Duration::ZERO;
            self.window_frames = 0;
        }

        delay
    }

    /// Duration of the last frame, clamped to the configured maximum
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Frames observed in the last full second
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn is_throttled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
