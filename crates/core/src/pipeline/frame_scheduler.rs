use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Minimum interval between task invocations.
///
/// Caps the analysis rate at roughly the display refresh rate, so
/// high-refresh displays do not multiply CPU cost; ticks arriving sooner
/// are waited out without counting as cycles.
pub const MIN_CYCLE_INTERVAL: Duration = Duration::from_millis(16);

/// Delivers display-refresh ticks to the scheduler.
///
/// `next_tick` blocks until the host's next refresh signal fires and
/// returns its timestamp.
pub trait TickSource: Send {
    fn next_tick(&mut self) -> Instant;
}

/// Drives a repeating analysis task against a display-refresh signal.
///
/// Cycles are strictly serialized: the task is never invoked again before
/// the previous invocation has returned, so cycle N+1 always observes
/// cycle N fully completed. `stop` is advisory, observed at tick
/// boundaries and immediately after the in-flight task returns; an
/// in-flight cycle always runs to completion and may still publish one
/// final result. Calling `run` while already running is a no-op; a task
/// error ends the loop (implicit stop) and propagates to the caller.
/// Both flags reset on every exit, so the scheduler is reusable.
///
/// Share behind an `Arc` to call `stop` from another thread.
pub struct FrameScheduler {
    is_running: AtomicBool,
    stop_requested: AtomicBool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            is_running: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Requests cancellation at the next safe point. No-op when idle.
    pub fn stop(&self) {
        if self.is_running() {
            self.stop_requested.store(true, Ordering::SeqCst);
        }
    }

    pub fn run(
        &self,
        ticks: &mut dyn TickSource,
        task: &mut dyn FnMut() -> Result<(), Box<dyn std::error::Error>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.is_running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let result = self.run_loop(ticks, task);

        self.stop_requested.store(false, Ordering::SeqCst);
        self.is_running.store(false, Ordering::SeqCst);
        result
    }

    fn run_loop(
        &self,
        ticks: &mut dyn TickSource,
        task: &mut dyn FnMut() -> Result<(), Box<dyn std::error::Error>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut previous: Option<Instant> = None;

        loop {
            let tick = ticks.next_tick();
            if self.stop_requested.load(Ordering::SeqCst) {
                return Ok(());
            }

            let due = previous.map_or(true, |p| tick.duration_since(p) > MIN_CYCLE_INTERVAL);
            if due {
                task()?;
                if self.stop_requested.load(Ordering::SeqCst) {
                    return Ok(());
                }
                previous = Some(tick);
            }
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
