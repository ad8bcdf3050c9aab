use std::time::Duration;

use log::{debug, warn};

use crate::Tick;

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// What happens to accumulated time left over once a single `advance` call
/// has run its maximum number of steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatchUpPolicy {
    /// Keep it, later calls keep catching up
    Carry,
    /// Discard whole intervals, keeping only the sub-interval remainder
    Drop,
}

/// Contains Config properties which will be used by the TickClock
#[derive(Clone, Debug)]
pub struct TickConfig {
    /// Length of one simulation step
    pub tick_interval: Duration,
    /// Most steps a single `advance` call will schedule
    pub max_catch_up_steps: u32,
    /// Handling of time beyond `max_catch_up_steps`
    pub catch_up_policy: CatchUpPolicy,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            max_catch_up_steps: 5,
            catch_up_policy: CatchUpPolicy::Drop,
        }
    }
}

/// Turns elapsed wall-clock time into a fixed-rate, monotonically increasing
/// tick counter. The caller runs one step per scheduled step, then calls
/// `complete_step`.
pub struct TickClock {
    tick_interval: Duration,
    max_catch_up_steps: u32,
    catch_up_policy: CatchUpPolicy,
    accumulated: Duration,
    tick: Tick,
}

impl TickClock {
    pub fn new(config: &TickConfig) -> Self {
        let tick_interval = if config.tick_interval < MIN_TICK_INTERVAL {
            warn!(
                "tick interval {:?} is below the {:?} minimum, clamping",
                config.tick_interval, MIN_TICK_INTERVAL
            );
            MIN_TICK_INTERVAL
        } else {
            config.tick_interval
        };

        Self {
            tick_interval,
            max_catch_up_steps: config.max_catch_up_steps.max(1),
            catch_up_policy: config.catch_up_policy,
            accumulated: Duration::ZERO,
            tick: 0,
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Adds elapsed time and returns how many steps are now due
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulated = self.accumulated.saturating_add(delta);

        let mut steps = 0;
        while self.accumulated >= self.tick_interval && steps < self.max_catch_up_steps {
            self.accumulated -= self.tick_interval;
            steps += 1;
        }

        if self.accumulated >= self.tick_interval && self.catch_up_policy == CatchUpPolicy::Drop {
            let remainder = self.accumulated.as_nanos() % self.tick_interval.as_nanos();
            debug!(
                "tick clock fell behind by {:?}, dropping whole intervals",
                self.accumulated
            );
            // remainder < tick_interval, which fits in a Duration
            self.accumulated = Duration::from_nanos(remainder as u64);
        }

        steps
    }

    /// Finishes the current step and returns the tick that was completed
    pub fn complete_step(&mut self) -> Tick {
        let completed = self.tick;
        self.tick += 1;
        completed
    }

    /// Forgets partial progress towards the next step, used when no role is
    /// active so an idle period cannot burst into steps later
    pub fn reset_accumulator(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Whole ticks needed to cover `duration`, rounded up
    pub fn ticks_for(&self, duration: Duration) -> Tick {
        let interval = self.tick_interval.as_nanos();
        let ticks = duration.as_nanos().div_ceil(interval);
        Tick::try_from(ticks).unwrap_or(Tick::MAX)
    }
}
