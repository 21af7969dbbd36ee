//! Frame clock: host timestamps in, clamped physics `dt` out.

use crate::float::Float;

/// Turns display-refresh timestamps into a physics time step.
///
/// A gap longer than `max_gap_factor * target_dt` (a throttled or
/// backgrounded tab) counts as a single target frame, so integration never
/// sees the whole pause. The first tick, and the first after [`resume`],
/// yields zero.
///
/// [`resume`]: FrameClock::resume
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameClock<F: Float> {
    target_dt: F,
    max_gap_factor: F,
    last: Option<F>,
    elapsed: F,
}

impl<F: Float> FrameClock<F> {
    /// `target_dt` in seconds, e.g. 1/60.
    pub fn new(target_dt: F) -> Self {
        FrameClock {
            target_dt,
            max_gap_factor: F::two(),
            last: None,
            elapsed: F::zero(),
        }
    }

    pub fn with_max_gap_factor(mut self, factor: F) -> Self {
        self.max_gap_factor = factor.max(F::one());
        self
    }

    /// Feed the current timestamp (seconds); returns the `dt` to step with.
    pub fn tick(&mut self, now: F) -> F {
        let last = match self.last.replace(now) {
            Some(last) => last,
            None => return F::zero(),
        };
        let raw = now - last;
        let dt = if !(raw > F::zero()) {
            F::zero()
        } else if raw > self.target_dt * self.max_gap_factor {
            self.target_dt
        } else {
            raw
        };
        self.elapsed = self.elapsed + dt;
        dt
    }

    /// Forget the last timestamp, e.g. when the page becomes visible again.
    pub fn resume(&mut self) {
        self.last = None;
    }

    /// Simulated time so far.
    pub fn elapsed(&self) -> F {
        self.elapsed
    }

    pub fn target_dt(&self) -> F {
        self.target_dt
    }
}

impl<F: Float> Default for FrameClock<F> {
    fn default() -> Self {
        Self::new(F::one() / F::from_f32(60.0))
    }
}
