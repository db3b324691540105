//! Optimistic progress.
//!
//! The progress bars shown while a request is outstanding are driven by a
//! timer, not by bytes transferred. Each tick adds a random step, the value is
//! held below a ceiling, and only a real response snaps it to 100%.
//!
//! ```text
//!  0% ──tick──▶ 12% ──tick──▶ 23% ── … ──▶ ceiling (90%) ──response──▶ 100%
//! ```

use rand::Rng;

/// Timing and shape of one optimistic progress estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPolicy {
    /// Milliseconds between two ticks.
    pub interval_ms: u32,
    /// Upper bound (exclusive) of the random increment per tick.
    pub max_step: f64,
    /// Value the estimate never passes before completion.
    pub ceiling: f64,
}

/// File upload: every 500 ms, up to +15, capped at 90.
pub const UPLOAD_PROGRESS: ProgressPolicy = ProgressPolicy {
    interval_ms: 500,
    max_step: 15.0,
    ceiling: 90.0,
};

/// Paper generation: every 1000 ms, up to +10, capped at 80.
pub const GENERATION_PROGRESS: ProgressPolicy = ProgressPolicy {
    interval_ms: 1000,
    max_step: 10.0,
    ceiling: 80.0,
};

/// Value shown once the response has arrived.
pub const COMPLETE: f64 = 100.0;

/// A timer-driven progress estimate.
#[derive(Debug, Clone)]
pub struct OptimisticProgress {
    policy: ProgressPolicy,
    percent: f64,
    complete: bool,
}

impl OptimisticProgress {
    pub fn new(policy: ProgressPolicy) -> Self {
        Self {
            policy,
            percent: 0.0,
            complete: false,
        }
    }

    pub fn policy(&self) -> ProgressPolicy {
        self.policy
    }

    /// Current value in percent.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance by a random step in `[0, max_step)`.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let step = rng.gen::<f64>() * self.policy.max_step;
        self.advance_by(step)
    }

    /// Advance by an explicit step, clamped to the ceiling.
    ///
    /// Ignored once the estimate is complete.
    pub fn advance_by(&mut self, step: f64) -> f64 {
        if self.complete {
            return self.percent;
        }
        self.percent = (self.percent + step.max(0.0)).min(self.policy.ceiling);
        self.percent
    }

    /// Snap to 100% on real completion.
    pub fn complete(&mut self) -> f64 {
        self.complete = true;
        self.percent = COMPLETE;
        self.percent
    }
}
