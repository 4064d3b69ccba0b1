use std::time::Duration;

/// Durations and turn counts driving the idle loop and the staged spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTiming {
    /// Time for one full idle revolution.
    pub idle_period: Duration,
    /// Linear acceleration phase.
    pub accelerate: Duration,
    /// Eased approach to the target angle.
    pub decelerate: Duration,
    /// Pause on the winning segment before the idle loop resumes.
    pub settle: Duration,
    /// How long the "next spin" banner stays visible.
    pub rig_banner: Duration,
    /// Interval between file-backed history polls.
    pub history_poll: Duration,
    /// Full turns covered during acceleration.
    pub acceleration_turns: u32,
    /// Full turns added on top of the acceleration before landing.
    pub extra_turns: u32,
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self {
            idle_period: Duration::from_secs(10),
            accelerate: Duration::from_secs(3),
            decelerate: Duration::from_secs(3),
            settle: Duration::from_millis(3_500),
            rig_banner: Duration::from_secs(2),
            history_poll: Duration::from_secs(2),
            acceleration_turns: 20,
            extra_turns: 2,
        }
    }
}

/// Fraction of `total` covered after `elapsed`, clamped to `[0, 1]`.
pub(crate) fn progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// Cubic ease-out used for the landing animation.
pub(crate) fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
