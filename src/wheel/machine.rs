use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use super::{
    segment::{FULL_TURN, Outcome, SEGMENTS, normalize, pick_segment, target_angle, winning_index},
    timing::{SpinTiming, ease_out, progress},
};

/// Unique identifier attached to every spin for log correlation.
pub type SpinId = Uuid;

/// Visible phases of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// Slow continuous rotation, ready for a trigger.
    Idle,
    /// Linear fast spin right after the trigger.
    Accelerating,
    /// Eased approach to the target angle.
    Decelerating,
    /// Resting on the winning segment before resuming the idle loop.
    Settling,
}

/// Decisions taken when a spin starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// Identifier of the spin.
    pub id: SpinId,
    /// Outcome forced by the rig, if one was pending.
    pub forced: Option<Outcome>,
    /// Sector chosen as the landing target.
    pub segment: usize,
}

/// How a spin ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinResult {
    /// Identifier of the spin.
    pub id: SpinId,
    /// Label shown to the player and written to the log.
    pub reported: Outcome,
    /// Sector geometrically under the pointer.
    pub landed_index: usize,
    /// Label of the sector under the pointer.
    pub landed: Outcome,
    /// Rigged outcome that was in force, if any.
    pub forced: Option<Outcome>,
    /// Unwrapped final rotation, in degrees.
    pub final_angle: f64,
}

impl SpinResult {
    /// Derive the result for a wheel resting at `final_angle`.
    ///
    /// A forced outcome always wins over the geometry.
    pub fn resolve(id: SpinId, final_angle: f64, forced: Option<Outcome>) -> Self {
        let landed_index = winning_index(final_angle);
        let landed = SEGMENTS[landed_index].outcome;
        Self {
            id,
            reported: forced.unwrap_or(landed),
            landed_index,
            landed,
            forced,
            final_angle,
        }
    }
}

/// Transitions reported by [`SpinMachine::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinEvent {
    /// Acceleration finished; the wheel now eases towards `target`.
    Decelerating {
        /// Spin identifier.
        id: SpinId,
        /// Unwrapped angle the wheel will come to rest on.
        target: f64,
    },
    /// The wheel stopped and the winner is known.
    Landed(SpinResult),
    /// Settle delay elapsed; the idle loop restarted from `rotation`.
    Resumed {
        /// Spin identifier.
        id: SpinId,
        /// Wrapped resting angle the idle loop starts from.
        rotation: f64,
    },
}

/// Errors raised when driving the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinError {
    /// A trigger arrived while a spin was still in progress.
    #[error("a spin is already in progress ({phase:?})")]
    AlreadySpinning {
        /// Phase the machine was in.
        phase: SpinPhase,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle {
        anchor: f64,
        since: Duration,
    },
    Accelerating {
        plan: SpinPlan,
        from: f64,
        started: Duration,
    },
    Decelerating {
        plan: SpinPlan,
        from: f64,
        target: f64,
        started: Duration,
    },
    Settling {
        result: SpinResult,
        started: Duration,
    },
}

/// Deadline-driven wheel state machine: Idle → Accelerating → Decelerating →
/// Settling → Idle.
///
/// Time is supplied by the caller as an offset from an arbitrary origin, so the
/// machine is fully deterministic under simulated clocks.
#[derive(Debug, Clone)]
pub struct SpinMachine {
    timing: SpinTiming,
    motion: Motion,
}

impl SpinMachine {
    /// Create an idle machine resting at 0° at time `now`.
    pub fn new(timing: SpinTiming, now: Duration) -> Self {
        Self {
            timing,
            motion: Motion::Idle {
                anchor: 0.0,
                since: now,
            },
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SpinPhase {
        match self.motion {
            Motion::Idle { .. } => SpinPhase::Idle,
            Motion::Accelerating { .. } => SpinPhase::Accelerating,
            Motion::Decelerating { .. } => SpinPhase::Decelerating,
            Motion::Settling { .. } => SpinPhase::Settling,
        }
    }

    /// Whether a spin is in progress.
    pub fn is_spinning(&self) -> bool {
        self.phase() != SpinPhase::Idle
    }

    /// Rigged outcome driving the current spin, if any.
    pub fn pending_forced(&self) -> Option<Outcome> {
        match self.motion {
            Motion::Idle { .. } => None,
            Motion::Accelerating { plan, .. } | Motion::Decelerating { plan, .. } => plan.forced,
            Motion::Settling { result, .. } => result.forced,
        }
    }

    /// Timings in use.
    pub fn timing(&self) -> &SpinTiming {
        &self.timing
    }

    /// Rotation of the wheel at `now`, in degrees.
    ///
    /// Idle rotation is wrapped into `[0, 360)`; spin phases report the
    /// unwrapped angle so the animation never jumps backwards.
    pub fn rotation_at(&self, now: Duration) -> f64 {
        match self.motion {
            Motion::Idle { anchor, since } => {
                let period = self.timing.idle_period;
                if period.is_zero() {
                    return anchor;
                }
                let elapsed = now.saturating_sub(since).as_secs_f64();
                normalize(anchor + FULL_TURN * elapsed / period.as_secs_f64())
            }
            Motion::Accelerating { from, started, .. } => {
                let t = progress(now.saturating_sub(started), self.timing.accelerate);
                from + self.acceleration_span() * t
            }
            Motion::Decelerating {
                from,
                target,
                started,
                ..
            } => {
                let t = progress(now.saturating_sub(started), self.timing.decelerate);
                from + (target - from) * ease_out(t)
            }
            Motion::Settling { result, .. } => result.final_angle,
        }
    }

    /// Start a spin at `now`, stopping the idle loop where it currently is.
    pub fn start<R: Rng>(
        &mut self,
        now: Duration,
        forced: Option<Outcome>,
        rng: &mut R,
    ) -> Result<SpinPlan, SpinError> {
        if self.is_spinning() {
            return Err(SpinError::AlreadySpinning {
                phase: self.phase(),
            });
        }

        let plan = SpinPlan {
            id: Uuid::new_v4(),
            forced,
            segment: pick_segment(forced, rng),
        };
        let from = self.rotation_at(now);
        self.motion = Motion::Accelerating {
            plan,
            from,
            started: now,
        };

        Ok(plan)
    }

    /// Advance to `now`, returning every transition whose deadline has passed.
    ///
    /// Deadlines are chained from the previous one rather than from `now`, so a
    /// late tick yields the same angles as a punctual one.
    pub fn tick(&mut self, now: Duration) -> Vec<SpinEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.step(now) {
            events.push(event);
        }
        events
    }

    fn step(&mut self, now: Duration) -> Option<SpinEvent> {
        match self.motion {
            Motion::Idle { .. } => None,
            Motion::Accelerating {
                plan,
                from,
                started,
            } => {
                let deadline = started + self.timing.accelerate;
                if now < deadline {
                    return None;
                }
                let base = from + self.acceleration_span();
                let target = target_angle(base, plan.segment, self.timing.extra_turns);
                self.motion = Motion::Decelerating {
                    plan,
                    from: base,
                    target,
                    started: deadline,
                };
                Some(SpinEvent::Decelerating {
                    id: plan.id,
                    target,
                })
            }
            Motion::Decelerating {
                plan,
                target,
                started,
                ..
            } => {
                let deadline = started + self.timing.decelerate;
                if now < deadline {
                    return None;
                }
                let result = SpinResult::resolve(plan.id, target, plan.forced);
                if result.forced.is_some() && result.landed != result.reported {
                    warn!(
                        spin_id = %plan.id,
                        landed = %result.landed,
                        reported = %result.reported,
                        "rigged spin landed on a segment of the other color"
                    );
                }
                self.motion = Motion::Settling {
                    result,
                    started: deadline,
                };
                Some(SpinEvent::Landed(result))
            }
            Motion::Settling { result, started } => {
                let deadline = started + self.timing.settle;
                if now < deadline {
                    return None;
                }
                let rotation = normalize(result.final_angle);
                self.motion = Motion::Idle {
                    anchor: rotation,
                    since: deadline,
                };
                Some(SpinEvent::Resumed {
                    id: result.id,
                    rotation,
                })
            }
        }
    }

    fn acceleration_span(&self) -> f64 {
        f64::from(self.timing.acceleration_turns) * FULL_TURN
    }
}
