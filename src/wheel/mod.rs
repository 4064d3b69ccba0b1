//! Wheel model shared by the relay and the animator: the fixed segment layout,
//! spin timings and the deadline-driven spin state machine.

/// Deadline-driven spin state machine.
pub mod machine;
/// Segment layout and angle math.
pub mod segment;
/// Spin durations and easing.
pub mod timing;

pub use self::machine::{SpinError, SpinEvent, SpinId, SpinMachine, SpinPhase, SpinPlan, SpinResult};
pub use self::segment::{Outcome, SEGMENTS, Segment};
pub use self::timing::SpinTiming;
