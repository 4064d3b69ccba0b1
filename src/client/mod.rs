//! Headless wheel animator: drives the spin state machine from frame ticks,
//! talks to the relay and keeps the visible history.

/// Time source for the animator.
pub mod clock;
/// Session and file-backed spin history.
pub mod history;
#[cfg(feature = "console")]
/// reqwest-backed relay client.
pub mod http;
/// Relay abstraction and its errors.
pub mod relay;
/// Spin sequence orchestration.
pub mod sequencer;

pub use self::clock::{Clock, MonotonicClock};
pub use self::history::{HistoryView, SpinHistory};
#[cfg(feature = "console")]
pub use self::http::HttpRelay;
pub use self::relay::{Relay, RelayError};
pub use self::sequencer::{RigBanner, SpinSequencer, Trigger};
