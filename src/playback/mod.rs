//! Time-travel playback
//!
//! The [`PlaybackEngine`] owns a finished [`RunResult`](crate::trace::RunResult)
//! and a cursor into its steps. Moving the cursor never re-executes anything;
//! it only selects which recorded step the UI shows. Auto-advance is a single
//! armed tick driven by a [`Clock`].

mod clock;
mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{
    PlaybackEngine, PlaybackSettings, PlaybackState, TickToken, BASE_DELAY, DEFAULT_SPEED,
    MAX_SPEED, MIN_SPEED,
};
