//! Terminal UI for stepping through a recorded run
//!
//! The UI only reads from the [`PlaybackEngine`](crate::playback::PlaybackEngine):
//! the current step, the summary and the cursor. Keys map one-to-one onto
//! engine operations.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
