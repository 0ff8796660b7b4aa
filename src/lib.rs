//! # Introduction
//!
//! algoscope runs classic algorithms over small inputs, recording a snapshot
//! of the algorithm's working state at every meaningful point. The recorded
//! trace is then replayed forward and backward through a terminal UI built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! id + raw input → Dispatcher → algorithm + Recorder → RunResult → PlaybackEngine → TUI
//! ```
//!
//! 1. [`dispatch`] looks the algorithm up in a static registry, validates the
//!    raw text input and runs it, catching panics at the boundary.
//! 2. [`algorithms`] are step emitters: each one pushes [`trace::Step`]s into
//!    a [`trace::Recorder`] and bumps its summary counters.
//! 3. [`trace`] holds the step model: narration, pseudocode line, variables
//!    and exactly one structure payload per step.
//! 4. [`playback`] owns a finished run and moves a cursor through it, with a
//!    speed-scaled auto-advance timer driven by [`playback::Clock`].
//! 5. [`config`] loads playback defaults and the run seed from TOML.
//! 6. [`ui`] is the ratatui front end; not part of the stable library API.
//!
//! A run is recorded eagerly and completely before playback starts, so
//! stepping backward is just moving the cursor.

pub mod algorithms;
pub mod config;
pub mod dispatch;
pub mod playback;
pub mod trace;
pub mod ui;
