//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`structure`]: the current step's payload, drawn per structure kind
//! - [`pseudocode`]: the algorithm listing with the current line indicator
//! - [`inspector`]: step narration, variables and summary counters
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each module exports a `render_*` function plus a frame-free helper that
//! builds its lines, which is what the unit tests exercise.

pub mod inspector;
pub mod pseudocode;
pub mod status;
pub mod structure;

pub use inspector::{render_inspector_pane, summary_lines, variable_lines};
pub use pseudocode::{pseudocode_lines, render_pseudocode_pane};
pub use status::{render_status_bar, Badge, StatusRenderData};
pub use structure::{render_structure_pane, structure_lines};
