//! Step recording
//!
//! Algorithms run eagerly and describe themselves as an ordered list of
//! [`Step`]s pushed into a [`Recorder`]. Each step owns a deep copy of the
//! relevant structure, so any step can be shown later without re-running the
//! algorithm. [`Recorder::finish`] freezes the steps and counters into a
//! [`RunResult`].

mod recorder;
mod step;
mod structure;
mod summary;

pub use recorder::Recorder;
pub use step::{Scalar, Step, Variables};
pub use structure::{
    highlight_of, ArrayView, Cell, DpTableView, GraphEdge, GraphNode, GraphView, HashSlot,
    HashTableView, Highlight, HighlightType, LinkedListView, ListNode, MatrixView, QueueView,
    StackView, Structure, StructureKind, TreeNode, TreeView,
};
pub use summary::{Counter, RunResult, Summary};
