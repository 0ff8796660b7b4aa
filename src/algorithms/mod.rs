//! Step-emitting algorithms
//!
//! Every algorithm takes its typed input plus a [`Recorder`] and records the
//! whole execution eagerly. Algorithms own their working storage and only
//! ever hand copies of it to the recorder, through the `capture` constructors
//! in [`crate::trace`].
//!
//! Bad structural input degrades into an explanatory step where that is
//! meaningful (popping an empty stack, a missing start node) and into an
//! [`ExecutionError`] otherwise.

pub mod backtracking;
pub mod bst;
pub mod dynamic;
pub mod errors;
pub mod expression;
pub mod graphs;
pub mod greedy;
pub mod hashing;
pub mod linked_list;
pub mod queue;
pub mod searching;
pub mod sorting;
pub mod stack;

pub use errors::{ExecResult, ExecutionError};

use crate::dispatch::Operation;
use crate::trace::{Recorder, Step, Structure};

/// Close the trace for an operation that needs a value but got none
fn missing_operand(rec: &mut Recorder, operation: Operation, view: impl Into<Structure>) -> ExecResult<()> {
    rec.push(Step::new(format!("No value supplied for {}", operation), view).at_line(1));
    Ok(())
}

/// Close the trace for an operation the structure does not offer
fn unsupported(
    rec: &mut Recorder,
    structure: &str,
    operation: Operation,
    view: impl Into<Structure>,
) -> ExecResult<()> {
    rec.push(Step::new(format!("The {} does not support {}", structure, operation), view).at_line(1));
    Ok(())
}
