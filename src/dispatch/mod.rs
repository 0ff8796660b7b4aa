//! Algorithm lookup, input validation and guarded execution
//!
//! ```text
//! id + RawInput -> lookup -> parse_input -> Emitter::invoke -> RunResult
//! ```
//!
//! A run either yields a complete [`RunResult`] or a [`DispatchError`];
//! nothing partial ever escapes. Dispatch never touches playback state, so a
//! failed run leaves whatever the engine was showing untouched.

mod errors;
mod input;
mod random;
mod registry;

pub use errors::{DispatchError, InputError};
pub use input::{
    parse_dimensions, parse_frequencies, parse_graph, parse_input, parse_items, parse_number,
    parse_numbers, Frequency, GraphInput, Input, InputKind, Item, Operation, OperationInput,
    RawInput, MAX_CAPACITY, MAX_ITEMS, MAX_QUEENS,
};
pub use random::{format_values, random_values};
pub use registry::{lookup, registry, AlgorithmSpec, Category, Emitter};

use crate::algorithms::ExecutionError;
use crate::trace::{Recorder, RunResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

/// Runs registered algorithms
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    /// Seed for randomized algorithms; fresh entropy when unset
    seed: Option<u64>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Dispatcher { seed }
    }

    /// Look up `id`, validate `raw` and record a full run
    pub fn run(&self, id: &str, raw: &RawInput) -> Result<RunResult, DispatchError> {
        let spec = lookup(id).ok_or_else(|| {
            warn!(algorithm = id, "unknown algorithm");
            DispatchError::UnknownAlgorithm(id.to_string())
        })?;
        let input = parse_input(spec, raw).map_err(|err| {
            warn!(algorithm = spec.id, error = %err, "input rejected");
            err
        })?;
        self.execute(spec, &input)
    }

    /// Record a run of `spec` over already validated input
    pub fn execute(&self, spec: &AlgorithmSpec, input: &Input) -> Result<RunResult, DispatchError> {
        debug!(algorithm = spec.id, kind = %input.kind(), "run started");
        let mut recorder = match self.seed {
            Some(seed) => Recorder::with_seed(seed),
            None => Recorder::new(),
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| spec.emitter.invoke(input, &mut recorder)));
        match outcome {
            Ok(Some(Ok(()))) => {
                let result = recorder.finish();
                info!(
                    algorithm = spec.id,
                    steps = result.len(),
                    comparisons = result.summary().comparisons,
                    "run finished"
                );
                Ok(result)
            }
            Ok(Some(Err(err))) => {
                warn!(algorithm = spec.id, error = %err, "run failed");
                Err(err.into())
            }
            Ok(None) => Err(InputError::KindMismatch {
                algorithm: spec.id,
                expected: spec.input_kind(),
                got: input.kind(),
            }
            .into()),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(algorithm = spec.id, %message, "algorithm panicked");
                Err(ExecutionError::Panicked { message }.into())
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
