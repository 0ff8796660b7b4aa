// Integration tests for lookup, input validation and dispatch

use algoscope::algorithms::ExecutionError;
use algoscope::dispatch::{lookup, DispatchError, Dispatcher, InputError, Operation, RawInput};
use algoscope::playback::{ManualClock, PlaybackEngine, PlaybackSettings};

fn raw(fields: &[(&str, &str)]) -> RawInput {
    let mut raw = RawInput::default();
    for &(name, value) in fields {
        let value = Some(value.to_string());
        match name {
            "values" => raw.values = value,
            "target" => raw.target = value,
            "operation" => raw.operation = value,
            "operand" => raw.operand = value,
            "items" => raw.items = value,
            "capacity" => raw.capacity = value,
            "graph" => raw.graph = value,
            "start" => raw.start = value,
            "n" => raw.n = value,
            "frequencies" => raw.frequencies = value,
            "dimensions" => raw.dimensions = value,
            other => panic!("unknown field {}", other),
        }
    }
    raw
}

fn input_error(id: &str, fields: &[(&str, &str)]) -> InputError {
    match Dispatcher::new().run(id, &raw(fields)) {
        Err(DispatchError::Input(err)) => err,
        other => panic!("expected an input error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_missing_operation_leaves_playback_untouched() {
    let mut engine = PlaybackEngine::with_clock(PlaybackSettings::default(), ManualClock::new());
    let loaded = Dispatcher::new()
        .run("bubble-sort", &raw(&[("values", "4, 2, 3")]))
        .expect("valid run");
    engine.load(loaded);
    engine.step_forward();
    let (cursor, len) = (engine.cursor(), engine.len());

    let outcome = Dispatcher::new().run("stack", &raw(&[("values", "1, 2, 3")]));
    assert_eq!(outcome, Err(DispatchError::Input(InputError::MissingOperation)));

    assert_eq!(engine.cursor(), cursor);
    assert_eq!(engine.len(), len);
}

#[test]
fn test_unknown_algorithm() {
    assert_eq!(
        Dispatcher::new().run("bogo-sort", &RawInput::default()),
        Err(DispatchError::UnknownAlgorithm("bogo-sort".to_string()))
    );
}

#[test]
fn test_invalid_number_names_the_token() {
    assert_eq!(
        input_error("bubble-sort", &[("values", "1, x, 3")]),
        InputError::InvalidNumber {
            field: "values",
            token: "x".to_string()
        }
    );
}

#[test]
fn test_missing_field() {
    assert_eq!(
        input_error("linear-search", &[("values", "1, 2")]),
        InputError::MissingField { field: "target" }
    );
}

#[test]
fn test_operation_not_offered_by_the_algorithm() {
    assert_eq!(
        input_error("stack", &[("values", "1"), ("operation", "enqueue"), ("operand", "3")]),
        InputError::UnsupportedOperation {
            algorithm: "stack",
            operation: Operation::Enqueue
        }
    );
}

#[test]
fn test_unknown_operation_name() {
    assert!(matches!(
        input_error("queue", &[("operation", "teleport")]),
        InputError::UnknownOperation { .. }
    ));
}

#[test]
fn test_operation_without_its_operand() {
    assert_eq!(
        input_error("stack", &[("values", "1, 2"), ("operation", "push")]),
        InputError::MissingOperand {
            operation: Operation::Push
        }
    );
}

#[test]
fn test_operand_for_a_valueless_operation_is_ignored() {
    let result = Dispatcher::new()
        .run("stack", &raw(&[("values", "1, 2"), ("operation", "pop"), ("operand", "oops")]))
        .expect("operand is not read");
    assert!(!result.is_empty());
}

#[test]
fn test_queens_out_of_range() {
    assert_eq!(
        input_error("n-queens", &[("n", "11")]),
        InputError::OutOfRange {
            field: "n",
            value: 11,
            min: 1,
            max: 10
        }
    );
}

#[test]
fn test_malformed_knapsack_item() {
    assert!(matches!(
        input_error("knapsack-01", &[("items", "10:60, 20"), ("capacity", "50")]),
        InputError::Malformed { what: "item", .. }
    ));
}

#[test]
fn test_malformed_edge() {
    assert!(matches!(
        input_error("bfs", &[("graph", "0-1, 1"), ("start", "0")]),
        InputError::Malformed { what: "edge", .. }
    ));
}

#[test]
fn test_non_positive_frequency() {
    assert!(matches!(
        input_error("huffman", &[("frequencies", "a:3, b:0")]),
        InputError::Malformed { what: "frequency", .. }
    ));
}

#[test]
fn test_matrix_chain_needs_two_dimensions() {
    assert_eq!(
        input_error("matrix-chain", &[("dimensions", "10")]),
        InputError::TooFewDimensions { min: 2, got: 1 }
    );
}

#[test]
fn test_negative_dijkstra_weight_is_an_execution_error() {
    let outcome = Dispatcher::new().run("dijkstra", &raw(&[("graph", "0-1:-2"), ("start", "0")]));
    assert!(matches!(outcome, Err(DispatchError::Execution(_))));
}

#[test]
fn test_operation_names_are_case_insensitive() {
    let spec = lookup("linked-list").expect("registered");
    let raw = RawInput {
        operation: Some("Insert-End".to_string()),
        operand: Some("9".to_string()),
        ..RawInput::sample(spec)
    };
    assert!(Dispatcher::new().run(spec.id, &raw).is_ok());
}

#[test]
fn test_value_overflow_is_an_execution_error_not_a_panic() {
    let knapsack = Dispatcher::new().run(
        "knapsack-01",
        &raw(&[("items", "1:9223372036854775807, 1:1"), ("capacity", "2")]),
    );
    assert!(matches!(
        knapsack,
        Err(DispatchError::Execution(ExecutionError::Overflow { .. }))
    ));

    let huffman = Dispatcher::new().run("huffman", &raw(&[("frequencies", "a:9223372036854775807, b:1")]));
    assert!(matches!(
        huffman,
        Err(DispatchError::Execution(ExecutionError::Overflow { .. }))
    ));
}

#[test]
fn test_too_many_knapsack_items() {
    let items = vec!["1:1"; 21].join(", ");
    assert!(matches!(
        input_error("knapsack-01", &[("items", items.as_str()), ("capacity", "5")]),
        InputError::OutOfRange { field: "items", .. }
    ));
}
