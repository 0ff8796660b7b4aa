// Integration tests for the recorded algorithm runs

use algoscope::dispatch::{registry, Dispatcher, RawInput};
use algoscope::trace::{HashSlot, HighlightType, RunResult, Scalar, Structure};

fn run(id: &str, raw: RawInput) -> RunResult {
    Dispatcher::with_seed(Some(7))
        .run(id, &raw)
        .unwrap_or_else(|e| panic!("{} failed: {}", id, e))
}

fn array_run(id: &str, values: &str) -> RunResult {
    run(
        id,
        RawInput {
            values: Some(values.to_string()),
            ..Default::default()
        },
    )
}

fn final_array(run: &RunResult) -> Vec<i64> {
    run.last()
        .and_then(|step| step.structure.as_array())
        .map(|view| view.values.clone())
        .expect("sorts end on an array view")
}

#[test]
fn test_sorts_end_sorted_with_positive_counters() {
    for id in ["bubble-sort", "selection-sort", "insertion-sort", "quick-sort", "randomized-quick-sort"] {
        let result = array_run(id, "5, 3, 4, 1, 2");
        assert_eq!(final_array(&result), vec![1, 2, 3, 4, 5], "{}", id);

        let summary = result.summary();
        assert!(summary.comparisons > 0, "{} made no comparisons", id);
        assert!(summary.swaps.unwrap_or(0) > 0, "{} made no swaps", id);
    }
}

#[test]
fn test_merge_sort_counts_recursion_not_swaps() {
    let result = array_run("merge-sort", "5, 3, 4, 1, 2");
    assert_eq!(final_array(&result), vec![1, 2, 3, 4, 5]);
    let summary = result.summary();
    assert!(summary.comparisons > 0);
    assert_eq!(summary.swaps, None);
    assert!(summary.recursive_calls.unwrap_or(0) > 0);
}

#[test]
fn test_sorting_duplicates_and_negatives() {
    for id in ["bubble-sort", "insertion-sort", "merge-sort", "quick-sort"] {
        let result = array_run(id, "3, -1, 3, 0, -7, 3");
        assert_eq!(final_array(&result), vec![-7, -1, 0, 3, 3, 3], "{}", id);
    }
}

#[test]
fn test_absent_target_is_reported_not_found() {
    for id in ["linear-search", "binary-search"] {
        let result = run(
            id,
            RawInput {
                values: Some("4, 8, 15, 16, 23, 42".to_string()),
                target: Some("7".to_string()),
                ..Default::default()
            },
        );
        let last = result.last().expect("non-empty run");
        assert!(last.message.contains("not found"), "{}: {}", id, last.message);
        assert!(
            result
                .steps()
                .iter()
                .all(|s| s.structure.highlight_type() != Some(HighlightType::Found)),
            "{} highlighted a match",
            id
        );
    }
}

#[test]
fn test_present_target_is_found() {
    let result = run(
        "binary-search",
        RawInput {
            values: Some("4, 8, 15, 16, 23, 42".to_string()),
            target: Some("23".to_string()),
            ..Default::default()
        },
    );
    let last = result.last().expect("non-empty run");
    assert_eq!(last.structure.highlight_type(), Some(HighlightType::Found));
}

fn bst_run(values: &str, operation: &str, operand: &str) -> RunResult {
    run(
        "bst",
        RawInput {
            values: Some(values.to_string()),
            operation: Some(operation.to_string()),
            operand: Some(operand.to_string()),
            ..Default::default()
        },
    )
}

#[test]
fn test_increasing_inserts_lean_right() {
    let result = bst_run("10, 20, 30, 40", "insert", "50");
    for step in result.steps() {
        let tree = step.structure.as_tree().expect("bst steps carry trees");
        assert!(tree.nodes.iter().all(|n| n.left.is_none()), "{}", step.message);
    }
    let last = result.last().and_then(|s| s.structure.as_tree()).expect("tree");
    assert_eq!(last.nodes.len(), 5);
}

#[test]
fn test_out_of_order_insert_grows_a_left_child() {
    let result = bst_run("10, 20, 30, 40", "insert", "5");
    let last = result.last().and_then(|s| s.structure.as_tree()).expect("tree");
    assert!(last.nodes.iter().any(|n| n.left.is_some()));
}

#[test]
fn test_bst_insert_counts_comparisons() {
    let result = bst_run("50, 30, 70", "insert", "20");
    // 20 < 50, 20 < 30
    assert_eq!(result.summary().comparisons, 2);
    assert_eq!(result.summary().operations, Some(1));
}

#[test]
fn test_recorded_steps_are_independent_snapshots() {
    let result = array_run("bubble-sort", "3, 2, 1");
    let first = result.steps()[0].structure.as_array().expect("array");
    assert_eq!(first.values, vec![3, 2, 1]);
    assert_eq!(final_array(&result), vec![1, 2, 3]);
}

fn operation_run(id: &str, values: &str, operation: &str, operand: Option<&str>) -> RunResult {
    run(
        id,
        RawInput {
            values: Some(values.to_string()),
            operation: Some(operation.to_string()),
            operand: operand.map(str::to_string),
            ..Default::default()
        },
    )
}

/// The first step still shows the initial structure after the run mutated it,
/// and the run's last step shows something else.
fn assert_first_step_untouched(result: &RunResult) -> Structure {
    let first = result.steps()[0].structure.clone();
    let last = &result.last().expect("non-empty run").structure;
    assert_ne!(&first, last, "the run never changed the structure");
    assert_eq!(result.steps()[0].structure, first);
    first
}

#[test]
fn test_linked_list_snapshots_survive_later_mutation() {
    let result = operation_run("linked-list", "1, 2, 3", "delete-begin", None);
    match assert_first_step_untouched(&result) {
        Structure::LinkedList(view) => assert_eq!(view.values_in_order(), vec![1, 2, 3]),
        other => panic!("unexpected payload {:?}", other.kind()),
    }
    match &result.last().expect("non-empty run").structure {
        Structure::LinkedList(view) => assert_eq!(view.values_in_order(), vec![2, 3]),
        other => panic!("unexpected payload {:?}", other.kind()),
    }
}

#[test]
fn test_tree_snapshots_survive_later_inserts() {
    let result = operation_run("bst", "50, 30, 70", "insert", Some("60"));
    let first = assert_first_step_untouched(&result);
    let tree = first.as_tree().expect("tree");
    assert_eq!(tree.nodes.len(), 3);
    assert!(tree.nodes.iter().all(|n| n.left.is_none() || n.value == 50));
}

#[test]
fn test_hash_table_snapshots_survive_a_delete() {
    let result = operation_run("hash-table", "5, 16, 27", "delete", Some("16"));
    let first = match assert_first_step_untouched(&result) {
        Structure::HashTable(view) => view,
        other => panic!("unexpected payload {:?}", other.kind()),
    };
    assert!(first.slots.contains(&HashSlot::Occupied(16)));
    assert!(!first.slots.contains(&HashSlot::Deleted));

    match &result.last().expect("non-empty run").structure {
        Structure::HashTable(view) => assert!(view.slots.contains(&HashSlot::Deleted)),
        other => panic!("unexpected payload {:?}", other.kind()),
    }
}

#[test]
fn test_dp_table_snapshots_survive_later_fills() {
    let result = run(
        "knapsack-01",
        RawInput {
            items: Some("1:3, 2:4".to_string()),
            capacity: Some("3".to_string()),
            ..Default::default()
        },
    );
    match assert_first_step_untouched(&result) {
        Structure::DpTable(view) => {
            assert!(view.table.iter().flatten().all(|cell| *cell == Scalar::Number(0)));
        }
        other => panic!("unexpected payload {:?}", other.kind()),
    }
}

#[test]
fn test_postfix_division_rounds_toward_negative_infinity() {
    for (expression, expected) in [("7 -2 /", "Final result: -4"), ("-7 2 /", "Final result: -4")] {
        let result = run(
            "postfix-eval",
            RawInput {
                expression: Some(expression.to_string()),
                ..Default::default()
            },
        );
        assert_eq!(result.last().expect("non-empty run").message, expected);
    }
}

#[test]
fn test_every_registered_algorithm_records_a_trace() {
    for spec in registry() {
        let result = run(spec.id, RawInput::sample(spec));
        assert!(!result.is_empty(), "{} recorded nothing", spec.id);
        assert!(
            result.steps().iter().all(|s| !s.message.is_empty()),
            "{} recorded a step without narration",
            spec.id
        );
    }
}

#[test]
fn test_seeded_randomized_quick_sort_is_reproducible() {
    let raw = RawInput {
        values: Some("9, 4, 7, 1, 8, 2, 6".to_string()),
        ..Default::default()
    };
    let a = Dispatcher::with_seed(Some(99)).run("randomized-quick-sort", &raw).unwrap();
    let b = Dispatcher::with_seed(Some(99)).run("randomized-quick-sort", &raw).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_linked_list_delete_end() {
    let result = run(
        "linked-list",
        RawInput {
            values: Some("1, 2, 3".to_string()),
            operation: Some("delete-end".to_string()),
            ..Default::default()
        },
    );
    let last = result.last().expect("non-empty run");
    match &last.structure {
        Structure::LinkedList(view) => assert_eq!(view.values_in_order(), vec![1, 2]),
        other => panic!("unexpected payload {:?}", other.kind()),
    }
}

#[test]
fn test_dijkstra_reports_shortest_distances() {
    let result = run(
        "dijkstra",
        RawInput {
            graph: Some("0-1:4, 0-2:1, 2-1:2, 1-3:1".to_string()),
            start: Some("0".to_string()),
            ..Default::default()
        },
    );
    let last = result.last().expect("non-empty run");
    assert_eq!(last.variables.get("dist[1]").and_then(|v| v.as_number()), Some(3));
    assert_eq!(last.variables.get("dist[3]").and_then(|v| v.as_number()), Some(4));
}

#[test]
fn test_postfix_division_by_zero_is_narrated() {
    let result = run(
        "postfix-eval",
        RawInput {
            expression: Some("4 0 /".to_string()),
            ..Default::default()
        },
    );
    let last = result.last().expect("non-empty run");
    assert!(last.message.to_lowercase().contains("division by zero"), "{}", last.message);
}
