//! Input kinds, raw form fields and their parsers

use super::errors::InputError;
use super::registry::AlgorithmSpec;
use crate::trace::{GraphEdge, GraphNode};
use std::fmt;
use std::str::FromStr;

/// Largest board offered for N-Queens
pub const MAX_QUEENS: i64 = 10;
/// Largest knapsack capacity; the table has one column per unit
pub const MAX_CAPACITY: i64 = 200;
/// Most knapsack items; every step copies the whole table
pub const MAX_ITEMS: i64 = 20;

/// The closed set of input shapes an algorithm can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Array,
    ArrayTarget,
    ArrayOperation,
    TreeOperation,
    Strings,
    ItemsCapacity,
    GraphNode,
    Number,
    Frequencies,
    Expression,
    Dimensions,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Array => "array",
            InputKind::ArrayTarget => "array+target",
            InputKind::ArrayOperation => "array+operation",
            InputKind::TreeOperation => "tree+operation",
            InputKind::Strings => "two-strings",
            InputKind::ItemsCapacity => "items+capacity",
            InputKind::GraphNode => "graph+node",
            InputKind::Number => "single-number",
            InputKind::Frequencies => "frequency-list",
            InputKind::Expression => "expression-string",
            InputKind::Dimensions => "dimension-list",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structure operations selectable for operation-kind inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InsertBegin,
    InsertEnd,
    DeleteBegin,
    DeleteEnd,
    Search,
    Traverse,
    Push,
    Pop,
    Peek,
    IsEmpty,
    Enqueue,
    Dequeue,
    Insert,
    Delete,
    Inorder,
    Preorder,
    Postorder,
    Levelorder,
}

impl Operation {
    pub const ALL: [Operation; 18] = [
        Operation::InsertBegin,
        Operation::InsertEnd,
        Operation::DeleteBegin,
        Operation::DeleteEnd,
        Operation::Search,
        Operation::Traverse,
        Operation::Push,
        Operation::Pop,
        Operation::Peek,
        Operation::IsEmpty,
        Operation::Enqueue,
        Operation::Dequeue,
        Operation::Insert,
        Operation::Delete,
        Operation::Inorder,
        Operation::Preorder,
        Operation::Postorder,
        Operation::Levelorder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::InsertBegin => "insert-begin",
            Operation::InsertEnd => "insert-end",
            Operation::DeleteBegin => "delete-begin",
            Operation::DeleteEnd => "delete-end",
            Operation::Search => "search",
            Operation::Traverse => "traverse",
            Operation::Push => "push",
            Operation::Pop => "pop",
            Operation::Peek => "peek",
            Operation::IsEmpty => "is-empty",
            Operation::Enqueue => "enqueue",
            Operation::Dequeue => "dequeue",
            Operation::Insert => "insert",
            Operation::Delete => "delete",
            Operation::Inorder => "inorder",
            Operation::Preorder => "preorder",
            Operation::Postorder => "postorder",
            Operation::Levelorder => "levelorder",
        }
    }

    /// Whether the operation acts on a supplied value
    pub fn needs_operand(self) -> bool {
        matches!(
            self,
            Operation::InsertBegin
                | Operation::InsertEnd
                | Operation::Search
                | Operation::Push
                | Operation::Enqueue
                | Operation::Insert
                | Operation::Delete
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| InputError::UnknownOperation { name: name.to_string() })
    }
}

/// Initial values plus the operation to apply to the built structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationInput {
    pub values: Vec<i64>,
    pub operation: Operation,
    pub operand: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: usize,
    pub value: i64,
}

/// A parsed graph: nodes sorted by id, directed edges in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphInput {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequency {
    pub symbol: String,
    pub freq: i64,
}

/// Validated, typed input for one algorithm run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Array(Vec<i64>),
    ArrayTarget { values: Vec<i64>, target: i64 },
    ArrayOperation(OperationInput),
    TreeOperation(OperationInput),
    Strings { first: String, second: String },
    ItemsCapacity { items: Vec<Item>, capacity: usize },
    GraphNode { graph: GraphInput, start: usize },
    Number(usize),
    Frequencies(Vec<Frequency>),
    Expression(String),
    Dimensions(Vec<u64>),
}

impl Input {
    pub fn kind(&self) -> InputKind {
        match self {
            Input::Array(_) => InputKind::Array,
            Input::ArrayTarget { .. } => InputKind::ArrayTarget,
            Input::ArrayOperation(_) => InputKind::ArrayOperation,
            Input::TreeOperation(_) => InputKind::TreeOperation,
            Input::Strings { .. } => InputKind::Strings,
            Input::ItemsCapacity { .. } => InputKind::ItemsCapacity,
            Input::GraphNode { .. } => InputKind::GraphNode,
            Input::Number(_) => InputKind::Number,
            Input::Frequencies(_) => InputKind::Frequencies,
            Input::Expression(_) => InputKind::Expression,
            Input::Dimensions(_) => InputKind::Dimensions,
        }
    }
}

/// Text form fields as typed by the user; only the fields relevant to the
/// selected algorithm's input kind are read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub values: Option<String>,
    pub target: Option<String>,
    pub operation: Option<String>,
    pub operand: Option<String>,
    pub first: Option<String>,
    pub second: Option<String>,
    pub items: Option<String>,
    pub capacity: Option<String>,
    pub graph: Option<String>,
    pub start: Option<String>,
    pub n: Option<String>,
    pub frequencies: Option<String>,
    pub expression: Option<String>,
    pub dimensions: Option<String>,
}

impl RawInput {
    /// Prefilled form for `spec`, selecting its first declared operation
    pub fn sample(spec: &AlgorithmSpec) -> Self {
        RawInput {
            values: Some("10, 5, 8, 3, 1, 9".to_string()),
            target: Some("8".to_string()),
            operation: spec.operations.first().map(|op| op.as_str().to_string()),
            operand: Some("15".to_string()),
            first: Some("ABCDGH".to_string()),
            second: Some("AEDFHR".to_string()),
            items: Some("10:60, 20:100, 30:120".to_string()),
            capacity: Some("50".to_string()),
            graph: Some("0-1:2, 0-2:4, 1-2:1, 1-3:7, 2-3:3".to_string()),
            start: Some("0".to_string()),
            n: Some("4".to_string()),
            frequencies: Some("a:5, b:9, c:12, d:13, e:16".to_string()),
            expression: Some("5 3 + 2 *".to_string()),
            dimensions: Some("10, 30, 5, 60".to_string()),
        }
    }

    /// Overlay every field that is set in `other`
    pub fn merge(mut self, other: RawInput) -> Self {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        overlay!(
            values, target, operation, operand, first, second, items, capacity, graph, start, n,
            frequencies, expression, dimensions
        );
        self
    }
}

/// Validate `raw` against the input kind and operations `spec` declares
pub fn parse_input(spec: &AlgorithmSpec, raw: &RawInput) -> Result<Input, InputError> {
    let input = match spec.emitter.kind() {
        InputKind::Array => Input::Array(parse_numbers(required(&raw.values, "values")?)?),
        InputKind::ArrayTarget => Input::ArrayTarget {
            values: parse_numbers(required(&raw.values, "values")?)?,
            target: parse_number("target", required(&raw.target, "target")?)?,
        },
        InputKind::ArrayOperation => Input::ArrayOperation(parse_operation_input(spec, raw)?),
        InputKind::TreeOperation => Input::TreeOperation(parse_operation_input(spec, raw)?),
        InputKind::Strings => Input::Strings {
            first: required(&raw.first, "first")?.trim().to_string(),
            second: required(&raw.second, "second")?.trim().to_string(),
        },
        InputKind::ItemsCapacity => Input::ItemsCapacity {
            items: parse_items(required(&raw.items, "items")?)?,
            capacity: parse_bounded("capacity", required(&raw.capacity, "capacity")?, 0, MAX_CAPACITY)?,
        },
        InputKind::GraphNode => Input::GraphNode {
            graph: parse_graph(required(&raw.graph, "graph")?)?,
            start: parse_bounded("start", required(&raw.start, "start")?, 0, i64::MAX)?,
        },
        InputKind::Number => Input::Number(parse_bounded("n", required(&raw.n, "n")?, 1, MAX_QUEENS)?),
        InputKind::Frequencies => Input::Frequencies(parse_frequencies(required(&raw.frequencies, "frequencies")?)?),
        InputKind::Expression => Input::Expression(required(&raw.expression, "expression")?.trim().to_string()),
        InputKind::Dimensions => Input::Dimensions(parse_dimensions(required(&raw.dimensions, "dimensions")?)?),
    };
    Ok(input)
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, InputError> {
    field.as_deref().ok_or(InputError::MissingField { field: name })
}

fn parse_operation_input(spec: &AlgorithmSpec, raw: &RawInput) -> Result<OperationInput, InputError> {
    let name = raw
        .operation
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InputError::MissingOperation)?;
    let operation: Operation = name.parse()?;
    if !spec.operations.contains(&operation) {
        return Err(InputError::UnsupportedOperation {
            algorithm: spec.id,
            operation,
        });
    }

    let operand = match raw.operand.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) if operation.needs_operand() => Some(parse_number("operand", text)?),
        // a value typed for an operation that ignores it is dropped
        Some(_) => None,
        None if operation.needs_operand() => return Err(InputError::MissingOperand { operation }),
        None => None,
    };

    Ok(OperationInput {
        values: parse_numbers(raw.values.as_deref().unwrap_or_default())?,
        operation,
        operand,
    })
}

/// Parse integers separated by commas and/or whitespace
pub fn parse_numbers(text: &str) -> Result<Vec<i64>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|_| InputError::InvalidNumber {
                field: "values",
                token: token.to_string(),
            })
        })
        .collect()
}

pub fn parse_number(field: &'static str, text: &str) -> Result<i64, InputError> {
    let token = text.trim();
    token.parse::<i64>().map_err(|_| InputError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

fn parse_bounded(field: &'static str, text: &str, min: i64, max: i64) -> Result<usize, InputError> {
    let value = parse_number(field, text)?;
    if value < min || value > max {
        return Err(InputError::OutOfRange { field, value, min, max });
    }
    usize::try_from(value).map_err(|_| InputError::OutOfRange { field, value, min, max })
}

/// Split a `key:value` entry
fn split_pair<'a>(entry: &'a str, what: &'static str, expected: &'static str) -> Result<(&'a str, &'a str), InputError> {
    entry
        .split_once(':')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .ok_or_else(|| InputError::Malformed {
            what,
            entry: entry.to_string(),
            expected,
        })
}

fn entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|e| !e.is_empty())
}

/// Parse `weight:value, ...`, at most [`MAX_ITEMS`] entries
pub fn parse_items(text: &str) -> Result<Vec<Item>, InputError> {
    let count = entries(text).count();
    if count as i64 > MAX_ITEMS {
        return Err(InputError::OutOfRange {
            field: "items",
            value: count as i64,
            min: 0,
            max: MAX_ITEMS,
        });
    }
    entries(text)
        .map(|entry| -> Result<Item, InputError> {
            let malformed = || InputError::Malformed {
                what: "item",
                entry: entry.to_string(),
                expected: "weight:value",
            };
            let (weight, value) = split_pair(entry, "item", "weight:value")?;
            Ok(Item {
                weight: weight.parse().map_err(|_| malformed())?,
                value: value.parse().map_err(|_| malformed())?,
            })
        })
        .collect()
}

/// Parse `from-to[:weight], ...` into a directed graph with default weight 1
pub fn parse_graph(text: &str) -> Result<GraphInput, InputError> {
    let mut edges = Vec::new();
    for entry in entries(text) {
        let malformed = || InputError::Malformed {
            what: "edge",
            entry: entry.to_string(),
            expected: "from-to[:weight]",
        };
        let (pair, weight) = match entry.split_once(':') {
            Some((pair, weight)) => (pair, weight.trim().parse::<i64>().map_err(|_| malformed())?),
            None => (entry, 1),
        };
        let (from, to) = pair.split_once('-').ok_or_else(malformed)?;
        edges.push(GraphEdge {
            from: from.trim().parse().map_err(|_| malformed())?,
            to: to.trim().parse().map_err(|_| malformed())?,
            weight,
            directed: true,
        });
    }

    let mut ids: Vec<usize> = edges.iter().flat_map(|e| [e.from, e.to]).collect();
    ids.sort_unstable();
    ids.dedup();
    let nodes = ids
        .into_iter()
        .map(|id| GraphNode {
            id,
            value: i64::try_from(id).unwrap_or(i64::MAX),
        })
        .collect();
    Ok(GraphInput { nodes, edges })
}

/// Parse `symbol:freq, ...`; frequencies must be positive
pub fn parse_frequencies(text: &str) -> Result<Vec<Frequency>, InputError> {
    entries(text)
        .map(|entry| -> Result<Frequency, InputError> {
            let (symbol, freq) = split_pair(entry, "frequency", "symbol:freq")?;
            match freq.parse::<i64>() {
                Ok(freq) if freq > 0 => Ok(Frequency {
                    symbol: symbol.to_string(),
                    freq,
                }),
                _ => Err(InputError::Malformed {
                    what: "frequency",
                    entry: entry.to_string(),
                    expected: "symbol:freq with a positive freq",
                }),
            }
        })
        .collect()
}

/// Parse a chain of matrix dimensions; at least two are needed for one matrix
pub fn parse_dimensions(text: &str) -> Result<Vec<u64>, InputError> {
    let dims = entries(text)
        .map(|token| {
            token
                .parse::<u64>()
                .ok()
                .filter(|&d| d > 0)
                .ok_or_else(|| InputError::InvalidNumber {
                    field: "dimensions",
                    token: token.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if dims.len() < 2 {
        return Err(InputError::TooFewDimensions { min: 2, got: dims.len() });
    }
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_commas_and_whitespace() {
        assert_eq!(parse_numbers("5, 3 8,,1\t-2").unwrap(), vec![5, 3, 8, 1, -2]);
        assert_eq!(parse_numbers("  ").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn bad_number_names_the_token() {
        assert_eq!(
            parse_numbers("1, two, 3"),
            Err(InputError::InvalidNumber {
                field: "values",
                token: "two".to_string()
            })
        );
    }

    #[test]
    fn graph_nodes_are_sorted_and_distinct() {
        let graph = parse_graph("3-1:5, 1-2").unwrap();
        let ids: Vec<usize> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(graph.edges[1].weight, 1);
        assert!(graph.edges.iter().all(|e| e.directed));
    }

    #[test]
    fn malformed_edge_is_rejected() {
        assert!(matches!(parse_graph("0:1"), Err(InputError::Malformed { what: "edge", .. })));
    }

    #[test]
    fn items_and_frequencies_parse_pairs() {
        assert_eq!(
            parse_items("10:60, 20:100").unwrap(),
            vec![Item { weight: 10, value: 60 }, Item { weight: 20, value: 100 }]
        );
        assert_eq!(parse_frequencies("a:5").unwrap()[0].freq, 5);
        assert!(parse_frequencies("a:0").is_err());
        assert!(parse_items("10-60").is_err());
    }

    #[test]
    fn item_count_is_capped() {
        let text = vec!["1:1"; 21].join(", ");
        assert_eq!(
            parse_items(&text),
            Err(InputError::OutOfRange {
                field: "items",
                value: 21,
                min: 0,
                max: MAX_ITEMS
            })
        );
        assert_eq!(parse_items(&vec!["1:1"; 20].join(", ")).unwrap().len(), 20);
    }

    #[test]
    fn dimensions_need_two_entries() {
        assert_eq!(parse_dimensions("10"), Err(InputError::TooFewDimensions { min: 2, got: 1 }));
        assert_eq!(parse_dimensions("10, 20").unwrap(), vec![10, 20]);
    }

    #[test]
    fn operations_parse_from_kebab_case() {
        assert_eq!("is-empty".parse::<Operation>().unwrap(), Operation::IsEmpty);
        assert_eq!(" Insert-Begin ".parse::<Operation>().unwrap(), Operation::InsertBegin);
        assert!("sideways".parse::<Operation>().is_err());
    }

    #[test]
    fn merge_keeps_sample_fields_that_are_not_overridden() {
        let base = RawInput {
            values: Some("1".into()),
            target: Some("2".into()),
            ..RawInput::default()
        };
        let merged = base.merge(RawInput {
            target: Some("9".into()),
            ..RawInput::default()
        });
        assert_eq!(merged.values.as_deref(), Some("1"));
        assert_eq!(merged.target.as_deref(), Some("9"));
    }
}
