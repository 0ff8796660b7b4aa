//! Structure payloads carried by a step
//!
//! Every [`Step`](super::Step) holds exactly one [`Structure`]. Each variant is
//! an owned, flat copy of the algorithm's working data at the moment the step
//! was recorded. Linked lists, trees and graphs use integer ids into a node
//! table instead of references, so capturing a snapshot is a plain clone of
//! that table.
//!
//! The `capture` constructors are the only way algorithms build payloads from
//! live working storage; each one copies what it is given.

use super::Scalar;
use std::fmt;

/// Advisory highlight category for a subset of elements.
///
/// Highlights never influence control flow; renderers use them to pick colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightType {
    Compare,
    Swap,
    Found,
    Visiting,
    Visited,
    Current,
    Pivot,
    Sorted,
    Path,
    Selected,
    Candidate,
    Low,
    High,
    Mid,
}

impl HighlightType {
    pub const ALL: [HighlightType; 14] = [
        HighlightType::Compare,
        HighlightType::Swap,
        HighlightType::Found,
        HighlightType::Visiting,
        HighlightType::Visited,
        HighlightType::Current,
        HighlightType::Pivot,
        HighlightType::Sorted,
        HighlightType::Path,
        HighlightType::Selected,
        HighlightType::Candidate,
        HighlightType::Low,
        HighlightType::High,
        HighlightType::Mid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightType::Compare => "compare",
            HighlightType::Swap => "swap",
            HighlightType::Found => "found",
            HighlightType::Visiting => "visiting",
            HighlightType::Visited => "visited",
            HighlightType::Current => "current",
            HighlightType::Pivot => "pivot",
            HighlightType::Sorted => "sorted",
            HighlightType::Path => "path",
            HighlightType::Selected => "selected",
            HighlightType::Candidate => "candidate",
            HighlightType::Low => "low",
            HighlightType::High => "high",
            HighlightType::Mid => "mid",
        }
    }
}

impl fmt::Display for HighlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A highlighted subset of a payload's elements.
///
/// `T` is an index (arrays, stacks, queues, hash slots), a node id (lists,
/// trees, graphs) or a [`Cell`] (matrices, DP tables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight<T> {
    pub kind: HighlightType,
    pub targets: Vec<T>,
}

impl<T: PartialEq> Highlight<T> {
    pub fn new(kind: HighlightType, targets: impl Into<Vec<T>>) -> Self {
        Highlight {
            kind,
            targets: targets.into(),
        }
    }

    pub fn contains(&self, target: &T) -> bool {
        self.targets.contains(target)
    }
}

/// Look up the highlight kind applied to `target`, if any.
pub fn highlight_of<T: PartialEq>(highlight: &Option<Highlight<T>>, target: &T) -> Option<HighlightType> {
    highlight
        .as_ref()
        .filter(|h| h.contains(target))
        .map(|h| h.kind)
}

/// A `(row, col)` position in a matrix or DP table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

/// Discriminant of [`Structure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Array,
    LinkedList,
    Stack,
    Queue,
    Tree,
    HashTable,
    Graph,
    Matrix,
    DpTable,
}

impl StructureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::LinkedList => "linked-list",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::Tree => "tree",
            StructureKind::HashTable => "hash-table",
            StructureKind::Graph => "graph",
            StructureKind::Matrix => "matrix",
            StructureKind::DpTable => "dp-table",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single structural payload of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Array(ArrayView),
    LinkedList(LinkedListView),
    Stack(StackView),
    Queue(QueueView),
    Tree(TreeView),
    HashTable(HashTableView),
    Graph(GraphView),
    Matrix(MatrixView),
    DpTable(DpTableView),
}

impl Structure {
    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Array(_) => StructureKind::Array,
            Structure::LinkedList(_) => StructureKind::LinkedList,
            Structure::Stack(_) => StructureKind::Stack,
            Structure::Queue(_) => StructureKind::Queue,
            Structure::Tree(_) => StructureKind::Tree,
            Structure::HashTable(_) => StructureKind::HashTable,
            Structure::Graph(_) => StructureKind::Graph,
            Structure::Matrix(_) => StructureKind::Matrix,
            Structure::DpTable(_) => StructureKind::DpTable,
        }
    }

    /// Highlight category of this payload, if anything is highlighted.
    pub fn highlight_type(&self) -> Option<HighlightType> {
        match self {
            Structure::Array(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::LinkedList(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::Stack(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::Queue(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::Tree(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::HashTable(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::Graph(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::Matrix(v) => v.highlight.as_ref().map(|h| h.kind),
            Structure::DpTable(v) => v.highlight.as_ref().map(|h| h.kind),
        }
    }

    pub fn as_array(&self) -> Option<&ArrayView> {
        match self {
            Structure::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeView> {
        match self {
            Structure::Tree(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! structure_from {
    ($($view:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$view> for Structure {
                fn from(view: $view) -> Self {
                    Structure::$variant(view)
                }
            }
        )*
    };
}

structure_from! {
    ArrayView => Array,
    LinkedListView => LinkedList,
    StackView => Stack,
    QueueView => Queue,
    TreeView => Tree,
    HashTableView => HashTable,
    GraphView => Graph,
    MatrixView => Matrix,
    DpTableView => DpTable,
}

// ========== Array ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayView {
    pub values: Vec<i64>,
    pub highlight: Option<Highlight<usize>>,
}

impl ArrayView {
    pub fn capture(values: &[i64]) -> Self {
        ArrayView {
            values: values.to_vec(),
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, indices: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, indices));
        self
    }

    /// Whether the values are in non-decreasing order
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

// ========== Linked list ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub id: usize,
    pub value: i64,
    pub next: Option<usize>,
    pub prev: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedListView {
    pub nodes: Vec<ListNode>,
    pub head: Option<usize>,
    pub tail: Option<usize>,
    pub highlight: Option<Highlight<usize>>,
}

impl LinkedListView {
    pub fn capture(nodes: &[ListNode], head: Option<usize>, tail: Option<usize>) -> Self {
        LinkedListView {
            nodes: nodes.to_vec(),
            head,
            tail,
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, ids: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, ids));
        self
    }

    pub fn node(&self, id: usize) -> Option<&ListNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node values in link order starting from `head`.
    ///
    /// Stops after visiting every node once so a malformed table cannot loop.
    pub fn values_in_order(&self) -> Vec<i64> {
        let mut values = Vec::new();
        let mut current = self.head;
        while let Some(id) = current {
            if values.len() > self.nodes.len() {
                break;
            }
            match self.node(id) {
                Some(node) => {
                    values.push(node.value);
                    current = node.next;
                }
                None => break,
            }
        }
        values
    }
}

// ========== Stack and queue ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackView {
    pub items: Vec<i64>,
    pub highlight: Option<Highlight<usize>>,
}

impl StackView {
    pub fn capture(items: &[i64]) -> Self {
        StackView {
            items: items.to_vec(),
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, indices: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, indices));
        self
    }

    /// Index of the top element, `None` when empty
    pub fn top(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueView {
    pub items: Vec<i64>,
    pub capacity: usize,
    pub highlight: Option<Highlight<usize>>,
}

impl QueueView {
    pub fn capture(items: &[i64], capacity: usize) -> Self {
        QueueView {
            items: items.to_vec(),
            capacity: capacity.max(items.len()),
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, indices: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, indices));
        self
    }

    pub fn front(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn rear(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }
}

// ========== Tree ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: usize,
    pub value: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub parent: Option<usize>,
}

impl TreeNode {
    pub fn leaf(id: usize, value: i64) -> Self {
        TreeNode {
            id,
            value,
            left: None,
            right: None,
            parent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    pub nodes: Vec<TreeNode>,
    pub root: Option<usize>,
    pub highlight: Option<Highlight<usize>>,
}

impl TreeView {
    pub fn capture(nodes: &[TreeNode], root: Option<usize>) -> Self {
        TreeView {
            nodes: nodes.to_vec(),
            root,
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, ids: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, ids));
        self
    }

    pub fn node(&self, id: usize) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

// ========== Hash table ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashSlot {
    Empty,
    Occupied(i64),
    /// Tombstone left by a delete; probing continues past it
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTableView {
    pub slots: Vec<HashSlot>,
    pub highlight: Option<Highlight<usize>>,
}

impl HashTableView {
    pub fn capture(slots: &[HashSlot]) -> Self {
        HashTableView {
            slots: slots.to_vec(),
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, indices: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, indices));
        self
    }
}

// ========== Graph ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphNode {
    pub id: usize,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub weight: i64,
    pub directed: bool,
}

impl GraphEdge {
    /// The endpoint opposite `node` if this edge can be followed from it
    pub fn neighbor_of(&self, node: usize) -> Option<usize> {
        if self.from == node {
            Some(self.to)
        } else if !self.directed && self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub weighted: bool,
    pub highlight: Option<Highlight<usize>>,
    pub highlighted_edges: Vec<(usize, usize)>,
}

impl GraphView {
    pub fn capture(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
        GraphView {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            weighted: false,
            highlight: None,
            highlighted_edges: Vec::new(),
        }
    }

    pub fn weighted(mut self) -> Self {
        self.weighted = true;
        self
    }

    pub fn highlight(mut self, kind: HighlightType, ids: impl Into<Vec<usize>>) -> Self {
        self.highlight = Some(Highlight::new(kind, ids));
        self
    }

    pub fn edge(mut self, from: usize, to: usize) -> Self {
        self.highlighted_edges.push((from, to));
        self
    }

    pub fn is_directed(&self) -> bool {
        self.edges.iter().any(|e| e.directed)
    }
}

// ========== Matrix and DP table ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixView {
    pub data: Vec<Vec<i64>>,
    pub highlight: Option<Highlight<Cell>>,
}

impl MatrixView {
    pub fn capture(data: &[Vec<i64>]) -> Self {
        MatrixView {
            data: data.to_vec(),
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, cells: impl Into<Vec<Cell>>) -> Self {
        self.highlight = Some(Highlight::new(kind, cells));
        self
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn cols(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DpTableView {
    pub table: Vec<Vec<Scalar>>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub highlight: Option<Highlight<Cell>>,
}

impl DpTableView {
    pub fn capture<T>(table: &[Vec<T>], row_labels: &[String], col_labels: &[String]) -> Self
    where
        T: Clone + Into<Scalar>,
    {
        DpTableView {
            table: table
                .iter()
                .map(|row| row.iter().cloned().map(Into::into).collect())
                .collect(),
            row_labels: row_labels.to_vec(),
            col_labels: col_labels.to_vec(),
            highlight: None,
        }
    }

    pub fn highlight(mut self, kind: HighlightType, cells: impl Into<Vec<Cell>>) -> Self {
        self.highlight = Some(Highlight::new(kind, cells));
        self
    }

    pub fn rows(&self) -> usize {
        self.table.len()
    }

    pub fn cols(&self) -> usize {
        self.table.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Scalar> {
        self.table.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_copies_working_storage() {
        let mut working = vec![3, 1, 2];
        let view = ArrayView::capture(&working);
        working[0] = 99;
        assert_eq!(view.values, vec![3, 1, 2]);
    }

    #[test]
    fn linked_list_order_follows_links_not_table_order() {
        let nodes = vec![
            ListNode { id: 0, value: 10, next: None, prev: None },
            ListNode { id: 1, value: 20, next: Some(0), prev: None },
        ];
        let view = LinkedListView::capture(&nodes, Some(1), Some(0));
        assert_eq!(view.values_in_order(), vec![20, 10]);
    }

    #[test]
    fn linked_list_order_survives_cycles() {
        let nodes = vec![ListNode { id: 0, value: 1, next: Some(0), prev: None }];
        let view = LinkedListView::capture(&nodes, Some(0), Some(0));
        assert!(view.values_in_order().len() <= 2);
    }

    #[test]
    fn structure_reports_highlight_kind() {
        let s: Structure = ArrayView::capture(&[1, 2])
            .highlight(HighlightType::Pivot, [1])
            .into();
        assert_eq!(s.kind(), StructureKind::Array);
        assert_eq!(s.highlight_type(), Some(HighlightType::Pivot));
    }

    #[test]
    fn undirected_edge_is_followed_both_ways() {
        let edge = GraphEdge { from: 1, to: 2, weight: 1, directed: false };
        assert_eq!(edge.neighbor_of(1), Some(2));
        assert_eq!(edge.neighbor_of(2), Some(1));
        let directed = GraphEdge { directed: true, ..edge };
        assert_eq!(directed.neighbor_of(2), None);
    }
}
