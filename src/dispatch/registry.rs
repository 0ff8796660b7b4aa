//! The static algorithm registry

use super::input::{Frequency, GraphInput, Input, InputKind, Item, Operation, OperationInput};
use crate::algorithms::{
    backtracking, bst, dynamic, expression, graphs, greedy, hashing, linked_list, queue, searching,
    sorting, stack, ExecResult,
};
use crate::trace::Recorder;
use std::fmt;

pub type ArrayFn = fn(&[i64], &mut Recorder) -> ExecResult<()>;
pub type TargetFn = fn(&[i64], i64, &mut Recorder) -> ExecResult<()>;
pub type OperationFn = fn(&OperationInput, &mut Recorder) -> ExecResult<()>;
pub type StringsFn = fn(&str, &str, &mut Recorder) -> ExecResult<()>;
pub type ItemsFn = fn(&[Item], usize, &mut Recorder) -> ExecResult<()>;
pub type GraphFn = fn(&GraphInput, usize, &mut Recorder) -> ExecResult<()>;
pub type NumberFn = fn(usize, &mut Recorder) -> ExecResult<()>;
pub type FrequenciesFn = fn(&[Frequency], &mut Recorder) -> ExecResult<()>;
pub type ExpressionFn = fn(&str, &mut Recorder) -> ExecResult<()>;
pub type DimensionsFn = fn(&[u64], &mut Recorder) -> ExecResult<()>;

/// A step emitter, typed by the input kind it accepts
#[derive(Clone, Copy)]
pub enum Emitter {
    Array(ArrayFn),
    ArrayTarget(TargetFn),
    ArrayOperation(OperationFn),
    TreeOperation(OperationFn),
    Strings(StringsFn),
    ItemsCapacity(ItemsFn),
    GraphNode(GraphFn),
    Number(NumberFn),
    Frequencies(FrequenciesFn),
    Expression(ExpressionFn),
    Dimensions(DimensionsFn),
}

impl Emitter {
    pub fn kind(&self) -> InputKind {
        match self {
            Emitter::Array(_) => InputKind::Array,
            Emitter::ArrayTarget(_) => InputKind::ArrayTarget,
            Emitter::ArrayOperation(_) => InputKind::ArrayOperation,
            Emitter::TreeOperation(_) => InputKind::TreeOperation,
            Emitter::Strings(_) => InputKind::Strings,
            Emitter::ItemsCapacity(_) => InputKind::ItemsCapacity,
            Emitter::GraphNode(_) => InputKind::GraphNode,
            Emitter::Number(_) => InputKind::Number,
            Emitter::Frequencies(_) => InputKind::Frequencies,
            Emitter::Expression(_) => InputKind::Expression,
            Emitter::Dimensions(_) => InputKind::Dimensions,
        }
    }

    /// Run the emitter on matching input; `None` if the kinds differ
    pub fn invoke(&self, input: &Input, rec: &mut Recorder) -> Option<ExecResult<()>> {
        let outcome = match (*self, input) {
            (Emitter::Array(f), Input::Array(values)) => f(values, rec),
            (Emitter::ArrayTarget(f), Input::ArrayTarget { values, target }) => f(values, *target, rec),
            (Emitter::ArrayOperation(f), Input::ArrayOperation(op)) => f(op, rec),
            (Emitter::TreeOperation(f), Input::TreeOperation(op)) => f(op, rec),
            (Emitter::Strings(f), Input::Strings { first, second }) => f(first, second, rec),
            (Emitter::ItemsCapacity(f), Input::ItemsCapacity { items, capacity }) => f(items, *capacity, rec),
            (Emitter::GraphNode(f), Input::GraphNode { graph, start }) => f(graph, *start, rec),
            (Emitter::Number(f), Input::Number(n)) => f(*n, rec),
            (Emitter::Frequencies(f), Input::Frequencies(freqs)) => f(freqs, rec),
            (Emitter::Expression(f), Input::Expression(expr)) => f(expr, rec),
            (Emitter::Dimensions(f), Input::Dimensions(dims)) => f(dims, rec),
            _ => return None,
        };
        Some(outcome)
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Emitter").field(&self.kind()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Core,
    ArraysAndLists,
    StacksAndQueues,
    TreesAndHashing,
    Graphs,
    DivideAndConquer,
    DynamicProgramming,
    Backtracking,
    Greedy,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Core => "Core Algorithms",
            Category::ArraysAndLists => "Arrays & Linked Lists",
            Category::StacksAndQueues => "Stacks & Queues",
            Category::TreesAndHashing => "Trees & Hashing",
            Category::Graphs => "Graphs",
            Category::DivideAndConquer => "Divide & Conquer",
            Category::DynamicProgramming => "Dynamic Programming",
            Category::Backtracking => "Backtracking",
            Category::Greedy => "Greedy Algorithms",
        }
    }
}

/// Registry entry describing one visualizable algorithm
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Operations offered by operation-kind algorithms, empty otherwise
    pub operations: &'static [Operation],
    pub pseudocode: &'static str,
    pub emitter: Emitter,
}

impl AlgorithmSpec {
    pub fn input_kind(&self) -> InputKind {
        self.emitter.kind()
    }

    pub fn pseudocode_lines(&self) -> impl Iterator<Item = &'static str> {
        self.pseudocode.lines()
    }
}

static REGISTRY: &[AlgorithmSpec] = &[
    AlgorithmSpec {
        id: "bubble-sort",
        name: "Bubble Sort",
        category: Category::Core,
        description: "Simple comparison-based sorting",
        operations: &[],
        pseudocode: sorting::BUBBLE_SORT_CODE,
        emitter: Emitter::Array(sorting::bubble_sort),
    },
    AlgorithmSpec {
        id: "selection-sort",
        name: "Selection Sort",
        category: Category::Core,
        description: "Select the minimum and swap it into place",
        operations: &[],
        pseudocode: sorting::SELECTION_SORT_CODE,
        emitter: Emitter::Array(sorting::selection_sort),
    },
    AlgorithmSpec {
        id: "insertion-sort",
        name: "Insertion Sort",
        category: Category::Core,
        description: "Insert each element into the sorted prefix",
        operations: &[],
        pseudocode: sorting::INSERTION_SORT_CODE,
        emitter: Emitter::Array(sorting::insertion_sort),
    },
    AlgorithmSpec {
        id: "linear-search",
        name: "Linear Search",
        category: Category::Core,
        description: "Sequential search",
        operations: &[],
        pseudocode: searching::LINEAR_SEARCH_CODE,
        emitter: Emitter::ArrayTarget(searching::linear_search),
    },
    AlgorithmSpec {
        id: "binary-search",
        name: "Binary Search",
        category: Category::Core,
        description: "Halve a sorted range each step",
        operations: &[],
        pseudocode: searching::BINARY_SEARCH_CODE,
        emitter: Emitter::ArrayTarget(searching::binary_search),
    },
    AlgorithmSpec {
        id: "linked-list",
        name: "Singly Linked List",
        category: Category::ArraysAndLists,
        description: "Linked list operations",
        operations: &[
            Operation::InsertBegin,
            Operation::InsertEnd,
            Operation::DeleteBegin,
            Operation::DeleteEnd,
            Operation::Search,
            Operation::Traverse,
        ],
        pseudocode: linked_list::LINKED_LIST_CODE,
        emitter: Emitter::ArrayOperation(linked_list::linked_list),
    },
    AlgorithmSpec {
        id: "stack",
        name: "Stack",
        category: Category::StacksAndQueues,
        description: "Last in, first out",
        operations: &[Operation::Push, Operation::Pop, Operation::Peek, Operation::IsEmpty],
        pseudocode: stack::STACK_CODE,
        emitter: Emitter::ArrayOperation(stack::stack),
    },
    AlgorithmSpec {
        id: "queue",
        name: "Queue",
        category: Category::StacksAndQueues,
        description: "First in, first out",
        operations: &[Operation::Enqueue, Operation::Dequeue, Operation::Peek, Operation::IsEmpty],
        pseudocode: queue::QUEUE_CODE,
        emitter: Emitter::ArrayOperation(queue::queue),
    },
    AlgorithmSpec {
        id: "postfix-eval",
        name: "Postfix Evaluation",
        category: Category::StacksAndQueues,
        description: "Evaluate a postfix expression with a stack",
        operations: &[],
        pseudocode: expression::POSTFIX_CODE,
        emitter: Emitter::Expression(expression::postfix_eval),
    },
    AlgorithmSpec {
        id: "bst",
        name: "Binary Search Tree",
        category: Category::TreesAndHashing,
        description: "BST operations and traversals",
        operations: &[
            Operation::Insert,
            Operation::Search,
            Operation::Inorder,
            Operation::Preorder,
            Operation::Postorder,
            Operation::Levelorder,
        ],
        pseudocode: bst::BST_CODE,
        emitter: Emitter::TreeOperation(bst::bst),
    },
    AlgorithmSpec {
        id: "hash-table",
        name: "Hash Table (Linear Probing)",
        category: Category::TreesAndHashing,
        description: "Open addressing over 11 slots",
        operations: &[Operation::Insert, Operation::Search, Operation::Delete],
        pseudocode: hashing::HASH_TABLE_CODE,
        emitter: Emitter::ArrayOperation(hashing::hash_table),
    },
    AlgorithmSpec {
        id: "dfs",
        name: "Depth First Search (DFS)",
        category: Category::Graphs,
        description: "DFS graph traversal",
        operations: &[],
        pseudocode: graphs::DFS_CODE,
        emitter: Emitter::GraphNode(graphs::dfs),
    },
    AlgorithmSpec {
        id: "bfs",
        name: "Breadth First Search (BFS)",
        category: Category::Graphs,
        description: "BFS graph traversal",
        operations: &[],
        pseudocode: graphs::BFS_CODE,
        emitter: Emitter::GraphNode(graphs::bfs),
    },
    AlgorithmSpec {
        id: "dijkstra",
        name: "Dijkstra's Shortest Path",
        category: Category::Graphs,
        description: "Single-source shortest paths on weighted edges",
        operations: &[],
        pseudocode: graphs::DIJKSTRA_CODE,
        emitter: Emitter::GraphNode(graphs::dijkstra),
    },
    AlgorithmSpec {
        id: "merge-sort",
        name: "Merge Sort",
        category: Category::DivideAndConquer,
        description: "Recursive divide and conquer sorting",
        operations: &[],
        pseudocode: sorting::MERGE_SORT_CODE,
        emitter: Emitter::Array(sorting::merge_sort),
    },
    AlgorithmSpec {
        id: "quick-sort",
        name: "Quick Sort",
        category: Category::DivideAndConquer,
        description: "Partition-based divide and conquer sorting",
        operations: &[],
        pseudocode: sorting::QUICK_SORT_CODE,
        emitter: Emitter::Array(sorting::quick_sort),
    },
    AlgorithmSpec {
        id: "randomized-quick-sort",
        name: "Randomized Quick Sort",
        category: Category::DivideAndConquer,
        description: "Quick sort with a uniformly random pivot",
        operations: &[],
        pseudocode: sorting::RANDOMIZED_QUICK_SORT_CODE,
        emitter: Emitter::Array(sorting::randomized_quick_sort),
    },
    AlgorithmSpec {
        id: "lcs",
        name: "Longest Common Subsequence",
        category: Category::DynamicProgramming,
        description: "DP solution for the LCS problem",
        operations: &[],
        pseudocode: dynamic::LCS_CODE,
        emitter: Emitter::Strings(dynamic::lcs),
    },
    AlgorithmSpec {
        id: "knapsack-01",
        name: "0/1 Knapsack",
        category: Category::DynamicProgramming,
        description: "DP solution for 0/1 knapsack",
        operations: &[],
        pseudocode: dynamic::KNAPSACK_CODE,
        emitter: Emitter::ItemsCapacity(dynamic::knapsack),
    },
    AlgorithmSpec {
        id: "matrix-chain",
        name: "Matrix Chain Multiplication",
        category: Category::DynamicProgramming,
        description: "Cheapest parenthesization of a matrix product",
        operations: &[],
        pseudocode: dynamic::MATRIX_CHAIN_CODE,
        emitter: Emitter::Dimensions(dynamic::matrix_chain),
    },
    AlgorithmSpec {
        id: "n-queens",
        name: "N-Queens Problem",
        category: Category::Backtracking,
        description: "Place N queens on an N×N board",
        operations: &[],
        pseudocode: backtracking::N_QUEENS_CODE,
        emitter: Emitter::Number(backtracking::n_queens),
    },
    AlgorithmSpec {
        id: "huffman",
        name: "Huffman Encoding",
        category: Category::Greedy,
        description: "Greedy construction of optimal prefix codes",
        operations: &[],
        pseudocode: greedy::HUFFMAN_CODE,
        emitter: Emitter::Frequencies(greedy::huffman),
    },
];

/// Every registered algorithm, grouped by category
pub fn registry() -> &'static [AlgorithmSpec] {
    REGISTRY
}

pub fn lookup(id: &str) -> Option<&'static AlgorithmSpec> {
    REGISTRY.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn ids_are_unique() {
        let ids: FxHashSet<&str> = registry().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), registry().len());
    }

    #[test]
    fn only_operation_kinds_declare_operations() {
        for spec in registry() {
            let takes_operation = matches!(spec.input_kind(), InputKind::ArrayOperation | InputKind::TreeOperation);
            assert_eq!(takes_operation, !spec.operations.is_empty(), "{}", spec.id);
        }
    }

    #[test]
    fn lookup_finds_registered_ids() {
        assert_eq!(lookup("dijkstra").map(|s| s.name), Some("Dijkstra's Shortest Path"));
        assert!(lookup("bogo-sort").is_none());
    }
}
