//! Binary search tree operations and traversals

use super::errors::{ExecResult, ExecutionError};
use super::{missing_operand, unsupported};
use crate::dispatch::{Operation, OperationInput};
use crate::trace::{Counter, HighlightType, Recorder, Step, TreeNode, TreeView};
use std::collections::VecDeque;

pub const BST_CODE: &str = "\
procedure insert(node, value)
  if node == null then return new Node(value)
  if value < node.value
    node.left = insert(node.left, value)
  else
    node.right = insert(node.right, value)
  return node

procedure search(node, value)
  if node == null or node.value == value then return node
  if value < node.value then return search(node.left, value)
  return search(node.right, value)

procedure traverse(node)
  inorder:   traverse(left); visit(node); traverse(right)
  preorder:  visit(node); traverse(left); traverse(right)
  postorder: traverse(left); traverse(right); visit(node)
  levelorder: visit nodes breadth first using a queue";

/// Node table plus root; ids are allocation order
struct Tree {
    nodes: Vec<TreeNode>,
    root: Option<usize>,
}

impl Tree {
    fn new() -> Self {
        Tree { nodes: Vec::new(), root: None }
    }

    fn view(&self) -> TreeView {
        TreeView::capture(&self.nodes, self.root)
    }

    fn node(&self, id: usize) -> ExecResult<&TreeNode> {
        self.nodes
            .get(id)
            .filter(|n| n.id == id)
            .ok_or(ExecutionError::DanglingNode { structure: "tree", id })
    }

    fn node_mut(&mut self, id: usize) -> ExecResult<&mut TreeNode> {
        self.nodes
            .get_mut(id)
            .filter(|n| n.id == id)
            .ok_or(ExecutionError::DanglingNode { structure: "tree", id })
    }

    /// Attach a new leaf under `parent` (or as root) and return its id
    fn attach(&mut self, value: i64, parent: Option<(usize, bool)>) -> ExecResult<usize> {
        let id = self.nodes.len();
        let mut leaf = TreeNode::leaf(id, value);
        match parent {
            None => self.root = Some(id),
            Some((parent_id, go_left)) => {
                leaf.parent = Some(parent_id);
                let parent = self.node_mut(parent_id)?;
                if go_left {
                    parent.left = Some(id);
                } else {
                    parent.right = Some(id);
                }
            }
        }
        self.nodes.push(leaf);
        Ok(id)
    }

    /// Insert without recording; used to build the starting tree
    fn insert_quiet(&mut self, value: i64) -> ExecResult<usize> {
        let mut parent = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id)?;
            let go_left = value < node.value;
            parent = Some((id, go_left));
            current = if go_left { node.left } else { node.right };
        }
        self.attach(value, parent)
    }
}

pub fn bst(input: &OperationInput, rec: &mut Recorder) -> ExecResult<()> {
    let mut tree = Tree::new();
    for &value in &input.values {
        tree.insert_quiet(value)?;
    }

    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new("Initial binary search tree", tree.view())
            .at_line(1)
            .var("size", tree.nodes.len()),
    );

    match input.operation {
        Operation::Insert => match input.operand {
            Some(value) => insert(&mut tree, value, rec),
            None => missing_operand(rec, input.operation, tree.view()),
        },
        Operation::Search => match input.operand {
            Some(value) => search(&tree, value, rec),
            None => missing_operand(rec, input.operation, tree.view()),
        },
        Operation::Inorder | Operation::Preorder | Operation::Postorder => {
            let mut order = Vec::new();
            depth_first(&tree, tree.root, input.operation, &mut order, rec)?;
            finish_traversal(&tree, input.operation, &order, rec)
        }
        Operation::Levelorder => level_order(&tree, rec),
        other => unsupported(rec, "binary search tree", other, tree.view()),
    }
}

fn insert(tree: &mut Tree, value: i64, rec: &mut Recorder) -> ExecResult<()> {
    let mut parent = None;
    let mut current = tree.root;
    while let Some(id) = current {
        let node = tree.node(id)?;
        rec.count(Counter::Comparisons);
        let go_left = value < node.value;
        let direction = if go_left { "left" } else { "right" };
        rec.push(
            Step::new(
                format!("Comparing {} with {}, going {}", value, node.value, direction),
                tree.view().highlight(HighlightType::Compare, [id]),
            )
            .at_line(3)
            .var("value", value)
            .var("node", node.value),
        );
        parent = Some((id, go_left));
        current = if go_left { node.left } else { node.right };
    }

    let id = tree.attach(value, parent)?;
    // placing the root is not counted as an operation
    if parent.is_some() {
        rec.count(Counter::Operations);
    }
    let message = match parent {
        None => format!("Tree was empty, {} becomes the root", value),
        Some((p, go_left)) => format!(
            "Inserted {} as the {} child of {}",
            value,
            if go_left { "left" } else { "right" },
            tree.node(p)?.value
        ),
    };
    rec.push(
        Step::new(message, tree.view().highlight(HighlightType::Found, [id]))
            .at_line(2)
            .var("value", value)
            .var("size", tree.nodes.len()),
    );
    Ok(())
}

fn search(tree: &Tree, target: i64, rec: &mut Recorder) -> ExecResult<()> {
    let mut path = Vec::new();
    let mut current = tree.root;
    while let Some(id) = current {
        let node = tree.node(id)?;
        rec.count(Counter::Comparisons);
        path.push(id);
        if node.value == target {
            rec.push(
                Step::new(format!("Found {}", target), tree.view().highlight(HighlightType::Found, [id]))
                    .at_line(10)
                    .var("target", target)
                    .var("depth", path.len() - 1),
            );
            return Ok(());
        }
        let go_left = target < node.value;
        rec.push(
            Step::new(
                format!(
                    "{} {} {}, going {}",
                    target,
                    if go_left { "<" } else { ">" },
                    node.value,
                    if go_left { "left" } else { "right" }
                ),
                tree.view().highlight(HighlightType::Visiting, [id]),
            )
            .at_line(if go_left { 11 } else { 12 })
            .var("target", target)
            .var("node", node.value),
        );
        current = if go_left { node.left } else { node.right };
    }

    rec.push(
        Step::new(format!("{} not found in the tree", target), tree.view().highlight(HighlightType::Path, path))
            .at_line(10)
            .var("target", target),
    );
    Ok(())
}

fn depth_first(
    tree: &Tree,
    node: Option<usize>,
    order_kind: Operation,
    order: &mut Vec<usize>,
    rec: &mut Recorder,
) -> ExecResult<()> {
    let Some(id) = node else {
        return Ok(());
    };
    let current = tree.node(id)?;
    let (left, right) = (current.left, current.right);

    if order_kind == Operation::Preorder {
        visit(tree, id, order, 16, rec)?;
    }
    depth_first(tree, left, order_kind, order, rec)?;
    if order_kind == Operation::Inorder {
        visit(tree, id, order, 15, rec)?;
    }
    depth_first(tree, right, order_kind, order, rec)?;
    if order_kind == Operation::Postorder {
        visit(tree, id, order, 17, rec)?;
    }
    Ok(())
}

fn visit(tree: &Tree, id: usize, order: &mut Vec<usize>, line: usize, rec: &mut Recorder) -> ExecResult<()> {
    let value = tree.node(id)?.value;
    order.push(id);
    rec.push(
        Step::new(format!("Visiting {}", value), tree.view().highlight(HighlightType::Visiting, [id]))
            .at_line(line)
            .var("node", value)
            .var("visited", order.len()),
    );
    Ok(())
}

fn level_order(tree: &Tree, rec: &mut Recorder) -> ExecResult<()> {
    let mut order = Vec::new();
    let mut queue: VecDeque<usize> = tree.root.into_iter().collect();
    while let Some(id) = queue.pop_front() {
        let node = tree.node(id)?;
        queue.extend(node.left);
        queue.extend(node.right);
        visit(tree, id, &mut order, 18, rec)?;
    }
    finish_traversal(tree, Operation::Levelorder, &order, rec)
}

fn finish_traversal(tree: &Tree, kind: Operation, order: &[usize], rec: &mut Recorder) -> ExecResult<()> {
    let values = order
        .iter()
        .map(|&id| tree.node(id).map(|n| n.value.to_string()))
        .collect::<ExecResult<Vec<_>>>()?;
    rec.push(
        Step::new(
            format!("{} traversal: [{}]", kind, values.join(", ")),
            tree.view().highlight(HighlightType::Visited, order.to_vec()),
        )
        .at_line(14)
        .var("visited", order.len()),
    );
    Ok(())
}
