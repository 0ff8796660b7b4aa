//! Structure pane: a text rendering of the current step's payload
//!
//! Every payload kind has its own layout. Highlighted elements are drawn in
//! the colour [`Theme::highlight_color`](crate::ui::theme::Theme::highlight_color)
//! assigns to their highlight kind; everything else uses the plain foreground.
//! [`structure_lines`] is kept free of any `Frame` so it can be tested directly.

use crate::trace::{
    highlight_of, ArrayView, Cell, DpTableView, GraphView, HashSlot, HashTableView, HighlightType,
    LinkedListView, MatrixView, QueueView, StackView, Step, Structure, TreeView,
};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rustc_hash::FxHashSet;

const CELL_WIDTH: usize = 5;

fn plain(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.fg))
}

fn dim(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.comment))
}

fn marked(text: impl Into<String>, kind: Option<HighlightType>) -> Span<'static> {
    match kind {
        Some(kind) => Span::styled(
            text.into(),
            Style::default()
                .fg(DEFAULT_THEME.highlight_color(kind))
                .add_modifier(Modifier::BOLD),
        ),
        None => plain(text),
    }
}

fn legend(kind: Option<HighlightType>) -> Option<Line<'static>> {
    kind.map(|kind| Line::from(vec![dim("● "), marked(kind.as_str(), Some(kind))]))
}

/// Lay out `structure` as styled text lines
pub fn structure_lines(structure: &Structure) -> Vec<Line<'static>> {
    let mut lines = match structure {
        Structure::Array(view) => array_lines(view),
        Structure::LinkedList(view) => list_lines(view),
        Structure::Stack(view) => stack_lines(view),
        Structure::Queue(view) => queue_lines(view),
        Structure::Tree(view) => tree_lines(view),
        Structure::HashTable(view) => hash_lines(view),
        Structure::Graph(view) => graph_lines(view),
        Structure::Matrix(view) => matrix_lines(view),
        Structure::DpTable(view) => dp_lines(view),
    };
    if let Some(line) = legend(structure.highlight_type()) {
        lines.push(Line::default());
        lines.push(line);
    }
    lines
}

fn array_lines(view: &ArrayView) -> Vec<Line<'static>> {
    if view.values.is_empty() {
        return vec![dim("(empty array)").into()];
    }
    let values: Vec<Span> = view
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| marked(format!("{:>w$}", v, w = CELL_WIDTH), highlight_of(&view.highlight, &i)))
        .collect();
    let indices: Vec<Span> = (0..view.values.len())
        .map(|i| dim(format!("{:>w$}", i, w = CELL_WIDTH)))
        .collect();
    vec![Line::from(values), Line::from(indices)]
}

fn list_lines(view: &LinkedListView) -> Vec<Line<'static>> {
    let mut spans = vec![dim("head → ")];
    let mut seen = FxHashSet::default();
    let mut cursor = view.head;
    while let Some(id) = cursor {
        let Some(node) = view.node(id) else { break };
        if !seen.insert(id) {
            spans.push(dim("↺"));
            return vec![Line::from(spans)];
        }
        spans.push(marked(format!("[{}]", node.value), highlight_of(&view.highlight, &id)));
        spans.push(dim(" → "));
        cursor = node.next;
    }
    spans.push(dim("null"));
    vec![Line::from(spans)]
}

fn stack_lines(view: &StackView) -> Vec<Line<'static>> {
    if view.items.is_empty() {
        return vec![dim("(empty stack)").into()];
    }
    let top = view.top();
    let mut lines: Vec<Line> = view
        .items
        .iter()
        .enumerate()
        .rev()
        .map(|(i, v)| {
            let label = if Some(i) == top { "top → " } else { "      " };
            Line::from(vec![
                dim(label),
                dim("│"),
                marked(format!("{:^w$}", v, w = CELL_WIDTH), highlight_of(&view.highlight, &i)),
                dim("│"),
            ])
        })
        .collect();
    lines.push(Line::from(vec![dim("      └"), dim("─".repeat(CELL_WIDTH)), dim("┘")]));
    lines
}

fn queue_lines(view: &QueueView) -> Vec<Line<'static>> {
    let mut spans = vec![dim("front → ")];
    if view.items.is_empty() {
        spans.push(dim("(empty)"));
    }
    for (i, v) in view.items.iter().enumerate() {
        spans.push(marked(format!("[{}]", v), highlight_of(&view.highlight, &i)));
    }
    spans.push(dim(" ← rear"));
    vec![
        Line::from(spans),
        Line::from(dim(format!("size {}/{}", view.items.len(), view.capacity))),
    ]
}

fn tree_lines(view: &TreeView) -> Vec<Line<'static>> {
    let Some(root) = view.root else {
        return vec![dim("(empty tree)").into()];
    };
    let mut lines = Vec::new();
    tree_outline(view, root, "", 0, &mut lines);
    lines
}

fn tree_outline(view: &TreeView, id: usize, label: &str, depth: usize, out: &mut Vec<Line<'static>>) {
    // a well-formed tree is never deeper than its node count
    if depth > view.nodes.len() {
        return;
    }
    let Some(node) = view.node(id) else { return };
    out.push(Line::from(vec![
        dim(format!("{}{}", "  ".repeat(depth), label)),
        marked(node.value.to_string(), highlight_of(&view.highlight, &id)),
    ]));
    if let Some(left) = node.left {
        tree_outline(view, left, "L: ", depth + 1, out);
    }
    if let Some(right) = node.right {
        tree_outline(view, right, "R: ", depth + 1, out);
    }
}

fn hash_lines(view: &HashTableView) -> Vec<Line<'static>> {
    view.slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let text = match slot {
                HashSlot::Empty => "—".to_string(),
                HashSlot::Occupied(key) => key.to_string(),
                HashSlot::Deleted => "✗ deleted".to_string(),
            };
            Line::from(vec![
                dim(format!("{:>3} │ ", i)),
                marked(text, highlight_of(&view.highlight, &i)),
            ])
        })
        .collect()
}

fn graph_lines(view: &GraphView) -> Vec<Line<'static>> {
    let arrow = if view.is_directed() { " → " } else { " — " };
    let edge_lit = |from: usize, to: usize, directed: bool| {
        view.highlighted_edges
            .iter()
            .any(|&(a, b)| (a, b) == (from, to) || (!directed && (a, b) == (to, from)))
    };

    let mut lines = Vec::with_capacity(view.nodes.len());
    for node in &view.nodes {
        let mut spans = vec![marked(
            format!("{:>3}", node.id),
            highlight_of(&view.highlight, &node.id),
        )];
        let mut first = true;
        for (edge, to) in view
            .edges
            .iter()
            .filter_map(|e| e.neighbor_of(node.id).map(|to| (e, to)))
        {
            spans.push(dim(if first { arrow } else { ", " }));
            first = false;
            let text = if view.weighted {
                format!("{} ({})", to, edge.weight)
            } else {
                to.to_string()
            };
            if edge_lit(node.id, to, edge.directed) {
                spans.push(marked(text, Some(HighlightType::Path)));
            } else {
                spans.push(plain(text));
            }
        }
        lines.push(Line::from(spans));
    }
    if lines.is_empty() {
        lines.push(dim("(empty graph)").into());
    }
    lines
}

/// Occupancy grid: zero cells are blank, anything else is filled
fn matrix_lines(view: &MatrixView) -> Vec<Line<'static>> {
    view.data
        .iter()
        .enumerate()
        .map(|(r, row)| {
            Line::from(
                row.iter()
                    .enumerate()
                    .map(|(c, v)| {
                        let symbol = if *v == 0 { "·" } else { "■" };
                        marked(
                            format!(" {} ", symbol),
                            highlight_of(&view.highlight, &Cell::new(r, c)),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn dp_lines(view: &DpTableView) -> Vec<Line<'static>> {
    let label_width = view
        .row_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    let cell_width = view
        .table
        .iter()
        .flatten()
        .map(|s| s.to_string().chars().count())
        .chain(view.col_labels.iter().map(|l| l.chars().count()))
        .max()
        .unwrap_or(1)
        + 2;

    let mut header = vec![plain(" ".repeat(label_width + 1))];
    header.extend(
        view.col_labels
            .iter()
            .map(|l| dim(format!("{:>w$}", l, w = cell_width))),
    );
    let mut lines = vec![Line::from(header)];

    for (r, row) in view.table.iter().enumerate() {
        let label = view.row_labels.get(r).map(String::as_str).unwrap_or("");
        let mut spans = vec![dim(format!("{:>w$} ", label, w = label_width))];
        spans.extend(row.iter().enumerate().map(|(c, value)| {
            marked(
                format!("{:>w$}", value.to_string(), w = cell_width),
                highlight_of(&view.highlight, &Cell::new(r, c)),
            )
        }));
        lines.push(Line::from(spans));
    }
    lines
}

/// Render the structure pane
pub fn render_structure_pane(frame: &mut Frame, area: Rect, title: &str, step: Option<&Step>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let lines = match step {
        Some(step) => {
            let mut lines = vec![Line::from(dim(step.kind().as_str())), Line::default()];
            lines.extend(structure_lines(&step.structure));
            lines
        }
        None => vec![Line::from(dim("No run loaded"))],
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{ListNode, Scalar, TreeNode};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn array_shows_values_and_indices() {
        let lines = structure_lines(&ArrayView::capture(&[7, 42]).into());
        let rendered = text(&lines);
        assert!(rendered.contains("42"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn highlighted_elements_use_the_highlight_colour() {
        let view = ArrayView::capture(&[1, 2, 3]).highlight(HighlightType::Found, vec![1]);
        let lines = structure_lines(&view.into());
        let found = DEFAULT_THEME.highlight_color(HighlightType::Found);
        let span = &lines[0].spans[1];
        assert_eq!(span.style.fg, Some(found));
        assert_ne!(lines[0].spans[0].style.fg, Some(found));
        assert!(text(&lines).contains("found"));
    }

    #[test]
    fn list_ends_in_null() {
        let nodes = vec![
            ListNode { id: 0, value: 1, next: Some(1), prev: None },
            ListNode { id: 1, value: 2, next: None, prev: Some(0) },
        ];
        let lines = structure_lines(&LinkedListView::capture(&nodes, Some(0), Some(1)).into());
        assert_eq!(text(&lines), "head → [1] → [2] → null");
    }

    #[test]
    fn cyclic_list_terminates() {
        let nodes = vec![ListNode { id: 0, value: 1, next: Some(0), prev: None }];
        let lines = structure_lines(&LinkedListView::capture(&nodes, Some(0), Some(0)).into());
        assert!(text(&lines).ends_with('↺'));
    }

    #[test]
    fn stack_draws_top_first() {
        let lines = structure_lines(&StackView::capture(&[1, 2, 3]).into());
        assert!(text(&lines[..1]).starts_with("top →"));
        assert!(text(&lines[..1]).contains('3'));
    }

    #[test]
    fn tree_outline_labels_children() {
        let mut root = TreeNode::leaf(0, 50);
        root.right = Some(1);
        let mut right = TreeNode::leaf(1, 70);
        right.parent = Some(0);
        let lines = structure_lines(&TreeView::capture(&[root, right], Some(0)).into());
        assert_eq!(text(&lines), "50\n  R: 70");
    }

    #[test]
    fn hash_table_marks_tombstones() {
        let slots = [HashSlot::Empty, HashSlot::Occupied(12), HashSlot::Deleted];
        let rendered = text(&structure_lines(&HashTableView::capture(&slots).into()));
        assert!(rendered.contains("12"));
        assert!(rendered.contains("deleted"));
    }

    #[test]
    fn dp_table_has_a_header_row() {
        let table = vec![vec![Scalar::from(0), Scalar::from(1)]];
        let view = DpTableView::capture(&table, &["A".to_string()], &["x".to_string(), "y".to_string()]);
        let lines = structure_lines(&view.into());
        assert_eq!(lines.len(), 2);
        assert!(text(&lines[..1]).contains('y'));
    }
}
