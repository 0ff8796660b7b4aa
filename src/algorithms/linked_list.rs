//! Singly linked list operations over a flat node table

use super::errors::{ExecResult, ExecutionError};
use super::{missing_operand, unsupported};
use crate::dispatch::{Operation, OperationInput};
use crate::trace::{Counter, HighlightType, LinkedListView, ListNode, Recorder, Step};

pub const LINKED_LIST_CODE: &str = "\
procedure linkedList(list, op, value)
  insertBegin: node.next = head; head = node
  insertEnd:   tail.next = node; tail = node
  deleteBegin: head = head.next
  deleteEnd:   walk to the node before tail; prev.next = null
  search:      walk from head comparing node.value
  traverse:    walk from head visiting every node";

/// Working storage: nodes stay in allocation order, links decide list order
struct SinglyLinkedList {
    nodes: Vec<ListNode>,
    head: Option<usize>,
    tail: Option<usize>,
    next_id: usize,
}

impl SinglyLinkedList {
    fn from_values(values: &[i64]) -> Self {
        let nodes: Vec<ListNode> = values
            .iter()
            .enumerate()
            .map(|(id, &value)| ListNode {
                id,
                value,
                next: (id + 1 < values.len()).then_some(id + 1),
                prev: None,
            })
            .collect();
        let tail = nodes.len().checked_sub(1);
        SinglyLinkedList {
            head: if nodes.is_empty() { None } else { Some(0) },
            tail,
            next_id: nodes.len(),
            nodes,
        }
    }

    fn view(&self) -> LinkedListView {
        LinkedListView::capture(&self.nodes, self.head, self.tail)
    }

    fn node(&self, id: usize) -> ExecResult<&ListNode> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or(ExecutionError::DanglingNode { structure: "linked list", id })
    }

    fn node_mut(&mut self, id: usize) -> ExecResult<&mut ListNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(ExecutionError::DanglingNode { structure: "linked list", id })
    }

    fn remove(&mut self, id: usize) {
        self.nodes.retain(|n| n.id != id);
    }

    fn allocate(&mut self, value: i64, next: Option<usize>) -> ListNode {
        let node = ListNode {
            id: self.next_id,
            value,
            next,
            prev: None,
        };
        self.next_id += 1;
        node
    }

    fn size(&self) -> usize {
        self.nodes.len()
    }
}

pub fn linked_list(input: &OperationInput, rec: &mut Recorder) -> ExecResult<()> {
    let mut list = SinglyLinkedList::from_values(&input.values);
    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new("Initial linked list", list.view())
            .at_line(1)
            .var("head", id_var(list.head))
            .var("tail", id_var(list.tail))
            .var("size", list.size()),
    );

    match input.operation {
        Operation::InsertBegin => match input.operand {
            Some(value) => insert_begin(&mut list, value, rec),
            None => missing_operand(rec, input.operation, list.view()),
        },
        Operation::InsertEnd => match input.operand {
            Some(value) => insert_end(&mut list, value, rec),
            None => missing_operand(rec, input.operation, list.view()),
        },
        Operation::DeleteBegin => delete_begin(&mut list, rec),
        Operation::DeleteEnd => delete_end(&mut list, rec),
        Operation::Search => match input.operand {
            Some(value) => search(&list, value, rec),
            None => missing_operand(rec, input.operation, list.view()),
        },
        Operation::Traverse => traverse(&list, rec),
        other => unsupported(rec, "linked list", other, list.view()),
    }
}

fn insert_begin(list: &mut SinglyLinkedList, value: i64, rec: &mut Recorder) -> ExecResult<()> {
    let node = list.allocate(value, list.head);
    let id = node.id;

    let mut pending = list.view();
    pending.nodes.push(node.clone());
    rec.push(
        Step::new(format!("Creating a new node with value {}", value), pending.highlight(HighlightType::Current, [id]))
            .at_line(2)
            .var("newNode", id),
    );

    list.nodes.push(node);
    list.head = Some(id);
    if list.tail.is_none() {
        list.tail = Some(id);
    }
    rec.count(Counter::Operations);
    rec.push(
        Step::new(
            format!("Inserted {} at the beginning", value),
            list.view().highlight(HighlightType::Found, [id]),
        )
        .at_line(2)
        .var("head", id_var(list.head))
        .var("tail", id_var(list.tail)),
    );
    Ok(())
}

fn insert_end(list: &mut SinglyLinkedList, value: i64, rec: &mut Recorder) -> ExecResult<()> {
    let node = list.allocate(value, None);
    let id = node.id;

    if let Some(tail) = list.tail {
        list.node_mut(tail)?.next = Some(id);
    }
    list.nodes.push(node);
    if list.head.is_none() {
        list.head = Some(id);
    }
    list.tail = Some(id);
    rec.count(Counter::Operations);
    rec.push(
        Step::new(format!("Inserted {} at the end", value), list.view().highlight(HighlightType::Found, [id]))
            .at_line(3)
            .var("head", id_var(list.head))
            .var("tail", id_var(list.tail)),
    );
    Ok(())
}

fn delete_begin(list: &mut SinglyLinkedList, rec: &mut Recorder) -> ExecResult<()> {
    let Some(head) = list.head else {
        rec.push(Step::new("List is empty, nothing to delete", list.view()).at_line(4));
        return Ok(());
    };
    let node = list.node(head)?.clone();
    rec.push(
        Step::new(
            format!("Deleting head node with value {}", node.value),
            list.view().highlight(HighlightType::Current, [head]),
        )
        .at_line(4)
        .var("head", head),
    );

    list.head = node.next;
    if list.head.is_none() {
        list.tail = None;
    }
    list.remove(head);
    rec.count(Counter::Operations);
    rec.push(
        Step::new(format!("Deleted {} from the beginning", node.value), list.view())
            .at_line(4)
            .var("head", id_var(list.head))
            .var("size", list.size()),
    );
    Ok(())
}

fn delete_end(list: &mut SinglyLinkedList, rec: &mut Recorder) -> ExecResult<()> {
    let (Some(head), Some(tail)) = (list.head, list.tail) else {
        rec.push(Step::new("List is empty, nothing to delete", list.view()).at_line(5));
        return Ok(());
    };

    // walk to the node whose next is the tail
    let mut prev = None;
    let mut current = head;
    while current != tail {
        rec.push(
            Step::new(
                "Walking towards the node before the tail",
                list.view().highlight(HighlightType::Visiting, [current]),
            )
            .at_line(5)
            .var("current", current),
        );
        prev = Some(current);
        current = list.node(current)?.next.ok_or(ExecutionError::DanglingNode {
            structure: "linked list",
            id: tail,
        })?;
    }

    let value = list.node(tail)?.value;
    rec.push(
        Step::new(format!("Deleting tail node with value {}", value), list.view().highlight(HighlightType::Current, [tail]))
            .at_line(5)
            .var("tail", tail),
    );

    match prev {
        Some(p) => list.node_mut(p)?.next = None,
        None => list.head = None,
    }
    list.tail = prev;
    list.remove(tail);
    rec.count(Counter::Operations);
    rec.push(
        Step::new(format!("Deleted {} from the end", value), list.view())
            .at_line(5)
            .var("tail", id_var(list.tail))
            .var("size", list.size()),
    );
    Ok(())
}

fn search(list: &SinglyLinkedList, target: i64, rec: &mut Recorder) -> ExecResult<()> {
    let mut current = list.head;
    let mut position = 0usize;
    while let Some(id) = current {
        rec.count(Counter::Operations);
        let node = list.node(id)?;
        rec.push(
            Step::new(
                format!("Checking node {}: value is {}", id, node.value),
                list.view().highlight(HighlightType::Current, [id]),
            )
            .at_line(6)
            .var("current", id)
            .var("position", position)
            .var("target", target),
        );

        if node.value == target {
            rec.push(
                Step::new(
                    format!("Found {} at position {}", target, position),
                    list.view().highlight(HighlightType::Found, [id]),
                )
                .at_line(6)
                .var("position", position),
            );
            return Ok(());
        }
        current = node.next;
        position += 1;
    }

    rec.push(
        Step::new(format!("{} not found in the list", target), list.view())
            .at_line(6)
            .var("target", target),
    );
    Ok(())
}

fn traverse(list: &SinglyLinkedList, rec: &mut Recorder) -> ExecResult<()> {
    let mut visited = Vec::new();
    let mut values = Vec::new();
    let mut current = list.head;
    while let Some(id) = current {
        if visited.len() > list.size() {
            return Err(ExecutionError::DanglingNode { structure: "linked list", id });
        }
        let node = list.node(id)?;
        rec.count(Counter::Operations);
        visited.push(id);
        values.push(node.value.to_string());
        rec.push(
            Step::new(format!("Visiting node with value {}", node.value), list.view().highlight(HighlightType::Visiting, [id]))
                .at_line(7)
                .var("current", id)
                .var("position", visited.len() - 1),
        );
        current = node.next;
    }

    let summary = if values.is_empty() {
        "Traversal complete: list is empty".to_string()
    } else {
        format!("Traversal complete: {}", values.join(" -> "))
    };
    rec.push(
        Step::new(summary, list.view().highlight(HighlightType::Visited, visited))
            .at_line(7)
            .var("size", list.size()),
    );
    Ok(())
}

fn id_var(id: Option<usize>) -> String {
    id.map_or_else(|| "null".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{RunResult, Structure};

    fn run(values: &[i64], operation: Operation, operand: Option<i64>) -> RunResult {
        let mut rec = Recorder::new();
        let input = OperationInput {
            values: values.to_vec(),
            operation,
            operand,
        };
        linked_list(&input, &mut rec).unwrap();
        rec.finish()
    }

    fn final_order(result: &RunResult) -> Vec<i64> {
        match &result.last().unwrap().structure {
            Structure::LinkedList(view) => view.values_in_order(),
            other => panic!("unexpected payload {:?}", other.kind()),
        }
    }

    #[test]
    fn insert_begin_becomes_head() {
        let result = run(&[2, 3], Operation::InsertBegin, Some(1));
        assert_eq!(final_order(&result), vec![1, 2, 3]);
        assert_eq!(result.summary().operations, Some(1));
    }

    #[test]
    fn delete_end_relinks_predecessor() {
        let result = run(&[1, 2, 3], Operation::DeleteEnd, None);
        assert_eq!(final_order(&result), vec![1, 2]);
    }

    #[test]
    fn delete_end_of_single_node_empties_list() {
        let result = run(&[7], Operation::DeleteEnd, None);
        assert!(final_order(&result).is_empty());
    }

    #[test]
    fn delete_on_empty_list_explains_itself() {
        let result = run(&[], Operation::DeleteBegin, None);
        assert!(result.last().unwrap().message.contains("empty"));
        assert_eq!(result.summary().operations, Some(0));
    }

    #[test]
    fn search_counts_visited_nodes() {
        let result = run(&[4, 5, 6], Operation::Search, Some(6));
        assert_eq!(result.summary().operations, Some(3));
        assert!(result.last().unwrap().message.contains("Found 6"));
    }
}
