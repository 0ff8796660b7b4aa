//! FIFO queue operations

use super::errors::ExecResult;
use super::{missing_operand, unsupported};
use crate::dispatch::{Operation, OperationInput};
use crate::trace::{Counter, HighlightType, QueueView, Recorder, Step};
use std::collections::VecDeque;

/// Display capacity of the queue strip
pub const QUEUE_CAPACITY: usize = 10;

pub const QUEUE_CODE: &str = "\
procedure queue(Q, op, value)
  enqueue: rear = rear + 1; Q[rear] = value
  dequeue: if front > rear then underflow
           value = Q[front]; front = front + 1
  peek:    return Q[front]
  isEmpty: return front > rear";

pub fn queue(input: &OperationInput, rec: &mut Recorder) -> ExecResult<()> {
    let mut items: VecDeque<i64> = input.values.iter().copied().collect();
    let view = |items: &VecDeque<i64>| {
        let flat: Vec<i64> = items.iter().copied().collect();
        QueueView::capture(&flat, QUEUE_CAPACITY)
    };
    rec.track(&[Counter::Operations]);
    rec.push(Step::new("Initial queue", view(&items)).at_line(1).var("size", items.len()));

    match input.operation {
        Operation::Enqueue => {
            let Some(value) = input.operand else {
                return missing_operand(rec, input.operation, view(&items));
            };
            items.push_back(value);
            rec.count(Counter::Operations);
            let rear = items.len() - 1;
            rec.push(
                Step::new(format!("Enqueued {} at the rear", value), view(&items).highlight(HighlightType::Found, [rear]))
                    .at_line(2)
                    .var("front", 0)
                    .var("rear", rear),
            );
        }
        Operation::Dequeue => match items.front().copied() {
            None => rec.push(Step::new("Queue underflow: cannot dequeue from an empty queue", view(&items)).at_line(3)),
            Some(value) => {
                rec.push(
                    Step::new(format!("Dequeuing {} from the front", value), view(&items).highlight(HighlightType::Current, [0]))
                        .at_line(4)
                        .var("front", 0),
                );
                items.pop_front();
                rec.count(Counter::Operations);
                rec.push(
                    Step::new(format!("Dequeued {}", value), view(&items))
                        .at_line(4)
                        .var("dequeued", value)
                        .var("size", items.len()),
                );
            }
        },
        Operation::Peek => match items.front().copied() {
            None => rec.push(Step::new("Queue is empty, nothing to peek", view(&items)).at_line(5)),
            Some(value) => {
                rec.count(Counter::Operations);
                rec.push(
                    Step::new(format!("Front element is {}", value), view(&items).highlight(HighlightType::Found, [0]))
                        .at_line(5)
                        .var("value", value),
                );
            }
        },
        Operation::IsEmpty => {
            rec.count(Counter::Operations);
            let empty = items.is_empty();
            let message = if empty { "Queue is empty" } else { "Queue is not empty" };
            rec.push(
                Step::new(message, view(&items))
                    .at_line(6)
                    .var("isEmpty", empty)
                    .var("size", items.len()),
            );
        }
        other => return unsupported(rec, "queue", other, view(&items)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Structure;

    #[test]
    fn dequeue_removes_the_oldest_item() {
        let mut rec = Recorder::new();
        let input = OperationInput {
            values: vec![1, 2, 3],
            operation: Operation::Dequeue,
            operand: None,
        };
        queue(&input, &mut rec).unwrap();
        let result = rec.finish();
        match &result.last().unwrap().structure {
            Structure::Queue(view) => assert_eq!(view.items, vec![2, 3]),
            other => panic!("unexpected payload {:?}", other.kind()),
        }
        assert_eq!(result.summary().operations, Some(1));
    }

    #[test]
    fn dequeue_on_empty_queue_reports_underflow() {
        let mut rec = Recorder::new();
        let input = OperationInput {
            values: vec![],
            operation: Operation::Dequeue,
            operand: None,
        };
        queue(&input, &mut rec).unwrap();
        assert!(rec.finish().last().unwrap().message.contains("underflow"));
    }
}
