//! Array-backed stack operations

use super::errors::ExecResult;
use super::{missing_operand, unsupported};
use crate::dispatch::{Operation, OperationInput};
use crate::trace::{Counter, HighlightType, Recorder, StackView, Step};

pub const STACK_CODE: &str = "\
procedure stack(S, op, value)
  push:    top = top + 1; S[top] = value
  pop:     if top == -1 then underflow
           value = S[top]; top = top - 1
  peek:    return S[top]
  isEmpty: return top == -1";

pub fn stack(input: &OperationInput, rec: &mut Recorder) -> ExecResult<()> {
    let mut items = input.values.clone();
    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new("Initial stack", StackView::capture(&items))
            .at_line(1)
            .var("top", top_var(&items))
            .var("size", items.len()),
    );

    match input.operation {
        Operation::Push => {
            let Some(value) = input.operand else {
                return missing_operand(rec, input.operation, StackView::capture(&items));
            };
            items.push(value);
            rec.count(Counter::Operations);
            rec.push(
                Step::new(format!("Pushed {} onto the stack", value), StackView::capture(&items).highlight(HighlightType::Found, [items.len() - 1]))
                    .at_line(2)
                    .var("top", top_var(&items))
                    .var("size", items.len()),
            );
        }
        Operation::Pop => match items.len().checked_sub(1) {
            None => rec.push(
                Step::new("Stack underflow: cannot pop from an empty stack", StackView::capture(&items))
                    .at_line(3)
                    .var("top", -1),
            ),
            Some(top) => {
                rec.push(
                    Step::new(format!("Popping {} from the top", items[top]), StackView::capture(&items).highlight(HighlightType::Current, [top]))
                        .at_line(4)
                        .var("top", top),
                );
                let value = items.pop().unwrap_or_default();
                rec.count(Counter::Operations);
                rec.push(
                    Step::new(format!("Popped {}", value), StackView::capture(&items))
                        .at_line(4)
                        .var("top", top_var(&items))
                        .var("popped", value),
                );
            }
        },
        Operation::Peek => match items.last() {
            None => rec.push(Step::new("Stack is empty, nothing to peek", StackView::capture(&items)).at_line(5).var("top", -1)),
            Some(&value) => {
                rec.count(Counter::Operations);
                rec.push(
                    Step::new(format!("Top element is {}", value), StackView::capture(&items).highlight(HighlightType::Found, [items.len() - 1]))
                        .at_line(5)
                        .var("top", top_var(&items))
                        .var("value", value),
                );
            }
        },
        Operation::IsEmpty => {
            rec.count(Counter::Operations);
            let empty = items.is_empty();
            let message = if empty { "Stack is empty" } else { "Stack is not empty" };
            rec.push(
                Step::new(message, StackView::capture(&items))
                    .at_line(6)
                    .var("isEmpty", empty)
                    .var("size", items.len()),
            );
        }
        other => return unsupported(rec, "stack", other, StackView::capture(&items)),
    }
    Ok(())
}

fn top_var(items: &[i64]) -> i64 {
    items.len() as i64 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(values: &[i64], operation: Operation, operand: Option<i64>) -> crate::trace::RunResult {
        let mut rec = Recorder::new();
        let input = OperationInput { values: values.to_vec(), operation, operand };
        stack(&input, &mut rec).unwrap();
        rec.finish()
    }

    #[test]
    fn pop_on_empty_stack_reports_underflow() {
        let result = run(&[], Operation::Pop, None);
        assert_eq!(result.len(), 2);
        assert!(result.last().unwrap().message.contains("underflow"));
        assert_eq!(result.summary().operations, Some(0));
    }

    #[test]
    fn push_appends_to_top() {
        let result = run(&[1, 2], Operation::Push, Some(3));
        let last = result.last().unwrap();
        match &last.structure {
            crate::trace::Structure::Stack(view) => {
                assert_eq!(view.items, vec![1, 2, 3]);
                assert_eq!(view.top(), Some(2));
            }
            other => panic!("unexpected payload {:?}", other.kind()),
        }
    }
}
