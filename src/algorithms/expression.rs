//! Postfix expression evaluation with an operand stack

use super::errors::ExecResult;
use crate::trace::{Counter, HighlightType, Recorder, StackView, Step};

pub const POSTFIX_CODE: &str = "\
procedure evaluatePostfix(expr)
  for each token in expr
    if token is a number
      push(S, token)
    else
      b = pop(S); a = pop(S)
      push(S, a op b)
  end for
  return pop(S)";

/// Evaluate a whitespace-separated postfix expression.
///
/// Malformed input (unknown tokens, missing operands, division by zero or
/// overflow) ends the trace with a step explaining what went wrong.
pub fn postfix_eval(expression: &str, rec: &mut Recorder) -> ExecResult<()> {
    let mut stack: Vec<i64> = Vec::new();
    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new(format!("Evaluating postfix \"{}\"", expression.trim()), StackView::capture(&stack))
            .at_line(1)
            .var("expression", expression.trim()),
    );

    let tokens: Vec<&str> = expression.split_whitespace().collect();
    if tokens.is_empty() {
        rec.push(Step::new("Expression is empty, nothing to evaluate", StackView::capture(&stack)).at_line(1));
        return Ok(());
    }

    for token in tokens {
        rec.count(Counter::Operations);
        if let Ok(value) = token.parse::<i64>() {
            stack.push(value);
            rec.push(
                Step::new(format!("Push operand {}", value), StackView::capture(&stack).highlight(HighlightType::Found, [stack.len() - 1]))
                    .at_line(4)
                    .var("token", token),
            );
            continue;
        }

        let Some(op) = token.chars().next().filter(|_| token.len() == 1).filter(|c| "+-*/%^".contains(*c)) else {
            return fail(rec, &stack, format!("Error: unknown token \"{}\"", token));
        };

        if stack.len() < 2 {
            return fail(rec, &stack, format!("Error: not enough operands for operator {}", op));
        }
        let top = stack.len() - 1;
        rec.push(
            Step::new(
                format!("Pop operands {} and {} for operator {}", stack[top - 1], stack[top], op),
                StackView::capture(&stack).highlight(HighlightType::Current, [top - 1, top]),
            )
            .at_line(6)
            .var("token", token),
        );
        let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
            return fail(rec, &stack, format!("Error: not enough operands for operator {}", op));
        };

        let result = match apply(op, a, b) {
            Ok(value) => value,
            Err(reason) => return fail(rec, &stack, format!("Error: {} in {} {} {}", reason, a, op, b)),
        };
        stack.push(result);
        rec.push(
            Step::new(
                format!("Compute {} {} {} = {}, push the result", a, op, b, result),
                StackView::capture(&stack).highlight(HighlightType::Found, [stack.len() - 1]),
            )
            .at_line(7)
            .var("a", a)
            .var("b", b)
            .var("result", result),
        );
    }

    match stack.as_slice() {
        [result] => {
            let result = *result;
            rec.push(
                Step::new(format!("Final result: {}", result), StackView::capture(&stack).highlight(HighlightType::Sorted, [0]))
                    .at_line(9)
                    .var("result", result),
            );
            Ok(())
        }
        _ => fail(
            rec,
            &stack,
            format!("Error: malformed expression, {} values left on the stack", stack.len()),
        ),
    }
}

fn apply(op: char, a: i64, b: i64) -> Result<i64, &'static str> {
    match op {
        '+' => a.checked_add(b).ok_or("overflow"),
        '-' => a.checked_sub(b).ok_or("overflow"),
        '*' => a.checked_mul(b).ok_or("overflow"),
        '/' if b == 0 => Err("division by zero"),
        '/' => {
            let q = a.checked_div(b).ok_or("overflow")?;
            // round toward negative infinity
            Ok(if a % b != 0 && (a < 0) != (b < 0) { q - 1 } else { q })
        }
        '%' if b == 0 => Err("division by zero"),
        '%' => {
            let r = a.checked_rem(b).ok_or("overflow")?;
            // the remainder takes the divisor's sign
            Ok(if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
        }
        '^' => {
            let exp = u32::try_from(b).map_err(|_| "negative exponent")?;
            a.checked_pow(exp).ok_or("overflow")
        }
        _ => Err("unknown operator"),
    }
}

fn fail(rec: &mut Recorder, stack: &[i64], message: String) -> ExecResult<()> {
    rec.push(Step::new(message, StackView::capture(stack)).at_line(2));
    Ok(())
}
