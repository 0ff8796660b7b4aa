//! Linear and binary search

use super::errors::ExecResult;
use crate::trace::{ArrayView, Counter, HighlightType, Recorder, Step};

pub const LINEAR_SEARCH_CODE: &str = "\
procedure linearSearch(A, target)
  for i = 0 to length(A) - 1
    if A[i] == target
      return i
    end if
  end for
  return -1";

pub fn linear_search(input: &[i64], target: i64, rec: &mut Recorder) -> ExecResult<()> {
    rec.push(
        Step::new(format!("Searching for {}", target), ArrayView::capture(input))
            .at_line(1)
            .var("target", target),
    );

    for (i, &value) in input.iter().enumerate() {
        rec.count(Counter::Comparisons);
        rec.push(
            Step::new(
                format!("Checking index {}: is {} equal to {}?", i, value, target),
                ArrayView::capture(input).highlight(HighlightType::Compare, [i]),
            )
            .at_line(3)
            .var("i", i)
            .var("target", target),
        );

        if value == target {
            rec.push(
                Step::new(
                    format!("Found {} at index {}", target, i),
                    ArrayView::capture(input).highlight(HighlightType::Found, [i]),
                )
                .at_line(4)
                .var("i", i)
                .var("result", i),
            );
            return Ok(());
        }
    }

    rec.push(
        Step::new(format!("{} not found in the array", target), ArrayView::capture(input))
            .at_line(7)
            .var("target", target)
            .var("result", -1),
    );
    Ok(())
}

pub const BINARY_SEARCH_CODE: &str = "\
procedure binarySearch(A, target)
  low = 0, high = length(A) - 1
  while low <= high
    mid = (low + high) / 2
    if A[mid] == target
      return mid
    else if A[mid] < target
      low = mid + 1
    else
      high = mid - 1
    end if
  end while
  return -1";

/// Binary search. Unsorted input is sorted first, with a step saying so.
pub fn binary_search(input: &[i64], target: i64, rec: &mut Recorder) -> ExecResult<()> {
    let mut array = input.to_vec();
    if !array.windows(2).all(|w| w[0] <= w[1]) {
        array.sort_unstable();
        rec.push(
            Step::new(
                "Binary search needs sorted input, so the array was sorted first",
                ArrayView::capture(&array),
            )
            .at_line(1),
        );
    }

    rec.push(
        Step::new(format!("Searching for {}", target), ArrayView::capture(&array))
            .at_line(2)
            .var("target", target),
    );

    // signed so `high` can drop below `low` without wrapping
    let mut low: i64 = 0;
    let mut high: i64 = array.len() as i64 - 1;

    while low <= high {
        let mid = low + (high - low) / 2;
        let m = mid as usize;
        rec.push(
            Step::new(
                format!("Middle element is {} at index {}", array[m], mid),
                ArrayView::capture(&array).highlight(HighlightType::Mid, [m]),
            )
            .at_line(4)
            .var("low", low)
            .var("high", high)
            .var("mid", mid)
            .var("target", target),
        );

        rec.count(Counter::Comparisons);
        if array[m] == target {
            rec.push(
                Step::new(
                    format!("Found {} at index {}", target, mid),
                    ArrayView::capture(&array).highlight(HighlightType::Found, [m]),
                )
                .at_line(6)
                .var("low", low)
                .var("high", high)
                .var("mid", mid)
                .var("result", mid),
            );
            return Ok(());
        }

        if array[m] < target {
            low = mid + 1;
            rec.push(
                Step::new(
                    format!("{} < {}, searching the right half", array[m], target),
                    ArrayView::capture(&array).highlight(HighlightType::Low, range(low, high)),
                )
                .at_line(8)
                .var("low", low)
                .var("high", high)
                .var("mid", mid),
            );
        } else {
            high = mid - 1;
            rec.push(
                Step::new(
                    format!("{} > {}, searching the left half", array[m], target),
                    ArrayView::capture(&array).highlight(HighlightType::High, range(low, high)),
                )
                .at_line(10)
                .var("low", low)
                .var("high", high)
                .var("mid", mid),
            );
        }
    }

    rec.push(
        Step::new(format!("{} not found in the array", target), ArrayView::capture(&array))
            .at_line(13)
            .var("target", target)
            .var("result", -1),
    );
    Ok(())
}

/// Indices `low..=high`, empty when the window has closed
fn range(low: i64, high: i64) -> Vec<usize> {
    if low > high {
        return Vec::new();
    }
    (low as usize..=high as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::HighlightType;

    #[test]
    fn binary_search_halves_the_window() {
        let mut rec = Recorder::new();
        binary_search(&[1, 3, 5, 7, 9, 11, 13], 13, &mut rec).unwrap();
        let result = rec.finish();
        assert_eq!(result.summary().comparisons, 3);
        assert_eq!(result.last().and_then(|s| s.structure.highlight_type()), Some(HighlightType::Found));
    }

    #[test]
    fn binary_search_sorts_unsorted_input_first() {
        let mut rec = Recorder::new();
        binary_search(&[9, 1, 5], 5, &mut rec).unwrap();
        let result = rec.finish();
        assert!(result.steps()[0].message.contains("sorted first"));
        assert_eq!(result.steps()[0].structure.as_array().map(|a| a.values.clone()), Some(vec![1, 5, 9]));
    }

    #[test]
    fn linear_search_on_empty_input_reports_absence() {
        let mut rec = Recorder::new();
        linear_search(&[], 4, &mut rec).unwrap();
        let result = rec.finish();
        assert_eq!(result.len(), 2);
        assert!(result.steps()[1].message.contains("not found"));
        assert_eq!(result.summary().comparisons, 0);
    }
}
