//! Comparison sorts over an array of integers

use super::errors::ExecResult;
use crate::trace::{ArrayView, Counter, HighlightType, Recorder, Step};
use rand::Rng;

pub const BUBBLE_SORT_CODE: &str = "\
procedure bubbleSort(A)
  n = length(A)
  for i = 0 to n - 1
    for j = 0 to n - i - 2
      if A[j] > A[j + 1]
        swap(A[j], A[j + 1])
      end if
    end for
  end for
  return A";

pub fn bubble_sort(input: &[i64], rec: &mut Recorder) -> ExecResult<()> {
    let mut array = input.to_vec();
    let n = array.len();
    rec.track(&[Counter::Swaps]);
    rec.push(Step::new("Starting Bubble Sort", ArrayView::capture(&array)).at_line(1).var("n", n));

    for i in 0..n {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            rec.count(Counter::Comparisons);
            rec.push(
                Step::new(
                    format!("Comparing {} and {}", array[j], array[j + 1]),
                    ArrayView::capture(&array).highlight(HighlightType::Compare, [j, j + 1]),
                )
                .at_line(5)
                .var("i", i)
                .var("j", j),
            );

            if array[j] > array[j + 1] {
                let (a, b) = (array[j], array[j + 1]);
                array.swap(j, j + 1);
                swapped = true;
                rec.count(Counter::Swaps);
                rec.push(
                    Step::new(
                        format!("Swapped {} and {}", a, b),
                        ArrayView::capture(&array).highlight(HighlightType::Swap, [j, j + 1]),
                    )
                    .at_line(6)
                    .var("i", i)
                    .var("j", j),
                );
            }
        }

        let settled = n - i - 1;
        rec.push(
            Step::new(
                format!("{} is now in its sorted position", array[settled]),
                ArrayView::capture(&array).highlight(HighlightType::Sorted, [settled]),
            )
            .at_line(3)
            .var("i", i)
            .var("swapped", swapped),
        );
    }

    rec.push(
        Step::new("Array is sorted", ArrayView::capture(&array).highlight(HighlightType::Sorted, (0..n).collect::<Vec<_>>()))
            .at_line(10),
    );
    Ok(())
}

pub const SELECTION_SORT_CODE: &str = "\
procedure selectionSort(A)
  n = length(A)
  for i = 0 to n - 2
    minIndex = i
    for j = i + 1 to n - 1
      if A[j] < A[minIndex]
        minIndex = j
      end if
    end for
    swap(A[i], A[minIndex])
  end for
  return A";

pub fn selection_sort(input: &[i64], rec: &mut Recorder) -> ExecResult<()> {
    let mut array = input.to_vec();
    let n = array.len();
    rec.track(&[Counter::Swaps]);
    rec.push(Step::new("Starting Selection Sort", ArrayView::capture(&array)).at_line(1).var("n", n));

    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;
        rec.push(
            Step::new(
                format!("Assume {} at index {} is the minimum", array[i], i),
                ArrayView::capture(&array).highlight(HighlightType::Current, [i]),
            )
            .at_line(4)
            .var("i", i)
            .var("minIndex", min_index),
        );

        for j in i + 1..n {
            rec.count(Counter::Comparisons);
            rec.push(
                Step::new(
                    format!("Comparing {} with current minimum {}", array[j], array[min_index]),
                    ArrayView::capture(&array).highlight(HighlightType::Compare, [min_index, j]),
                )
                .at_line(6)
                .var("i", i)
                .var("j", j)
                .var("minIndex", min_index),
            );

            if array[j] < array[min_index] {
                min_index = j;
                rec.push(
                    Step::new(
                        format!("New minimum {} found at index {}", array[j], j),
                        ArrayView::capture(&array).highlight(HighlightType::Selected, [j]),
                    )
                    .at_line(7)
                    .var("i", i)
                    .var("j", j)
                    .var("minIndex", min_index),
                );
            }
        }

        if min_index != i {
            let (a, b) = (array[i], array[min_index]);
            array.swap(i, min_index);
            rec.count(Counter::Swaps);
            rec.push(
                Step::new(
                    format!("Swapped {} and {}", a, b),
                    ArrayView::capture(&array).highlight(HighlightType::Swap, [i, min_index]),
                )
                .at_line(10)
                .var("i", i)
                .var("minIndex", min_index),
            );
        }

        rec.push(
            Step::new(
                format!("{} is in its sorted position", array[i]),
                ArrayView::capture(&array).highlight(HighlightType::Sorted, [i]),
            )
            .at_line(3)
            .var("i", i),
        );
    }

    rec.push(
        Step::new("Array is sorted", ArrayView::capture(&array).highlight(HighlightType::Sorted, (0..n).collect::<Vec<_>>()))
            .at_line(12),
    );
    Ok(())
}

pub const INSERTION_SORT_CODE: &str = "\
procedure insertionSort(A)
  for i = 1 to length(A) - 1
    key = A[i]
    j = i - 1
    while j >= 0 and A[j] > key
      A[j + 1] = A[j]
      j = j - 1
    end while
    A[j + 1] = key
  end for
  return A";

/// Insertion sort. Each shift counts as a swap, and the comparison that ends
/// the inner loop is counted whenever an element to the left exists.
pub fn insertion_sort(input: &[i64], rec: &mut Recorder) -> ExecResult<()> {
    let mut array = input.to_vec();
    let n = array.len();
    rec.track(&[Counter::Swaps]);
    rec.push(Step::new("Starting Insertion Sort", ArrayView::capture(&array)).at_line(1).var("n", n));

    for i in 1..n {
        let key = array[i];
        rec.push(
            Step::new(
                format!("Picking {} as the key", key),
                ArrayView::capture(&array).highlight(HighlightType::Current, [i]),
            )
            .at_line(3)
            .var("i", i)
            .var("key", key),
        );

        // `hole` is j + 1 in the listing
        let mut hole = i;
        while hole > 0 {
            rec.count(Counter::Comparisons);
            rec.push(
                Step::new(
                    format!("Comparing {} with key {}", array[hole - 1], key),
                    ArrayView::capture(&array).highlight(HighlightType::Compare, [hole - 1, hole]),
                )
                .at_line(5)
                .var("i", i)
                .var("j", hole - 1)
                .var("key", key),
            );
            if array[hole - 1] <= key {
                break;
            }

            array[hole] = array[hole - 1];
            rec.count(Counter::Swaps);
            rec.push(
                Step::new(
                    format!("Shifting {} one position right", array[hole]),
                    ArrayView::capture(&array).highlight(HighlightType::Swap, [hole - 1, hole]),
                )
                .at_line(6)
                .var("i", i)
                .var("j", hole - 1)
                .var("key", key),
            );
            hole -= 1;
        }

        array[hole] = key;
        rec.push(
            Step::new(
                format!("Inserted {} at index {}", key, hole),
                ArrayView::capture(&array).highlight(HighlightType::Found, [hole]),
            )
            .at_line(9)
            .var("i", i)
            .var("key", key),
        );
    }

    rec.push(
        Step::new("Array is sorted", ArrayView::capture(&array).highlight(HighlightType::Sorted, (0..n).collect::<Vec<_>>()))
            .at_line(11),
    );
    Ok(())
}

pub const MERGE_SORT_CODE: &str = "\
procedure mergeSort(A, left, right)
  if left < right
    mid = (left + right) / 2
    mergeSort(A, left, mid)
    mergeSort(A, mid + 1, right)
    merge(A, left, mid, right)
  end if

procedure merge(A, left, mid, right)
  copy A[left..mid] to L and A[mid+1..right] to R
  while L and R are not empty
    if L[i] <= R[j]
      A[k] = L[i]; i = i + 1
    else
      A[k] = R[j]; j = j + 1
    end if
  copy remaining elements into A";

pub fn merge_sort(input: &[i64], rec: &mut Recorder) -> ExecResult<()> {
    let mut array = input.to_vec();
    let n = array.len();
    rec.track(&[Counter::RecursiveCalls]);
    rec.push(Step::new("Starting Merge Sort", ArrayView::capture(&array)).at_line(1).var("n", n));

    if n > 1 {
        divide(&mut array, 0, n - 1, 0, rec);
    }

    rec.push(
        Step::new("Array is sorted", ArrayView::capture(&array).highlight(HighlightType::Sorted, (0..n).collect::<Vec<_>>()))
            .at_line(1),
    );
    Ok(())
}

fn divide(array: &mut [i64], left: usize, right: usize, depth: usize, rec: &mut Recorder) {
    if left >= right {
        return;
    }
    rec.count(Counter::RecursiveCalls);
    let mid = (left + right) / 2;
    rec.push(
        Step::new(
            format!("Dividing indices {}..={} at {}", left, right, mid),
            ArrayView::capture(array).highlight(HighlightType::Current, (left..=right).collect::<Vec<_>>()),
        )
        .at_line(3)
        .var("left", left)
        .var("mid", mid)
        .var("right", right)
        .var("depth", depth),
    );

    divide(array, left, mid, depth + 1, rec);
    divide(array, mid + 1, right, depth + 1, rec);
    merge(array, left, mid, right, rec);
}

fn merge(array: &mut [i64], left: usize, mid: usize, right: usize, rec: &mut Recorder) {
    let lower = array[left..=mid].to_vec();
    let upper = array[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lower.len() && j < upper.len() {
        rec.count(Counter::Comparisons);
        rec.push(
            Step::new(
                format!("Comparing {} and {}", lower[i], upper[j]),
                ArrayView::capture(array).highlight(HighlightType::Compare, [k]),
            )
            .at_line(12)
            .var("left", left)
            .var("right", right)
            .var("k", k),
        );

        let (placed, line) = if lower[i] <= upper[j] {
            i += 1;
            (lower[i - 1], 13)
        } else {
            j += 1;
            (upper[j - 1], 15)
        };
        array[k] = placed;
        rec.push(
            Step::new(
                format!("Placed {} at index {}", placed, k),
                ArrayView::capture(array).highlight(HighlightType::Swap, [k]),
            )
            .at_line(line)
            .var("k", k),
        );
        k += 1;
    }

    for &value in lower[i..].iter().chain(&upper[j..]) {
        array[k] = value;
        k += 1;
    }

    rec.push(
        Step::new(
            format!("Merged indices {}..={}", left, right),
            ArrayView::capture(array).highlight(HighlightType::Sorted, (left..=right).collect::<Vec<_>>()),
        )
        .at_line(17)
        .var("left", left)
        .var("mid", mid)
        .var("right", right),
    );
}

pub const QUICK_SORT_CODE: &str = "\
procedure quickSort(A, low, high)
  if low < high
    p = partition(A, low, high)
    quickSort(A, low, p - 1)
    quickSort(A, p + 1, high)
  end if

procedure partition(A, low, high)
  pivot = A[high]
  i = low - 1
  for j = low to high - 1
    if A[j] < pivot
      i = i + 1
      swap(A[i], A[j])
  swap(A[i + 1], A[high])
  return i + 1";

pub const RANDOMIZED_QUICK_SORT_CODE: &str = "\
procedure randomizedQuickSort(A, low, high)
  if low < high
    p = randomizedPartition(A, low, high)
    randomizedQuickSort(A, low, p - 1)
    randomizedQuickSort(A, p + 1, high)
  end if

procedure randomizedPartition(A, low, high)
  r = random(low, high)
  swap(A[r], A[high])
  return partition(A, low, high)";

/// Quick sort with the Lomuto scheme and the last element as pivot
pub fn quick_sort(input: &[i64], rec: &mut Recorder) -> ExecResult<()> {
    quick_sort_with(input, PivotRule::Last, rec)
}

/// Quick sort with a uniformly random pivot drawn from the recorder's rng.
///
/// Moving the chosen pivot to the end always counts as a swap.
pub fn randomized_quick_sort(input: &[i64], rec: &mut Recorder) -> ExecResult<()> {
    quick_sort_with(input, PivotRule::Random, rec)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotRule {
    Last,
    Random,
}

fn quick_sort_with(input: &[i64], rule: PivotRule, rec: &mut Recorder) -> ExecResult<()> {
    let mut array = input.to_vec();
    let n = array.len();
    rec.track(&[Counter::Swaps, Counter::RecursiveCalls]);
    let title = match rule {
        PivotRule::Last => "Starting Quick Sort",
        PivotRule::Random => "Starting Randomized Quick Sort",
    };
    rec.push(Step::new(title, ArrayView::capture(&array)).at_line(1).var("n", n));

    if n > 1 {
        quick(&mut array, 0, n - 1, rule, rec);
    }

    rec.push(
        Step::new("Array is sorted", ArrayView::capture(&array).highlight(HighlightType::Sorted, (0..n).collect::<Vec<_>>()))
            .at_line(1),
    );
    Ok(())
}

fn quick(array: &mut [i64], low: usize, high: usize, rule: PivotRule, rec: &mut Recorder) {
    if low >= high {
        return;
    }
    rec.count(Counter::RecursiveCalls);
    rec.push(
        Step::new(
            format!("Sorting indices {}..={}", low, high),
            ArrayView::capture(array).highlight(HighlightType::Current, (low..=high).collect::<Vec<_>>()),
        )
        .at_line(2)
        .var("low", low)
        .var("high", high),
    );

    if rule == PivotRule::Random {
        let pick = rec.rng().gen_range(low..=high);
        rec.push(
            Step::new(
                format!("Randomly chose {} at index {} as pivot", array[pick], pick),
                ArrayView::capture(array).highlight(HighlightType::Candidate, [pick]),
            )
            .at_line(9)
            .var("low", low)
            .var("high", high)
            .var("r", pick),
        );
        array.swap(pick, high);
        rec.count(Counter::Swaps);
        rec.push(
            Step::new(
                format!("Moved pivot {} to the end", array[high]),
                ArrayView::capture(array).highlight(HighlightType::Swap, [pick, high]),
            )
            .at_line(10)
            .var("r", pick),
        );
    }

    let p = partition(array, low, high, rec);
    if p > low {
        quick(array, low, p - 1, rule, rec);
    }
    quick(array, p + 1, high, rule, rec);
}

fn partition(array: &mut [i64], low: usize, high: usize, rec: &mut Recorder) -> usize {
    let pivot = array[high];
    rec.push(
        Step::new(
            format!("Pivot is {}", pivot),
            ArrayView::capture(array).highlight(HighlightType::Pivot, [high]),
        )
        .at_line(9)
        .var("low", low)
        .var("high", high)
        .var("pivot", pivot),
    );

    // first index not yet known to hold a value below the pivot
    let mut store = low;
    for j in low..high {
        rec.count(Counter::Comparisons);
        rec.push(
            Step::new(
                format!("Comparing {} with pivot {}", array[j], pivot),
                ArrayView::capture(array).highlight(HighlightType::Compare, [j, high]),
            )
            .at_line(12)
            .var("j", j)
            .var("i", store)
            .var("pivot", pivot),
        );

        if array[j] < pivot {
            if store != j {
                let message = format!("Swapped {} and {}", array[store], array[j]);
                array.swap(store, j);
                rec.count(Counter::Swaps);
                rec.push(
                    Step::new(
                        message,
                        ArrayView::capture(array).highlight(HighlightType::Swap, [store, j]),
                    )
                    .at_line(14)
                    .var("j", j)
                    .var("i", store),
                );
            }
            store += 1;
        }
    }

    if store != high {
        array.swap(store, high);
        rec.count(Counter::Swaps);
    }
    rec.push(
        Step::new(
            format!("Pivot {} placed at index {}", pivot, store),
            ArrayView::capture(array).highlight(HighlightType::Sorted, [store]),
        )
        .at_line(15)
        .var("pivot", pivot)
        .var("p", store),
    );
    store
}
