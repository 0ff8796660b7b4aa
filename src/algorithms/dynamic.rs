//! Table-filling dynamic programming: LCS, 0/1 knapsack, matrix chain order

use super::errors::{ExecResult, ExecutionError};
use crate::dispatch::Item;
use crate::trace::{Cell, Counter, DpTableView, HighlightType, Recorder, Scalar, Step};

pub const LCS_CODE: &str = "\
procedure lcs(X, Y)
  for i = 1 to m, j = 1 to n
    if X[i-1] == Y[j-1]
      dp[i][j] = dp[i-1][j-1] + 1
    else
      dp[i][j] = max(dp[i-1][j], dp[i][j-1])
  walk back from dp[m][n] to recover the subsequence
  return dp[m][n]";

pub fn lcs(first: &str, second: &str, rec: &mut Recorder) -> ExecResult<()> {
    let x: Vec<char> = first.chars().collect();
    let y: Vec<char> = second.chars().collect();
    let (m, n) = (x.len(), y.len());
    let mut dp = vec![vec![0i64; n + 1]; m + 1];

    let row_labels: Vec<String> = std::iter::once(String::new()).chain(x.iter().map(char::to_string)).collect();
    let col_labels: Vec<String> = std::iter::once(String::new()).chain(y.iter().map(char::to_string)).collect();
    let table = |dp: &[Vec<i64>]| DpTableView::capture(dp, &row_labels, &col_labels);

    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new("Initial DP table for Longest Common Subsequence", table(&dp))
            .at_line(1)
            .var("m", m)
            .var("n", n),
    );

    for i in 1..=m {
        for j in 1..=n {
            rec.count(Counter::Operations);
            rec.push(
                Step::new(
                    format!("Comparing X[{}]='{}' with Y[{}]='{}'", i - 1, x[i - 1], j - 1, y[j - 1]),
                    table(&dp).highlight(HighlightType::Current, [Cell::new(i, j)]),
                )
                .at_line(3)
                .var("i", i)
                .var("j", j),
            );

            if x[i - 1] == y[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
                rec.push(
                    Step::new(
                        format!("Match! dp[{}][{}] = dp[{}][{}] + 1 = {}", i, j, i - 1, j - 1, dp[i][j]),
                        table(&dp).highlight(HighlightType::Found, [Cell::new(i, j), Cell::new(i - 1, j - 1)]),
                    )
                    .at_line(4)
                    .var("i", i)
                    .var("j", j),
                );
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
                rec.push(
                    Step::new(
                        format!(
                            "No match. dp[{}][{}] = max(dp[{}][{}], dp[{}][{}]) = {}",
                            i, j, i - 1, j, i, j - 1, dp[i][j]
                        ),
                        table(&dp).highlight(
                            HighlightType::Compare,
                            [Cell::new(i, j), Cell::new(i - 1, j), Cell::new(i, j - 1)],
                        ),
                    )
                    .at_line(6)
                    .var("i", i)
                    .var("j", j),
                );
            }
        }
    }

    // walk back through the table to recover one longest subsequence
    let (mut i, mut j) = (m, n);
    let mut path = vec![Cell::new(i, j)];
    let mut subsequence = Vec::new();
    while i > 0 && j > 0 {
        if x[i - 1] == y[j - 1] {
            subsequence.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
        path.push(Cell::new(i, j));
    }
    let subsequence: String = subsequence.into_iter().rev().collect();

    rec.push(
        Step::new(
            format!("LCS length: {} (\"{}\")", dp[m][n], subsequence),
            table(&dp).highlight(HighlightType::Path, path),
        )
        .at_line(8)
        .var("length", dp[m][n])
        .var("lcs", subsequence),
    );
    Ok(())
}

pub const KNAPSACK_CODE: &str = "\
procedure knapsack(items, W)
  for i = 1 to n, w = 0 to W
    if weight[i] <= w
      dp[i][w] = max(dp[i-1][w], value[i] + dp[i-1][w - weight[i]])
    else
      dp[i][w] = dp[i-1][w]
  walk back from dp[n][W] to find the chosen items
  return dp[n][W]";

pub fn knapsack(items: &[Item], capacity: usize, rec: &mut Recorder) -> ExecResult<()> {
    let n = items.len();
    let mut dp = vec![vec![0i64; capacity + 1]; n + 1];

    let row_labels: Vec<String> = std::iter::once("0".to_string())
        .chain((1..=n).map(|i| format!("Item{}", i)))
        .collect();
    let col_labels: Vec<String> = (0..=capacity).map(|w| format!("W={}", w)).collect();
    let table = |dp: &[Vec<i64>]| DpTableView::capture(dp, &row_labels, &col_labels);

    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new("0/1 Knapsack: initial DP table", table(&dp))
            .at_line(1)
            .var("items", n)
            .var("capacity", capacity),
    );

    for i in 1..=n {
        let item = items[i - 1];
        for w in 0..=capacity {
            rec.count(Counter::Operations);
            rec.push(
                Step::new(
                    format!("Item {} (weight={}, value={}) at capacity {}", i, item.weight, item.value, w),
                    table(&dp).highlight(HighlightType::Current, [Cell::new(i, w)]),
                )
                .at_line(2)
                .var("i", i)
                .var("w", w),
            );

            if item.weight <= w {
                let include = item.value.checked_add(dp[i - 1][w - item.weight]).ok_or_else(|| {
                    ExecutionError::Overflow {
                        algorithm: "0/1 knapsack",
                        what: format!("dp[{}][{}]", i, w),
                    }
                })?;
                let exclude = dp[i - 1][w];
                dp[i][w] = include.max(exclude);
                rec.push(
                    Step::new(
                        format!("Can include: max(include={}, exclude={}) = {}", include, exclude, dp[i][w]),
                        table(&dp).highlight(
                            HighlightType::Compare,
                            [Cell::new(i, w), Cell::new(i - 1, w), Cell::new(i - 1, w - item.weight)],
                        ),
                    )
                    .at_line(4)
                    .var("include", include)
                    .var("exclude", exclude),
                );
            } else {
                dp[i][w] = dp[i - 1][w];
                rec.push(
                    Step::new(
                        format!("Too heavy, dp[{}][{}] = {}", i, w, dp[i][w]),
                        table(&dp).highlight(HighlightType::Compare, [Cell::new(i, w), Cell::new(i - 1, w)]),
                    )
                    .at_line(6)
                    .var("i", i)
                    .var("w", w),
                );
            }
        }
    }

    let mut w = capacity;
    let mut chosen = Vec::new();
    let mut path = Vec::new();
    for i in (1..=n).rev() {
        path.push(Cell::new(i, w));
        if dp[i][w] != dp[i - 1][w] {
            chosen.push(i);
            w -= items[i - 1].weight;
        }
    }
    chosen.reverse();
    let chosen_labels = chosen.iter().map(|i| format!("Item{}", i)).collect::<Vec<_>>().join(", ");

    rec.push(
        Step::new(
            format!("Maximum value: {} using [{}]", dp[n][capacity], chosen_labels),
            table(&dp).highlight(HighlightType::Path, path),
        )
        .at_line(8)
        .var("best", dp[n][capacity])
        .var("chosen", chosen_labels),
    );
    Ok(())
}

pub const MATRIX_CHAIN_CODE: &str = "\
procedure matrixChainOrder(p)
  n = length(p) - 1; m[i][i] = 0
  for L = 2 to n
    for i = 1 to n - L + 1
      j = i + L - 1; m[i][j] = infinity
      for k = i to j - 1
        q = m[i][k] + m[k+1][j] + p[i-1] * p[k] * p[j]
        if q < m[i][j]
          m[i][j] = q; s[i][j] = k
  return m[1][n]";

/// A DP cell that may still be unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cost {
    Finite(u64),
    Infinite,
}

impl From<Cost> for Scalar {
    fn from(cost: Cost) -> Self {
        match cost {
            Cost::Finite(c) => Scalar::from(c),
            Cost::Infinite => Scalar::Text("∞".to_string()),
        }
    }
}

impl Cost {
    fn finite(self) -> Option<u64> {
        match self {
            Cost::Finite(c) => Some(c),
            Cost::Infinite => None,
        }
    }
}

pub fn matrix_chain(dimensions: &[u64], rec: &mut Recorder) -> ExecResult<()> {
    if dimensions.len() < 2 {
        return Err(ExecutionError::InvalidInput {
            algorithm: "matrix chain multiplication",
            requirement: "at least two dimensions".to_string(),
        });
    }
    let n = dimensions.len() - 1;
    let mut m = vec![vec![Cost::Finite(0); n + 1]; n + 1];
    let mut split = vec![vec![0usize; n + 1]; n + 1];

    let labels: Vec<String> = (0..=n)
        .map(|i| if i == 0 { String::new() } else { format!("M{}", i) })
        .collect();
    let table = |m: &[Vec<Cost>]| DpTableView::capture(m, &labels, &labels);

    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new(
            format!(
                "Matrix chain multiplication for {} matrices, dimensions {}",
                n,
                dimensions.iter().map(u64::to_string).collect::<Vec<_>>().join(" x ")
            ),
            table(&m),
        )
        .at_line(1)
        .var("n", n),
    );

    for i in 1..=n {
        m[i][i] = Cost::Finite(0);
        rec.push(
            Step::new(format!("Cost for the single matrix M{} is 0", i), table(&m).highlight(HighlightType::Sorted, [Cell::new(i, i)]))
                .at_line(2)
                .var("i", i),
        );
    }

    for len in 2..=n {
        for i in 1..=n - len + 1 {
            let j = i + len - 1;
            m[i][j] = Cost::Infinite;
            rec.push(
                Step::new(
                    format!("Computing the minimum cost for M{}..M{} (length {})", i, j, len),
                    table(&m).highlight(HighlightType::Current, [Cell::new(i, j)]),
                )
                .at_line(5)
                .var("i", i)
                .var("j", j)
                .var("L", len),
            );

            for k in i..j {
                rec.count(Counter::Operations);
                rec.count(Counter::Comparisons);
                let (left, right) = match (m[i][k].finite(), m[k + 1][j].finite()) {
                    (Some(l), Some(r)) => (l, r),
                    _ => {
                        return Err(ExecutionError::InvalidInput {
                            algorithm: "matrix chain multiplication",
                            requirement: "sub-chains solved before longer chains".to_string(),
                        })
                    }
                };
                let q = left
                    .saturating_add(right)
                    .saturating_add(dimensions[i - 1].saturating_mul(dimensions[k]).saturating_mul(dimensions[j]));
                rec.push(
                    Step::new(
                        format!(
                            "Split at k={}: {} + {} + {}*{}*{} = {}",
                            k,
                            left,
                            right,
                            dimensions[i - 1],
                            dimensions[k],
                            dimensions[j],
                            q
                        ),
                        table(&m).highlight(
                            HighlightType::Compare,
                            [Cell::new(i, j), Cell::new(i, k), Cell::new(k + 1, j)],
                        ),
                    )
                    .at_line(7)
                    .var("i", i)
                    .var("j", j)
                    .var("k", k)
                    .var("q", q),
                );

                let better = match m[i][j] {
                    Cost::Infinite => true,
                    Cost::Finite(current) => q < current,
                };
                if better {
                    m[i][j] = Cost::Finite(q);
                    split[i][j] = k;
                    rec.push(
                        Step::new(format!("New minimum cost found: {}", q), table(&m).highlight(HighlightType::Found, [Cell::new(i, j)]))
                            .at_line(9)
                            .var("i", i)
                            .var("j", j)
                            .var("k", k),
                    );
                }
            }
        }
    }

    let best = m[1][n].finite().unwrap_or(0);
    let order = parenthesize(&split, 1, n);
    rec.push(
        Step::new(
            format!("Minimum multiplications: {} with order {}", best, order),
            table(&m).highlight(HighlightType::Path, [Cell::new(1, n)]),
        )
        .at_line(10)
        .var("cost", best)
        .var("order", order),
    );
    Ok(())
}

fn parenthesize(split: &[Vec<usize>], i: usize, j: usize) -> String {
    if i == j {
        return format!("M{}", i);
    }
    let k = split[i][j];
    format!("({} {})", parenthesize(split, i, k), parenthesize(split, k + 1, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RunResult;

    #[test]
    fn lcs_recovers_a_subsequence() {
        let mut rec = Recorder::new();
        lcs("ABCBDAB", "BDCABA", &mut rec).unwrap();
        let result = rec.finish();
        let last = result.last().unwrap();
        assert_eq!(last.variables.get("length"), Some(&Scalar::Number(4)));
        assert_eq!(result.summary().operations, Some(42));
    }

    #[test]
    fn lcs_with_empty_string_is_zero() {
        let mut rec = Recorder::new();
        lcs("", "ABC", &mut rec).unwrap();
        let result = rec.finish();
        assert!(result.last().unwrap().message.starts_with("LCS length: 0"));
    }

    #[test]
    fn knapsack_picks_best_items() {
        let items = [
            Item { weight: 10, value: 60 },
            Item { weight: 20, value: 100 },
            Item { weight: 30, value: 120 },
        ];
        let mut rec = Recorder::new();
        knapsack(&items, 50, &mut rec).unwrap();
        let result: RunResult = rec.finish();
        let last = result.last().unwrap();
        assert_eq!(last.variables.get("best"), Some(&Scalar::Number(220)));
        assert_eq!(last.variables.get("chosen"), Some(&Scalar::Text("Item2, Item3".to_string())));
        assert_eq!(result.summary().operations, Some(3 * 51));
    }

    #[test]
    fn knapsack_value_overflow_is_an_error() {
        let items = [Item { weight: 1, value: i64::MAX }, Item { weight: 1, value: 1 }];
        let mut rec = Recorder::new();
        assert!(matches!(
            knapsack(&items, 2, &mut rec),
            Err(ExecutionError::Overflow { algorithm: "0/1 knapsack", .. })
        ));
    }

    #[test]
    fn matrix_chain_finds_textbook_optimum() {
        let mut rec = Recorder::new();
        matrix_chain(&[10, 30, 5, 60], &mut rec).unwrap();
        let result = rec.finish();
        let last = result.last().unwrap();
        assert_eq!(last.variables.get("cost"), Some(&Scalar::Number(4500)));
        assert_eq!(last.variables.get("order"), Some(&Scalar::Text("((M1 M2) M3)".to_string())));
        assert_eq!(result.summary().comparisons, 4);
    }

    #[test]
    fn matrix_chain_rejects_a_single_dimension() {
        let mut rec = Recorder::new();
        assert!(matrix_chain(&[10], &mut rec).is_err());
    }
}
