//! N-Queens by backtracking

use super::errors::ExecResult;
use crate::trace::{Cell, Counter, HighlightType, MatrixView, Recorder, Step};

pub const N_QUEENS_CODE: &str = "\
procedure solve(row)
  for col = 0 to n - 1
    if isSafe(row, col)
      board[row][col] = Q
      if solve(row + 1) then return true
      board[row][col] = empty
  return false
  (row == n means every queen is placed)";

type Board = Vec<Vec<i64>>;

fn is_safe(board: &Board, row: usize, col: usize) -> bool {
    let n = board.len();
    let column_clear = (0..row).all(|r| board[r][col] == 0);
    let left_clear = (1..=row.min(col)).all(|d| board[row - d][col - d] == 0);
    let right_clear = (1..=row.min(n - 1 - col)).all(|d| board[row - d][col + d] == 0);
    column_clear && left_clear && right_clear
}

/// Place `n` queens, stopping at the first solution.
///
/// Every candidate square tried counts as one expanded node and one operation.
pub fn n_queens(n: usize, rec: &mut Recorder) -> ExecResult<()> {
    let mut board: Board = vec![vec![0; n]; n];
    rec.track(&[Counter::Operations, Counter::NodesExpanded]);
    rec.push(Step::new(format!("Starting N-Queens for n={}", n), MatrixView::capture(&board)).at_line(1).var("n", n));

    if !solve(&mut board, 0, rec) {
        rec.push(
            Step::new(format!("No solution exists for n={}", n), MatrixView::capture(&board))
                .at_line(7)
                .var("n", n),
        );
    }
    Ok(())
}

fn solve(board: &mut Board, row: usize, rec: &mut Recorder) -> bool {
    let n = board.len();
    if row == n {
        let queens: Vec<Cell> = (0..n)
            .flat_map(|r| (0..n).map(move |c| Cell::new(r, c)))
            .filter(|cell| board[cell.row][cell.col] == 1)
            .collect();
        rec.push(
            Step::new(
                format!("Solution found! All {} queens placed", n),
                MatrixView::capture(board).highlight(HighlightType::Found, queens),
            )
            .at_line(8),
        );
        return true;
    }

    for col in 0..n {
        rec.count(Counter::NodesExpanded);
        rec.count(Counter::Operations);
        rec.push(
            Step::new(
                format!("Trying to place a queen at row {}, col {}", row, col),
                MatrixView::capture(board).highlight(HighlightType::Current, [Cell::new(row, col)]),
            )
            .at_line(2)
            .var("row", row)
            .var("col", col)
            .var("queens", row),
        );

        if !is_safe(board, row, col) {
            rec.push(
                Step::new(
                    format!("Row {}, col {} is under attack", row, col),
                    MatrixView::capture(board).highlight(HighlightType::Compare, [Cell::new(row, col)]),
                )
                .at_line(3)
                .var("row", row)
                .var("col", col),
            );
            continue;
        }

        board[row][col] = 1;
        rec.push(
            Step::new(
                format!("Placed a queen at row {}, col {}", row, col),
                MatrixView::capture(board).highlight(HighlightType::Selected, [Cell::new(row, col)]),
            )
            .at_line(4)
            .var("row", row)
            .var("col", col)
            .var("queens", row + 1),
        );

        if solve(board, row + 1, rec) {
            return true;
        }

        board[row][col] = 0;
        rec.push(
            Step::new(
                format!("Backtracking: removing the queen from row {}, col {}", row, col),
                MatrixView::capture(board).highlight(HighlightType::Compare, [Cell::new(row, col)]),
            )
            .at_line(6)
            .var("row", row)
            .var("col", col),
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Structure;

    #[test]
    fn four_queens_finds_a_valid_board() {
        let mut rec = Recorder::new();
        n_queens(4, &mut rec).unwrap();
        let result = rec.finish();
        let board = match &result.last().unwrap().structure {
            Structure::Matrix(view) => view.data.clone(),
            other => panic!("unexpected payload {:?}", other.kind()),
        };
        assert_eq!(board.iter().flatten().sum::<i64>(), 4);
        for row in 0..4 {
            let col = board[row].iter().position(|&q| q == 1).unwrap();
            let mut cleared = board.clone();
            cleared[row][col] = 0;
            assert!(is_safe(&cleared, row, col));
        }
        let summary = result.summary();
        assert_eq!(summary.nodes_expanded, summary.operations);
    }

    #[test]
    fn three_queens_has_no_solution() {
        let mut rec = Recorder::new();
        n_queens(3, &mut rec).unwrap();
        assert!(rec.finish().last().unwrap().message.contains("No solution"));
    }
}
