//! Huffman coding

use super::errors::{ExecResult, ExecutionError};
use crate::dispatch::Frequency;
use crate::trace::{ArrayView, Counter, HighlightType, Recorder, Step};
use std::collections::BTreeMap;

pub const HUFFMAN_CODE: &str = "\
procedure huffman(C)
  Q = priority queue of leaves ordered by frequency
  while |Q| > 1
    x = extractMin(Q); y = extractMin(Q)
    z = new node with freq x.freq + y.freq
    z.left = x; z.right = y
    insert(Q, z)
  assign 0 to left edges and 1 to right edges
  return codes";

#[derive(Debug)]
struct HuffmanNode {
    symbol: Option<String>,
    freq: i64,
    left: Option<usize>,
    right: Option<usize>,
}

/// Build a Huffman tree. The array payload shows the frequencies in the
/// priority queue after each merge.
pub fn huffman(frequencies: &[Frequency], rec: &mut Recorder) -> ExecResult<()> {
    let mut arena: Vec<HuffmanNode> = Vec::new();
    let mut queue: Vec<usize> = Vec::new();
    for f in frequencies {
        let id = arena.len();
        arena.push(HuffmanNode {
            symbol: Some(f.symbol.clone()),
            freq: f.freq,
            left: None,
            right: None,
        });
        enqueue(&arena, &mut queue, id);
    }
    let freqs = |queue: &[usize], arena: &[HuffmanNode]| queue.iter().map(|&id| arena[id].freq).collect::<Vec<_>>();

    rec.track(&[Counter::Operations]);
    rec.push(
        Step::new(
            format!("Starting Huffman encoding with {} symbols", frequencies.len()),
            ArrayView::capture(&freqs(&queue, &arena)),
        )
        .at_line(2)
        .var("symbols", frequencies.len()),
    );

    if queue.is_empty() {
        rec.push(Step::new("No symbols to encode", ArrayView::capture(&[])).at_line(9));
        return Ok(());
    }

    while queue.len() > 1 {
        rec.count(Counter::Operations);
        let (left, right) = (queue.remove(0), queue.remove(0));
        let (lf, rf) = (arena[left].freq, arena[right].freq);
        let merged = lf.checked_add(rf).ok_or_else(|| ExecutionError::Overflow {
            algorithm: "huffman",
            what: format!("{} + {}", lf, rf),
        })?;

        let mut before = vec![lf, rf];
        before.extend(freqs(&queue, &arena));
        rec.push(
            Step::new(
                format!("Combining the two smallest frequencies {} and {}", lf, rf),
                ArrayView::capture(&before).highlight(HighlightType::Selected, [0, 1]),
            )
            .at_line(4)
            .var("x", lf)
            .var("y", rf),
        );

        let id = arena.len();
        arena.push(HuffmanNode {
            symbol: None,
            freq: merged,
            left: Some(left),
            right: Some(right),
        });
        let position = enqueue(&arena, &mut queue, id);
        rec.push(
            Step::new(
                format!("Created a node with frequency {}", merged),
                ArrayView::capture(&freqs(&queue, &arena)).highlight(HighlightType::Found, [position]),
            )
            .at_line(7)
            .var("z", merged)
            .var("queue", queue.len()),
        );
    }

    let root = queue[0];
    let mut codes = BTreeMap::new();
    assign_codes(&arena, root, String::new(), &mut codes)?;

    let listing = codes
        .iter()
        .map(|(symbol, code)| format!("{}={}", symbol, code))
        .collect::<Vec<_>>()
        .join(", ");
    let mut step = Step::new(
        format!("Huffman codes: {}", listing),
        ArrayView::capture(&[arena[root].freq]).highlight(HighlightType::Sorted, [0]),
    )
    .at_line(9);
    for (symbol, code) in &codes {
        step = step.var(symbol, code.clone());
    }
    rec.push(step);
    Ok(())
}

/// Insert `id` after every node with an equal or smaller frequency; returns its position
fn enqueue(arena: &[HuffmanNode], queue: &mut Vec<usize>, id: usize) -> usize {
    let freq = arena[id].freq;
    let position = queue.iter().position(|&q| arena[q].freq > freq).unwrap_or(queue.len());
    queue.insert(position, id);
    position
}

fn assign_codes(
    arena: &[HuffmanNode],
    id: usize,
    prefix: String,
    codes: &mut BTreeMap<String, String>,
) -> ExecResult<()> {
    let node = arena.get(id).ok_or(ExecutionError::DanglingNode { structure: "huffman tree", id })?;
    if let Some(symbol) = &node.symbol {
        // a lone symbol still needs a one-bit code
        let code = if prefix.is_empty() { "0".to_string() } else { prefix };
        codes.insert(symbol.clone(), code);
        return Ok(());
    }
    if let Some(left) = node.left {
        assign_codes(arena, left, format!("{}0", prefix), codes)?;
    }
    if let Some(right) = node.right {
        assign_codes(arena, right, format!("{}1", prefix), codes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Scalar;

    fn freq(symbol: &str, freq: i64) -> Frequency {
        Frequency { symbol: symbol.to_string(), freq }
    }

    #[test]
    fn frequent_symbols_get_shorter_codes() {
        let input = [freq("a", 45), freq("b", 13), freq("c", 12), freq("d", 16), freq("e", 9), freq("f", 5)];
        let mut rec = Recorder::new();
        huffman(&input, &mut rec).unwrap();
        let result = rec.finish();
        let vars = &result.last().unwrap().variables;
        assert_eq!(vars.get("a"), Some(&Scalar::Text("0".to_string())));
        let len = |s: &str| vars.get(s).map(|v| v.to_string().len()).unwrap();
        assert!(len("f") >= len("b"));
        assert_eq!(result.summary().operations, Some(5));
    }

    #[test]
    fn frequency_overflow_is_an_error() {
        let mut rec = Recorder::new();
        assert!(matches!(
            huffman(&[freq("a", i64::MAX), freq("b", 1)], &mut rec),
            Err(ExecutionError::Overflow { algorithm: "huffman", .. })
        ));
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let mut rec = Recorder::new();
        huffman(&[freq("x", 3)], &mut rec).unwrap();
        let result = rec.finish();
        assert_eq!(result.last().unwrap().variables.get("x"), Some(&Scalar::Text("0".to_string())));
    }
}
