//! Open-addressing hash table with linear probing

use super::errors::ExecResult;
use super::{missing_operand, unsupported};
use crate::dispatch::{Operation, OperationInput};
use crate::trace::{Counter, HashSlot, HashTableView, HighlightType, Recorder, Step};

pub const TABLE_SIZE: usize = 11;

pub const HASH_TABLE_CODE: &str = "\
procedure hashTable(T, op, key)
  h = key mod m
  for i = 0 to m - 1
    idx = (h + i) mod m
    insert: if T[idx] is empty or deleted then T[idx] = key; return
    search: if T[idx] == key then return idx
            if T[idx] is empty then return not found
    delete: if T[idx] == key then mark T[idx] deleted; return
  end for";

fn home_slot(key: i64) -> usize {
    // TABLE_SIZE fits in i64, and rem_euclid keeps negative keys in range
    key.rem_euclid(TABLE_SIZE as i64) as usize
}

pub fn hash_table(input: &OperationInput, rec: &mut Recorder) -> ExecResult<()> {
    let mut slots = vec![HashSlot::Empty; TABLE_SIZE];
    let mut skipped = Vec::new();
    for &value in &input.values {
        match (0..TABLE_SIZE)
            .map(|i| (home_slot(value) + i) % TABLE_SIZE)
            .find(|&idx| slots[idx] == HashSlot::Empty)
        {
            Some(idx) => slots[idx] = HashSlot::Occupied(value),
            None => skipped.push(value),
        }
    }

    rec.track(&[Counter::Operations]);
    let mut opening = Step::new(
        format!("Hash table of size {} built from the initial keys", TABLE_SIZE),
        HashTableView::capture(&slots),
    )
    .at_line(1)
    .var("m", TABLE_SIZE);
    if !skipped.is_empty() {
        opening.message = format!(
            "{} (table full, skipped {})",
            opening.message,
            skipped.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
        );
    }
    rec.push(opening);

    let Some(key) = input.operand else {
        return match input.operation {
            Operation::Insert | Operation::Search | Operation::Delete => {
                missing_operand(rec, input.operation, HashTableView::capture(&slots))
            }
            other => unsupported(rec, "hash table", other, HashTableView::capture(&slots)),
        };
    };

    match input.operation {
        Operation::Insert => insert(&mut slots, key, rec),
        Operation::Search => {
            search(&slots, key, rec);
        }
        Operation::Delete => {
            if let Some(idx) = search(&slots, key, rec) {
                slots[idx] = HashSlot::Deleted;
                rec.push(
                    Step::new(
                        format!("Deleted {} from index {}, leaving a tombstone", key, idx),
                        HashTableView::capture(&slots).highlight(HighlightType::Visited, [idx]),
                    )
                    .at_line(8)
                    .var("key", key)
                    .var("index", idx),
                );
            }
        }
        other => return unsupported(rec, "hash table", other, HashTableView::capture(&slots)),
    }
    Ok(())
}

fn insert(slots: &mut [HashSlot], key: i64, rec: &mut Recorder) {
    rec.count(Counter::Operations);
    let h = home_slot(key);
    rec.push(
        Step::new(
            format!("Inserting {}: hash = {} mod {} = {}", key, key, TABLE_SIZE, h),
            HashTableView::capture(slots).highlight(HighlightType::Visiting, [h]),
        )
        .at_line(2)
        .var("key", key)
        .var("h", h),
    );

    for i in 0..TABLE_SIZE {
        let idx = (h + i) % TABLE_SIZE;
        rec.count(Counter::Comparisons);
        let slot = slots[idx];
        match slot {
            HashSlot::Empty | HashSlot::Deleted => {
                slots[idx] = HashSlot::Occupied(key);
                rec.push(
                    Step::new(
                        format!("Inserted {} at index {}", key, idx),
                        HashTableView::capture(slots).highlight(HighlightType::Found, [idx]),
                    )
                    .at_line(5)
                    .var("key", key)
                    .var("i", i)
                    .var("index", idx),
                );
                return;
            }
            HashSlot::Occupied(existing) => {
                rec.push(
                    Step::new(
                        format!("Collision at index {} (holds {}), probing next slot", idx, existing),
                        HashTableView::capture(slots).highlight(HighlightType::Compare, [idx]),
                    )
                    .at_line(4)
                    .var("key", key)
                    .var("i", i)
                    .var("index", idx),
                );
            }
        }
    }

    rec.push(
        Step::new(format!("Table is full, {} could not be inserted", key), HashTableView::capture(slots))
            .at_line(9)
            .var("key", key),
    );
}

/// Probe for `key`; returns its slot index when present
fn search(slots: &[HashSlot], key: i64, rec: &mut Recorder) -> Option<usize> {
    rec.count(Counter::Operations);
    let h = home_slot(key);
    rec.push(
        Step::new(
            format!("Searching for {}: hash = {} mod {} = {}", key, key, TABLE_SIZE, h),
            HashTableView::capture(slots).highlight(HighlightType::Visiting, [h]),
        )
        .at_line(2)
        .var("key", key)
        .var("h", h),
    );

    for i in 0..TABLE_SIZE {
        let idx = (h + i) % TABLE_SIZE;
        rec.count(Counter::Comparisons);
        let slot = slots[idx];
        match slot {
            HashSlot::Occupied(value) if value == key => {
                rec.push(
                    Step::new(
                        format!("Found {} at index {}", key, idx),
                        HashTableView::capture(slots).highlight(HighlightType::Found, [idx]),
                    )
                    .at_line(6)
                    .var("key", key)
                    .var("index", idx),
                );
                return Some(idx);
            }
            HashSlot::Empty => {
                rec.push(
                    Step::new(
                        format!("Index {} is empty, {} is not in the table", idx, key),
                        HashTableView::capture(slots).highlight(HighlightType::Visited, [idx]),
                    )
                    .at_line(7)
                    .var("key", key)
                    .var("index", idx),
                );
                return None;
            }
            HashSlot::Occupied(_) | HashSlot::Deleted => {
                rec.push(
                    Step::new(
                        format!("Index {} does not hold {}, probing next slot", idx, key),
                        HashTableView::capture(slots).highlight(HighlightType::Compare, [idx]),
                    )
                    .at_line(4)
                    .var("key", key)
                    .var("i", i)
                    .var("index", idx),
                );
            }
        }
    }

    rec.push(
        Step::new(format!("Probed every slot, {} not found", key), HashTableView::capture(slots))
            .at_line(9)
            .var("key", key),
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{RunResult, Structure};

    fn run(values: &[i64], operation: Operation, operand: Option<i64>) -> RunResult {
        let mut rec = Recorder::new();
        let input = OperationInput { values: values.to_vec(), operation, operand };
        hash_table(&input, &mut rec).unwrap();
        rec.finish()
    }

    fn final_slots(result: &RunResult) -> Vec<HashSlot> {
        match &result.last().unwrap().structure {
            Structure::HashTable(view) => view.slots.clone(),
            other => panic!("unexpected payload {:?}", other.kind()),
        }
    }

    #[test]
    fn collisions_probe_linearly() {
        // 3, 14 and 25 all hash to 3
        let result = run(&[3, 14], Operation::Insert, Some(25));
        assert_eq!(final_slots(&result)[5], HashSlot::Occupied(25));
        assert_eq!(result.summary().comparisons, 3);
        assert_eq!(result.summary().operations, Some(1));
    }

    #[test]
    fn search_probes_past_tombstones() {
        let mut rec = Recorder::new();
        let mut slots = vec![HashSlot::Empty; TABLE_SIZE];
        slots[3] = HashSlot::Deleted;
        slots[4] = HashSlot::Occupied(14);
        assert_eq!(search(&slots, 14, &mut rec), Some(4));
    }

    #[test]
    fn delete_leaves_a_tombstone() {
        let result = run(&[3, 14], Operation::Delete, Some(3));
        let slots = final_slots(&result);
        assert_eq!(slots[3], HashSlot::Deleted);
        assert_eq!(slots[4], HashSlot::Occupied(14));
    }

    #[test]
    fn negative_keys_hash_into_range() {
        assert_eq!(home_slot(-1), TABLE_SIZE - 1);
    }
}
