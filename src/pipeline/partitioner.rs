/// Divides work units evenly across `parts` workers.
///
/// Returns `None` when there is nothing to divide or no workers to divide
/// over. Otherwise every input item lands in exactly one partition: the
/// remainder of an uneven division is appended to the last partition, and
/// when `parts` exceeds the item count the surplus partitions are empty.
/// Pure and deterministic, no I/O.
pub fn divide_work<T: Clone>(items: &[T], parts: usize) -> Option<Vec<Vec<T>>> {
    if items.is_empty() || parts == 0 {
        return None;
    }

    let count = items.len();
    let chunk = if parts > count { 1 } else { count / parts };

    let mut partitions: Vec<Vec<T>> = (0..parts)
        .map(|part| {
            let start = (part * chunk).min(count);
            let end = ((part + 1) * chunk).min(count);
            items[start..end].to_vec()
        })
        .collect();

    // Whatever the even chunks did not cover goes to the last partition.
    let covered = parts * chunk;
    if covered < count {
        partitions
            .last_mut()
            .expect("parts > 0")
            .extend_from_slice(&items[covered..]);
    }

    Some(partitions)
}
