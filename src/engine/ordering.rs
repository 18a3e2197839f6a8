//! Sibling ordering with partial indices.
//!
//! Items may carry an explicit index. Indexed items sort by index (ties keep
//! registration order); unindexed items fill the remaining positions in
//! registration order. At position `p` the next indexed item goes first if
//! its index is `<= p`, otherwise the next unindexed item takes the slot.
//!
//! ```text
//! registered:  A  B  C  D(0)
//! resolved:    D  A  B  C
//! ```

/// Resolve the order of siblings.
///
/// `items` is in registration order, each paired with its optional index.
/// Returns the keys in layout order.
pub fn resolve_order<K: Copy>(items: &[(K, Option<i32>)]) -> Vec<K> {
    let mut indexed: Vec<(K, i32)> = items
        .iter()
        .filter_map(|&(key, index)| index.map(|i| (key, i)))
        .collect();
    // sort_by_key is stable, ties stay in registration order
    indexed.sort_by_key(|&(_, index)| index);

    let mut unindexed = items.iter().filter(|(_, index)| index.is_none()).map(|&(key, _)| key);
    let mut indexed = indexed.into_iter().peekable();

    let mut out = Vec::with_capacity(items.len());
    while out.len() < items.len() {
        let position = out.len() as i64;
        let claims = indexed.peek().is_some_and(|&(_, index)| i64::from(index) <= position);

        let next = if claims {
            indexed.next().map(|(key, _)| key)
        } else {
            unindexed.next().or_else(|| indexed.next().map(|(key, _)| key))
        };

        match next {
            Some(key) => out.push(key),
            None => break,
        }
    }
    out
}

/// A single child move: take `key` out and insert it at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move<K> {
    pub key: K,
    pub to: usize,
}

/// Minimal remove/insert sequence turning `current` into `desired`.
///
/// Walks positions left to right; a position already holding the right key is
/// left alone. Applying the moves in order to `current` yields `desired`.
/// Keys in `desired` missing from `current` are inserted; keys missing from
/// `desired` are ignored and end up after every desired key.
pub fn plan_moves<K: Copy + PartialEq>(current: &[K], desired: &[K]) -> Vec<Move<K>> {
    let mut working = current.to_vec();
    let mut moves = Vec::new();

    for (to, &key) in desired.iter().enumerate() {
        if working.get(to) == Some(&key) {
            continue;
        }
        if let Some(from) = working.iter().position(|k| *k == key) {
            working.remove(from);
        }
        working.insert(to.min(working.len()), key);
        moves.push(Move { key, to });
    }

    moves
}
