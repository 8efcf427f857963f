//! Sequence helpers
//!
//! Pure, in-memory operations behind the list store. Signed counts and
//! indices are translated into an explicit scan [`Direction`] plus an
//! unsigned quantity, so nothing is ever physically reversed.

use crate::error::{PropError, Result};

/// Which end of a sequence a scan starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First element towards the last
    Head,
    /// Last element towards the first
    Tail,
}

impl Direction {
    /// Absolute position of the `step`-th element visited in a sequence of
    /// length `len`
    pub fn position(self, step: usize, len: usize) -> usize {
        match self {
            Direction::Head => step,
            Direction::Tail => len - 1 - step,
        }
    }
}

/// Split a signed list index into a direction and an offset from that end
///
/// `2` → (Head, 2), `-1` → (Tail, 0), `-3` → (Tail, 2)
pub fn locate(index: i64) -> (Direction, u64) {
    if index < 0 {
        (Direction::Tail, (-(index + 1)) as u64)
    } else {
        (Direction::Head, index as u64)
    }
}

/// Split a signed removal count into a direction and an optional quota
///
/// `0` means no quota (remove all).
pub fn removal_quota(count: i64) -> (Direction, Option<usize>) {
    let direction = if count < 0 { Direction::Tail } else { Direction::Head };
    let quota = match count {
        0 => None,
        n => Some(usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX)),
    };
    (direction, quota)
}

/// Elements with index in `[start, stop]` (or `[start, ..)` without `stop`)
///
/// A start beyond the end yields an empty vector. Negative starts clamp to
/// zero; a negative stop selects nothing.
pub fn slice(elements: Vec<String>, start: i64, stop: Option<i64>) -> Vec<String> {
    let start = usize::try_from(start.max(0)).unwrap_or(usize::MAX);
    if start > elements.len() {
        return Vec::new();
    }

    let end = match stop {
        None => elements.len(),
        Some(stop) if stop < 0 => return Vec::new(),
        Some(stop) => usize::try_from(stop)
            .unwrap_or(usize::MAX)
            .saturating_add(1)
            .min(elements.len()),
    };

    if end <= start {
        return Vec::new();
    }

    elements.into_iter().skip(start).take(end - start).collect()
}

/// Remove occurrences of `element`, visiting from `direction`, stopping once
/// `quota` occurrences are gone. Survivors keep their order. Returns the
/// number removed.
pub fn remove_matching(
    elements: &mut Vec<String>,
    element: &str,
    quota: Option<usize>,
    direction: Direction,
) -> usize {
    let len = elements.len();
    let mut doomed = vec![false; len];
    let mut removed = 0;

    for step in 0..len {
        if quota.is_some_and(|quota| removed >= quota) {
            break;
        }
        let position = direction.position(step, len);
        if elements[position] == element {
            doomed[position] = true;
            removed += 1;
        }
    }

    let mut position = 0;
    elements.retain(|_| {
        let keep = !doomed[position];
        position += 1;
        keep
    });

    removed
}

/// Replace the element at signed `index` with `value`
pub fn replace_at(elements: &mut [String], index: i64, value: String) -> Result<()> {
    let len = elements.len();
    let (direction, offset) = locate(index);

    let offset = match usize::try_from(offset) {
        Ok(offset) if offset < len => offset,
        _ => return Err(PropError::OutOfRange { index, len }),
    };

    elements[direction.position(offset, len)] = value;
    Ok(())
}
