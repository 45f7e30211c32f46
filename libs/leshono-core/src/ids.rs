//! Dotted numeric page ids (`"1.2.6"`).
//!
//! The number of segments encodes depth: one segment marks a tier, two a
//! unit container page, three or more a sub-stage lesson.

use crate::types::TierKey;
use std::cmp::Ordering;

/// Prefix of the synthesized unit checkpoint lesson id.
pub const UNIT_CHECKPOINT_PREFIX: &str = "unit:";
/// Prefix of the synthesized review checkpoint lesson id.
pub const REVIEW_CHECKPOINT_PREFIX: &str = "review:";

/// Numeric segments of an id. Segments that are not integers are skipped.
pub fn segments(id: &str) -> Vec<u64> {
    id.split('.')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .collect()
}

/// Compare two ids segment by segment as integers.
///
/// A missing trailing segment sorts lowest, so `"1.2"` precedes `"1.2.1"`.
/// Plain string order only breaks ties between ids with equal segments.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let ordering = match (left.get(i), right.get(i)) {
            (Some(x), Some(y)) => x.cmp(y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.cmp(b)
}

/// Sort ids in course order.
pub fn sort_ids(ids: &mut [String]) {
    ids.sort_by(|a, b| compare_ids(a, b));
}

/// Number of numeric segments in an id.
pub fn depth(id: &str) -> usize {
    segments(id).len()
}

/// The two-segment unit id an id belongs to, if it is at least that deep.
pub fn unit_prefix(id: &str) -> Option<String> {
    match segments(id).as_slice() {
        [major, minor, ..] => Some(format!("{}.{}", major, minor)),
        _ => None,
    }
}

/// Tier for an id, from its first numeric segment.
pub fn tier_for_id(id: &str) -> TierKey {
    match segments(id).first().copied().unwrap_or(1) {
        1 => TierKey::BeginnerA,
        2 => TierKey::BeginnerB,
        3 => TierKey::IntermediateA,
        4 => TierKey::IntermediateB,
        _ => TierKey::Advanced,
    }
}

/// Id of the checkpoint lesson that opens a unit.
pub fn unit_checkpoint_id(unit_id: &str) -> String {
    format!("{}{}", UNIT_CHECKPOINT_PREFIX, unit_id)
}

/// Id of the checkpoint lesson that closes a unit.
pub fn review_checkpoint_id(unit_id: &str) -> String {
    format!("{}{}", REVIEW_CHECKPOINT_PREFIX, unit_id)
}
