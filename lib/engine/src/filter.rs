//! Genre constraint on candidate sets.

use std::collections::BTreeSet;

/// Keep a candidate iff it shares at least one genre with the reference set.
///
/// An empty reference set keeps everything: with no genres on the seed there
/// is no constraint to enforce. For multi-seed queries the reference is the
/// union of all seeds' genre sets.
#[inline]
pub fn keep(reference: &BTreeSet<String>, candidate: &BTreeSet<String>) -> bool {
    if reference.is_empty() {
        return true;
    }
    // Walk the smaller set against the larger one.
    let (small, large) = if reference.len() <= candidate.len() {
        (reference, candidate)
    } else {
        (candidate, reference)
    };
    small.iter().any(|label| large.contains(label))
}
