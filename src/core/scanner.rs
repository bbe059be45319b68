//! First-fit scanning over a partially filled slot array.

use crate::core::model::{Signup, SlotArray};
use crate::core::rules::RuleSet;

/// Lowest open slot after `resume_from` whose rule admits `signup`.
///
/// `resume_from` is an exclusive lower bound; `None` scans from slot 0.
/// Occupied cells are skipped. The scanner never writes; the caller commits
/// whatever index it returns.
pub fn scan(
    rules: &RuleSet,
    slots: &SlotArray,
    signup: &Signup,
    resume_from: Option<usize>,
) -> Option<usize> {
    let start = resume_from.map_or(0, |i| i + 1);
    rules
        .iter()
        .zip(slots.iter())
        .enumerate()
        .skip(start)
        .find(|(_, (rule, cell))| cell.is_none() && rule.admits(signup))
        .map(|(idx, _)| idx)
}

/// Every eligible open slot in ascending order.
pub fn candidates<'a>(
    rules: &'a RuleSet,
    slots: &'a SlotArray,
    signup: &'a Signup,
) -> impl Iterator<Item = usize> + 'a {
    std::iter::successors(scan(rules, slots, signup, None), move |&prev| {
        scan(rules, slots, signup, Some(prev))
    })
}
