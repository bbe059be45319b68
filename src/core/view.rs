//! Saved display arrangement layered over a computed roster.
//!
//! Administrators can drag signups into a preferred visual order. The saved
//! layout is a list of `(signup id, slot index)` pairs; applying it moves the
//! named signups to those positions and packs everyone else into the gaps in
//! their computed order. Eligibility is not re-checked: a view only changes
//! presentation, never who is seated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::model::{Signup, SignupId, SlotArray};

/// One saved placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    /// Signup to move.
    #[serde(alias = "signup_id")]
    pub signup_id: SignupId,
    /// Display position.
    #[serde(alias = "slot", alias = "position")]
    pub slot_index: usize,
}

/// Rearrange `slots` according to `view`.
///
/// Entries naming an unseated signup or an out-of-range position are skipped,
/// as are entries targeting a position already claimed. The result has the
/// same length and the same set of seated signups as the input.
pub fn apply_view(slots: &SlotArray, signups: &[Signup], view: &[SlotView]) -> SlotArray {
    if view.is_empty() {
        return slots.clone();
    }

    let mut arranged: SlotArray = vec![None; slots.len()];
    let mut used = HashSet::new();

    for entry in view {
        if entry.slot_index >= arranged.len() || arranged[entry.slot_index].is_some() {
            continue;
        }
        let source = slots.iter().enumerate().find_map(|(idx, cell)| {
            let seated = (*cell)?;
            let matches = signups
                .get(seated.index())
                .is_some_and(|s| s.id == entry.signup_id);
            (matches && !used.contains(&idx)).then_some((idx, seated))
        });
        if let Some((idx, seated)) = source {
            arranged[entry.slot_index] = Some(seated);
            used.insert(idx);
        }
    }

    // Remaining cells, empty ones included, keep their relative order.
    let mut rest = slots
        .iter()
        .enumerate()
        .filter(|(idx, _)| !used.contains(idx))
        .map(|(_, cell)| *cell);
    for cell in arranged.iter_mut().filter(|cell| cell.is_none()) {
        *cell = rest.next().flatten();
    }

    arranged
}
