//! `Number01` sort rank reconciliation.
//!
//! Operator-assigned ranks are used as given. Values without an assignment
//! are numbered after the highest assigned rank in use, in the order they
//! first appear.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use dmt_model::SortAssignment;

use crate::dedupe::distinct_by;

/// Final rank for every distinct dropdown value of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortRanks {
    order: Vec<String>,
    ranks: BTreeMap<String, u32>,
}

impl SortRanks {
    /// Rank for a value, or `None` if the value was not seen.
    pub fn get(&self, value: &str) -> Option<u32> {
        self.ranks.get(value).copied()
    }

    /// Rank for a value as written to `Number01`; unseen values read as 0.
    pub fn number01(&self, value: &str) -> u32 {
        self.get(value).unwrap_or(0)
    }

    /// Values with their ranks in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(|value| (value.as_str(), self.ranks[value]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Assigns a rank to every distinct value.
///
/// Mapped values keep their assigned rank. Unmapped values receive
/// `max + 1, max + 2, ...` in first-seen order, where `max` is the highest
/// assigned rank among the values present (0 when none are mapped). Auto
/// ranks stop at `u32::MAX` rather than wrapping.
pub fn reconcile_ranks<'a, I>(values: I, assignment: Option<&SortAssignment>) -> SortRanks
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct = distinct_by(values, |value| *value);
    let assigned = |value: &str| assignment.and_then(|a| a.get(value));

    let max_mapped = distinct
        .iter()
        .filter_map(|value| assigned(*value))
        .max()
        .unwrap_or(0);

    let mut next = max_mapped;
    let mut auto_filled = 0usize;
    let mut used = BTreeSet::new();
    let mut ranks = BTreeMap::new();
    for value in &distinct {
        let rank = match assigned(*value) {
            Some(rank) => {
                if !used.insert(rank) {
                    warn!(value = *value, rank, "sort rank assigned to more than one value");
                }
                rank
            }
            None => {
                auto_filled += 1;
                next = match next.checked_add(1) {
                    Some(rank) => rank,
                    None => {
                        warn!(value = *value, "sort rank space exhausted, reusing u32::MAX");
                        u32::MAX
                    }
                };
                next
            }
        };
        ranks.insert((*value).to_string(), rank);
    }
    debug!(
        values = distinct.len(),
        mapped = used.len(),
        auto_filled,
        "reconciled sort ranks"
    );

    SortRanks {
        order: distinct.into_iter().map(str::to_string).collect(),
        ranks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_assignment_ranks_follow_first_seen_order() {
        let ranks = reconcile_ranks(["Shiny", "Matte", "Shiny"], None);
        assert_eq!(ranks.get("Shiny"), Some(1));
        assert_eq!(ranks.get("Matte"), Some(2));
        assert_eq!(ranks.len(), 2);
    }

    #[test]
    fn unmapped_values_follow_the_highest_mapped_rank() {
        let sort: SortAssignment = [("B", 5), ("D", 2)].into_iter().collect();
        let ranks = reconcile_ranks(["A", "B", "C", "D"], Some(&sort));
        let collected: Vec<_> = ranks.iter().collect();
        assert_eq!(collected, vec![("A", 6), ("B", 5), ("C", 7), ("D", 2)]);
    }

    #[test]
    fn assignments_for_absent_values_do_not_raise_the_floor() {
        let sort: SortAssignment = [("Gone", 40), ("A", 1)].into_iter().collect();
        let ranks = reconcile_ranks(["A", "B"], Some(&sort));
        assert_eq!(ranks.get("B"), Some(2));
    }

    #[test]
    fn highest_possible_mapped_rank_does_not_overflow() {
        let sort: SortAssignment = [("A", u32::MAX)].into_iter().collect();
        let ranks = reconcile_ranks(["A", "B", "C"], Some(&sort));
        assert_eq!(ranks.get("A"), Some(u32::MAX));
        assert_eq!(ranks.get("B"), Some(u32::MAX));
        assert_eq!(ranks.get("C"), Some(u32::MAX));
    }

    #[test]
    fn largest_operator_rank_leaves_room_for_auto_ranks() {
        let sort: SortAssignment = [("A", dmt_model::MAX_RANK)].into_iter().collect();
        let ranks = reconcile_ranks(["A", "B"], Some(&sort));
        assert_eq!(ranks.get("B"), Some(dmt_model::MAX_RANK + 1));
    }

    #[test]
    fn unseen_values_read_as_zero() {
        let ranks = reconcile_ranks(["A"], None);
        assert_eq!(ranks.number01("Z"), 0);
    }

    #[test]
    fn empty_input_yields_no_ranks() {
        let ranks = reconcile_ranks(std::iter::empty(), Some(&SortAssignment::new()));
        assert!(ranks.is_empty());
    }
}
