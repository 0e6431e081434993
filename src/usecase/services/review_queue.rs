use std::collections::BTreeSet;

use crate::domain::entities::review::{BusinessKey, GroupingStrategy, ReviewProgress, ReviewUnit};
use crate::domain::entities::table::{normalize, Table, SUBCATEGORY_COLUMN};
use crate::usecase::services::grouper::group_for;

/// Check column name plus the sentinel marking a row reviewed.
#[derive(Debug, Clone, Copy)]
pub struct CheckSpec<'a> {
    pub column: &'a str,
    pub value: &'a str,
}

/// Positions of rows not yet checked, in table order. Recomputed on every
/// call; callers must not keep the result across a mutation.
pub fn unreviewed(table: &Table, check: CheckSpec<'_>) -> Vec<usize> {
    (0..table.len())
        .filter(|&row_idx| !table.is_checked(row_idx, check.column, check.value))
        .collect()
}

pub fn clamp_index(nav_idx: usize, len: usize) -> usize {
    nav_idx.min(len.saturating_sub(1))
}

pub fn back(nav_idx: usize) -> usize {
    nav_idx.saturating_sub(1)
}

/// Where to land after an action removed the current unit from the queue.
pub fn index_after_action(nav_idx: usize, new_len: usize) -> usize {
    let stepped = nav_idx.min(new_len.saturating_sub(2));
    clamp_index(stepped, new_len)
}

/// The unit at `nav_idx` (clamped), or `None` once everything is reviewed.
pub fn current_unit(
    table: &Table,
    nav_idx: usize,
    check: CheckSpec<'_>,
    strategy: GroupingStrategy,
) -> Option<ReviewUnit> {
    let queue = unreviewed(table, check);
    if queue.is_empty() {
        return None;
    }
    let queue_idx = clamp_index(nav_idx, queue.len());
    let row_idx = queue[queue_idx];
    let key = BusinessKey::from_row(table, row_idx);
    let group = group_for(table, &key, strategy);

    let mut seen = BTreeSet::new();
    let subcategories = group
        .iter()
        .map(|&member| table.value(member, SUBCATEGORY_COLUMN).trim().to_string())
        .filter(|subcategory| seen.insert(normalize(subcategory)))
        .collect();

    Some(ReviewUnit {
        queue_idx,
        row_idx,
        key,
        fields: table.row_fields(row_idx),
        group,
        subcategories,
    })
}

pub fn progress(table: &Table, check: CheckSpec<'_>) -> ReviewProgress {
    let unreviewed_rows = unreviewed(table, check).len();
    ReviewProgress {
        total_rows: table.len(),
        reviewed_rows: table.len() - unreviewed_rows,
        unreviewed_rows,
    }
}
