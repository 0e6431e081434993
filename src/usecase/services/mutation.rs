use std::collections::BTreeSet;

use crate::domain::entities::edit::{CellKey, StagedEdits};
use crate::domain::entities::table::{normalize, Table, SUBCATEGORY_COLUMN};
use crate::usecase::error::ReviewError;

/// Applies staged cell writes and row removals to a copy of `table`.
/// Writes to columns the table does not have are an error.
pub fn build_updated_table(table: &Table, edits: &StagedEdits) -> Result<Table, ReviewError> {
    for CellKey { column, .. } in edits.staged_cells.keys() {
        if !table.has_column(column) {
            return Err(ReviewError::UnknownColumn(column.clone()));
        }
    }

    let mut rows = Vec::with_capacity(table.len() - edits.deleted_rows.len().min(table.len()));
    for (row_idx, row) in table.rows.iter().enumerate() {
        if edits.deleted_rows.contains(&row_idx) {
            continue;
        }
        let mut next_row = row.clone();
        for (col_idx, header) in table.columns.iter().enumerate() {
            if let Some(value) = edits.staged_cells.get(&CellKey {
                row_idx,
                column: header.clone(),
            }) {
                next_row[col_idx] = value.clone();
            }
        }
        rows.push(next_row);
    }

    Ok(Table {
        columns: table.columns.clone(),
        rows,
    })
}

/// Edits for approving a group: the edited name goes to every member, kept
/// subcategories are checked and the rest are removed.
pub fn stage_approve(
    table: &Table,
    group: &[usize],
    name_column: &str,
    edited_name: &str,
    kept_subcategories: &[String],
    check_column: &str,
    checked_value: &str,
) -> StagedEdits {
    let kept: BTreeSet<String> = kept_subcategories.iter().map(|s| normalize(s)).collect();
    let edited_name = edited_name.trim();

    let mut edits = StagedEdits::default();
    for &row_idx in group {
        if kept.contains(&normalize(table.value(row_idx, SUBCATEGORY_COLUMN))) {
            edits.stage_cell(row_idx, name_column, edited_name);
            edits.stage_cell(row_idx, check_column, checked_value);
        } else {
            edits.delete_row(row_idx);
        }
    }
    edits
}

pub fn stage_delete(group: &[usize]) -> StagedEdits {
    let mut edits = StagedEdits::default();
    for &row_idx in group {
        edits.delete_row(row_idx);
    }
    edits
}

pub fn stage_mark_checked(row_idx: usize, check_column: &str, checked_value: &str) -> StagedEdits {
    let mut edits = StagedEdits::default();
    edits.stage_cell(row_idx, check_column, checked_value);
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::{CHECKED_VALUE, CHECK_COLUMN};

    fn cafe_table() -> Table {
        Table::new(
            vec![
                "name".to_string(),
                "name_fa".to_string(),
                "subcategory".to_string(),
                CHECK_COLUMN.to_string(),
            ],
            vec![
                vec!["Cafe X".into(), "".into(), "cafe".into(), "".into()],
                vec!["Bar Z".into(), "".into(), "bar".into(), "".into()],
                vec!["Cafe X".into(), "".into(), "bakery".into(), "".into()],
            ],
        )
    }

    #[test]
    fn approve_prunes_rejected_subcategories() {
        let table = cafe_table();
        let edits = stage_approve(
            &table,
            &[0, 2],
            "name_fa",
            "  کافه ایکس ",
            &["Bakery".to_string()],
            CHECK_COLUMN,
            CHECKED_VALUE,
        );

        let next = build_updated_table(&table, &edits).expect("build should succeed");

        assert_eq!(next.len(), 2);
        assert_eq!(next.value(0, "name"), "Bar Z");
        assert_eq!(next.value(1, "subcategory"), "bakery");
        assert_eq!(next.value(1, "name_fa"), "کافه ایکس");
        assert_eq!(next.value(1, CHECK_COLUMN), CHECKED_VALUE);
        assert_eq!(next.value(0, CHECK_COLUMN), "");
    }

    #[test]
    fn approve_with_nothing_kept_removes_the_group() {
        let table = cafe_table();
        let edits = stage_approve(&table, &[0, 2], "name", "X", &[], CHECK_COLUMN, CHECKED_VALUE);

        let next = build_updated_table(&table, &edits).expect("build should succeed");

        assert_eq!(next.len(), 1);
        assert_eq!(next.value(0, "name"), "Bar Z");
    }

    #[test]
    fn build_rejects_writes_to_unknown_columns() {
        let table = cafe_table();
        let mut edits = StagedEdits::default();
        edits.stage_cell(0, "missing", "x");

        assert!(build_updated_table(&table, &edits).is_err());
    }

    #[test]
    fn mark_checked_touches_only_one_row() {
        let table = cafe_table();
        let edits = stage_mark_checked(2, CHECK_COLUMN, CHECKED_VALUE);

        let next = build_updated_table(&table, &edits).expect("build should succeed");

        assert_eq!(next.value(0, CHECK_COLUMN), "");
        assert_eq!(next.value(2, CHECK_COLUMN), CHECKED_VALUE);
    }
}
