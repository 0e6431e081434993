use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row_idx: usize,
    pub column: String,
}

/// Cell writes and row removals computed against one table, applied in a
/// single pass to produce the next table.
#[derive(Debug, Clone, Default)]
pub struct StagedEdits {
    pub staged_cells: HashMap<CellKey, String>,
    pub deleted_rows: BTreeSet<usize>,
}

impl StagedEdits {
    pub fn stage_cell(&mut self, row_idx: usize, column: &str, value: impl Into<String>) {
        self.staged_cells.insert(
            CellKey {
                row_idx,
                column: column.to_string(),
            },
            value.into(),
        );
    }

    pub fn delete_row(&mut self, row_idx: usize) {
        self.deleted_rows.insert(row_idx);
    }
}
