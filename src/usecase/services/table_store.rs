use crate::domain::entities::review::UndoSnapshot;
use crate::domain::entities::table::Table;
use crate::usecase::error::ReviewError;

/// Fixes up a decoded table: the editable name column and the check column
/// exist, and the check column sits last.
pub fn prepare_loaded_table(mut table: Table, name_column: &str, check_column: &str) -> Table {
    table.ensure_column(name_column);
    table.ensure_column(check_column);
    table.move_column_last(check_column);
    table
}

/// Session state: the loaded table, the navigation index, and undo history.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    table: Option<Table>,
    nav_idx: usize,
    history: Vec<UndoSnapshot>,
    undo_limit: Option<usize>,
}

impl TableStore {
    pub fn new(undo_limit: Option<usize>) -> Self {
        Self {
            undo_limit,
            ..Self::default()
        }
    }

    /// Replaces the session with a freshly loaded table.
    pub fn load(&mut self, table: Table) {
        self.table = Some(table);
        self.nav_idx = 0;
        self.history.clear();
    }

    pub fn clear(&mut self) {
        self.table = None;
        self.nav_idx = 0;
        self.history.clear();
    }

    pub fn table(&self) -> Result<&Table, ReviewError> {
        self.table.as_ref().ok_or(ReviewError::NoTableLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn nav_idx(&self) -> usize {
        self.nav_idx
    }

    pub fn set_nav_idx(&mut self, nav_idx: usize) {
        self.nav_idx = nav_idx;
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> Result<UndoSnapshot, ReviewError> {
        Ok(UndoSnapshot {
            table: self.table()?.clone(),
            nav_idx: self.nav_idx,
        })
    }

    pub fn push_undo(&mut self) -> Result<(), ReviewError> {
        let snapshot = self.snapshot()?;
        self.history.push(snapshot);
        self.trim_history();
        Ok(())
    }

    fn trim_history(&mut self) {
        if let Some(limit) = self.undo_limit {
            let overflow = self.history.len().saturating_sub(limit);
            self.history.drain(..overflow);
        }
    }

    /// Restores the most recent snapshot. `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.table = Some(snapshot.table);
                self.nav_idx = snapshot.nav_idx;
                true
            }
            None => false,
        }
    }

    /// Builds the next table from the current one, pushes an undo snapshot
    /// and swaps the new table in. A failed build leaves both the table and
    /// the history untouched.
    pub fn apply<F>(&mut self, build: F) -> Result<(), ReviewError>
    where
        F: FnOnce(&Table) -> Result<Table, ReviewError>,
    {
        let next = build(self.table()?)?;
        self.push_undo()?;
        self.table = Some(next);
        Ok(())
    }
}
