pub const CHECK_COLUMN: &str = "check?";
pub const CHECKED_VALUE: &str = "checked";

pub const NAME_COLUMN: &str = "name";
pub const NAME_FA_COLUMN: &str = "name_fa";
pub const CITY_COLUMN: &str = "city";
pub const SUBCATEGORY_COLUMN: &str = "subcategory";
pub const WEBSITE_COLUMN: &str = "website";
pub const LINK_COLUMN: &str = "link";
pub const PLACE_ID_COLUMN: &str = "place_id";

/// Trimmed, case-folded form used for every identity and check comparison.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// The in-memory listing table. Every row holds exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, padding short rows with empty cells and cutting long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Cell value by column name; missing rows or columns read as empty.
    pub fn value(&self, row_idx: usize, column: &str) -> &str {
        self.column_index(column)
            .and_then(|col_idx| self.rows.get(row_idx)?.get(col_idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Column/value pairs of one row, in column order.
    pub fn row_fields(&self, row_idx: usize) -> Vec<(String, String)> {
        match self.rows.get(row_idx) {
            Some(row) => self.columns.iter().cloned().zip(row.iter().cloned()).collect(),
            None => Vec::new(),
        }
    }

    /// Appends `column` with empty cells unless it already exists.
    pub fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(col_idx) = self.column_index(column) {
            return col_idx;
        }
        self.columns.push(column.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }

    /// Moves `column` to the last position, carrying each row's cell along.
    pub fn move_column_last(&mut self, column: &str) {
        let Some(col_idx) = self.column_index(column) else {
            return;
        };
        if col_idx + 1 == self.columns.len() {
            return;
        }
        let name = self.columns.remove(col_idx);
        self.columns.push(name);
        for row in &mut self.rows {
            let cell = row.remove(col_idx);
            row.push(cell);
        }
    }

    pub fn is_checked(&self, row_idx: usize, check_column: &str, checked_value: &str) -> bool {
        normalize(self.value(row_idx, check_column)) == normalize(checked_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn new_pads_short_rows() {
        let table = Table::new(strings(&["a", "b", "c"]), vec![strings(&["1"])]);

        assert_eq!(table.rows[0], strings(&["1", "", ""]));
    }

    #[test]
    fn move_column_last_keeps_cells_aligned() {
        let mut table = Table::new(
            strings(&["check?", "name", "city"]),
            vec![strings(&["checked", "Cafe X", "Tehran"])],
        );

        table.move_column_last("check?");

        assert_eq!(table.columns, strings(&["name", "city", "check?"]));
        assert_eq!(table.rows[0], strings(&["Cafe X", "Tehran", "checked"]));
    }

    #[test]
    fn value_reads_missing_column_as_empty() {
        let table = Table::new(strings(&["name"]), vec![strings(&["Cafe X"])]);

        assert_eq!(table.value(0, "place_id"), "");
        assert_eq!(table.value(5, "name"), "");
    }

    #[test]
    fn is_checked_ignores_case_and_padding() {
        let table = Table::new(strings(&["check?"]), vec![strings(&[" Checked "])]);

        assert!(table.is_checked(0, CHECK_COLUMN, CHECKED_VALUE));
    }
}
