use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::entities::table::{
    normalize, Table, CITY_COLUMN, LINK_COLUMN, NAME_COLUMN, PLACE_ID_COLUMN, WEBSITE_COLUMN,
};

/// How rows are matched to "the same business".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// Normalized `name` only. Broad; suited to bulk category cleanup.
    ByName,
    /// `name`, `city`, `website` and `link` must all agree.
    ByComposite,
    /// `place_id` when the probe has one, otherwise the composite key.
    ByPlaceId,
}

/// Normalized identity fields of a probe row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessKey {
    pub name: String,
    pub city: String,
    pub website: String,
    pub link: String,
    pub place_id: String,
}

impl BusinessKey {
    pub fn from_row(table: &Table, row_idx: usize) -> Self {
        Self {
            name: normalize(table.value(row_idx, NAME_COLUMN)),
            city: normalize(table.value(row_idx, CITY_COLUMN)),
            website: normalize(table.value(row_idx, WEBSITE_COLUMN)),
            link: normalize(table.value(row_idx, LINK_COLUMN)),
            place_id: normalize(table.value(row_idx, PLACE_ID_COLUMN)),
        }
    }

    pub fn matches_composite(&self, other: &BusinessKey) -> bool {
        self.name == other.name
            && self.city == other.city
            && self.website == other.website
            && self.link == other.link
    }
}

/// The current unchecked row together with its business group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUnit {
    /// Position in the unreviewed sequence, after clamping.
    pub queue_idx: usize,
    /// Position in the table.
    pub row_idx: usize,
    pub key: BusinessKey,
    pub fields: Vec<(String, String)>,
    pub group: Vec<usize>,
    /// Distinct trimmed subcategories of the group, in table order.
    pub subcategories: Vec<String>,
}

impl ReviewUnit {
    pub fn field(&self, column: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }
}

/// Reviewer scratch state for one unit. Every subcategory starts out kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub row_idx: usize,
    pub edited_name: String,
    pub kept: BTreeSet<String>,
}

impl ReviewDraft {
    pub fn for_unit(unit: &ReviewUnit, name_column: &str) -> Self {
        Self {
            row_idx: unit.row_idx,
            edited_name: unit.field(name_column).to_string(),
            kept: unit.subcategories.iter().cloned().collect(),
        }
    }

    pub fn is_kept(&self, subcategory: &str) -> bool {
        self.kept.contains(subcategory)
    }

    pub fn toggle(&mut self, subcategory: &str) {
        if !self.kept.remove(subcategory) {
            self.kept.insert(subcategory.to_string());
        }
    }

    /// Kept subcategories in the unit's display order.
    pub fn kept_in_order(&self, unit: &ReviewUnit) -> Vec<String> {
        unit.subcategories
            .iter()
            .filter(|subcategory| self.kept.contains(*subcategory))
            .cloned()
            .collect()
    }
}

/// Table copy plus navigation index, taken right before a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub table: Table,
    pub nav_idx: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewProgress {
    pub total_rows: usize,
    pub reviewed_rows: usize,
    pub unreviewed_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_with(subcategories: &[&str]) -> ReviewUnit {
        ReviewUnit {
            queue_idx: 0,
            row_idx: 3,
            key: BusinessKey::default(),
            fields: vec![
                ("name".to_string(), "Cafe X".to_string()),
                ("name_fa".to_string(), "کافه ایکس".to_string()),
            ],
            group: vec![3],
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn draft_starts_with_every_subcategory_kept() {
        let unit = unit_with(&["cafe", "bakery"]);

        let draft = ReviewDraft::for_unit(&unit, "name_fa");

        assert_eq!(draft.edited_name, "کافه ایکس");
        assert_eq!(draft.kept_in_order(&unit), vec!["cafe", "bakery"]);
    }

    #[test]
    fn toggle_drops_and_restores_subcategory() {
        let unit = unit_with(&["cafe", "bakery"]);
        let mut draft = ReviewDraft::for_unit(&unit, "name");

        draft.toggle("cafe");
        assert_eq!(draft.kept_in_order(&unit), vec!["bakery"]);

        draft.toggle("cafe");
        assert!(draft.is_kept("cafe"));
    }
}
