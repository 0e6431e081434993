use std::collections::BTreeSet;

use crate::domain::entities::review::{BusinessKey, GroupingStrategy};
use crate::domain::entities::table::{Table, PLACE_ID_COLUMN};

/// Positions of every row that identifies the same business as `key`, in
/// table order. Empty only when no row matches, e.g. the probe was removed.
pub fn group_for(table: &Table, key: &BusinessKey, strategy: GroupingStrategy) -> Vec<usize> {
    let strategy = effective_strategy(table, key, strategy);
    (0..table.len())
        .filter(|&row_idx| {
            let candidate = BusinessKey::from_row(table, row_idx);
            match strategy {
                GroupingStrategy::ByName => candidate.name == key.name,
                GroupingStrategy::ByComposite => candidate.matches_composite(key),
                GroupingStrategy::ByPlaceId => candidate.place_id == key.place_id,
            }
        })
        .collect()
}

/// Rows a delete must remove: the strategy's group plus every row sharing
/// the composite key, so no composite match survives a place-id delete.
pub fn removal_group(table: &Table, key: &BusinessKey, strategy: GroupingStrategy) -> Vec<usize> {
    let mut rows: BTreeSet<usize> = group_for(table, key, strategy).into_iter().collect();
    if strategy != GroupingStrategy::ByComposite {
        rows.extend(group_for(table, key, GroupingStrategy::ByComposite));
    }
    rows.into_iter().collect()
}

/// Group of the row currently at `row_idx`.
pub fn group_for_row(table: &Table, row_idx: usize, strategy: GroupingStrategy) -> Vec<usize> {
    if row_idx >= table.len() {
        return Vec::new();
    }
    group_for(table, &BusinessKey::from_row(table, row_idx), strategy)
}

/// `ByPlaceId` degrades to the composite key when there is no id to match on.
fn effective_strategy(
    table: &Table,
    key: &BusinessKey,
    strategy: GroupingStrategy,
) -> GroupingStrategy {
    match strategy {
        GroupingStrategy::ByPlaceId
            if key.place_id.is_empty() || !table.has_column(PLACE_ID_COLUMN) =>
        {
            GroupingStrategy::ByComposite
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_table(rows: &[[&str; 5]]) -> Table {
        let columns = ["name", "city", "website", "link", "place_id"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        Table::new(columns, rows)
    }

    #[test]
    fn by_name_matches_case_and_whitespace_insensitively() {
        let table = listing_table(&[
            ["Cafe X", "Tehran", "", "", ""],
            ["Bakery Y", "Tehran", "", "", ""],
            ["  cafe x ", "Shiraz", "", "", ""],
        ]);

        assert_eq!(group_for_row(&table, 0, GroupingStrategy::ByName), vec![0, 2]);
        assert_eq!(group_for_row(&table, 2, GroupingStrategy::ByName), vec![0, 2]);
    }

    #[test]
    fn by_composite_separates_same_named_businesses() {
        let table = listing_table(&[
            ["Cafe X", "Tehran", "x.ir", "maps/1", ""],
            ["Cafe X", "Shiraz", "x.ir", "maps/2", ""],
            ["cafe x", "tehran", "X.IR", "maps/1", ""],
        ]);

        assert_eq!(
            group_for_row(&table, 0, GroupingStrategy::ByComposite),
            vec![0, 2]
        );
    }

    #[test]
    fn by_place_id_includes_every_row_sharing_the_id() {
        let table = listing_table(&[
            ["Cafe X", "Tehran", "", "", "p1"],
            ["Cafe X (old)", "Tehran", "", "", "P1"],
            ["Cafe X", "Tehran", "", "", "p2"],
        ]);

        assert_eq!(
            group_for_row(&table, 0, GroupingStrategy::ByPlaceId),
            vec![0, 1]
        );
    }

    #[test]
    fn by_place_id_falls_back_to_composite_without_an_id() {
        let table = listing_table(&[
            ["Cafe X", "Tehran", "", "", ""],
            ["Cafe X", "Tehran", "", "", ""],
            ["Cafe X", "Shiraz", "", "", ""],
        ]);

        assert_eq!(
            group_for_row(&table, 0, GroupingStrategy::ByPlaceId),
            vec![0, 1]
        );
    }

    #[test]
    fn by_place_id_falls_back_when_column_is_missing() {
        let table = Table::new(
            vec!["name".to_string(), "city".to_string()],
            vec![
                vec!["Cafe X".to_string(), "Tehran".to_string()],
                vec!["Cafe X".to_string(), "Karaj".to_string()],
            ],
        );
        let mut key = BusinessKey::from_row(&table, 0);
        key.place_id = "p1".to_string();

        assert_eq!(group_for(&table, &key, GroupingStrategy::ByPlaceId), vec![0]);
    }

    #[test]
    fn removed_probe_yields_empty_group() {
        let table = listing_table(&[["Cafe X", "Tehran", "", "", ""]]);
        let key = BusinessKey {
            name: "gone".to_string(),
            ..BusinessKey::default()
        };

        assert!(group_for(&table, &key, GroupingStrategy::ByName).is_empty());
        assert!(group_for_row(&table, 4, GroupingStrategy::ByName).is_empty());
    }

    #[test]
    fn removal_group_adds_composite_matches_to_place_id_group() {
        let table = listing_table(&[
            ["Cafe X", "Tehran", "x.ir", "maps/1", "p1"],
            ["Cafe X", "Tehran", "x.ir", "maps/1", ""],
            ["Cafe X", "Karaj", "", "maps/3", "p9"],
            ["Cafe X", "Shiraz", "", "maps/2", "p1"],
        ]);
        let key = BusinessKey::from_row(&table, 0);

        assert_eq!(group_for(&table, &key, GroupingStrategy::ByPlaceId), vec![0, 3]);
        assert_eq!(
            removal_group(&table, &key, GroupingStrategy::ByPlaceId),
            vec![0, 1, 3]
        );
        assert_eq!(
            removal_group(&table, &key, GroupingStrategy::ByComposite),
            vec![0, 1]
        );
    }
}
