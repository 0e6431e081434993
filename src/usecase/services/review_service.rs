use std::sync::Arc;

use crate::config::{EmptySelectionPolicy, ReviewConfig};
use crate::domain::entities::review::{GroupingStrategy, ReviewProgress, ReviewUnit};
use crate::domain::entities::table::{CITY_COLUMN, NAME_COLUMN, SUBCATEGORY_COLUMN};
use crate::usecase::error::ReviewError;
use crate::usecase::ports::codec::TableCodec;
use crate::usecase::services::grouper::{group_for, removal_group};
use crate::usecase::services::mutation::{
    build_updated_table, stage_approve, stage_delete, stage_mark_checked,
};
use crate::usecase::services::query_formatter::{build_query, SearchQuery};
use crate::usecase::services::review_queue::{
    self, clamp_index, index_after_action, unreviewed, CheckSpec,
};
use crate::usecase::services::table_store::{prepare_loaded_table, TableStore};

/// Result of a reviewer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Nothing left to review; the action had no effect.
    ReviewComplete,
}

pub struct ReviewService {
    codec: Arc<dyn TableCodec>,
    config: ReviewConfig,
    store: TableStore,
    source_name: Option<String>,
}

impl ReviewService {
    pub fn new(codec: Arc<dyn TableCodec>, config: ReviewConfig) -> Self {
        let store = TableStore::new(config.undo_limit);
        Self {
            codec,
            config,
            store,
            source_name: None,
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    fn check(&self) -> CheckSpec<'_> {
        CheckSpec {
            column: &self.config.check_column,
            value: &self.config.checked_value,
        }
    }

    /// Decodes `bytes` and starts a new session. On failure the previous
    /// session is discarded and no table is loaded.
    pub fn load_table(
        &mut self,
        bytes: &[u8],
        source_name: Option<&str>,
    ) -> Result<ReviewProgress, ReviewError> {
        let decoded = match self.codec.decode(bytes) {
            Ok(table) => table,
            Err(err) => {
                log::warn!("rejected input table: {err}");
                self.store.clear();
                self.source_name = None;
                return Err(err);
            }
        };
        let table = prepare_loaded_table(
            decoded,
            self.config.name_target.column(),
            &self.config.check_column,
        );
        log::info!(
            "loaded {} rows with {} columns",
            table.len(),
            table.columns.len()
        );
        self.store.load(table);
        self.source_name = source_name.map(str::to_string);
        self.progress()
    }

    pub fn export_table(&self) -> Result<Vec<u8>, ReviewError> {
        let table = self.store.table()?;
        let mut bytes = Vec::new();
        if self.config.write_bom {
            bytes.extend_from_slice("\u{feff}".as_bytes());
        }
        bytes.extend(self.codec.encode(table)?);
        log::info!("exported {} rows", table.len());
        Ok(bytes)
    }

    /// `<stem>_reviewed.csv` for the loaded source.
    pub fn default_export_name(&self) -> String {
        let stem = self
            .source_name
            .as_deref()
            .map(|name| name.strip_suffix(".csv").unwrap_or(name))
            .filter(|stem| !stem.is_empty())
            .unwrap_or("listings");
        format!("{stem}_reviewed.csv")
    }

    pub fn progress(&self) -> Result<ReviewProgress, ReviewError> {
        Ok(review_queue::progress(self.store.table()?, self.check()))
    }

    pub fn nav_index(&self) -> usize {
        self.store.nav_idx()
    }

    /// The unit under the navigation index; `None` once everything is checked.
    pub fn current_review_unit(&self) -> Result<Option<ReviewUnit>, ReviewError> {
        Ok(review_queue::current_unit(
            self.store.table()?,
            self.store.nav_idx(),
            self.check(),
            self.config.display_grouping,
        ))
    }

    /// Jumps to position `nav_idx` of the unreviewed queue, clamped into range.
    pub fn set_nav_index(&mut self, nav_idx: usize) -> Result<usize, ReviewError> {
        let len = unreviewed(self.store.table()?, self.check()).len();
        let clamped = clamp_index(nav_idx, len);
        self.store.set_nav_idx(clamped);
        log::debug!("navigated to {clamped} of {len}");
        Ok(clamped)
    }

    /// Steps one unit back in the queue without touching the table.
    pub fn previous(&mut self) -> Result<usize, ReviewError> {
        self.set_nav_index(review_queue::back(self.store.nav_idx()))
    }

    /// Leaves the current unit pending and moves to the next one.
    pub fn skip(&mut self) -> Result<usize, ReviewError> {
        self.set_nav_index(self.store.nav_idx().saturating_add(1))
    }

    /// Writes `edited_name` to the whole group, checks the rows whose
    /// subcategory is kept and removes the others.
    pub fn approve(
        &mut self,
        edited_name: &str,
        kept_subcategories: &[String],
    ) -> Result<ActionOutcome, ReviewError> {
        let Some(unit) = self.current_review_unit()? else {
            return Ok(ActionOutcome::ReviewComplete);
        };
        if kept_subcategories.is_empty()
            && self.config.empty_selection == EmptySelectionPolicy::Reject
        {
            log::warn!("approve rejected: no subcategory kept for row {}", unit.row_idx);
            return Err(ReviewError::EmptySelection);
        }

        let config = &self.config;
        let strategy = config.display_grouping;
        let name_column = config.name_target.column();
        self.store.set_nav_idx(unit.queue_idx);
        self.store.apply(|table| {
            let group = group_for(table, &unit.key, strategy);
            log::debug!("approving group of {} rows", group.len());
            let edits = stage_approve(
                table,
                &group,
                name_column,
                edited_name,
                kept_subcategories,
                &config.check_column,
                &config.checked_value,
            );
            build_updated_table(table, &edits)
        })?;
        self.advance_after_action(unit.queue_idx)?;
        Ok(ActionOutcome::Applied)
    }

    /// Removes every row of the current business under the delete strategy,
    /// along with any row sharing its composite key.
    pub fn delete(&mut self) -> Result<ActionOutcome, ReviewError> {
        let Some(unit) = self.current_review_unit()? else {
            return Ok(ActionOutcome::ReviewComplete);
        };
        let strategy = self.config.delete_grouping;
        self.store.set_nav_idx(unit.queue_idx);
        self.store.apply(|table| {
            let group = removal_group(table, &unit.key, strategy);
            log::debug!("deleting group of {} rows", group.len());
            build_updated_table(table, &stage_delete(&group))
        })?;
        self.advance_after_action(unit.queue_idx)?;
        Ok(ActionOutcome::Applied)
    }

    /// Checks only the current row, leaving the rest of its business pending.
    pub fn mark_checked(&mut self) -> Result<ActionOutcome, ReviewError> {
        let Some(unit) = self.current_review_unit()? else {
            return Ok(ActionOutcome::ReviewComplete);
        };
        let config = &self.config;
        self.store.set_nav_idx(unit.queue_idx);
        self.store.apply(|table| {
            let matches = group_for(table, &unit.key, GroupingStrategy::ByPlaceId);
            let target = if matches.contains(&unit.row_idx) {
                unit.row_idx
            } else {
                matches.first().copied().unwrap_or(unit.row_idx)
            };
            let edits = stage_mark_checked(target, &config.check_column, &config.checked_value);
            build_updated_table(table, &edits)
        })?;
        self.advance_after_action(unit.queue_idx)?;
        Ok(ActionOutcome::Applied)
    }

    /// Reverts the last action. `false` when there was nothing to undo.
    pub fn back(&mut self) -> bool {
        let undone = self.store.undo();
        if undone {
            log::info!("undid last action, {} left", self.store.undo_depth());
        } else {
            log::debug!("nothing to undo");
        }
        undone
    }

    pub fn can_undo(&self) -> bool {
        self.store.undo_depth() > 0
    }

    /// Search text for a unit, preferring the reviewer's edited name.
    pub fn search_query(&self, unit: &ReviewUnit, edited_name: &str) -> SearchQuery {
        let name = if edited_name.trim().is_empty() {
            unit.field(NAME_COLUMN)
        } else {
            edited_name
        };
        build_query(
            name,
            unit.field(CITY_COLUMN),
            unit.field(SUBCATEGORY_COLUMN),
            &self.config.search_hint,
            &self.config.search_url,
        )
    }

    fn advance_after_action(&mut self, nav_idx: usize) -> Result<(), ReviewError> {
        let new_len = unreviewed(self.store.table()?, self.check()).len();
        self.store.set_nav_idx(index_after_action(nav_idx, new_len));
        Ok(())
    }
}
