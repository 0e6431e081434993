use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::entities::review::GroupingStrategy;
use crate::domain::entities::table::{CHECKED_VALUE, CHECK_COLUMN, NAME_COLUMN, NAME_FA_COLUMN};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_SEARCH_HINT: &str = "Persian Iranian Farsi";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Column the reviewer's edited name is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameTarget {
    NameFa,
    Name,
}

impl NameTarget {
    pub fn column(self) -> &'static str {
        match self {
            NameTarget::NameFa => NAME_FA_COLUMN,
            NameTarget::Name => NAME_COLUMN,
        }
    }
}

/// What approving with no kept subcategory does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    DeleteGroup,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub check_column: String,
    pub checked_value: String,
    pub name_target: NameTarget,
    pub display_grouping: GroupingStrategy,
    pub delete_grouping: GroupingStrategy,
    pub empty_selection: EmptySelectionPolicy,
    pub undo_limit: Option<usize>,
    pub search_hint: String,
    pub search_url: String,
    pub write_bom: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            check_column: CHECK_COLUMN.to_string(),
            checked_value: CHECKED_VALUE.to_string(),
            name_target: NameTarget::NameFa,
            display_grouping: GroupingStrategy::ByName,
            delete_grouping: GroupingStrategy::ByPlaceId,
            empty_selection: EmptySelectionPolicy::DeleteGroup,
            undo_limit: None,
            search_hint: DEFAULT_SEARCH_HINT.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            write_bom: true,
        }
    }
}

impl ReviewConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ReviewConfig = toml::from_str(text).context("failed to parse review config")?;
        if config.check_column.trim().is_empty() {
            anyhow::bail!("check_column must not be empty")
        }
        if config.checked_value.trim().is_empty() {
            anyhow::bail!("checked_value must not be empty")
        }
        Ok(config)
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn load_default() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "nazdikia", "listing-reviewer")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("listing-reviewer-{prefix}-{nanos}"))
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ReviewConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = ReviewConfig::from_toml_str(
            r#"
            name_target = "name"
            delete_grouping = "by_composite"
            empty_selection = "reject"
            undo_limit = 20
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.name_target, NameTarget::Name);
        assert_eq!(config.delete_grouping, GroupingStrategy::ByComposite);
        assert_eq!(config.empty_selection, EmptySelectionPolicy::Reject);
        assert_eq!(config.undo_limit, Some(20));
        assert_eq!(config.check_column, CHECK_COLUMN);
    }

    #[test]
    fn blank_check_column_is_rejected() {
        let result = ReviewConfig::from_toml_str("check_column = \"  \"");

        assert!(result.is_err(), "blank check column should fail: {result:?}");
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let temp_dir = unique_test_dir("missing-config");

        let config =
            ReviewConfig::load_from(&temp_dir.join(CONFIG_FILE_NAME)).expect("should default");

        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let temp_dir = unique_test_dir("bad-config");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let path = temp_dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "undo_limit = \"many\"").expect("should write config");

        let result = ReviewConfig::load_from(&path);

        assert!(result.is_err(), "malformed config should fail");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn ensure_webview_data_dir_creates_webview2_subdir() {
        let temp_dir = unique_test_dir("webview");

        let dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

        assert!(dir.ends_with("webview2"));
        assert!(dir.is_dir());

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
