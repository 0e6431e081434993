use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::domain::entities::review::ReviewProgress;
use crate::domain::entities::table::{LINK_COLUMN, NAME_COLUMN, WEBSITE_COLUMN};
use crate::infra::export::csv::write_export_file;
use crate::infra::import::csv::read_source_file;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::{fresh_draft, AppState};
use crate::usecase::error::ReviewError;
use crate::usecase::services::review_service::{ActionOutcome, ReviewService};

fn button_style(primary: bool) -> &'static str {
    if primary {
        "padding: 8px 16px; background: #2563eb; color: #fff; border: none; border-radius: 4px; cursor: pointer;"
    } else {
        "padding: 8px 16px; background: #f3f4f6; border: 1px solid #bbb; border-radius: 4px; cursor: pointer;"
    }
}

fn progress_label(progress: Option<ReviewProgress>) -> String {
    match progress {
        Some(progress) => format!(
            "Unchecked rows: {} of {}",
            progress.unreviewed_rows, progress.total_rows
        ),
        None => "No table loaded".to_string(),
    }
}

fn outcome_message(action: &str, result: Result<ActionOutcome, ReviewError>) -> String {
    match result {
        Ok(ActionOutcome::Applied) => format!("{action} applied"),
        Ok(ActionOutcome::ReviewComplete) => "All rows reviewed".to_string(),
        Err(err) => {
            warn!("{action} failed: {err}");
            format!("{action} failed: {err}")
        }
    }
}

fn show_error(title: &str, description: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut session,
        mut draft,
        mut status,
        mut busy,
    } = AppState::new();

    let loaded = session.read().is_loaded();
    let progress = session.read().progress().ok();
    let nav_index = session.read().nav_index();
    let can_undo = session.read().can_undo();
    let source_name = session.read().source_name().map(str::to_string);
    let unit = session.read().current_review_unit().ok().flatten();
    let draft_snapshot = draft();
    let search = unit.as_ref().map(|unit| {
        let edited = draft_snapshot
            .as_ref()
            .map(|draft| draft.edited_name.as_str())
            .unwrap_or("");
        session.read().search_query(unit, edited)
    });

    let mut run_action = move |action: &str,
                               apply: fn(&mut ReviewService) -> Result<ActionOutcome, ReviewError>| {
        let result = apply(&mut session.write());
        let message = outcome_message(action, result);
        let next = fresh_draft(&session.read());
        draft.set(next);
        status.set(message);
    };

    let on_open = move |_: MouseEvent| {
        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };
        *busy.write() = true;
        match run_blocking(|| read_source_file(&file_path)) {
            Ok(source) => {
                let result = session
                    .write()
                    .load_table(&source.bytes, Some(source.name.as_str()));
                match result {
                    Ok(progress) => {
                        info!("opened {}", file_path.display());
                        status.set(format!(
                            "Loaded {} ({} rows)",
                            source.name, progress.total_rows
                        ));
                    }
                    Err(err) => {
                        show_error("Cannot read table", &err.to_string());
                        status.set(format!("Load failed: {err}"));
                    }
                }
            }
            Err(err) => {
                show_error("Cannot open file", &format!("{err:#}"));
                status.set(format!("Open failed: {err:#}"));
            }
        }
        let next = fresh_draft(&session.read());
        draft.set(next);
        *busy.write() = false;
    };

    let on_export = move |_: MouseEvent| {
        let default_name = session.read().default_export_name();
        let Some(target) = FileDialog::new()
            .set_file_name(default_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        *busy.write() = true;
        let exported = session.read().export_table();
        let written = exported
            .map_err(anyhow::Error::from)
            .and_then(|bytes| run_blocking(|| write_export_file(&target, &bytes)));
        match written {
            Ok(()) => status.set(format!("Exported to {}", target.display())),
            Err(err) => {
                show_error("Export failed", &format!("{err:#}"));
                status.set(format!("Export failed: {err:#}"));
            }
        }
        *busy.write() = false;
    };

    let on_approve = move |_: MouseEvent| {
        let Some(current) = draft() else {
            return;
        };
        let Some(unit) = session.read().current_review_unit().ok().flatten() else {
            return;
        };
        let kept = current.kept_in_order(&unit);
        let result = session.write().approve(&current.edited_name, &kept);
        let message = outcome_message("Approve", result);
        let next = fresh_draft(&session.read());
        draft.set(next);
        status.set(message);
    };

    let on_delete = move |_: MouseEvent| {
        let confirm = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Delete business")
            .set_description("Delete every row of this business?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        if confirm != MessageDialogResult::Yes {
            return;
        }
        run_action("Delete", ReviewService::delete);
    };

    let on_mark_checked = move |_: MouseEvent| run_action("Mark checked", ReviewService::mark_checked);

    let on_back = move |_: MouseEvent| {
        let undone = session.write().back();
        let next = fresh_draft(&session.read());
        draft.set(next);
        status.set(if undone {
            "Reverted last action".to_string()
        } else {
            "Nothing to undo".to_string()
        });
    };

    let mut navigate = move |step: fn(&mut ReviewService) -> Result<usize, ReviewError>| {
        let moved = step(&mut session.write());
        if let Ok(index) = moved {
            let next = fresh_draft(&session.read());
            draft.set(next);
            status.set(format!("Row {index}"));
        }
    };

    let on_previous = move |_: MouseEvent| navigate(ReviewService::previous);
    let on_skip = move |_: MouseEvent| navigate(ReviewService::skip);

    let on_jump = move |event: FormEvent| {
        let Ok(target) = event.value().trim().parse::<usize>() else {
            return;
        };
        let jumped = session.write().set_nav_index(target);
        if let Ok(index) = jumped {
            let next = fresh_draft(&session.read());
            draft.set(next);
            status.set(format!("Jumped to row {index}"));
        }
    };

    let max_index = progress
        .map(|progress| progress.unreviewed_rows.saturating_sub(1))
        .unwrap_or(0);

    rsx! {
        div { style: "display: flex; height: 100vh; font-family: sans-serif;",
            aside { style: "width: 260px; padding: 16px; border-right: 1px solid #ddd; display: flex; flex-direction: column; gap: 12px;",
                h3 { "1) Open CSV" }
                button { style: "{button_style(false)}", disabled: busy(), onclick: on_open, "Choose file…" }
                p { style: "font-size: 12px; color: #666;",
                    "Changes live in memory only. Export to keep them."
                }
                if let Some(name) = source_name {
                    p { style: "font-size: 12px;", "File: {name}" }
                }
                h3 { "2) Navigation" }
                p { "{progress_label(progress)}" }
                if loaded {
                    label { "Jump to row index (0–{max_index})" }
                    input {
                        r#type: "number",
                        min: "0",
                        max: "{max_index}",
                        value: "{nav_index}",
                        onchange: on_jump,
                    }
                }
                h3 { "3) Export" }
                button {
                    style: "{button_style(false)}",
                    disabled: !loaded || busy(),
                    onclick: on_export,
                    "💾 Export reviewed CSV"
                }
            }
            main { style: "flex: 1; padding: 24px; overflow: auto;",
                if !loaded {
                    p { "Open your input CSV to begin." }
                } else if let Some(unit) = unit {
                    h2 { "🏷️ {unit.field(NAME_COLUMN)}" }
                    label { "Business name (editable):" }
                    input {
                        style: "width: 100%; padding: 6px; margin: 4px 0 16px;",
                        value: draft_snapshot.as_ref().map(|draft| draft.edited_name.clone()).unwrap_or_default(),
                        oninput: move |event| {
                            if let Some(current) = draft.write().as_mut() {
                                current.edited_name = event.value();
                            }
                        },
                    }
                    p { strong { "Select categories to KEEP for this business:" } }
                    {unit.subcategories.iter().map(|subcategory| {
                        let kept = draft_snapshot
                            .as_ref()
                            .map(|draft| draft.is_kept(subcategory))
                            .unwrap_or(true);
                        let toggled = subcategory.clone();
                        rsx!(
                            label { key: "{subcategory}", style: "display: block; margin: 4px 0;",
                                input {
                                    r#type: "checkbox",
                                    checked: kept,
                                    onclick: move |_| {
                                        if let Some(current) = draft.write().as_mut() {
                                            current.toggle(&toggled);
                                        }
                                    },
                                }
                                " {subcategory}"
                            }
                        )
                    })}
                    div { style: "display: flex; gap: 24px; margin: 16px 0;",
                        div {
                            strong { "Website: " }
                            if unit.field(WEBSITE_COLUMN).trim().is_empty() {
                                "—"
                            } else {
                                a { href: "{unit.field(WEBSITE_COLUMN).trim()}", "🌐 Visit website" }
                            }
                        }
                        div {
                            strong { "Map: " }
                            if unit.field(LINK_COLUMN).trim().is_empty() {
                                "—"
                            } else {
                                a { href: "{unit.field(LINK_COLUMN).trim()}", "📍 Open map" }
                            }
                        }
                        if let Some(search) = search {
                            div {
                                strong { "Search: " }
                                code { "{search.text}" }
                                " "
                                a { href: "{search.url}", "Open search" }
                            }
                        }
                    }
                    div { style: "display: flex; gap: 8px;",
                        button { style: "{button_style(false)}", disabled: !can_undo, onclick: on_back, "⬅️ Back" }
                        button { style: "{button_style(true)}", onclick: on_approve, "✅ Approve & Next" }
                        button { style: "{button_style(false)}", onclick: on_mark_checked, "☑️ Mark row checked" }
                        button { style: "{button_style(false)}", onclick: on_delete, "🗑️ Delete business" }
                    }
                    div { style: "display: flex; gap: 8px; margin-top: 8px;",
                        button { style: "{button_style(false)}", onclick: on_previous, "◀ Previous" }
                        button { style: "{button_style(false)}", onclick: on_skip, "Skip ▶" }
                    }
                } else {
                    p { "🎉 All rows reviewed! You can still export the CSV." }
                    button { style: "{button_style(false)}", disabled: !can_undo, onclick: on_back, "⬅️ Back" }
                }
            }
            footer { style: "position: fixed; bottom: 0; left: 0; right: 0; padding: 4px 12px; background: #f8f8f8; border-top: 1px solid #ddd; font-size: 12px;",
                "{status}"
            }
        }
    }
}
