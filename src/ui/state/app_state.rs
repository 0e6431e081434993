use std::sync::Arc;

use dioxus::prelude::{use_hook, use_signal, Signal};

use crate::config::ReviewConfig;
use crate::domain::entities::review::ReviewDraft;
use crate::infra::codec::csv::CsvCodec;
use crate::usecase::services::review_service::ReviewService;

pub struct AppState {
    pub session: Signal<ReviewService>,
    pub draft: Signal<Option<ReviewDraft>>,
    pub status: Signal<String>,
    pub busy: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        let (config, config_error) = use_hook(|| match ReviewConfig::load_default() {
            Ok(config) => (config, None),
            Err(err) => (ReviewConfig::default(), Some(format!("{err:#}"))),
        });
        Self {
            session: use_signal(move || ReviewService::new(Arc::new(CsvCodec::default()), config)),
            draft: use_signal(|| None::<ReviewDraft>),
            status: use_signal(move || match config_error {
                Some(err) => format!("Using default settings: {err}"),
                None => "Open a CSV file to begin".to_string(),
            }),
            busy: use_signal(|| false),
        }
    }
}

/// Fresh scratch state for whatever unit the session now points at.
pub fn fresh_draft(session: &ReviewService) -> Option<ReviewDraft> {
    let unit = session.current_review_unit().ok().flatten()?;
    Some(ReviewDraft::for_unit(
        &unit,
        session.config().name_target.column(),
    ))
}
