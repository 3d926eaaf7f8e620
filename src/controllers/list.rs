use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use super::Entity;
use crate::backend::{BackendClient, Resource, fetch_json};
use crate::models::Status;
use crate::ui::{Cell, Notice, TableRow, Ui};

/// What a list page shows when its collection cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    /// Blocking error notice with this text.
    Alert(&'static str),
    /// Placeholder row with this text.
    ErrorRow(&'static str),
    LogOnly,
}

pub trait Listed: Entity {
    const TABLE_ID: &'static str;
    const HEADERS: &'static [&'static str];
    const EMPTY_TEXT: &'static str;
    const ON_FAILURE: LoadFailure;

    fn row(&self) -> TableRow;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page has no markup for this controller.
    Skipped,
    Rendered(usize),
    Failed,
}

pub struct ListController<E> {
    client: Arc<dyn BackendClient>,
    resource: Resource,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ListController<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            resource: self.resource.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Listed> ListController<E> {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self::with_resource(client, E::resource())
    }

    pub fn with_resource(client: Arc<dyn BackendClient>, resource: Resource) -> Self {
        Self {
            client,
            resource,
            _entity: PhantomData,
        }
    }

    pub async fn load(&self, ui: &mut dyn Ui) -> LoadOutcome {
        if !ui.has_element(E::TABLE_ID) {
            debug!("no #{} on page, skipping {} load", E::TABLE_ID, E::SLUG);
            return LoadOutcome::Skipped;
        }

        let columns = E::HEADERS.len();
        match fetch_json::<Option<Vec<E>>>(self.client.as_ref(), self.resource.collection()).await {
            Ok(records) => {
                let records = records.unwrap_or_default();
                let count = records.len();
                let rows = if records.is_empty() {
                    vec![TableRow::placeholder(columns, E::EMPTY_TEXT)]
                } else {
                    records.iter().map(E::row).collect()
                };
                ui.render_rows(E::TABLE_ID, rows);
                debug!("rendered {} {}", count, E::SLUG);
                LoadOutcome::Rendered(count)
            }
            Err(e) => {
                warn!("failed to load {}: {}", E::SLUG, e);
                match E::ON_FAILURE {
                    LoadFailure::Alert(text) => ui.notify(Notice::error("Error", text)),
                    LoadFailure::ErrorRow(text) => ui.render_rows(
                        E::TABLE_ID,
                        vec![TableRow::error_placeholder(columns, text)],
                    ),
                    LoadFailure::LogOnly => {}
                }
                LoadOutcome::Failed
            }
        }
    }
}

/// Badge cell for a soft-deletable record's state.
pub fn status_cell(status: Status) -> Cell {
    match status {
        Status::Active => Cell::badge("bg-success", status.label()),
        Status::Inactive => Cell::badge("bg-secondary", status.label()),
    }
}
