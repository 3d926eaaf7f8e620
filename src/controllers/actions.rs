use std::str::FromStr;
use std::sync::Arc;

use reqwest::Method;
use tracing::{info, warn};

use super::guard::InFlight;
use super::list::{ListController, Listed};
use crate::backend::{BackendClient, Resource};
use crate::error::AppError;
use crate::ui::{Notice, Prompt, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Hard delete.
    Delete,
    /// Soft delete: `DELETE` on a record that only loses its active flag.
    Deactivate,
    Reactivate,
}

impl Mutation {
    pub fn slug(self) -> &'static str {
        match self {
            Mutation::Delete => "delete",
            Mutation::Deactivate => "deactivate",
            Mutation::Reactivate => "activate",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Mutation::Delete | Mutation::Deactivate => Method::DELETE,
            Mutation::Reactivate => Method::PATCH,
        }
    }

    pub fn path(self, resource: &Resource, id: i64) -> String {
        match self {
            Mutation::Delete | Mutation::Deactivate => resource.item(id),
            Mutation::Reactivate => resource.activation(id),
        }
    }
}

impl FromStr for Mutation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" => Ok(Mutation::Delete),
            "deactivate" => Ok(Mutation::Deactivate),
            "activate" => Ok(Mutation::Reactivate),
            other => Err(AppError::BadRequest(format!("Unknown action: {}", other))),
        }
    }
}

/// Failure body fragment the backend uses for a known conflict, and what to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictRule {
    pub needle: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub prompt: Prompt,
    pub success: Notice,
    pub failure: Notice,
    pub conflicts: &'static [ConflictRule],
}

pub trait Removable: Listed {
    /// `None` when the entity does not support `mutation`.
    fn action(mutation: Mutation) -> Option<ActionSpec>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Unsupported,
    Cancelled,
    /// The same request is still pending.
    Busy,
    Done,
    Failed,
}

pub struct ActionController<E> {
    client: Arc<dyn BackendClient>,
    resource: Resource,
    in_flight: InFlight,
    list: ListController<E>,
}

impl<E: Removable> ActionController<E> {
    pub fn new(client: Arc<dyn BackendClient>, in_flight: InFlight) -> Self {
        Self::with_resource(client, E::resource(), in_flight)
    }

    pub fn with_resource(client: Arc<dyn BackendClient>, resource: Resource, in_flight: InFlight) -> Self {
        let list = ListController::with_resource(client.clone(), resource.clone());
        Self {
            client,
            resource,
            in_flight,
            list,
        }
    }

    pub async fn run(&self, mutation: Mutation, id: i64, ui: &mut dyn Ui) -> ActionOutcome {
        let Some(spec) = E::action(mutation) else {
            warn!("{} does not support {}", E::SLUG, mutation.slug());
            return ActionOutcome::Unsupported;
        };

        let method = mutation.method();
        let path = mutation.path(&self.resource, id);
        let key = format!("{} {}", method, path);
        if self.in_flight.is_pending(&key) {
            return busy(&key, ui);
        }

        if !ui.confirm(spec.prompt).await {
            return ActionOutcome::Cancelled;
        }

        // Re-checked: the request may have been issued while the prompt was open.
        let Some(guard) = self.in_flight.try_acquire(key.clone()) else {
            return busy(&key, ui);
        };

        let result = self
            .client
            .send(method.clone(), &path, None)
            .await
            .and_then(|response| response.into_result());
        drop(guard);

        match result {
            Ok(_) => {
                info!("{} {} succeeded", method, path);
                ui.notify(spec.success);
                self.list.load(ui).await;
                ActionOutcome::Done
            }
            Err(e) => {
                warn!("{} {} failed: {}", method, path, e);
                let notice = spec
                    .conflicts
                    .iter()
                    .find(|rule| e.body().contains(rule.needle))
                    .map(|rule| Notice::error(rule.title, rule.text))
                    .unwrap_or(spec.failure);
                ui.notify(notice);
                ActionOutcome::Failed
            }
        }
    }
}

fn busy(key: &str, ui: &mut dyn Ui) -> ActionOutcome {
    warn!("{} already in flight", key);
    ui.notify(Notice::warning("Please wait", "This action is already being processed.").toast());
    ActionOutcome::Busy
}
