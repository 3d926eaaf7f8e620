pub mod actions;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod disciplines;
pub mod form;
pub mod guard;
pub mod list;
pub mod semesters;
pub mod students;
pub mod teachers;

use serde::de::DeserializeOwned;

use crate::backend::Resource;

pub use actions::{ActionController, ActionOutcome, ActionSpec, ConflictRule, Mutation, Removable};
pub use dashboard::DashboardController;
pub use form::{EntityForm, FormController, FormField, FormMode, SubmitOutcome};
pub use guard::InFlight;
pub use list::{ListController, Listed, LoadFailure, LoadOutcome};

/// One backend-managed resource type and where its pages live.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// Path segment of the entity's pages, e.g. `students`.
    const SLUG: &'static str;
    const API_PATH: &'static str;
    const TITLE: &'static str;

    fn resource() -> Resource {
        Resource::new(Self::API_PATH)
    }

    fn list_page() -> String {
        format!("/{}", Self::SLUG)
    }

    fn form_page(id: i64) -> String {
        format!("/{}/form?id={}", Self::SLUG, id)
    }

    fn action_page(id: i64, mutation: Mutation) -> String {
        format!("/{}/{}/{}", Self::SLUG, id, mutation.slug())
    }
}
