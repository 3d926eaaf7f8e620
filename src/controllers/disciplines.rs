use serde::{Deserialize, Serialize};
use tracing::error;

use super::actions::{ActionSpec, Mutation, Removable};
use super::form::{
    ConflictPolicy, Dependency, EntityForm, FormField, InvalidField, optional, parse_id, parse_int,
    select_options,
};
use super::list::{Listed, LoadFailure};
use super::Entity;
use crate::backend::{BackendClient, fetch_json};
use crate::models::{Department, Discipline, DisciplinePayload};
use crate::ui::{Cell, Notice, Prompt, RowAction, TableRow, Tone, Ui};

const WIDE_ONLY: &str = "d-none d-md-table-cell";

impl Entity for Discipline {
    const SLUG: &'static str = "disciplines";
    const API_PATH: &'static str = "/api/disciplines";
    const TITLE: &'static str = "Disciplines";
}

impl Discipline {
    pub fn details_page(id: i64) -> String {
        format!("/{}/details?id={}", Self::SLUG, id)
    }

    fn department_label(&self) -> &str {
        self.department_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("N/A")
    }
}

impl Listed for Discipline {
    const TABLE_ID: &'static str = "disciplinesTable";
    const HEADERS: &'static [&'static str] =
        &["Code", "Name", "Credits", "Workload", "Department", ""];
    const EMPTY_TEXT: &'static str = "No disciplines found.";
    const ON_FAILURE: LoadFailure = LoadFailure::ErrorRow("Failed to load data.");

    fn row(&self) -> TableRow {
        TableRow::new(vec![
            Cell::badge("bg-secondary", &self.code),
            Cell::bold(&self.name).with_class("text-wrap"),
            Cell::plain(self.credits.to_string()).with_class(WIDE_ONLY),
            Cell::plain(format!("{}h", self.workload_hours)).with_class(WIDE_ONLY),
            Cell::badge("bg-primary", self.department_label()).with_class(WIDE_ONLY),
        ])
        .with_actions(vec![
            RowAction::view(Self::details_page(self.id)),
            RowAction::edit(Self::form_page(self.id)),
            RowAction::delete(Self::action_page(self.id, Mutation::Delete)),
        ])
    }
}

impl Removable for Discipline {
    fn action(mutation: Mutation) -> Option<ActionSpec> {
        match mutation {
            Mutation::Delete => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Warning,
                    "Are you sure?",
                    "This will permanently remove the discipline.",
                    "Yes, delete",
                ),
                success: Notice::success("Deleted!", "Discipline removed."),
                failure: Notice::error("Error!", "Failed to delete discipline."),
                conflicts: &[],
            }),
            Mutation::Deactivate | Mutation::Reactivate => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisciplineForm {
    pub name: String,
    pub code: String,
    pub credits: String,
    pub workload_hours: String,
    pub description: String,
    pub department_id: String,
}

impl EntityForm for DisciplineForm {
    type Record = Discipline;
    type Payload = DisciplinePayload;

    const CREATE_TITLE: &'static str = "New Discipline";
    const EDIT_TITLE: &'static str = "Edit Discipline";
    const SAVED_TEXT: &'static str = "Discipline saved successfully.";
    const CONFLICT: Option<ConflictPolicy> = Some(ConflictPolicy {
        on_status_409: true,
        keywords: &[],
        title: "Conflict",
        text: None,
    });
    const DEPENDENCY: Option<Dependency> = Some(Dependency {
        field: "department_id",
        path: "/api/departments",
        placeholder: "Select a department...",
        failure_text: None,
        decode: select_options::<Department>,
    });

    fn from_record(d: &Discipline) -> Self {
        Self {
            name: d.name.clone(),
            code: d.code.clone(),
            credits: non_zero(d.credits),
            workload_hours: non_zero(d.workload_hours),
            description: d.description.clone().unwrap_or_default(),
            department_id: d.department_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    fn payload(&self) -> Result<DisciplinePayload, InvalidField> {
        Ok(DisciplinePayload {
            name: self.name.clone(),
            code: self.code.clone(),
            credits: parse_int("credits", &self.credits)?,
            workload_hours: parse_int("workload_hours", &self.workload_hours)?,
            description: optional(&self.description),
            department_id: parse_id("department_id", &self.department_id)?,
        })
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", &self.name),
            FormField::text("code", "Code", &self.code),
            FormField::number("credits", "Credits", &self.credits),
            FormField::number("workload_hours", "Workload (hours)", &self.workload_hours),
            FormField::textarea("description", "Description", &self.description).optional(),
            FormField::select("department_id", "Department", &self.department_id, Vec::new()),
        ]
    }
}

/// Zero reads as "not filled in" on the form.
fn non_zero(value: i32) -> String {
    if value == 0 { String::new() } else { value.to_string() }
}

/// Read-only view of one discipline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisciplineDetails {
    pub name: String,
    pub code: String,
    pub credits: String,
    pub workload_hours: String,
    pub description: String,
    pub department: String,
    pub edit_href: String,
}

impl From<&Discipline> for DisciplineDetails {
    fn from(d: &Discipline) -> Self {
        Self {
            name: d.name.clone(),
            code: d.code.clone(),
            credits: d.credits.to_string(),
            workload_hours: d.workload_hours.to_string(),
            description: d
                .description
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| "No description registered.".to_string()),
            department: d.department_label().to_string(),
            edit_href: Discipline::form_page(d.id),
        }
    }
}

/// Without an id the page has nothing to show and goes back to the list.
pub async fn load_details(
    client: &dyn BackendClient,
    id: Option<i64>,
    ui: &mut dyn Ui,
) -> Option<DisciplineDetails> {
    let Some(id) = id else {
        ui.navigate(&Discipline::list_page());
        return None;
    };

    let resource = Discipline::resource();
    match fetch_json::<Discipline>(client, &resource.item(id)).await {
        Ok(discipline) => Some(DisciplineDetails::from(&discipline)),
        Err(e) => {
            error!("failed to load discipline {}: {}", id, e);
            ui.notify(Notice::error("Error", "Failed to load details."));
            None
        }
    }
}
