use serde::{Deserialize, Serialize};

use super::actions::{ActionSpec, Mutation, Removable};
use super::form::{EntityForm, FormField, InvalidField, SelectSource};
use super::list::{Listed, LoadFailure};
use super::Entity;
use crate::models::{Department, DepartmentPayload, dates};
use crate::ui::{Cell, Notice, Prompt, RowAction, SelectOption, TableRow, Tone};

impl Entity for Department {
    const SLUG: &'static str = "departments";
    const API_PATH: &'static str = "/api/departments";
    const TITLE: &'static str = "Departments";
}

impl Listed for Department {
    const TABLE_ID: &'static str = "departmentsTable";
    const HEADERS: &'static [&'static str] = &["#", "Name", "Abbreviation", "Created", ""];
    const EMPTY_TEXT: &'static str = "No departments found.";
    const ON_FAILURE: LoadFailure = LoadFailure::LogOnly;

    fn row(&self) -> TableRow {
        TableRow::new(vec![
            Cell::plain(format!("#{}", self.id)),
            Cell::bold(&self.name),
            Cell::badge("bg-secondary", &self.abbreviation),
            Cell::plain(self.created_at.as_ref().map(dates::to_display_date).unwrap_or_default()),
        ])
        .with_actions(vec![
            RowAction::edit(Self::form_page(self.id)),
            RowAction::delete(Self::action_page(self.id, Mutation::Delete)),
        ])
    }
}

impl Removable for Department {
    fn action(mutation: Mutation) -> Option<ActionSpec> {
        match mutation {
            Mutation::Delete => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Warning,
                    "Delete department?",
                    "This action cannot be undone.",
                    "Yes, delete",
                ),
                success: Notice::success("Deleted!", "Department removed."),
                failure: Notice::error("Error!", "Failed to delete department."),
                conflicts: &[],
            }),
            Mutation::Deactivate | Mutation::Reactivate => None,
        }
    }
}

impl SelectSource for Department {
    fn option(&self) -> SelectOption {
        SelectOption {
            value: self.id.to_string(),
            label: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentForm {
    pub name: String,
    pub abbreviation: String,
}

impl EntityForm for DepartmentForm {
    type Record = Department;
    type Payload = DepartmentPayload;

    const CREATE_TITLE: &'static str = "New Department";
    const EDIT_TITLE: &'static str = "Edit Department";
    const SAVED_TEXT: &'static str = "Department saved.";
    const FAILURE_TEXT: Option<&'static str> = Some("Failed to save department.");

    fn from_record(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            abbreviation: d.abbreviation.clone(),
        }
    }

    fn payload(&self) -> Result<DepartmentPayload, InvalidField> {
        Ok(DepartmentPayload {
            name: self.name.clone(),
            abbreviation: self.abbreviation.clone(),
        })
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Department name", &self.name),
            FormField::text("abbreviation", "Abbreviation", &self.abbreviation),
        ]
    }
}
