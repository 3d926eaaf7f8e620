use serde::{Deserialize, Serialize};

use super::actions::{ActionSpec, Mutation, Removable};
use super::form::{EntityForm, FormField, InvalidField, parse_date, parse_id};
use super::list::{Listed, LoadFailure, status_cell};
use super::Entity;
use crate::models::{Teacher, TeacherPayload, Transition, dates};
use crate::ui::{Cell, Notice, Prompt, RowAction, TableRow, Tone};

impl Entity for Teacher {
    const SLUG: &'static str = "teachers";
    const API_PATH: &'static str = "/api/teachers";
    const TITLE: &'static str = "Teachers";
}

impl Listed for Teacher {
    const TABLE_ID: &'static str = "teachersTable";
    const HEADERS: &'static [&'static str] =
        &["#", "Name", "Email", "Telephone", "Department", "Status", ""];
    const EMPTY_TEXT: &'static str = "No teachers found.";
    const ON_FAILURE: LoadFailure = LoadFailure::Alert("Could not load the teachers.");

    fn row(&self) -> TableRow {
        let status = self.status();
        let toggle = match status.available_transition() {
            Transition::Deactivate => RowAction::deactivate(Self::action_page(self.id, Mutation::Deactivate)),
            Transition::Reactivate => RowAction::reactivate(Self::action_page(self.id, Mutation::Reactivate)),
        };
        let department = self
            .department_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("No department");

        TableRow::new(vec![
            Cell::bold(format!("#{}", self.id)).with_class("text-secondary"),
            Cell::bold(&self.name),
            Cell::plain(&self.email),
            Cell::plain(&self.telephone),
            Cell::badge("bg-primary", department),
            status_cell(status),
        ])
        .with_actions(vec![RowAction::edit(Self::form_page(self.id)), toggle])
        .muted(!status.is_active())
    }
}

impl Removable for Teacher {
    fn action(mutation: Mutation) -> Option<ActionSpec> {
        match mutation {
            Mutation::Deactivate => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Warning,
                    "Deactivate teacher?",
                    "The teacher will be marked as inactive.",
                    "Yes, deactivate",
                ),
                success: Notice::success("Deactivated!", "Teacher deactivated successfully."),
                failure: Notice::error("Error!", "Failed to process the request."),
                conflicts: &[],
            }),
            Mutation::Reactivate => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Question,
                    "Reactivate teacher?",
                    "The record will be active again.",
                    "Yes, reactivate",
                ),
                success: Notice::success("Success!", "Teacher reactivated."),
                failure: Notice::error("Error!", "Failed to reactivate."),
                conflicts: &[],
            }),
            Mutation::Delete => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherForm {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub telephone: String,
    pub department_id: String,
    pub date_contract: String,
}

impl EntityForm for TeacherForm {
    type Record = Teacher;
    type Payload = TeacherPayload;

    const CREATE_TITLE: &'static str = "New Teacher";
    const EDIT_TITLE: &'static str = "Edit Teacher";
    const SAVED_TEXT: &'static str = "Teacher saved successfully.";

    fn from_record(t: &Teacher) -> Self {
        Self {
            name: t.name.clone(),
            email: t.email.clone(),
            cpf: t.cpf.clone(),
            telephone: t.telephone.clone(),
            department_id: t.department_id.map(|id| id.to_string()).unwrap_or_default(),
            date_contract: t.date_contract.as_ref().map(dates::to_input_date).unwrap_or_default(),
        }
    }

    fn payload(&self) -> Result<TeacherPayload, InvalidField> {
        Ok(TeacherPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            cpf: self.cpf.clone(),
            telephone: self.telephone.clone(),
            department_id: parse_id("department_id", &self.department_id)?,
            date_contract: parse_date("date_contract", &self.date_contract)?,
        })
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Full name", &self.name),
            FormField::email("email", "Email", &self.email),
            FormField::text("cpf", "CPF", &self.cpf),
            FormField::text("telephone", "Telephone", &self.telephone),
            FormField::number("department_id", "Department ID", &self.department_id),
            FormField::date("date_contract", "Contract date", &self.date_contract),
        ]
    }
}
