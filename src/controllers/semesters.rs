use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use super::actions::{ActionSpec, ConflictRule, Mutation, Removable};
use super::form::{ConflictPolicy, EntityForm, FormField, InvalidField, parse_int};
use super::list::{Listed, LoadFailure};
use super::Entity;
use crate::models::{Semester, SemesterPayload};
use crate::ui::{Cell, Notice, Prompt, RowAction, SelectOption, TableRow, Tone};

const LINKED_OFFERINGS: &str = "Cannot delete: there are offerings linked to this semester.";

impl Entity for Semester {
    const SLUG: &'static str = "semesters";
    const API_PATH: &'static str = "/api/semesters";
    const TITLE: &'static str = "Semesters";
}

impl Listed for Semester {
    const TABLE_ID: &'static str = "semestersTable";
    const HEADERS: &'static [&'static str] = &["Year", "Period", "Semester", ""];
    const EMPTY_TEXT: &'static str = "No semesters registered.";
    const ON_FAILURE: LoadFailure = LoadFailure::ErrorRow("Failed to load data.");

    fn row(&self) -> TableRow {
        TableRow::new(vec![
            Cell::bold(self.year.to_string()),
            Cell::plain(format!("{}º", self.period)),
            Cell::badge("bg-info text-dark", self.to_string()),
        ])
        .with_actions(vec![RowAction::delete(Self::action_page(self.id, Mutation::Delete))])
    }
}

impl Removable for Semester {
    fn action(mutation: Mutation) -> Option<ActionSpec> {
        match mutation {
            Mutation::Delete => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Warning,
                    "Delete semester?",
                    "This action cannot be undone.",
                    "Yes, delete",
                ),
                success: Notice::success("Deleted!", "Semester removed."),
                failure: Notice::error("Error!", "Failed to process the request."),
                conflicts: &[
                    ConflictRule {
                        needle: "ofertas vinculadas",
                        title: "Blocked",
                        text: LINKED_OFFERINGS,
                    },
                    ConflictRule {
                        needle: "linked offerings",
                        title: "Blocked",
                        text: LINKED_OFFERINGS,
                    },
                ],
            }),
            Mutation::Deactivate | Mutation::Reactivate => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemesterForm {
    pub year: String,
    pub period: String,
}

impl Default for SemesterForm {
    fn default() -> Self {
        Self {
            year: Local::now().year().to_string(),
            period: "1".to_string(),
        }
    }
}

impl EntityForm for SemesterForm {
    type Record = Semester;
    type Payload = SemesterPayload;

    const CREATE_TITLE: &'static str = "New Semester";
    const EDIT_TITLE: &'static str = "Edit Semester";
    const SAVED_TEXT: &'static str = "Semester saved.";
    const CONFLICT: Option<ConflictPolicy> = Some(ConflictPolicy {
        on_status_409: true,
        keywords: &["já existe", "already exists"],
        title: "Attention",
        text: Some("This semester is already registered."),
    });
    const FAILURE_TEXT: Option<&'static str> = Some("Failed to save semester.");

    fn from_record(s: &Semester) -> Self {
        Self {
            year: s.year.to_string(),
            period: s.period.to_string(),
        }
    }

    fn payload(&self) -> Result<SemesterPayload, InvalidField> {
        Ok(SemesterPayload {
            year: parse_int("year", &self.year)?,
            period: parse_int("period", &self.period)?,
        })
    }

    fn fields(&self) -> Vec<FormField> {
        let periods = ["1", "2"]
            .into_iter()
            .map(|p| SelectOption {
                value: p.to_string(),
                label: format!("{}º", p),
            })
            .collect();
        vec![
            FormField::number("year", "Year", &self.year),
            FormField::select("period", "Period", &self.period, periods),
        ]
    }
}
