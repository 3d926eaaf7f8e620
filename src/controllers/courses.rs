use serde::{Deserialize, Serialize};

use super::actions::{ActionSpec, Mutation, Removable};
use super::form::{EntityForm, FormField, InvalidField, SelectSource, parse_int};
use super::list::{Listed, LoadFailure};
use super::Entity;
use crate::models::{Course, CoursePayload};
use crate::ui::{Cell, Notice, Prompt, RowAction, SelectOption, TableRow, Tone};

impl Entity for Course {
    const SLUG: &'static str = "courses";
    const API_PATH: &'static str = "/api/courses";
    const TITLE: &'static str = "Courses";
}

impl Listed for Course {
    const TABLE_ID: &'static str = "coursesTable";
    const HEADERS: &'static [&'static str] = &["#", "Name", "Credits", "Duration", ""];
    const EMPTY_TEXT: &'static str = "No courses found.";
    const ON_FAILURE: LoadFailure = LoadFailure::LogOnly;

    fn row(&self) -> TableRow {
        TableRow::new(vec![
            Cell::plain(format!("#{}", self.id)),
            Cell::bold(&self.name),
            Cell::plain(self.total_credits_required.to_string()),
            Cell::plain(format!("{} semesters", self.duration_semesters)),
        ])
        .with_actions(vec![
            RowAction::edit(Self::form_page(self.id)),
            RowAction::delete(Self::action_page(self.id, Mutation::Delete)),
        ])
    }
}

impl Removable for Course {
    fn action(mutation: Mutation) -> Option<ActionSpec> {
        match mutation {
            Mutation::Delete => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Warning,
                    "Delete course?",
                    "This action cannot be undone.",
                    "Yes, delete",
                ),
                success: Notice::success("Deleted!", "Course removed."),
                failure: Notice::error("Error!", "Failed to delete course."),
                conflicts: &[],
            }),
            Mutation::Deactivate | Mutation::Reactivate => None,
        }
    }
}

impl SelectSource for Course {
    fn option(&self) -> SelectOption {
        SelectOption {
            value: self.id.to_string(),
            label: format!("ID: {} - {}", self.id, self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseForm {
    pub name: String,
    pub credits: String,
    pub semesters: String,
}

impl EntityForm for CourseForm {
    type Record = Course;
    type Payload = CoursePayload;

    const CREATE_TITLE: &'static str = "New Course";
    const EDIT_TITLE: &'static str = "Edit Course";
    const SAVED_TEXT: &'static str = "Course saved.";
    const FAILURE_TEXT: Option<&'static str> = Some("Failed to save course.");

    fn from_record(c: &Course) -> Self {
        Self {
            name: c.name.clone(),
            credits: c.total_credits_required.to_string(),
            semesters: c.duration_semesters.to_string(),
        }
    }

    fn payload(&self) -> Result<CoursePayload, InvalidField> {
        Ok(CoursePayload {
            name: self.name.clone(),
            total_credits_required: parse_int("credits", &self.credits)?,
            duration_semesters: parse_int("semesters", &self.semesters)?,
        })
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Course name", &self.name),
            FormField::number("credits", "Total credits required", &self.credits),
            FormField::number("semesters", "Duration (semesters)", &self.semesters),
        ]
    }
}
