use serde::{Deserialize, Serialize};

use super::actions::{ActionSpec, Mutation, Removable};
use super::form::{
    Dependency, EntityForm, FieldRule, FormField, InvalidField, optional, parse_date, parse_id,
    select_options,
};
use super::list::{Listed, LoadFailure, status_cell};
use super::Entity;
use crate::models::{Course, Student, StudentPayload, Transition, dates};
use crate::ui::{Cell, Notice, Prompt, RowAction, SelectOption, TableRow, Tone};

impl Entity for Student {
    const SLUG: &'static str = "students";
    const API_PATH: &'static str = "/api/students";
    const TITLE: &'static str = "Students";
}

impl Listed for Student {
    const TABLE_ID: &'static str = "studentsTable";
    const HEADERS: &'static [&'static str] = &["Registration", "Name", "Email", "Course", "Status", ""];
    const EMPTY_TEXT: &'static str = "No students found.";
    const ON_FAILURE: LoadFailure = LoadFailure::Alert("Could not load the students.");

    fn row(&self) -> TableRow {
        let status = self.status();
        let toggle = match status.available_transition() {
            Transition::Deactivate => RowAction::deactivate(Self::action_page(self.id, Mutation::Deactivate)),
            Transition::Reactivate => RowAction::reactivate(Self::action_page(self.id, Mutation::Reactivate)),
        };

        TableRow::new(vec![
            Cell::bold(format!("#{}", self.registration_number)),
            Cell::bold(&self.name),
            Cell::plain(self.email.as_deref().filter(|e| !e.is_empty()).unwrap_or("-")),
            Cell::badge("bg-info text-dark", self.course_name.as_deref().unwrap_or_default()),
            status_cell(status),
        ])
        .with_actions(vec![RowAction::edit(Self::form_page(self.id)), toggle])
        .muted(!status.is_active())
    }
}

impl Removable for Student {
    fn action(mutation: Mutation) -> Option<ActionSpec> {
        match mutation {
            Mutation::Deactivate => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Warning,
                    "Deactivate student?",
                    "The student will no longer have access to the system.",
                    "Yes, deactivate",
                ),
                success: Notice::success("Deactivated!", "The student was deactivated."),
                failure: Notice::error("Error!", "Failed to deactivate."),
                conflicts: &[],
            }),
            Mutation::Reactivate => Some(ActionSpec {
                prompt: Prompt::new(
                    Tone::Question,
                    "Reactivate student?",
                    "The student will be marked active again.",
                    "Yes, reactivate",
                ),
                success: Notice::success("Success!", "Student reactivated."),
                failure: Notice::error("Error!", "Failed to reactivate the student."),
                conflicts: &[],
            }),
            Mutation::Delete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub registration_number: String,
    pub gender: String,
    pub course_id: String,
    pub date_birth: String,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            cpf: String::new(),
            registration_number: String::new(),
            gender: "M".to_string(),
            course_id: String::new(),
            date_birth: String::new(),
        }
    }
}

impl EntityForm for StudentForm {
    type Record = Student;
    type Payload = StudentPayload;

    const CREATE_TITLE: &'static str = "New Student";
    const EDIT_TITLE: &'static str = "Edit Student";
    const SAVED_TEXT: &'static str = "Data saved.";
    const FIELD_RULES: &'static [FieldRule] = &[
        FieldRule { keyword: "CPF", field: "cpf" },
        FieldRule { keyword: "email", field: "email" },
        FieldRule { keyword: "matrícula", field: "registration_number" },
        FieldRule { keyword: "registration", field: "registration_number" },
    ];
    const DEPENDENCY: Option<Dependency> = Some(Dependency {
        field: "course_id",
        path: "/api/courses",
        placeholder: "Select a course...",
        failure_text: Some("Failed to load courses"),
        decode: select_options::<Course>,
    });

    fn from_record(s: &Student) -> Self {
        Self {
            name: s.name.clone(),
            email: s.email.clone().unwrap_or_default(),
            cpf: s.cpf.clone(),
            registration_number: s.registration_number.clone(),
            gender: s
                .gender
                .clone()
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| "M".to_string()),
            course_id: s.course_id.map(|id| id.to_string()).unwrap_or_default(),
            date_birth: s.date_birth.as_ref().map(dates::to_input_date).unwrap_or_default(),
        }
    }

    fn payload(&self) -> Result<StudentPayload, InvalidField> {
        Ok(StudentPayload {
            name: self.name.clone(),
            email: optional(&self.email),
            cpf: self.cpf.clone(),
            registration_number: self.registration_number.clone(),
            gender: self.gender.clone(),
            course_id: parse_id("course_id", &self.course_id)?,
            date_birth: parse_date("date_birth", &self.date_birth)?,
        })
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Full name", &self.name),
            FormField::email("email", "Email", &self.email).optional(),
            FormField::text("cpf", "CPF", &self.cpf),
            FormField::text("registration_number", "Registration number", &self.registration_number),
            FormField::select("gender", "Gender", &self.gender, gender_choices()),
            FormField::select("course_id", "Course", &self.course_id, Vec::new()),
            FormField::date("date_birth", "Date of birth", &self.date_birth),
        ]
    }
}

fn gender_choices() -> Vec<SelectOption> {
    [("M", "Male"), ("F", "Female"), ("O", "Other")]
        .into_iter()
        .map(|(value, label)| SelectOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}
