use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::Entity;
use super::guard::InFlight;
use crate::backend::{BackendClient, BackendResponse, Resource, fetch_json};
use crate::error::BackendError;
use crate::models::dates;
use crate::ui::{Notice, SelectOption, SelectState, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    /// Edit mode when the page query carries a usable `id`.
    pub fn from_query(id: Option<&str>) -> Self {
        id.and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(FormMode::Edit)
            .unwrap_or(FormMode::Create)
    }

    pub fn id(self) -> Option<i64> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: &'static str,
    pub message: String,
}

impl InvalidField {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Backend error text containing `keyword` is about input `field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub keyword: &'static str,
    pub field: &'static str,
}

/// When a failed save counts as a conflict rather than a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictPolicy {
    pub on_status_409: bool,
    pub keywords: &'static [&'static str],
    pub title: &'static str,
    /// Fixed text; `None` shows the backend's own message.
    pub text: Option<&'static str>,
}

impl ConflictPolicy {
    fn matches(&self, err: &BackendError) -> bool {
        (self.on_status_409 && err.status() == Some(409))
            || self.keywords.iter().any(|k| err.body().contains(k))
    }
}

/// Reference list feeding a select on the form.
#[derive(Debug, Clone, Copy)]
pub struct Dependency {
    pub field: &'static str,
    pub path: &'static str,
    pub placeholder: &'static str,
    /// Shown in place of the options when loading fails; `None` leaves the select empty.
    pub failure_text: Option<&'static str>,
    pub decode: fn(&BackendResponse) -> Result<Vec<SelectOption>, BackendError>,
}

/// A record that can appear as an option of a dependent select.
pub trait SelectSource {
    fn option(&self) -> SelectOption;
}

pub fn select_options<T>(response: &BackendResponse) -> Result<Vec<SelectOption>, BackendError>
where
    T: DeserializeOwned + SelectSource,
{
    let records: Option<Vec<T>> = response.json()?;
    Ok(records.unwrap_or_default().iter().map(T::option).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    TextArea,
    Select,
}

/// One input of a form as the page renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub choices: Vec<SelectOption>,
    pub placeholder: String,
    pub error: String,
}

impl FormField {
    fn build(id: &'static str, label: &'static str, kind: FieldKind, value: &str) -> Self {
        Self {
            id,
            label,
            kind,
            value: value.to_string(),
            required: true,
            choices: Vec::new(),
            placeholder: String::new(),
            error: String::new(),
        }
    }

    pub fn text(id: &'static str, label: &'static str, value: &str) -> Self {
        Self::build(id, label, FieldKind::Text, value)
    }

    pub fn email(id: &'static str, label: &'static str, value: &str) -> Self {
        Self::build(id, label, FieldKind::Email, value)
    }

    pub fn number(id: &'static str, label: &'static str, value: &str) -> Self {
        Self::build(id, label, FieldKind::Number, value)
    }

    pub fn date(id: &'static str, label: &'static str, value: &str) -> Self {
        Self::build(id, label, FieldKind::Date, value)
    }

    pub fn textarea(id: &'static str, label: &'static str, value: &str) -> Self {
        Self::build(id, label, FieldKind::TextArea, value)
    }

    pub fn select(id: &'static str, label: &'static str, value: &str, choices: Vec<SelectOption>) -> Self {
        Self {
            choices,
            ..Self::build(id, label, FieldKind::Select, value)
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            _ => "text",
        }
    }

    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    pub fn is_textarea(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    pub fn is_invalid(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Typed view-model of a create/edit form: exactly the fields it reads and writes.
pub trait EntityForm: Default + Clone + Send + Sync + DeserializeOwned + 'static {
    type Record: Entity;
    type Payload: Serialize + Send;

    const CREATE_TITLE: &'static str;
    const EDIT_TITLE: &'static str;
    const SAVED_TEXT: &'static str;
    const FIELD_RULES: &'static [FieldRule] = &[];
    const CONFLICT: Option<ConflictPolicy> = None;
    const DEPENDENCY: Option<Dependency> = None;
    /// Fixed text for unclassified failures; `None` appends the backend's message.
    const FAILURE_TEXT: Option<&'static str> = None;

    fn from_record(record: &Self::Record) -> Self;

    /// Coerces input values to their wire types.
    fn payload(&self) -> Result<Self::Payload, InvalidField>;

    fn fields(&self) -> Vec<FormField>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// A field was marked invalid.
    Invalid,
    Conflict,
    /// The same update is still pending.
    Busy,
    Failed,
}

/// Machine-readable error body: `{"field": "cpf", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct FieldErrorPayload {
    field: String,
    #[serde(default)]
    message: String,
}

pub struct FormController<F> {
    client: Arc<dyn BackendClient>,
    resource: Resource,
    in_flight: Option<InFlight>,
    _form: PhantomData<fn() -> F>,
}

impl<F: EntityForm> FormController<F> {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self::with_resource(client, F::Record::resource())
    }

    pub fn with_resource(client: Arc<dyn BackendClient>, resource: Resource) -> Self {
        Self {
            client,
            resource,
            in_flight: None,
            _form: PhantomData,
        }
    }

    /// Refuses an update while the same record's previous update is pending.
    pub fn with_in_flight(mut self, in_flight: InFlight) -> Self {
        self.in_flight = Some(in_flight);
        self
    }

    /// Fills the dependent select, then the record in edit mode.
    pub async fn init(&self, mode: FormMode, ui: &mut dyn Ui) -> F {
        self.load_options(ui).await;

        let FormMode::Edit(id) = mode else {
            return F::default();
        };

        match fetch_json::<F::Record>(self.client.as_ref(), &self.resource.item(id)).await {
            Ok(record) => F::from_record(&record),
            Err(e) => {
                error!("failed to load {} {}: {}", F::Record::SLUG, id, e);
                ui.notify(Notice::error("Error", "Failed to load the record."));
                F::default()
            }
        }
    }

    /// Populates the form's dependent select, if it has one. Failure never blocks the form.
    pub async fn load_options(&self, ui: &mut dyn Ui) {
        if let Some(dependency) = F::DEPENDENCY {
            self.load_dependency(&dependency, ui).await;
        }
    }

    async fn load_dependency(&self, dependency: &Dependency, ui: &mut dyn Ui) {
        let result = self
            .client
            .send(Method::GET, dependency.path, None)
            .await
            .and_then(|response| response.into_result())
            .and_then(|response| (dependency.decode)(&response));

        match result {
            Ok(options) => ui.fill_select(
                dependency.field,
                SelectState::Loaded {
                    placeholder: dependency.placeholder.to_string(),
                    options,
                },
            ),
            Err(e) => {
                warn!("failed to load options for {}: {}", dependency.field, e);
                if let Some(text) = dependency.failure_text {
                    ui.fill_select(dependency.field, SelectState::Failed(text.to_string()));
                }
            }
        }
    }

    /// POST in create mode, PUT in edit mode; navigates to the list once saved.
    pub async fn submit(&self, mode: FormMode, form: &F, ui: &mut dyn Ui) -> SubmitOutcome {
        ui.clear_field_errors();

        let payload = match form.payload() {
            Ok(payload) => payload,
            Err(invalid) => {
                ui.mark_invalid(invalid.field, &invalid.message);
                ui.notify(check_fields());
                return SubmitOutcome::Invalid;
            }
        };
        let body = match serde_json::to_value(&payload) {
            Ok(body) => body,
            Err(e) => {
                error!("failed to encode {} payload: {}", F::Record::SLUG, e);
                ui.notify(Notice::error("Error", "Failed to prepare the request."));
                return SubmitOutcome::Failed;
            }
        };

        let (method, path) = match mode {
            FormMode::Create => (Method::POST, self.resource.collection().to_string()),
            FormMode::Edit(id) => (Method::PUT, self.resource.item(id)),
        };

        let guard = match (&self.in_flight, mode) {
            (Some(in_flight), FormMode::Edit(_)) => {
                match in_flight.try_acquire(format!("{} {}", method, path)) {
                    Some(guard) => Some(guard),
                    None => {
                        warn!("{} {} already in flight", method, path);
                        ui.notify(Notice::warning("Please wait", "This record is already being saved.").toast());
                        return SubmitOutcome::Busy;
                    }
                }
            }
            _ => None,
        };

        let result = self
            .client
            .send(method.clone(), &path, Some(body))
            .await
            .and_then(|response| response.into_result());
        drop(guard);

        match result {
            Ok(_) => {
                info!("{} {} saved", method, path);
                ui.notify(Notice::success("Success!", F::SAVED_TEXT));
                ui.navigate(&F::Record::list_page());
                SubmitOutcome::Saved
            }
            Err(e) => {
                warn!("{} {} failed: {}", method, path, e);
                self.report_failure(form, &e, ui)
            }
        }
    }

    fn report_failure(&self, form: &F, err: &BackendError, ui: &mut dyn Ui) -> SubmitOutcome {
        let body = err.body();

        if let Ok(payload) = serde_json::from_str::<FieldErrorPayload>(body) {
            if let Some(field) = form.fields().into_iter().find(|f| f.id == payload.field) {
                let message = if payload.message.is_empty() { body } else { payload.message.as_str() };
                ui.mark_invalid(field.id, message);
                ui.notify(check_fields());
                return SubmitOutcome::Invalid;
            }
        }

        if let Some(rule) = F::FIELD_RULES.iter().find(|rule| body.contains(rule.keyword)) {
            ui.mark_invalid(rule.field, body);
            ui.notify(check_fields());
            return SubmitOutcome::Invalid;
        }

        if let Some(policy) = F::CONFLICT.filter(|policy| policy.matches(err)) {
            ui.notify(Notice::warning(policy.title, policy.text.unwrap_or(body)));
            return SubmitOutcome::Conflict;
        }

        let text = match F::FAILURE_TEXT {
            Some(text) => text.to_string(),
            None if body.is_empty() => format!("An error occurred while saving: {}", err),
            None => format!("An error occurred while saving: {}", body),
        };
        ui.notify(Notice::error("Error", text));
        SubmitOutcome::Failed
    }
}

fn check_fields() -> Notice {
    Notice::warning("Check the fields marked in red.", "").toast()
}

/// Blank input becomes `None`.
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn parse_int(field: &'static str, value: &str) -> Result<i32, InvalidField> {
    value
        .trim()
        .parse()
        .map_err(|_| InvalidField::new(field, "Enter a whole number."))
}

pub fn parse_id(field: &'static str, value: &str) -> Result<i64, InvalidField> {
    value
        .trim()
        .parse()
        .map_err(|_| InvalidField::new(field, "Select an option."))
}

pub fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, InvalidField> {
    dates::from_input_date(value).ok_or_else(|| InvalidField::new(field, "Enter a valid date."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_query() {
        assert_eq!(FormMode::from_query(None), FormMode::Create);
        assert_eq!(FormMode::from_query(Some("")), FormMode::Create);
        assert_eq!(FormMode::from_query(Some("abc")), FormMode::Create);
        assert_eq!(FormMode::from_query(Some("0")), FormMode::Create);
        assert_eq!(FormMode::from_query(Some("42")), FormMode::Edit(42));
    }

    #[test]
    fn coercions() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" a@b.c "), Some("a@b.c".to_string()));
        assert_eq!(parse_int("credits", "4"), Ok(4));
        assert_eq!(parse_int("credits", "").unwrap_err().field, "credits");
        assert!(parse_date("date_birth", "2001-09-30").is_ok());
        assert_eq!(parse_date("date_birth", "").unwrap_err().field, "date_birth");
    }
}
