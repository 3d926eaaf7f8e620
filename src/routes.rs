use askama::Template;
use axum::Router;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::controllers::courses::CourseForm;
use crate::controllers::dashboard::{animate_cards, counter_id};
use crate::controllers::departments::DepartmentForm;
use crate::controllers::disciplines::{self, DisciplineForm};
use crate::controllers::semesters::SemesterForm;
use crate::controllers::students::StudentForm;
use crate::controllers::teachers::TeacherForm;
use crate::controllers::{
    ActionController, ActionOutcome, DashboardController, Entity, EntityForm, FormController,
    FormField, FormMode, ListController, Listed, Mutation, Removable, SubmitOutcome,
};
use crate::error::AppError;
use crate::models::{DashboardStats, Discipline};
use crate::state::AppState;
use crate::ui::{CounterDisplay, PageUi, SelectState, Ui};
use crate::views::{
    ConfirmPage, CounterCard, DashboardPage, DetailsPage, FormPage, ListPage, NoticePage,
};

#[derive(Debug, Default, Deserialize)]
struct IdQuery {
    id: Option<String>,
}

impl IdQuery {
    fn mode(&self) -> FormMode {
        FormMode::from_query(self.id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfirmParams {
    confirmed: Option<String>,
}

impl ConfirmParams {
    fn is_confirmed(&self) -> bool {
        self.confirmed.as_deref() == Some("yes")
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
        .route("/disciplines/details", get(discipline_details))
        .merge(entity_routes::<StudentForm>())
        .merge(entity_routes::<TeacherForm>())
        .merge(entity_routes::<CourseForm>())
        .merge(entity_routes::<DepartmentForm>())
        .merge(entity_routes::<SemesterForm>())
        .merge(entity_routes::<DisciplineForm>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// List, form and row-action pages of one entity.
fn entity_routes<F>() -> Router<AppState>
where
    F: EntityForm,
    F::Record: Removable,
{
    let slug = F::Record::SLUG;
    Router::new()
        .route(&format!("/{}", slug), get(list_page::<F::Record>))
        .route(
            &format!("/{}/form", slug),
            get(form_page::<F>).post(submit_form::<F>),
        )
        .route(&format!("/{}/{{id}}/{{action}}", slug), post(run_action::<F::Record>))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut ui = PageUi::new(DashboardStats::KEYS.map(counter_id));
    DashboardController::new(state.client.clone(), state.counters)
        .load(&mut ui)
        .await;
    animate_cards(&mut ui, DashboardStats::KEYS.len());

    let cards = DashboardStats::KEYS
        .into_iter()
        .enumerate()
        .map(|(i, key)| counter_card(&ui, i, key))
        .collect();

    let page = DashboardPage {
        title: "Dashboard".to_string(),
        notices: ui.take_notices(),
        cards,
    };
    Ok(Html(page.render()?))
}

fn counter_card(ui: &PageUi, index: usize, key: &'static str) -> CounterCard {
    let id = counter_id(key);
    let (value, frames, interval_ms) = match ui.counter(&id) {
        Some(CounterDisplay::Animated { interval, frames, .. }) => (
            // counts up from zero in the browser
            0,
            frames.iter().map(u64::to_string).collect::<Vec<_>>().join(","),
            interval.as_millis(),
        ),
        Some(display) => (display.final_value(), String::new(), 0),
        None => (0, String::new(), 0),
    };
    CounterCard {
        id,
        label: counter_label(key),
        href: format!("/{}", key),
        value: value.to_string(),
        frames,
        interval_ms,
        delay_ms: ui.card_delays().get(index).map_or(0, |d| d.as_millis()),
    }
}

fn counter_label(key: &str) -> &'static str {
    match key {
        "students" => "Students",
        "teachers" => "Teachers",
        "courses" => "Courses",
        "disciplines" => "Disciplines",
        "semesters" => "Semesters",
        "departments" => "Departments",
        _ => "",
    }
}

async fn list_page<E: Removable>(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut ui = PageUi::new([E::TABLE_ID]);
    ListController::<E>::new(state.client.clone()).load(&mut ui).await;
    render_list::<E>(&mut ui)
}

fn render_list<E: Listed>(ui: &mut PageUi) -> Result<Html<String>, AppError> {
    let page = ListPage {
        title: E::TITLE.to_string(),
        notices: ui.take_notices(),
        new_href: format!("/{}/form", E::SLUG),
        table_id: E::TABLE_ID,
        headers: E::HEADERS,
        rows: ui.take_rows(E::TABLE_ID),
    };
    Ok(Html(page.render()?))
}

async fn form_page<F: EntityForm>(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Html<String>, AppError> {
    let mode = query.mode();
    let mut ui = PageUi::default();
    let form: F = FormController::<F>::new(state.client.clone())
        .init(mode, &mut ui)
        .await;
    render_form(mode, &form, &mut ui)
}

async fn submit_form<F: EntityForm>(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Form(form): Form<F>,
) -> Result<Response, AppError> {
    let mode = query.mode();
    let controller =
        FormController::<F>::new(state.client.clone()).with_in_flight(state.in_flight.clone());
    let mut ui = PageUi::default();

    match controller.submit(mode, &form, &mut ui).await {
        SubmitOutcome::Saved => navigate_response(&mut ui),
        SubmitOutcome::Invalid
        | SubmitOutcome::Conflict
        | SubmitOutcome::Busy
        | SubmitOutcome::Failed => {
            controller.load_options(&mut ui).await;
            Ok(render_form(mode, &form, &mut ui)?.into_response())
        }
    }
}

fn render_form<F: EntityForm>(mode: FormMode, form: &F, ui: &mut PageUi) -> Result<Html<String>, AppError> {
    let fields = form
        .fields()
        .into_iter()
        .map(|field| apply_ui_state(field, ui))
        .collect();

    let (title, action) = match mode {
        FormMode::Create => (F::CREATE_TITLE, format!("/{}/form", F::Record::SLUG)),
        FormMode::Edit(id) => (F::EDIT_TITLE, F::Record::form_page(id)),
    };

    let page = FormPage {
        title: title.to_string(),
        notices: ui.take_notices(),
        action,
        cancel_href: F::Record::list_page(),
        fields,
    };
    Ok(Html(page.render()?))
}

fn apply_ui_state(mut field: FormField, ui: &mut PageUi) -> FormField {
    if let Some(message) = ui.field_error(field.id) {
        field.error = message.to_string();
    }
    match ui.take_select(field.id) {
        Some(SelectState::Loaded {
            placeholder,
            options,
        }) => {
            field.placeholder = placeholder;
            field.choices = options;
        }
        Some(SelectState::Failed(text)) => {
            field.placeholder = text;
            field.choices.clear();
        }
        None => {}
    }
    field
}

async fn run_action<E: Removable>(
    State(state): State<AppState>,
    Path((id, action)): Path<(i64, String)>,
    Form(params): Form<ConfirmParams>,
) -> Result<Response, AppError> {
    let mutation: Mutation = action.parse()?;
    // The list is fetched again by the page the browser is sent to.
    let mut ui = PageUi::default().confirmed(params.is_confirmed());
    let controller = ActionController::<E>::new(state.client.clone(), state.in_flight.clone());

    match controller.run(mutation, id, &mut ui).await {
        ActionOutcome::Unsupported => Err(AppError::NotFound),
        ActionOutcome::Cancelled => {
            let Some(prompt) = ui.take_prompt() else {
                return Ok(Redirect::to(&E::list_page()).into_response());
            };
            let page = ConfirmPage {
                title: prompt.title.clone(),
                notices: ui.take_notices(),
                prompt,
                action: E::action_page(id, mutation),
                cancel_href: E::list_page(),
            };
            Ok(Html(page.render()?).into_response())
        }
        ActionOutcome::Done | ActionOutcome::Busy | ActionOutcome::Failed => {
            ui.navigate(&E::list_page());
            navigate_response(&mut ui)
        }
    }
}

async fn discipline_details(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, AppError> {
    let mut ui = PageUi::default();
    let details = disciplines::load_details(state.client.as_ref(), query.mode().id(), &mut ui).await;
    if ui.redirect().is_some() {
        return navigate_response(&mut ui);
    }

    let page = DetailsPage {
        title: details
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Discipline".to_string()),
        notices: ui.take_notices(),
        found: details.is_some(),
        details: details.unwrap_or_default(),
        back_href: Discipline::list_page(),
    };
    Ok(Html(page.render()?).into_response())
}

/// Follows a controller's navigation. Pending notices get an interstitial page first.
fn navigate_response(ui: &mut PageUi) -> Result<Response, AppError> {
    let Some(target) = ui.redirect().map(str::to_string) else {
        return Err(AppError::NotFound);
    };
    let notices = ui.take_notices();
    if notices.is_empty() {
        debug!("redirecting to {}", target);
        return Ok(Redirect::to(&target).into_response());
    }
    let page = NoticePage {
        title: "UniSystem".to_string(),
        notices,
        target,
    };
    Ok(Html(page.render()?).into_response())
}
