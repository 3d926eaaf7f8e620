mod common;

use std::sync::Arc;

use common::RecordingClient;
use reqwest::Method;
use serde_json::json;
use unisystem_ui::backend::BackendClient;
use unisystem_ui::controllers::courses::CourseForm;
use unisystem_ui::controllers::disciplines::DisciplineForm;
use unisystem_ui::controllers::semesters::SemesterForm;
use unisystem_ui::controllers::students::StudentForm;
use unisystem_ui::controllers::teachers::TeacherForm;
use unisystem_ui::controllers::{EntityForm, FormController, FormMode, SubmitOutcome};
use unisystem_ui::ui::{PageUi, SelectState, Tone};

fn controller<F: EntityForm>(client: &Arc<RecordingClient>) -> FormController<F> {
    let backend: Arc<dyn BackendClient> = client.clone();
    FormController::new(backend)
}

fn student() -> StudentForm {
    StudentForm {
        name: "Ana Souza".to_string(),
        email: String::new(),
        cpf: "123.456.789-00".to_string(),
        registration_number: "2024001".to_string(),
        gender: "F".to_string(),
        course_id: "3".to_string(),
        date_birth: "2024-03-15".to_string(),
    }
}

#[tokio::test]
async fn test_create_posts_typed_payload() {
    let client = RecordingClient::new();
    client.respond(Method::POST, "/api/students", 201, "{}");
    let mut ui = PageUi::default();

    let outcome = controller::<StudentForm>(&client)
        .submit(FormMode::Create, &student(), &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    let sent = client.sent_to(Method::POST, "/api/students");
    assert_eq!(sent.len(), 1);
    let body = sent[0].body.clone().unwrap();
    assert_eq!(body["course_id"], json!(3));
    assert_eq!(body["email"], json!(null));
    assert_eq!(body["date_birth"], json!("2024-03-15T00:00:00Z"));
    assert_eq!(ui.redirect(), Some("/students"));
    assert_eq!(ui.notices()[0].title, "Success!");
}

#[tokio::test]
async fn test_edit_puts_to_item() {
    let client = RecordingClient::new();
    client.respond(Method::PUT, "/api/courses/42", 200, "{}");
    let form = CourseForm {
        name: "Physics".to_string(),
        credits: "240".to_string(),
        semesters: "8".to_string(),
    };
    let mut ui = PageUi::default();

    let outcome = controller::<CourseForm>(&client)
        .submit(FormMode::Edit(42), &form, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    let sent = client.sent_to(Method::PUT, "/api/courses/42");
    assert_eq!(sent[0].body.clone().unwrap()["total_credits_required"], json!(240));
}

#[tokio::test]
async fn test_bad_number_never_reaches_backend() {
    let client = RecordingClient::new();
    let form = SemesterForm {
        year: "twenty".to_string(),
        period: "1".to_string(),
    };
    let mut ui = PageUi::default();

    let outcome = controller::<SemesterForm>(&client)
        .submit(FormMode::Create, &form, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(client.sent().is_empty());
    assert!(ui.field_error("year").is_some());
}

#[tokio::test]
async fn test_duplicate_cpf_marks_field() {
    let client = RecordingClient::new();
    client.respond(Method::POST, "/api/students", 409, "CPF already exists");
    let mut ui = PageUi::default();

    let outcome = controller::<StudentForm>(&client)
        .submit(FormMode::Create, &student(), &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(ui.field_error("cpf"), Some("CPF already exists"));
    assert_eq!(ui.redirect(), None);
    assert!(ui.notices()[0].toast);
}

#[tokio::test]
async fn test_structured_error_wins_over_keywords() {
    let client = RecordingClient::new();
    client.respond_json(
        Method::POST,
        "/api/students",
        422,
        json!({"field": "registration_number", "message": "CPF and registration clash"}),
    );
    let mut ui = PageUi::default();

    controller::<StudentForm>(&client)
        .submit(FormMode::Create, &student(), &mut ui)
        .await;

    assert_eq!(ui.field_error("registration_number"), Some("CPF and registration clash"));
    assert_eq!(ui.field_error("cpf"), None);
}

#[tokio::test]
async fn test_teacher_conflict_is_generic() {
    let client = RecordingClient::new();
    client.respond(Method::POST, "/api/teachers", 409, "CPF already exists");
    let form = TeacherForm {
        name: "Carla".to_string(),
        email: "c@uni.br".to_string(),
        cpf: "1".to_string(),
        telephone: "555".to_string(),
        department_id: "2".to_string(),
        date_contract: "2020-02-01".to_string(),
    };
    let mut ui = PageUi::default();

    let outcome = controller::<TeacherForm>(&client)
        .submit(FormMode::Create, &form, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(ui.field_error("cpf"), None);
    assert_eq!(ui.notices()[0].tone, Tone::Error);
    assert_eq!(ui.notices()[0].text, "An error occurred while saving: CPF already exists");
}

#[tokio::test]
async fn test_discipline_conflict_shows_backend_text() {
    let client = RecordingClient::new();
    client.respond(Method::POST, "/api/disciplines", 409, "Code CS101 is taken");
    let form = DisciplineForm {
        name: "Algorithms".to_string(),
        code: "CS101".to_string(),
        credits: "4".to_string(),
        workload_hours: "60".to_string(),
        description: String::new(),
        department_id: "1".to_string(),
    };
    let mut ui = PageUi::default();

    let outcome = controller::<DisciplineForm>(&client)
        .submit(FormMode::Create, &form, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Conflict);
    assert_eq!(ui.notices()[0].title, "Conflict");
    assert_eq!(ui.notices()[0].text, "Code CS101 is taken");
    assert_eq!(ui.notices()[0].tone, Tone::Warning);
}

#[tokio::test]
async fn test_semester_duplicate_is_conflict() {
    let client = RecordingClient::new();
    client.respond(Method::POST, "/api/semesters", 400, "Semestre já existe");
    let form = SemesterForm {
        year: "2024".to_string(),
        period: "2".to_string(),
    };
    let mut ui = PageUi::default();

    let outcome = controller::<SemesterForm>(&client)
        .submit(FormMode::Create, &form, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Conflict);
    assert_eq!(ui.notices()[0].text, "This semester is already registered.");
}

#[tokio::test]
async fn test_init_edit_loads_record_and_options() {
    let client = RecordingClient::new();
    client
        .respond_json(
            Method::GET,
            "/api/courses",
            200,
            json!([{"id": 3, "name": "Physics"}]),
        )
        .respond_json(
            Method::GET,
            "/api/students/8",
            200,
            json!({"id": 8, "name": "Ana", "cpf": "1", "registration_number": "9",
                   "course_id": 3, "date_birth": "2001-09-30T00:00:00Z"}),
        );
    let mut ui = PageUi::default();

    let form = controller::<StudentForm>(&client)
        .init(FormMode::Edit(8), &mut ui)
        .await;

    assert_eq!(form.name, "Ana");
    assert_eq!(form.course_id, "3");
    assert_eq!(form.date_birth, "2001-09-30");
    assert_eq!(form.gender, "M");
    match ui.take_select("course_id") {
        Some(SelectState::Loaded { options, .. }) => {
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].label, "ID: 3 - Physics");
        }
        other => panic!("unexpected select state: {:?}", other),
    }
}

#[tokio::test]
async fn test_dependency_failure_keeps_form_usable() {
    let client = RecordingClient::new();
    client.fail(Method::GET, "/api/courses");
    let mut ui = PageUi::default();

    let form = controller::<StudentForm>(&client)
        .init(FormMode::Create, &mut ui)
        .await;

    assert_eq!(form, StudentForm::default());
    assert_eq!(
        ui.take_select("course_id"),
        Some(SelectState::Failed("Failed to load courses".to_string()))
    );
    assert!(ui.notices().is_empty());
}

#[tokio::test]
async fn test_missing_record_notifies() {
    let client = RecordingClient::new();
    client.respond(Method::GET, "/api/departments", 200, "[]");
    let mut ui = PageUi::default();

    controller::<DisciplineForm>(&client)
        .init(FormMode::Edit(99), &mut ui)
        .await;

    assert_eq!(ui.notices()[0].text, "Failed to load the record.");
}

#[tokio::test]
async fn test_pending_update_is_not_repeated() {
    let client = RecordingClient::new();
    let in_flight = unisystem_ui::controllers::InFlight::new();
    let _held = in_flight.try_acquire("PUT /api/courses/42").unwrap();
    let form = CourseForm {
        name: "Physics".to_string(),
        credits: "240".to_string(),
        semesters: "8".to_string(),
    };
    let mut ui = PageUi::default();

    let outcome = controller::<CourseForm>(&client)
        .with_in_flight(in_flight.clone())
        .submit(FormMode::Edit(42), &form, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Busy);
    assert!(client.sent().is_empty());
    assert_eq!(ui.redirect(), None);
}

#[tokio::test]
async fn test_student_keywords_pick_the_field() {
    let cases = [
        ("email already in use", "email"),
        ("Número de matrícula já cadastrado", "registration_number"),
        ("registration number taken", "registration_number"),
    ];
    for (body, field) in cases {
        let client = RecordingClient::new();
        client.respond(Method::POST, "/api/students", 400, body);
        let mut ui = PageUi::default();

        let outcome = controller::<StudentForm>(&client)
            .submit(FormMode::Create, &student(), &mut ui)
            .await;

        assert_eq!(outcome, SubmitOutcome::Invalid, "{}", body);
        assert_eq!(ui.field_error(field), Some(body));
        assert_eq!(ui.field_error("cpf"), None);
    }
}

#[tokio::test]
async fn test_new_semester_defaults_to_current_year() {
    use chrono::Datelike;

    let client = RecordingClient::new();
    let mut ui = PageUi::default();

    let form = controller::<SemesterForm>(&client)
        .init(FormMode::Create, &mut ui)
        .await;

    assert_eq!(form.year, chrono::Local::now().year().to_string());
    assert_eq!(form.period, "1");
    assert!(client.sent().is_empty());
}
