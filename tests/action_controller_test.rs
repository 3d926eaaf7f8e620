mod common;

use std::sync::Arc;

use common::RecordingClient;
use reqwest::Method;
use serde_json::json;
use unisystem_ui::backend::BackendClient;
use unisystem_ui::controllers::{ActionController, ActionOutcome, InFlight, Mutation};
use unisystem_ui::models::{Course, Semester, Student, Teacher};
use unisystem_ui::ui::{PageUi, Tone};

fn controller<E: unisystem_ui::controllers::Removable>(
    client: &Arc<RecordingClient>,
    in_flight: &InFlight,
) -> ActionController<E> {
    let backend: Arc<dyn BackendClient> = client.clone();
    ActionController::new(backend, in_flight.clone())
}

#[tokio::test]
async fn test_deactivate_student_reloads_list() {
    let client = RecordingClient::new();
    client
        .respond(Method::DELETE, "/api/students/7", 204, "")
        .respond_json(
            Method::GET,
            "/api/students",
            200,
            json!([{"id": 7, "name": "Ana", "cpf": "1", "registration_number": "1", "active": false}]),
        );
    let in_flight = InFlight::new();
    let mut ui = PageUi::new(["studentsTable"]).confirmed(true);

    let outcome = controller::<Student>(&client, &in_flight)
        .run(Mutation::Deactivate, 7, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Done);
    let sent = client.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!((sent[0].method.clone(), sent[0].path.as_str()), (Method::DELETE, "/api/students/7"));
    assert_eq!((sent[1].method.clone(), sent[1].path.as_str()), (Method::GET, "/api/students"));
    assert_eq!(ui.notices()[0].title, "Deactivated!");
    assert!(ui.rows("studentsTable").unwrap()[0].muted);
    assert!(!in_flight.is_pending("DELETE /api/students/7"));
}

#[tokio::test]
async fn test_reactivate_teacher_patches_activation() {
    let client = RecordingClient::new();
    client
        .respond(Method::PATCH, "/api/teachers/3/activate", 200, "{}")
        .respond(Method::GET, "/api/teachers", 200, "[]");
    let in_flight = InFlight::new();
    let mut ui = PageUi::new(["teachersTable"]).confirmed(true);

    let outcome = controller::<Teacher>(&client, &in_flight)
        .run(Mutation::Reactivate, 3, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Done);
    assert_eq!(client.sent_to(Method::PATCH, "/api/teachers/3/activate").len(), 1);
    assert_eq!(ui.notices()[0].text, "Teacher reactivated.");
}

#[tokio::test]
async fn test_cancelled_prompt_sends_nothing() {
    let client = RecordingClient::new();
    let in_flight = InFlight::new();
    let mut ui = PageUi::new(["semestersTable"]);

    let outcome = controller::<Semester>(&client, &in_flight)
        .run(Mutation::Delete, 1, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert!(client.sent().is_empty());
    assert_eq!(ui.take_prompt().map(|p| p.title), Some("Delete semester?".to_string()));
}

#[tokio::test]
async fn test_unsupported_mutation() {
    let client = RecordingClient::new();
    let in_flight = InFlight::new();
    let mut ui = PageUi::new(["coursesTable"]).confirmed(true);

    let outcome = controller::<Course>(&client, &in_flight)
        .run(Mutation::Deactivate, 1, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Unsupported);
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn test_semester_with_offerings_is_blocked() {
    let client = RecordingClient::new();
    client.respond(
        Method::DELETE,
        "/api/semesters/4",
        400,
        "Não é possível excluir: existem ofertas vinculadas",
    );
    let in_flight = InFlight::new();
    let mut ui = PageUi::new(["semestersTable"]).confirmed(true);

    let outcome = controller::<Semester>(&client, &in_flight)
        .run(Mutation::Delete, 4, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(ui.notices()[0].title, "Blocked");
    assert_eq!(ui.notices()[0].tone, Tone::Error);
    assert!(client.sent_to(Method::GET, "/api/semesters").is_empty());
}

#[tokio::test]
async fn test_other_failure_uses_generic_notice() {
    let client = RecordingClient::new();
    client.respond(Method::DELETE, "/api/courses/2", 500, "internal");
    let in_flight = InFlight::new();
    let mut ui = PageUi::new(["coursesTable"]).confirmed(true);

    let outcome = controller::<Course>(&client, &in_flight)
        .run(Mutation::Delete, 2, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(ui.notices()[0].text, "Failed to delete course.");
}

#[tokio::test]
async fn test_pending_request_is_not_repeated() {
    let client = RecordingClient::new();
    let in_flight = InFlight::new();
    let _held = in_flight.try_acquire("DELETE /api/semesters/5").unwrap();
    let mut ui = PageUi::new(["semestersTable"]).confirmed(true);

    let outcome = controller::<Semester>(&client, &in_flight)
        .run(Mutation::Delete, 5, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Busy);
    assert!(client.sent().is_empty());
    assert!(ui.notices()[0].toast);
}

#[tokio::test]
async fn test_pending_request_skips_prompt() {
    let client = RecordingClient::new();
    let in_flight = InFlight::new();
    let _held = in_flight.try_acquire("DELETE /api/teachers/8").unwrap();
    let mut ui = PageUi::default();

    let outcome = controller::<Teacher>(&client, &in_flight)
        .run(Mutation::Deactivate, 8, &mut ui)
        .await;

    assert_eq!(outcome, ActionOutcome::Busy);
    assert!(ui.take_prompt().is_none());
    assert!(client.sent().is_empty());
}
