//! Tests for registration HTTP handlers.

use super::*;
use crate::domain::ports::{
    MockAdminRegistrationsQuery, MockAdminSessions, MockRegistrationCommand, RegistrationReceipt,
};
use crate::domain::{AccountId, GeneratedPassword, RegistrationError, Role};
use crate::inbound::http::test_utils::mock_state;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn solo_body() -> Value {
    json!({
        "type": "solo",
        "project": {
            "titre": "AgriTrack",
            "descriptif": "Suivi des récoltes",
            "langages": "Rust",
            "autres": ""
        },
        "members": [{
            "nom": "Diallo",
            "prenom": "Awa",
            "telephone": "+241 01 23 45 67",
            "email": "awa@example.com",
            "etablissement": "USTM",
            "niveau": "L3",
            "specialite": "Informatique"
        }]
    })
}

fn receipt() -> RegistrationReceipt {
    RegistrationReceipt {
        account_id: AccountId::random(),
        display_name: "Awa Diallo".to_owned(),
        role: Role::User,
        password: GeneratedPassword::new("Ab3dE5gH9k"),
    }
}

async fn post(registrations: MockRegistrationCommand, uri: &str, body: &Value) -> (StatusCode, Value) {
    let state = mock_state(
        registrations,
        MockAdminRegistrationsQuery::new(),
        MockAdminSessions::new(),
    );
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(
                web::scope("/api/v1")
                    .service(validate_registration)
                    .service(registration_options)
                    .service(create_registration),
            )
            .service(web::scope("/api").service(register)),
    )
    .await;
    let res = test::call_service(
        &app,
        test::TestRequest::post().uri(uri).set_json(body).to_request(),
    )
    .await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[case("/api/register")]
#[case("/api/v1/registrations")]
#[actix_web::test]
async fn valid_solo_registration_returns_password(solo_body: Value, #[case] uri: &str) {
    let mut registrations = MockRegistrationCommand::new();
    registrations
        .expect_register()
        .times(1)
        .withf(|registration| {
            registration.members().len() == 1
                && registration.project().other_notes == "None"
                && registration.display_name().as_deref() == Some("Awa Diallo")
        })
        .return_once(|_| Ok(receipt()));

    let (status, body) = post(registrations, uri, &solo_body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["role"], "user");
    assert_eq!(body["generatedPassword"], "Ab3dE5gH9k");
}

#[rstest]
#[actix_web::test]
async fn field_errors_are_reported_together(mut solo_body: Value) {
    solo_body["members"][0]["nom"] = json!("");
    solo_body["members"][0]["telephone"] = json!("123");

    let (status, body) = post(MockRegistrationCommand::new(), "/api/register", &solo_body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    let member = &body["details"]["members"][0];
    assert_eq!(member["nom"], "Last name is required");
    assert_eq!(member["telephone"], "Invalid phone number");
}

#[rstest]
#[actix_web::test]
async fn unknown_type_is_rejected(mut solo_body: Value) {
    solo_body["type"] = json!("team");
    let (status, body) = post(MockRegistrationCommand::new(), "/api/register", &solo_body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "type");
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict(solo_body: Value) {
    let mut registrations = MockRegistrationCommand::new();
    registrations
        .expect_register()
        .return_once(|_| Err(RegistrationError::DuplicateEmail.into()));

    let (status, body) = post(registrations, "/api/register", &solo_body).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[actix_web::test]
async fn store_failures_are_redacted(solo_body: Value) {
    let mut registrations = MockRegistrationCommand::new();
    registrations
        .expect_register()
        .return_once(|_| Err(Error::internal("connection reset by peer")));

    let (status, body) = post(registrations, "/api/register", &solo_body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn validate_reports_without_persisting(mut solo_body: Value) {
    solo_body["members"][0]["etablissement"] = json!("Autre");

    let (status, body) = post(
        MockRegistrationCommand::new(),
        "/api/v1/registrations/validate",
        &solo_body,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(
        body["errors"]["members"][0]["etablissement"],
        "Please specify your institution"
    );
}

#[rstest]
#[actix_web::test]
async fn validate_accepts_clean_submission(solo_body: Value) {
    let (status, body) = post(
        MockRegistrationCommand::new(),
        "/api/v1/registrations/validate",
        &solo_body,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
}

#[rstest]
#[actix_web::test]
async fn options_list_institutions_and_levels() {
    let app = test::init_service(
        App::new().service(web::scope("/api/v1").service(registration_options)),
    )
    .await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/registrations/options")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["otherInstitution"], "Autre");
    assert_eq!(body["registrationTypes"], json!(["solo", "groupe"]));
    assert_eq!(
        body["levels"],
        json!(["L1", "L2", "L3", "M1", "M2", "Doctorat"])
    );
    assert_eq!(body["institutions"].as_array().map(Vec::len), Some(7));
}
