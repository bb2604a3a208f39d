//! Tests for admin HTTP handlers.

use super::*;
use crate::domain::ports::{MockAdminRegistrationsQuery, MockAdminSessions, MockRegistrationCommand};
use crate::domain::{
    AccountId, AdminAccessError, AdminSession, AdminSessionToken, ContactEmail, Member, Project,
    RegistrationKind, Role,
};
use crate::inbound::http::test_utils::{mock_state, session_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::TimeZone;
use rstest::rstest;
use serde_json::{Value, json};

fn group_account() -> Account {
    let member = |first: &str, email: &str| Member {
        last_name: "Mba".to_owned(),
        first_name: first.to_owned(),
        phone: "12345678".to_owned(),
        email: email.to_owned(),
        institution: Some("USTM".to_owned()),
        level: None,
        specialty: Some("Réseaux".to_owned()),
    };
    Account {
        id: AccountId::random(),
        display_name: "Les Pionniers".to_owned(),
        email: ContactEmail::new("jean@example.com").expect("valid email"),
        role: Role::User,
        kind: RegistrationKind::Group,
        group_name: Some("Les Pionniers".to_owned()),
        project: Project {
            title: "AgriTrack".to_owned(),
            description: "Suivi".to_owned(),
            languages: "Rust".to_owned(),
            other_notes: "None".to_owned(),
        },
        members: vec![
            member("Jean", "jean@example.com"),
            member("Lea", "lea@example.com"),
        ],
        created_at: Utc
            .with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

macro_rules! admin_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data($state)
                .service(
                    web::scope("/api/v1")
                        .service(open_session)
                        .service(close_session)
                        .service(admin_registrations)
                        .service(admin_stats),
                )
                .service(web::scope("/api").service(list_groups)),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn legacy_listing_returns_accounts_without_password() {
    let mut query = MockAdminRegistrationsQuery::new();
    query
        .expect_list_registrations()
        .withf(|credentials| {
            credentials.email().as_ref() == "admin@mbaya.ga" && credentials.password() == "secret"
        })
        .return_once(|_| Ok(vec![group_account()]));
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        query,
        MockAdminSessions::new()
    ));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/groups?email=Admin@Mbaya.ga&password=secret")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let account = &body[0];
    assert_eq!(account["name"], "Les Pionniers");
    assert_eq!(account["registrationType"], "groupe");
    assert_eq!(account["project"]["autres"], "None");
    assert_eq!(account["members"][1]["prenom"], "Lea");
    assert!(account["members"][0].get("niveau").is_none());
    assert!(account.get("password").is_none());
    assert!(account.get("passwordHash").is_none());
}

#[rstest]
#[case("/api/groups")]
#[case("/api/groups?email=admin@mbaya.ga")]
#[case("/api/groups?email=&password=secret")]
#[actix_web::test]
async fn legacy_listing_requires_both_parameters(#[case] uri: &str) {
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        MockAdminRegistrationsQuery::new(),
        MockAdminSessions::new()
    ));

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Email and password required");
}

#[rstest]
#[case(AdminAccessError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
#[case(AdminAccessError::Forbidden, StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn legacy_listing_maps_access_errors(
    #[case] failure: AdminAccessError,
    #[case] expected: StatusCode,
) {
    let mut query = MockAdminRegistrationsQuery::new();
    query
        .expect_list_registrations()
        .return_once(move |_| Err(failure.into()));
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        query,
        MockAdminSessions::new()
    ));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/groups?email=a@b.c&password=x")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn session_flow_opens_reads_and_closes() {
    let token = AdminSessionToken::random();
    let expires_at = Utc
        .with_ymd_and_hms(2026, 3, 14, 11, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut sessions = MockAdminSessions::new();
    sessions.expect_open().times(1).return_once(move |_| {
        Ok(AdminSession { token, expires_at })
    });
    sessions
        .expect_stats()
        .times(1)
        .withf(move |candidate| *candidate == token)
        .return_once(|_| {
            Ok(RegistrationStats {
                total_registrations: 2,
                solo_registrations: 1,
                group_registrations: 1,
                total_participants: 3,
            })
        });
    sessions
        .expect_registrations()
        .times(1)
        .return_once(|_| Ok(vec![group_account()]));
    sessions
        .expect_close()
        .times(1)
        .withf(move |candidate| *candidate == token)
        .return_once(|_| Ok(()));
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        MockAdminRegistrationsQuery::new(),
        sessions
    ));

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/session")
            .set_json(json!({"email": "admin@mbaya.ga", "password": "secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let cookie = session_cookie(&login);
    let body: Value = test::read_body_json(login).await;
    assert_eq!(body["expiresAt"], "2026-03-14T11:00:00Z");

    let stats = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin/stats")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(stats.status(), StatusCode::OK);
    let body: Value = test::read_body_json(stats).await;
    assert_eq!(body["totalParticipants"], 3);

    let listing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin/registrations")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(listing.status(), StatusCode::OK);

    let logout = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/admin/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn dashboard_requires_a_session() {
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        MockAdminRegistrationsQuery::new(),
        MockAdminSessions::new()
    ));

    for uri in ["/api/v1/admin/stats", "/api/v1/admin/registrations"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[rstest]
#[actix_web::test]
async fn expired_session_is_rejected() {
    let token = AdminSessionToken::random();
    let mut sessions = MockAdminSessions::new();
    sessions.expect_open().return_once(move |_| {
        Ok(AdminSession {
            token,
            expires_at: Utc::now(),
        })
    });
    sessions
        .expect_registrations()
        .return_once(|_| Err(AdminAccessError::SessionExpired.into()));
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        MockAdminRegistrationsQuery::new(),
        sessions
    ));

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/session")
            .set_json(json!({"email": "admin@mbaya.ga", "password": "secret"}))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin/registrations")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Session expired");
}

#[rstest]
#[actix_web::test]
async fn open_session_rejects_blank_credentials() {
    let app = admin_app!(mock_state(
        MockRegistrationCommand::new(),
        MockAdminRegistrationsQuery::new(),
        MockAdminSessions::new()
    ));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/session")
            .set_json(json!({"email": "", "password": ""}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
