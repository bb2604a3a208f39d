//! PostgreSQL-backed [`AccountRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, AccountCredentials, AccountId, ContactEmail, Member, NewAccount, PasswordHash,
    RegistrationKind, Role,
};

use super::models::{AccountRow, MemberDoc, NewAccountRow, ProjectDoc};
use super::pool::{DbPool, PoolError};
use super::schema::registrations;

/// Diesel implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(error.message())
}

/// Translate Diesel failures; `email` names the row being written, if any.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> AccountRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountRepositoryError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => AccountRepositoryError::query("record not found"),
        _ => AccountRepositoryError::query("database error"),
    }
}

fn encode_documents(
    account: &NewAccount,
) -> Result<(serde_json::Value, serde_json::Value), AccountRepositoryError> {
    let project = serde_json::to_value(ProjectDoc::from(&account.project))
        .map_err(|err| AccountRepositoryError::query(format!("encode project: {err}")))?;
    let members: Vec<MemberDoc> = account.members.iter().map(MemberDoc::from).collect();
    let members = serde_json::to_value(members)
        .map_err(|err| AccountRepositoryError::query(format!("encode members: {err}")))?;
    Ok((project, members))
}

fn row_to_credentials(row: AccountRow) -> Result<AccountCredentials, AccountRepositoryError> {
    let AccountRow {
        id,
        display_name,
        email,
        password_hash,
        role,
        registration_type,
        group_name,
        project,
        members,
        created_at,
        updated_at: _,
    } = row;

    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        AccountRepositoryError::query(format!("corrupt {field} in account {id}: {err}"))
    };
    let email = ContactEmail::new(&email).map_err(|err| corrupt("email", &err))?;
    let role = role.parse::<Role>().map_err(|err| corrupt("role", &err))?;
    let kind = registration_type
        .parse::<RegistrationKind>()
        .map_err(|err| corrupt("registration_type", &err))?;
    let project: ProjectDoc =
        serde_json::from_value(project).map_err(|err| corrupt("project", &err))?;
    let members: Vec<MemberDoc> =
        serde_json::from_value(members).map_err(|err| corrupt("members", &err))?;

    Ok(AccountCredentials {
        account: Account {
            id: AccountId::from_uuid(id),
            display_name,
            email,
            role,
            kind,
            group_name,
            project: project.into(),
            members: members.into_iter().map(Member::from).collect(),
            created_at,
        },
        password_hash: PasswordHash::new(password_hash),
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let (project, members) = encode_documents(&account)?;
        let row = NewAccountRow {
            id: *account.id.as_uuid(),
            display_name: &account.display_name,
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_str(),
            role: account.role.as_str(),
            registration_type: account.kind.as_str(),
            group_name: account.group_name.as_deref(),
            project: &project,
            members: &members,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = diesel::insert_into(registrations::table)
            .values(&row)
            .returning(AccountRow::as_returning())
            .get_result::<AccountRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(account.email.as_ref())))?;

        row_to_credentials(stored).map(|credentials| credentials.account)
    }

    async fn exists_by_email(&self, email: &ContactEmail) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            registrations::table.filter(registrations::email.eq(email.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }

    async fn find_credentials_by_email(
        &self,
        email: &ContactEmail,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = registrations::table
            .filter(registrations::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_credentials).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AccountRow> = registrations::table
            .order((registrations::created_at.asc(), registrations::id.asc()))
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter()
            .map(|row| row_to_credentials(row).map(|credentials| credentials.account))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    fn row() -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            display_name: "Awa Diallo".to_owned(),
            email: "awa@example.com".to_owned(),
            password_hash: "$argon2id$v=19$hash".to_owned(),
            role: "user".to_owned(),
            registration_type: "solo".to_owned(),
            group_name: None,
            project: json!({"titre": "AgriTrack", "descriptif": "Suivi", "langages": "Rust", "autres": "None"}),
            members: json!([{"nom": "Diallo", "prenom": "Awa", "telephone": "12345678", "email": "awa@example.com", "niveau": "L3"}]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let err = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key".to_owned()),
            ),
            Some("awa@example.com"),
        );
        assert_eq!(err, AccountRepositoryError::duplicate_email("awa@example.com"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new("gone".to_owned()),
            ),
            None,
        );
        assert!(matches!(err, AccountRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn pool_checkout_failure_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, AccountRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn row_converts_to_domain_account() {
        let credentials = row_to_credentials(row()).expect("row decodes");
        let account = credentials.account;

        assert_eq!(account.role, Role::User);
        assert_eq!(account.kind, RegistrationKind::Solo);
        assert_eq!(account.project.other_notes, "None");
        assert_eq!(account.members[0].level.as_deref(), Some("L3"));
        assert!(account.members[0].institution.is_none());
        assert_eq!(credentials.password_hash.as_str(), "$argon2id$v=19$hash");
    }

    #[rstest]
    #[case::role(|row: &mut AccountRow| row.role = "root".to_owned())]
    #[case::kind(|row: &mut AccountRow| row.registration_type = "team".to_owned())]
    #[case::members(|row: &mut AccountRow| row.members = json!({"nom": 1}))]
    fn corrupt_rows_are_query_errors(#[case] corrupt: fn(&mut AccountRow)) {
        let mut bad = row();
        corrupt(&mut bad);
        let err = row_to_credentials(bad).expect_err("corrupt row rejected");
        assert!(matches!(err, AccountRepositoryError::Query { .. }));
    }
}
