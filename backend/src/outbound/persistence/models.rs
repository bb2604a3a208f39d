//! Row structs and JSONB documents for the `registrations` table.
//!
//! These types never leave the persistence adapter. The JSONB documents keep
//! the French field names the legacy store used.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Member, Project};

use super::schema::registrations;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub registration_type: String,
    pub group_name: Option<String>,
    pub project: serde_json::Value,
    pub members: serde_json::Value,
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field kept for auditing")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub registration_type: &'a str,
    pub group_name: Option<&'a str>,
    pub project: &'a serde_json::Value,
    pub members: &'a serde_json::Value,
}

/// Stored project document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ProjectDoc {
    pub titre: String,
    pub descriptif: String,
    pub langages: String,
    #[serde(default)]
    pub autres: String,
}

impl From<&Project> for ProjectDoc {
    fn from(project: &Project) -> Self {
        Self {
            titre: project.title.clone(),
            descriptif: project.description.clone(),
            langages: project.languages.clone(),
            autres: project.other_notes.clone(),
        }
    }
}

impl From<ProjectDoc> for Project {
    fn from(doc: ProjectDoc) -> Self {
        Self {
            title: doc.titre,
            description: doc.descriptif,
            languages: doc.langages,
            other_notes: doc.autres,
        }
    }
}

/// Stored member document. Academic fields are absent on legacy rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MemberDoc {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etablissement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niveau: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialite: Option<String>,
}

impl From<&Member> for MemberDoc {
    fn from(member: &Member) -> Self {
        Self {
            nom: member.last_name.clone(),
            prenom: member.first_name.clone(),
            telephone: member.phone.clone(),
            email: member.email.clone(),
            etablissement: member.institution.clone(),
            niveau: member.level.clone(),
            specialite: member.specialty.clone(),
        }
    }
}

impl From<MemberDoc> for Member {
    fn from(doc: MemberDoc) -> Self {
        Self {
            last_name: doc.nom,
            first_name: doc.prenom,
            phone: doc.telephone,
            email: doc.email,
            institution: doc.etablissement,
            level: doc.niveau,
            specialty: doc.specialite,
        }
    }
}
