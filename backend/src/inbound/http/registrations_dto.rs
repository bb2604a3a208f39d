//! Wire types for the registration endpoints.
//!
//! Field names follow the public form contract (`nom`, `prenom`,
//! `etablissementAutre`, ...). Every request field defaults to empty so a
//! missing value surfaces as a field-level validation error rather than a
//! body parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    Error, Member, MemberSubmission, Project, ProjectSubmission, RegistrationKind,
    RegistrationSubmission,
};

/// One participant as sent by the form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberPayload {
    #[schema(example = "Diallo")]
    pub nom: String,
    #[schema(example = "Awa")]
    pub prenom: String,
    #[schema(example = "+241 01 23 45 67")]
    pub telephone: String,
    #[schema(example = "awa@example.com")]
    pub email: String,
    #[schema(example = "USTM")]
    pub etablissement: String,
    /// Required when `etablissement` is `Autre`.
    pub etablissement_autre: Option<String>,
    #[schema(example = "L3")]
    pub niveau: String,
    #[schema(example = "Informatique")]
    pub specialite: String,
}

impl From<MemberPayload> for MemberSubmission {
    fn from(value: MemberPayload) -> Self {
        Self {
            last_name: value.nom,
            first_name: value.prenom,
            phone: value.telephone,
            email: value.email,
            institution: value.etablissement,
            institution_other: value.etablissement_autre,
            level: value.niveau,
            specialty: value.specialite,
        }
    }
}

/// Project description as sent by the form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ProjectPayload {
    #[schema(example = "AgriTrack")]
    pub titre: String,
    pub descriptif: String,
    #[schema(example = "Rust, TypeScript")]
    pub langages: String,
    /// Optional; stored as `None` when blank.
    pub autres: String,
}

impl From<ProjectPayload> for ProjectSubmission {
    fn from(value: ProjectPayload) -> Self {
        Self {
            title: value.titre,
            description: value.descriptif,
            languages: value.langages,
            other_notes: value.autres,
        }
    }
}

impl From<Project> for ProjectPayload {
    fn from(value: Project) -> Self {
        Self {
            titre: value.title,
            descriptif: value.description,
            langages: value.languages,
            autres: value.other_notes,
        }
    }
}

/// Registration form body for `POST /api/register`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub group_name: Option<String>,
    /// `solo` or `groupe`.
    #[serde(rename = "type")]
    #[schema(example = "solo")]
    pub kind: String,
    pub project: ProjectPayload,
    pub members: Vec<MemberPayload>,
}

impl TryFrom<RegistrationRequest> for RegistrationSubmission {
    type Error = Error;

    fn try_from(value: RegistrationRequest) -> Result<Self, Self::Error> {
        let kind = value.kind.trim().parse::<RegistrationKind>().map_err(|err| {
            Error::invalid_request("Registration type must be solo or groupe")
                .with_details(serde_json::json!({ "field": "type", "value": err.0 }))
        })?;
        Ok(Self {
            kind,
            group_name: value.group_name,
            project: value.project.into(),
            members: value.members.into_iter().map(Into::into).collect(),
        })
    }
}

/// Body of a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[schema(example = "Registration successful")]
    pub message: String,
    #[schema(example = "user")]
    pub role: String,
    /// Shown once; never retrievable again.
    #[schema(example = "Ab3dE5gH9k")]
    pub generated_password: String,
}

/// Dry-run validation verdict.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    /// Field errors keyed by wire names.
    #[schema(value_type = Object)]
    pub errors: Value,
}

/// Choices offered by the registration form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOptionsResponse {
    pub registration_types: Vec<String>,
    pub institutions: Vec<String>,
    /// Institution option that requires `etablissementAutre`.
    #[schema(example = "Autre")]
    pub other_institution: String,
    /// Academic levels, lowest first.
    pub levels: Vec<String>,
}

/// A stored participant as shown to administrators.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etablissement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niveau: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialite: Option<String>,
}

impl From<Member> for MemberView {
    fn from(value: Member) -> Self {
        Self {
            nom: value.last_name,
            prenom: value.first_name,
            telephone: value.phone,
            email: value.email,
            etablissement: value.institution,
            niveau: value.level,
            specialite: value.specialty,
        }
    }
}
