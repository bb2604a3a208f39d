//! Total validation of registration submissions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::{
    AcademicLevel, Field, FieldError, FieldRule, MemberField, MemberSubmission, OTHER_INSTITUTION,
    ProjectField, RegistrationKind, RegistrationSubmission,
};

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[0-9+\s]{8,}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` looks like `local@domain.tld`.
fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Verdict plus per-field errors mirroring the submission's shape.
///
/// `members` holds one map per validated member, indexed like the input;
/// an empty map means that member passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    group_name: Option<FieldError>,
    member_list: Option<FieldError>,
    members: Vec<BTreeMap<MemberField, FieldError>>,
    project: BTreeMap<ProjectField, FieldError>,
}

impl ValidationReport {
    /// True when no rule was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.group_name.is_none()
            && self.member_list.is_none()
            && self.members.iter().all(BTreeMap::is_empty)
            && self.project.is_empty()
    }

    pub fn group_name_error(&self) -> Option<FieldError> {
        self.group_name
    }

    /// Set when no member was staged at all.
    pub fn member_list_error(&self) -> Option<FieldError> {
        self.member_list
    }

    pub fn member_errors(&self, index: usize) -> Option<&BTreeMap<MemberField, FieldError>> {
        self.members.get(index)
    }

    /// Number of members that were checked.
    pub fn validated_members(&self) -> usize {
        self.members.len()
    }

    pub fn project_errors(&self) -> &BTreeMap<ProjectField, FieldError> {
        &self.project
    }

    /// Total number of violations.
    pub fn error_count(&self) -> usize {
        usize::from(self.group_name.is_some())
            + usize::from(self.member_list.is_some())
            + self.members.iter().map(BTreeMap::len).sum::<usize>()
            + self.project.len()
    }

    /// Error map keyed by wire field names, used as error details.
    ///
    /// ```json
    /// {"groupName": "...", "members": [{"telephone": "Invalid phone number"}], "project": {}}
    /// ```
    pub fn to_details(&self) -> Value {
        let members: Vec<Value> = self
            .members
            .iter()
            .map(|errors| {
                let entries: Map<String, Value> = errors
                    .iter()
                    .map(|(field, error)| (field.wire_name().to_owned(), json!(error.to_string())))
                    .collect();
                Value::Object(entries)
            })
            .collect();
        let project: Map<String, Value> = self
            .project
            .iter()
            .map(|(field, error)| (field.wire_name().to_owned(), json!(error.to_string())))
            .collect();

        let mut details = Map::new();
        if let Some(error) = self.group_name {
            details.insert("groupName".to_owned(), json!(error.to_string()));
        }
        if let Some(error) = self.member_list {
            details.insert("memberList".to_owned(), json!(error.to_string()));
        }
        details.insert("members".to_owned(), Value::Array(members));
        details.insert("project".to_owned(), Value::Object(project));
        Value::Object(details)
    }
}

/// Check every field of a submission and collect all violations.
///
/// No rule short-circuits another: a member with an empty name and a bad
/// phone number reports both. Solo entries are checked on their first
/// staged member only, because only that member is persisted.
pub fn validate_submission(submission: &RegistrationSubmission) -> ValidationReport {
    let mut report = ValidationReport::default();

    if submission.kind == RegistrationKind::Group
        && submission
            .group_name
            .as_deref()
            .is_none_or(|name| name.trim().is_empty())
    {
        report.group_name = Some(FieldError::Required(Field::GroupName));
    }

    let staged = match submission.kind {
        RegistrationKind::Solo => submission.members.iter().take(1).collect::<Vec<_>>(),
        RegistrationKind::Group => submission.members.iter().collect(),
    };
    if staged.is_empty() {
        report.member_list = Some(FieldError::Required(Field::Members));
    }
    report.members = staged.into_iter().map(validate_member).collect();

    for field in ProjectField::ALL {
        let value = field.value(&submission.project);
        if field.rule() == FieldRule::Required && is_blank(value) {
            report
                .project
                .insert(field, FieldError::Required(Field::Project(field)));
        }
    }

    report
}

fn validate_member(member: &MemberSubmission) -> BTreeMap<MemberField, FieldError> {
    MemberField::ALL
        .into_iter()
        .filter_map(|field| check_member_field(field, member).map(|error| (field, error)))
        .collect()
}

fn check_member_field(field: MemberField, member: &MemberSubmission) -> Option<FieldError> {
    let value = field.value(member);
    let rule = field.rule();
    if rule == FieldRule::Optional {
        return None;
    }
    if is_blank(value) {
        return Some(FieldError::Required(Field::Member(field)));
    }

    match rule {
        FieldRule::Phone if !phone_regex().is_match(value.trim()) => Some(FieldError::InvalidPhone),
        FieldRule::Email if !is_valid_email(value) => Some(FieldError::InvalidEmail),
        FieldRule::Institution
            if value.trim() == OTHER_INSTITUTION
                && member.institution_other.as_deref().is_none_or(is_blank) =>
        {
            Some(FieldError::InstitutionDetailRequired)
        }
        FieldRule::AcademicLevel => value.parse::<AcademicLevel>().err(),
        _ => None,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
