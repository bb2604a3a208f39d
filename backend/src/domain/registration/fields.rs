//! The closed set of validated registration fields.
//!
//! Each field knows its wire name and the rule applied to it, so the form
//! contract is a reviewable table instead of something discovered by walking
//! an object at runtime.

use std::fmt;

use super::{MemberSubmission, ProjectSubmission};

/// Rule applied to a single field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-empty once trimmed.
    Required,
    /// Required, then at least eight digits, `+` or whitespace.
    Phone,
    /// Required, then `local@domain.tld`.
    Email,
    /// Required; the `Autre` option additionally needs a free-text override.
    Institution,
    /// Required and one of the academic level options.
    AcademicLevel,
    /// Never rejected; blank values are defaulted during normalization.
    Optional,
}

/// Member fields in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberField {
    LastName,
    FirstName,
    Phone,
    Email,
    Institution,
    Level,
    Specialty,
}

impl MemberField {
    pub const ALL: [Self; 7] = [
        Self::LastName,
        Self::FirstName,
        Self::Phone,
        Self::Email,
        Self::Institution,
        Self::Level,
        Self::Specialty,
    ];

    /// Key used on the wire and in error maps.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::LastName => "nom",
            Self::FirstName => "prenom",
            Self::Phone => "telephone",
            Self::Email => "email",
            Self::Institution => "etablissement",
            Self::Level => "niveau",
            Self::Specialty => "specialite",
        }
    }

    #[must_use]
    pub const fn rule(self) -> FieldRule {
        match self {
            Self::LastName | Self::FirstName | Self::Specialty => FieldRule::Required,
            Self::Phone => FieldRule::Phone,
            Self::Email => FieldRule::Email,
            Self::Institution => FieldRule::Institution,
            Self::Level => FieldRule::AcademicLevel,
        }
    }

    pub(crate) fn value(self, member: &MemberSubmission) -> &str {
        match self {
            Self::LastName => &member.last_name,
            Self::FirstName => &member.first_name,
            Self::Phone => &member.phone,
            Self::Email => &member.email,
            Self::Institution => &member.institution,
            Self::Level => &member.level,
            Self::Specialty => &member.specialty,
        }
    }

    const fn required_message(self) -> &'static str {
        match self {
            Self::LastName => "Last name is required",
            Self::FirstName => "First name is required",
            Self::Phone => "Phone number is required",
            Self::Email => "Email is required",
            Self::Institution => "Institution is required",
            Self::Level => "Level is required",
            Self::Specialty => "Specialty is required",
        }
    }
}

/// Project fields in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectField {
    Title,
    Description,
    Languages,
    OtherNotes,
}

impl ProjectField {
    pub const ALL: [Self; 4] = [
        Self::Title,
        Self::Description,
        Self::Languages,
        Self::OtherNotes,
    ];

    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Title => "titre",
            Self::Description => "descriptif",
            Self::Languages => "langages",
            Self::OtherNotes => "autres",
        }
    }

    #[must_use]
    pub const fn rule(self) -> FieldRule {
        match self {
            Self::Title | Self::Description | Self::Languages => FieldRule::Required,
            Self::OtherNotes => FieldRule::Optional,
        }
    }

    pub(crate) fn value(self, project: &ProjectSubmission) -> &str {
        match self {
            Self::Title => &project.title,
            Self::Description => &project.description,
            Self::Languages => &project.languages,
            Self::OtherNotes => &project.other_notes,
        }
    }

    /// Message for a blank value, defined only for required fields.
    const fn required_message(self) -> Option<&'static str> {
        match self {
            Self::Title => Some("Project title is required"),
            Self::Description => Some("Project description is required"),
            Self::Languages => Some("Programming languages are required"),
            Self::OtherNotes => None,
        }
    }
}

/// Anything that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GroupName,
    Members,
    Member(MemberField),
    Project(ProjectField),
}

/// A single rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required(Field),
    InvalidPhone,
    InvalidEmail,
    InstitutionDetailRequired,
    UnknownLevel,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Required(Field::GroupName) => "Group name is required",
            Self::Required(Field::Members) => "At least one member is required",
            Self::Required(Field::Member(field)) => field.required_message(),
            Self::Required(Field::Project(field)) => field
                .required_message()
                .unwrap_or("Invalid project field"),
            Self::InvalidPhone => "Invalid phone number",
            Self::InvalidEmail => "Invalid email format",
            Self::InstitutionDetailRequired => "Please specify your institution",
            Self::UnknownLevel => "Unknown level",
        };
        f.write_str(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn member_wire_names_follow_form_order() {
        let names: Vec<_> = MemberField::ALL.iter().map(|f| f.wire_name()).collect();
        assert_eq!(
            names,
            [
                "nom",
                "prenom",
                "telephone",
                "email",
                "etablissement",
                "niveau",
                "specialite"
            ]
        );
    }

    #[rstest]
    fn only_other_notes_is_optional() {
        let optional: Vec<_> = ProjectField::ALL
            .into_iter()
            .filter(|f| f.rule() == FieldRule::Optional)
            .collect();
        assert_eq!(optional, [ProjectField::OtherNotes]);
        assert!(
            MemberField::ALL
                .iter()
                .all(|f| f.rule() != FieldRule::Optional)
        );
    }

    #[rstest]
    fn required_messages_exist_for_required_project_fields_only() {
        for field in ProjectField::ALL {
            assert_eq!(
                field.required_message().is_some(),
                field.rule() == FieldRule::Required,
                "{field:?}"
            );
        }
    }

    #[rstest]
    #[case(FieldError::Required(Field::Member(MemberField::LastName)), "Last name is required")]
    #[case(FieldError::Required(Field::Project(ProjectField::Languages)), "Programming languages are required")]
    #[case(FieldError::Required(Field::GroupName), "Group name is required")]
    #[case(FieldError::InvalidPhone, "Invalid phone number")]
    #[case(FieldError::InvalidEmail, "Invalid email format")]
    fn messages_match_form_copy(#[case] error: FieldError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
