//! Contest registration submissions and their normalized form.
//!
//! A [`RegistrationSubmission`] holds whatever the participant typed. Running
//! it through [`validate_submission`] yields a [`ValidationReport`] listing
//! every violation at once; [`RegistrationSubmission::normalize`] additionally
//! produces the trimmed [`Registration`] the registration service persists.

mod fields;
mod validation;

use std::fmt;
use std::str::FromStr;

pub use fields::{Field, FieldError, FieldRule, MemberField, ProjectField};
pub use validation::{ValidationReport, validate_submission};

/// Institution choices offered by the form, in display order.
pub const INSTITUTION_OPTIONS: [&str; 7] = ["USTM", "UOB", "USS", "INPTIC", "IAI", "ESGIS", "Autre"];

/// Sentinel institution option that requires a free-text override.
pub const OTHER_INSTITUTION: &str = "Autre";

/// Stored value for a project submitted without extra notes.
pub const DEFAULT_OTHER_NOTES: &str = "None";

/// Whether an entry is a single participant or a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    Solo,
    Group,
}

impl RegistrationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Group => "groupe",
        }
    }
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a registration kind string is neither `solo` nor `groupe`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registration type: {0}")]
pub struct UnknownRegistrationKind(pub String);

impl FromStr for RegistrationKind {
    type Err = UnknownRegistrationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" => Ok(Self::Solo),
            "groupe" => Ok(Self::Group),
            other => Err(UnknownRegistrationKind(other.to_owned())),
        }
    }
}

/// Academic level options, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AcademicLevel {
    L1,
    L2,
    L3,
    M1,
    M2,
    Doctorat,
}

impl AcademicLevel {
    pub const ALL: [Self; 6] = [
        Self::L1,
        Self::L2,
        Self::L3,
        Self::M1,
        Self::M2,
        Self::Doctorat,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::Doctorat => "Doctorat",
        }
    }
}

impl FromStr for AcademicLevel {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or(FieldError::UnknownLevel)
    }
}

/// One participant exactly as submitted. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSubmission {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub email: String,
    pub institution: String,
    /// Free text used when `institution` is [`OTHER_INSTITUTION`].
    pub institution_other: Option<String>,
    pub level: String,
    pub specialty: String,
}

/// Project description exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSubmission {
    pub title: String,
    pub description: String,
    pub languages: String,
    pub other_notes: String,
}

/// Raw registration form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSubmission {
    pub kind: RegistrationKind,
    pub group_name: Option<String>,
    pub project: ProjectSubmission,
    pub members: Vec<MemberSubmission>,
}

impl RegistrationSubmission {
    /// Validate and normalize the submission.
    ///
    /// Solo entries keep only their first staged member. The `Autre`
    /// institution is replaced by its override text, levels are stored in
    /// canonical spelling and blank project notes become
    /// [`DEFAULT_OTHER_NOTES`].
    ///
    /// # Errors
    /// Returns the full [`ValidationReport`] when any rule fails.
    pub fn normalize(&self) -> Result<Registration, ValidationReport> {
        let report = validate_submission(self);
        if !report.is_valid() {
            return Err(report);
        }

        let staged = match self.kind {
            RegistrationKind::Solo => &self.members[..self.members.len().min(1)],
            RegistrationKind::Group => &self.members[..],
        };
        let members = staged.iter().map(normalize_member).collect();
        let group_name = match self.kind {
            RegistrationKind::Solo => None,
            RegistrationKind::Group => self.group_name.as_deref().map(|name| name.trim().to_owned()),
        };

        Ok(Registration::new(
            self.kind,
            group_name,
            normalize_project(&self.project),
            members,
        ))
    }
}

fn normalize_member(member: &MemberSubmission) -> Member {
    let institution = member.institution.trim();
    let institution = if institution == OTHER_INSTITUTION {
        member
            .institution_other
            .as_deref()
            .map(str::trim)
            .unwrap_or(institution)
    } else {
        institution
    };
    let level = member
        .level
        .parse::<AcademicLevel>()
        .map(|level| level.as_str().to_owned())
        .unwrap_or_else(|_| member.level.trim().to_owned());

    Member {
        last_name: member.last_name.trim().to_owned(),
        first_name: member.first_name.trim().to_owned(),
        phone: member.phone.trim().to_owned(),
        email: member.email.trim().to_owned(),
        institution: Some(institution.to_owned()),
        level: Some(level),
        specialty: Some(member.specialty.trim().to_owned()),
    }
}

fn normalize_project(project: &ProjectSubmission) -> Project {
    let notes = project.other_notes.trim();
    Project {
        title: project.title.trim().to_owned(),
        description: project.description.trim().to_owned(),
        languages: project.languages.trim().to_owned(),
        other_notes: if notes.is_empty() {
            DEFAULT_OTHER_NOTES.to_owned()
        } else {
            notes.to_owned()
        },
    }
}

/// A stored participant.
///
/// Institution, level and specialty are required on new submissions but may
/// be absent on accounts written before those fields existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub email: String,
    pub institution: Option<String>,
    pub level: Option<String>,
    pub specialty: Option<String>,
}

impl Member {
    /// "First Last", as shown for solo entries.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A stored project description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub languages: String,
    pub other_notes: String,
}

/// Normalized registration ready for the registration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    kind: RegistrationKind,
    group_name: Option<String>,
    project: Project,
    members: Vec<Member>,
}

impl Registration {
    /// Assemble a registration from already-normalized parts.
    pub fn new(
        kind: RegistrationKind,
        group_name: Option<String>,
        project: Project,
        members: Vec<Member>,
    ) -> Self {
        Self {
            kind,
            group_name,
            project,
            members,
        }
    }

    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The team leader, whose email owns the account.
    pub fn leader(&self) -> Option<&Member> {
        self.members.first()
    }

    /// Name shown for the account: the group name for teams, otherwise the
    /// leader's full name.
    pub fn display_name(&self) -> Option<String> {
        match (self.kind, self.group_name()) {
            (RegistrationKind::Group, Some(name)) if !name.trim().is_empty() => {
                Some(name.to_owned())
            }
            _ => self.leader().map(Member::full_name),
        }
    }

    /// Split into the parts persisted on the account.
    pub fn into_parts(self) -> (RegistrationKind, Option<String>, Project, Vec<Member>) {
        (self.kind, self.group_name, self.project, self.members)
    }
}
