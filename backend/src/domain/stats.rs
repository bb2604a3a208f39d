//! Aggregate counts shown on the admin dashboard.

use super::account::{Account, Role};
use super::registration::RegistrationKind;

/// Totals over participant accounts.
///
/// Only [`Role::User`] accounts are counted, so seeded administrator
/// accounts never skew the figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationStats {
    pub total_registrations: usize,
    pub solo_registrations: usize,
    pub group_registrations: usize,
    pub total_participants: usize,
}

impl RegistrationStats {
    /// Compute totals from the full account list.
    pub fn from_accounts(accounts: &[Account]) -> Self {
        accounts
            .iter()
            .filter(|account| account.role == Role::User)
            .fold(Self::default(), |mut stats, account| {
                stats.total_registrations += 1;
                match account.kind {
                    RegistrationKind::Solo => stats.solo_registrations += 1,
                    RegistrationKind::Group => stats.group_registrations += 1,
                }
                stats.total_participants += account.members.len();
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, ContactEmail, Member, Project};
    use chrono::Utc;
    use rstest::rstest;

    fn member(name: &str) -> Member {
        Member {
            last_name: name.to_owned(),
            first_name: name.to_owned(),
            phone: "12345678".to_owned(),
            email: format!("{name}@example.com"),
            institution: None,
            level: None,
            specialty: None,
        }
    }

    fn account(role: Role, kind: RegistrationKind, members: usize) -> Account {
        Account {
            id: AccountId::random(),
            display_name: "x".to_owned(),
            email: ContactEmail::new(format!("{}@example.com", AccountId::random()))
                .expect("valid email"),
            role,
            kind,
            group_name: None,
            project: Project {
                title: "t".to_owned(),
                description: "d".to_owned(),
                languages: "l".to_owned(),
                other_notes: "None".to_owned(),
            },
            members: (0..members).map(|i| member(&format!("m{i}"))).collect(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn empty_list_yields_zeroes() {
        assert_eq!(RegistrationStats::from_accounts(&[]), RegistrationStats::default());
    }

    #[rstest]
    fn counts_participant_accounts_only() {
        let accounts = vec![
            account(Role::User, RegistrationKind::Solo, 1),
            account(Role::User, RegistrationKind::Group, 3),
            account(Role::User, RegistrationKind::Group, 2),
            account(Role::Admin, RegistrationKind::Solo, 0),
        ];

        let stats = RegistrationStats::from_accounts(&accounts);

        assert_eq!(
            stats,
            RegistrationStats {
                total_registrations: 3,
                solo_registrations: 1,
                group_registrations: 2,
                total_participants: 6,
            }
        );
    }

    #[rstest]
    fn admin_only_store_has_no_registrations() {
        let accounts = vec![account(Role::Admin, RegistrationKind::Solo, 1)];
        let stats = RegistrationStats::from_accounts(&accounts);
        assert_eq!(stats.total_registrations, 0);
        assert_eq!(stats.total_participants, 0);
    }
}
