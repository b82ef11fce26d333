// src/domain/user.rs

use crate::errors::ServerError;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// An account row without its password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

/// Identity of whoever made the request. Passed explicitly into anything
/// that depends on role; there is no ambient "current user".
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<UserAccount> for CurrentUser {
    fn from(u: UserAccount) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
        }
    }
}

/// Gate for user-management entry points.
pub fn require_admin(user: &CurrentUser) -> Result<(), ServerError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ServerError::Forbidden("admin access required".into()))
    }
}

/// Raw user form. `role` stays a string so an unknown value can be reported
/// by validation rather than rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl UserForm {
    pub fn from_pairs(fields: &HashMap<String, String>) -> Self {
        let get = |k: &str| fields.get(k).cloned().unwrap_or_default();
        Self {
            username: get("username"),
            password: get("password"),
            role: get("role"),
        }
    }

    pub fn password(&self) -> Option<&str> {
        (!self.password.is_empty()).then_some(self.password.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub admins: usize,
    pub users: usize,
}

impl RoleCounts {
    pub fn tally(accounts: &[UserAccount]) -> Self {
        accounts.iter().fold(Self::default(), |mut acc, u| {
            match u.role {
                Role::Admin => acc.admins += 1,
                Role::User => acc.users += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn account(name: &str, role: Role) -> UserAccount {
        UserAccount {
            id: name.to_string(),
            username: name.to_string(),
            role,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn role_parses_only_known_values() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("Admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn require_admin_rejects_regular_users() {
        let admin = CurrentUser::from(account("boss", Role::Admin));
        let user = CurrentUser::from(account("worker", Role::User));
        assert!(require_admin(&admin).is_ok());
        assert!(matches!(require_admin(&user), Err(ServerError::Forbidden(_))));
    }

    #[test]
    fn role_counts_split_accounts() {
        let accounts = vec![
            account("a", Role::Admin),
            account("b", Role::User),
            account("c", Role::User),
        ];
        assert_eq!(
            RoleCounts::tally(&accounts),
            RoleCounts {
                admins: 1,
                users: 2
            }
        );
        assert_eq!(RoleCounts::tally(&[]), RoleCounts::default());
    }
}
