//! Access service - credential checks and the session context

use chrono::NaiveDate;

use crate::domain::result::{Error, Result};
use crate::domain::User;

/// Who is logged in, and the calendar date the session started on
///
/// Every borrow and return in the session is stamped with `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub date: NaiveDate,
}

impl Session {
    pub fn start(user: User, date: NaiveDate) -> Self {
        Self { user, date }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn is_administrator(&self) -> bool {
        self.user.is_administrator()
    }
}

/// Access service over the loaded credential list
pub struct AccessService<'a> {
    users: &'a [User],
}

impl<'a> AccessService<'a> {
    pub fn new(users: &'a [User]) -> Self {
        Self { users }
    }

    /// Find the first user whose name matches ignoring case and whose
    /// password matches exactly
    pub fn authenticate(&self, name: &str, password: &str) -> Result<User> {
        let name_lower = name.to_lowercase();
        self.users
            .iter()
            .find(|u| u.name.to_lowercase() == name_lower && u.password == password)
            .cloned()
            .ok_or(Error::InvalidCredentials)
    }

    pub fn is_administrator(user: &User) -> bool {
        user.is_administrator()
    }
}
