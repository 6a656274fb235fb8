//! Internal Diesel row structs for database operations.
//!
//! Rows never leave the persistence module. Decoding into domain types is
//! fallible because the store could hold values this service never wrote;
//! those surface as query errors rather than panics.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, PasswordDigest, Task, TaskId, TaskPriority, TaskStatus, TaskTitle, User, UserId,
    Username,
};

use super::schema::{tasks, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User, String> {
        let username = Username::new(&self.username).map_err(|err| err.to_string())?;
        let email = EmailAddress::new(&self.email).map_err(|err| err.to_string())?;
        let password = PasswordDigest::new(self.password).map_err(|err| err.to_string())?;
        Ok(User::new(UserId::from_uuid(self.id), username, email, password))
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: i32,
    pub status: i32,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    pub fn into_task(self) -> Result<Task, String> {
        Ok(Task {
            id: TaskId::new(self.id).map_err(|err| err.to_string())?,
            user_id: UserId::from_uuid(self.user_id),
            title: TaskTitle::new(&self.title).map_err(|err| err.to_string())?,
            description: self.description,
            priority: TaskPriority::from_code(self.priority).map_err(|err| err.to_string())?,
            status: TaskStatus::from_code(self.status).map_err(|err| err.to_string())?,
            due_at: self.due_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for creating task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub priority: i32,
    pub status: i32,
    pub due_at: Option<DateTime<Utc>>,
}

/// Full-replace changeset; a missing description or due time clears the
/// column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TaskChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub priority: i32,
    pub status: i32,
    pub due_at: Option<DateTime<Utc>>,
}
