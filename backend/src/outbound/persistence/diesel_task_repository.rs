//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! The adapter performs no ownership checks; it receives already encoded
//! priority and status codes via the domain enums.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{PageWindow, Task, TaskDraft, TaskId, TaskPage, TaskStatus, UserId};

use super::diesel_helpers::{decode_row, decode_rows, map_diesel_error, map_pool_error};
use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed task store.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TaskRepositoryError {
    map_pool_error(error, TaskRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error, operation: &'static str) -> TaskRepositoryError {
    map_diesel_error(
        error,
        operation,
        TaskRepositoryError::query,
        TaskRepositoryError::connection,
    )
}

fn decode(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    decode_row(row, TaskRow::into_task, TaskRepositoryError::query)
}

/// Owner-scoped query with the optional status predicate applied.
fn owned_tasks<'a>(owner: Uuid, status: Option<TaskStatus>) -> tasks::BoxedQuery<'a, Pg> {
    let query = tasks::table.filter(tasks::user_id.eq(owner)).into_boxed();
    match status {
        Some(status) => query.filter(tasks::status.eq(status.code())),
        None => query,
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn create(&self, owner: &UserId, draft: &TaskDraft) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let new_row = NewTaskRow {
            user_id: *owner.as_uuid(),
            title: draft.title.as_ref(),
            description: draft.description.as_deref(),
            priority: draft.priority.code(),
            status: draft.status.code(),
            due_at: draft.due_at,
        };

        let row: TaskRow = diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(err, "task.create"))?;
        decode(row)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        status: Option<TaskStatus>,
        window: PageWindow,
    ) -> Result<TaskPage, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let owner = *owner.as_uuid();

        let total_count: i64 = owned_tasks(owner, status)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(err, "task.count_by_owner"))?;

        let rows: Vec<TaskRow> = owned_tasks(owner, status)
            .select(TaskRow::as_select())
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .limit(window.limit())
            .offset(window.offset())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(err, "task.list_by_owner"))?;

        Ok(TaskPage {
            tasks: decode_rows(rows, TaskRow::into_task, TaskRepositoryError::query)?,
            total_count,
        })
    }

    async fn update_by_id(&self, id: TaskId, draft: &TaskDraft) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changeset = TaskChangeset {
            title: draft.title.as_ref(),
            description: draft.description.as_deref(),
            priority: draft.priority.code(),
            status: draft.status.code(),
            due_at: draft.due_at,
        };

        let row: Option<TaskRow> = diesel::update(tasks::table.find(id.get()))
            .set((&changeset, tasks::updated_at.eq(diesel::dsl::now)))
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(err, "task.update_by_id"))?;

        match row {
            Some(row) => decode(row),
            None => Err(TaskRepositoryError::not_found(id.get())),
        }
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<(), TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(tasks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(err, "task.delete_by_id"))?;
        if deleted == 0 {
            return Err(TaskRepositoryError::not_found(id.get()));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .find(id.get())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(err, "task.get_by_id"))?;

        match row {
            Some(row) => decode(row),
            None => Err(TaskRepositoryError::not_found(id.get())),
        }
    }
}
