//! Process-local `TaskRepository`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{PageWindow, Task, TaskDraft, TaskId, TaskPage, TaskStatus, UserId};

#[derive(Default)]
struct State {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

/// Task store keyed by sequential id.
#[derive(Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryTaskRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            clock,
        }
    }
}

fn window_bounds(window: PageWindow) -> (usize, usize) {
    let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(window.limit()).unwrap_or(usize::MAX);
    (skip, take)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, owner: &UserId, draft: &TaskDraft) -> Result<Task, TaskRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = TaskId::new(state.next_id)
            .map_err(|err| TaskRepositoryError::query(err.to_string()))?;
        let task = Task {
            id,
            user_id: owner.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            status: draft.status,
            due_at: draft.due_at,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(id.get(), task.clone());
        Ok(task)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        status: Option<TaskStatus>,
        window: PageWindow,
    ) -> Result<TaskPage, TaskRepositoryError> {
        let state = self.state.read().await;
        let mut matching: Vec<&Task> = state
            .tasks
            .values()
            .filter(|task| task.is_owned_by(owner))
            .filter(|task| status.is_none_or(|wanted| task.status == wanted))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total_count = i64::try_from(matching.len())
            .map_err(|err| TaskRepositoryError::query(err.to_string()))?;
        let (skip, take) = window_bounds(window);
        let tasks = matching.into_iter().skip(skip).take(take).cloned().collect();
        Ok(TaskPage { tasks, total_count })
    }

    async fn update_by_id(&self, id: TaskId, draft: &TaskDraft) -> Result<Task, TaskRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .get_mut(&id.get())
            .ok_or_else(|| TaskRepositoryError::not_found(id.get()))?;
        task.title = draft.title.clone();
        task.description = draft.description.clone();
        task.priority = draft.priority;
        task.status = draft.status;
        task.due_at = draft.due_at;
        task.updated_at = now;
        Ok(task.clone())
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<(), TaskRepositoryError> {
        let mut state = self.state.write().await;
        state
            .tasks
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| TaskRepositoryError::not_found(id.get()))
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Task, TaskRepositoryError> {
        let state = self.state.read().await;
        state
            .tasks
            .get(&id.get())
            .cloned()
            .ok_or_else(|| TaskRepositoryError::not_found(id.get()))
    }
}
