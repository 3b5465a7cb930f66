use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

use super::tasks_display::TaskView;
use super::tasks_model::{create_task, NewTask, Task, TaskKind, TaskRecord, TaskUpdate};
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use crate::errors::{Error, RepositoryError, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::settings::{DisplayContext, DisplaySettings};
use crate::utils::time_utils::Clock;

/// Service for reading and mutating tasks through the repository.
pub struct TaskService {
    repository: Arc<dyn TaskRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    clock: Arc<dyn Clock>,
    settings: RwLock<DisplaySettings>,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        clock: Arc<dyn Clock>,
        settings: DisplaySettings,
    ) -> Self {
        Self {
            repository,
            event_sink,
            clock,
            settings: RwLock::new(settings),
        }
    }

    fn to_task(&self, record: TaskRecord) -> Task {
        Task::from_record(record, self.clock.as_ref())
    }

    /// Maps a missing record to `TaskNotFound`
    fn map_not_found<T>(result: Result<T>, task_id: &str) -> Result<T> {
        match result {
            Err(Error::Repository(RepositoryError::NotFound(_))) => {
                Err(Error::TaskNotFound(task_id.to_string()))
            }
            other => other,
        }
    }

    fn emit_tasks_changed(&self, task: &Task) {
        self.event_sink.emit(DomainEvent::tasks_changed(
            task.collection_id.iter().cloned().collect(),
            vec![task.id.clone()],
        ));
    }
}

#[async_trait::async_trait]
impl TaskServiceTrait for TaskService {
    async fn list_task_views(&self, collection_id: &str) -> Result<Vec<TaskView>> {
        let records = self.repository.list_by_collection(collection_id).await?;
        debug!(
            "Deriving {} task views for collection {}",
            records.len(),
            collection_id
        );

        let settings = self.display_settings()?;
        let ctx = DisplayContext::with_settings(self.clock.as_ref(), settings);

        Ok(records
            .into_iter()
            .map(|record| TaskView::build(self.to_task(record), &ctx))
            .collect())
    }

    async fn get_task(&self, task_id: &str) -> Result<Task> {
        let record = Self::map_not_found(self.repository.get_by_id(task_id).await, task_id)?;
        Ok(self.to_task(record))
    }

    async fn create_task(&self, collection_id: &str, new_task: NewTask) -> Result<Task> {
        if collection_id.trim().is_empty() {
            return Err(Error::missing_field("collectionId"));
        }
        let task_type = new_task.validate()?;
        debug!(
            "Creating {} task '{}' in collection {}",
            task_type, new_task.title, collection_id
        );

        let created = self
            .repository
            .create(collection_id, new_task.to_record(task_type, collection_id))
            .await?;

        let mut task = create_task(Some(task_type.as_str()), created, self.clock.as_ref());
        if task.collection_id.is_none() {
            task.collection_id = Some(collection_id.to_string());
        }
        self.emit_tasks_changed(&task);
        Ok(task)
    }

    async fn update_task(&self, update: TaskUpdate) -> Result<Task> {
        update.validate()?;
        debug!("Updating task {}", update.id);

        let task_id = update.id.clone();
        let record = Self::map_not_found(self.repository.update(update).await, &task_id)?;
        let task = self.to_task(record);
        self.emit_tasks_changed(&task);
        Ok(task)
    }

    async fn toggle_completed(&self, task_id: &str) -> Result<Task> {
        let task = self.get_task(task_id).await?;

        if task.is_goal_reached() {
            warn!("Refusing to toggle task {}: saving goal already reached", task_id);
            return Err(Error::InvalidOperation(format!(
                "Task {} has reached its saving goal; completion is locked",
                task_id
            )));
        }

        let update = TaskUpdate {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            completed: !task.completed,
        };
        let record = Self::map_not_found(self.repository.update(update).await, task_id)?;
        let updated = self.to_task(record);

        self.event_sink.emit(DomainEvent::task_completion_changed(
            updated.id.clone(),
            updated.completed,
        ));
        Ok(updated)
    }

    async fn add_money(&self, task_id: &str, amount: Decimal) -> Result<Task> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Amount must be greater than zero"));
        }

        let mut task = self.get_task(task_id).await?;
        if !matches!(task.kind, TaskKind::Saving { .. }) {
            warn!("Refusing to add money to {} task {}", task.task_type(), task_id);
            return Err(Error::InvalidOperation(format!(
                "Task {} is not a saving goal",
                task_id
            )));
        }
        if task.is_goal_reached() {
            warn!("Refusing to add money to task {}: goal already reached", task_id);
            return Err(Error::InvalidOperation(format!(
                "Task {} has already reached its saving goal",
                task_id
            )));
        }

        let current_amount = task
            .add_money(amount)
            .ok_or_else(|| Error::invalid_input("Amount is too large for this saving goal"))?;
        Self::map_not_found(self.repository.add_money(task_id, amount).await, task_id)?;
        debug!(
            "Added {} to task {}, balance is now {}",
            amount, task_id, current_amount
        );

        self.event_sink.emit(DomainEvent::money_added(
            task.id.clone(),
            amount,
            current_amount,
            task.is_goal_reached(),
        ));
        Ok(task)
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        let deleted = self.repository.delete(task_id).await?;
        if deleted == 0 {
            return Err(Error::TaskNotFound(task_id.to_string()));
        }
        debug!("Deleted task {}", task_id);
        self.event_sink
            .emit(DomainEvent::tasks_changed(Vec::new(), vec![task_id.to_string()]));
        Ok(())
    }

    fn display_settings(&self) -> Result<DisplaySettings> {
        self.settings
            .read()
            .map(|settings| *settings)
            .map_err(|_| Error::Unexpected("Display settings lock poisoned".to_string()))
    }

    fn update_display_settings(&self, settings: DisplaySettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self
            .settings
            .write()
            .map_err(|_| Error::Unexpected("Display settings lock poisoned".to_string()))?;
        *guard = settings;
        Ok(())
    }
}
