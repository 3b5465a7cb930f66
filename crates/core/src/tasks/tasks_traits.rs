//! Task repository and service traits.
//!
//! The repository is the external collaborator that owns task records
//! (creation, persistence, deletion). Nothing here depends on how it stores
//! or transports them.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::tasks_display::TaskView;
use super::tasks_model::{NewTask, Task, TaskRecord, TaskUpdate};
use crate::errors::Result;
use crate::settings::DisplaySettings;

/// Contract for the collaborator that stores task records.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    /// Lists the records of one collection, in the collaborator's order.
    async fn list_by_collection(&self, collection_id: &str) -> Result<Vec<TaskRecord>>;

    /// Retrieves a single record by task ID.
    async fn get_by_id(&self, task_id: &str) -> Result<TaskRecord>;

    /// Creates a record in a collection and returns it with its assigned ID.
    async fn create(&self, collection_id: &str, record: TaskRecord) -> Result<TaskRecord>;

    /// Updates title, description and completion of a record.
    async fn update(&self, update: TaskUpdate) -> Result<TaskRecord>;

    /// Adds `amount` to a saving record's current amount.
    async fn add_money(&self, task_id: &str, amount: Decimal) -> Result<()>;

    /// Deletes a record. Returns the number of deleted records.
    async fn delete(&self, task_id: &str) -> Result<usize>;
}

/// Task operations with business validation.
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    /// Loads a collection's tasks with display state and flags derived now.
    async fn list_task_views(&self, collection_id: &str) -> Result<Vec<TaskView>>;

    async fn get_task(&self, task_id: &str) -> Result<Task>;

    async fn create_task(&self, collection_id: &str, new_task: NewTask) -> Result<Task>;

    async fn update_task(&self, update: TaskUpdate) -> Result<Task>;

    /// Flips the completion flag. Rejected while a saving goal is reached.
    async fn toggle_completed(&self, task_id: &str) -> Result<Task>;

    /// Adds a positive amount to a saving goal that is not yet reached.
    async fn add_money(&self, task_id: &str, amount: Decimal) -> Result<Task>;

    async fn delete_task(&self, task_id: &str) -> Result<()>;

    fn display_settings(&self) -> Result<DisplaySettings>;

    fn update_display_settings(&self, settings: DisplaySettings) -> Result<()>;
}
