//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// Adapters translate them into platform actions (refreshing a collection
/// view, invalidating caches, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Tasks were created, edited, or deleted.
    TasksChanged {
        collection_ids: Vec<String>,
        task_ids: Vec<String>,
    },

    /// A task's completion flag was flipped by the user.
    TaskCompletionChanged { task_id: String, completed: bool },

    /// Money was added to a saving goal.
    MoneyAdded {
        task_id: String,
        amount: Decimal,
        current_amount: Decimal,
        /// Whether the goal is reached after this deposit
        goal_reached: bool,
    },

    /// Collections were created, renamed, or deleted.
    CollectionsChanged { collection_ids: Vec<String> },
}

impl DomainEvent {
    /// Creates a TasksChanged event.
    pub fn tasks_changed(collection_ids: Vec<String>, task_ids: Vec<String>) -> Self {
        Self::TasksChanged {
            collection_ids,
            task_ids,
        }
    }

    pub fn task_completion_changed(task_id: String, completed: bool) -> Self {
        Self::TaskCompletionChanged { task_id, completed }
    }

    /// Creates a MoneyAdded event.
    pub fn money_added(
        task_id: String,
        amount: Decimal,
        current_amount: Decimal,
        goal_reached: bool,
    ) -> Self {
        Self::MoneyAdded {
            task_id,
            amount,
            current_amount,
            goal_reached,
        }
    }

    pub fn collections_changed(collection_ids: Vec<String>) -> Self {
        Self::CollectionsChanged { collection_ids }
    }
}
