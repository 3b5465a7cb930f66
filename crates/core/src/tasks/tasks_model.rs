//! Task domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEADLINE_ICON, SAVING_ICON, STANDARD_ICON};
use crate::errors::{Error, Result};
use crate::utils::serde_utils::{
    deserialize_null_as_default, deserialize_opaque_id, deserialize_optional_opaque_id,
};
use crate::utils::time_utils::{parse_record_datetime, Clock};

/// Task variant discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    #[default]
    Standard,
    Deadline,
    Saving,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Standard, TaskType::Deadline, TaskType::Saving];

    /// Resolves a type tag leniently.
    ///
    /// Matching is case-insensitive. Missing or unrecognized tags resolve to
    /// `Standard`; this never fails.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!("Unknown task type tag '{}', treating as STANDARD", raw);
                TaskType::Standard
            }),
            None => TaskType::Standard,
        }
    }

    /// Resolves a type tag, rejecting anything that is not a known variant.
    pub fn parse_strict(tag: &str) -> Result<Self> {
        tag.trim().parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Standard => "STANDARD",
            TaskType::Deadline => "DEADLINE",
            TaskType::Saving => "SAVING",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskType::Standard => STANDARD_ICON,
            TaskType::Deadline => DEADLINE_ICON,
            TaskType::Saving => SAVING_ICON,
        }
    }
}

impl FromStr for TaskType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_input(format!("Unknown task type '{}'", s)))
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped task record as exchanged with the external collaborator.
///
/// This is a superset of every variant's fields; fields that do not apply to
/// the record's variant are ignored during construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "deserialize_opaque_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_id: Option<String>,
}

/// Variant-specific task data.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    Standard,
    Deadline {
        /// Due date exactly as the creator supplied it
        due_date: Option<String>,
        /// Parsed due date; `None` when the raw value is absent or unparsable
        due_at: Option<DateTime<Utc>>,
    },
    Saving {
        target_amount: Option<Decimal>,
        current_amount: Decimal,
    },
}

/// A typed task.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub collection_id: Option<String>,
    pub kind: TaskKind,
}

/// Builds a typed task from a type tag and an untyped record.
///
/// Never fails: unknown tags fall back to `Standard`, a missing `completed`
/// flag is `false` and a missing `createdAt` is the clock's current time.
/// Variant-specific fields are not validated here.
pub fn create_task(type_tag: Option<&str>, record: TaskRecord, clock: &dyn Clock) -> Task {
    let task_type = TaskType::from_tag(type_tag);

    let created_at = match record.created_at.as_deref() {
        Some(raw) => parse_record_datetime(raw).unwrap_or_else(|e| {
            warn!(
                "Task {}: unparsable createdAt '{}' ({}), using current time",
                record.id, raw, e
            );
            clock.now()
        }),
        None => clock.now(),
    };

    let kind = match task_type {
        TaskType::Standard => TaskKind::Standard,
        TaskType::Deadline => TaskKind::Deadline {
            due_at: record.due_date.as_deref().and_then(|raw| {
                parse_record_datetime(raw)
                    .map_err(|e| {
                        warn!("Task {}: unparsable dueDate '{}' ({})", record.id, raw, e)
                    })
                    .ok()
            }),
            due_date: record.due_date,
        },
        TaskType::Saving => TaskKind::Saving {
            target_amount: record.target_amount,
            current_amount: record.current_amount.unwrap_or_default(),
        },
    };

    Task {
        id: record.id,
        title: record.title,
        description: record.description,
        completed: record.completed.unwrap_or(false),
        created_at,
        collection_id: record.collection_id,
        kind,
    }
}

impl Task {
    /// Builds a task using the record's own `type` field as the tag.
    pub fn from_record(record: TaskRecord, clock: &dyn Clock) -> Self {
        let tag = record.task_type.clone();
        create_task(tag.as_deref(), record, clock)
    }

    pub fn task_type(&self) -> TaskType {
        match self.kind {
            TaskKind::Standard => TaskType::Standard,
            TaskKind::Deadline { .. } => TaskType::Deadline,
            TaskKind::Saving { .. } => TaskType::Saving,
        }
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Adds `amount` to a saving goal and returns the new balance.
    ///
    /// The amount is not checked; callers are expected to reject non-positive
    /// amounts. Returns `None` and leaves the task untouched for other variants
    /// and when the new balance would overflow.
    pub fn add_money(&mut self, amount: Decimal) -> Option<Decimal> {
        match &mut self.kind {
            TaskKind::Saving { current_amount, .. } => {
                *current_amount = current_amount.checked_add(amount)?;
                Some(*current_amount)
            }
            TaskKind::Standard | TaskKind::Deadline { .. } => None,
        }
    }

    /// A saving goal whose balance meets or exceeds its target.
    ///
    /// View-only: this never changes `completed`.
    pub fn is_goal_reached(&self) -> bool {
        match self.kind {
            TaskKind::Saving {
                target_amount: Some(target),
                current_amount,
            } => current_amount >= target,
            _ => false,
        }
    }

    /// A deadline task that is past due and still incomplete.
    pub fn is_deadline_failed(&self, now: DateTime<Utc>) -> bool {
        match self.kind {
            TaskKind::Deadline { due_at: Some(due), .. } => now > due && !self.completed,
            _ => false,
        }
    }

    /// Converts the task back into the collaborator's record shape.
    pub fn to_record(&self) -> TaskRecord {
        let mut record = TaskRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            completed: Some(self.completed),
            task_type: Some(self.task_type().as_str().to_string()),
            created_at: Some(self.created_at.to_rfc3339()),
            collection_id: self.collection_id.clone(),
            ..Default::default()
        };
        match &self.kind {
            TaskKind::Standard => {}
            TaskKind::Deadline { due_date, .. } => {
                record.due_date = due_date.clone();
            }
            TaskKind::Saving {
                target_amount,
                current_amount,
            } => {
                record.target_amount = *target_amount;
                record.current_amount = Some(*current_amount);
            }
        }
        record
    }
}

/// Input model for creating a task in a collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
}

impl NewTask {
    /// Validates the new task and returns its resolved type.
    pub fn validate(&self) -> Result<TaskType> {
        if self.title.trim().is_empty() {
            return Err(Error::invalid_input("Task title cannot be empty"));
        }

        let task_type = TaskType::parse_strict(&self.task_type)?;
        match task_type {
            TaskType::Standard => {}
            TaskType::Deadline => {
                let raw = self
                    .due_date
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .ok_or_else(|| Error::missing_field("dueDate"))?;
                parse_record_datetime(raw)?;
            }
            TaskType::Saving => {
                let target = self
                    .target_amount
                    .ok_or_else(|| Error::missing_field("targetAmount"))?;
                if target <= Decimal::ZERO {
                    return Err(Error::invalid_input("Target amount must be positive"));
                }
                if self.current_amount.unwrap_or_default() < Decimal::ZERO {
                    return Err(Error::invalid_input("Current amount cannot be negative"));
                }
            }
        }
        Ok(task_type)
    }

    /// Record shape handed to the repository. Fields that do not belong to
    /// the resolved type are dropped.
    pub fn to_record(&self, task_type: TaskType, collection_id: &str) -> TaskRecord {
        let mut record = TaskRecord {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            completed: Some(false),
            task_type: Some(task_type.as_str().to_string()),
            collection_id: Some(collection_id.to_string()),
            ..Default::default()
        };
        match task_type {
            TaskType::Standard => {}
            TaskType::Deadline => record.due_date = self.due_date.clone(),
            TaskType::Saving => {
                record.target_amount = self.target_amount;
                record.current_amount = Some(self.current_amount.unwrap_or_default());
            }
        }
        record
    }
}

/// Input model for editing a task's common fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
}

impl TaskUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::missing_field("id"));
        }
        if self.title.trim().is_empty() {
            return Err(Error::invalid_input("Task title cannot be empty"));
        }
        Ok(())
    }
}
