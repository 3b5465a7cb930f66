//! Display-state derivation for tasks.
//!
//! Everything in here is computed fresh from a task and a `DisplayContext`
//! and is never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::tasks_model::{Task, TaskKind, TaskType};
use crate::constants::{MAX_PROGRESS_PERCENT, OVERDUE_LABEL, PROGRESS_LABEL_PRECISION};
use crate::settings::{AmountPolicy, DisplayContext};
use crate::utils::time_utils::days_until;

/// Colour a task is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    Blue,
    Orange,
    Red,
    Green,
}

impl TaskColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskColor::Blue => "blue",
            TaskColor::Orange => "orange",
            TaskColor::Red => "red",
            TaskColor::Green => "green",
        }
    }
}

/// Variant-specific part of a display state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayDetails {
    Standard {},
    #[serde(rename_all = "camelCase")]
    Deadline {
        /// Passed through from the record unchanged
        #[serde(skip_serializing_if = "Option::is_none")]
        due_date: Option<String>,
        #[serde(skip)]
        due_at: Option<DateTime<Utc>>,
        /// Whole days remaining, rounded up; `None` without a usable due date
        #[serde(skip_serializing_if = "Option::is_none")]
        days_left: Option<i64>,
        /// `"N days left"` or `"Overdue"`
        days_left_label: String,
    },
    #[serde(rename_all = "camelCase")]
    Saving {
        target_amount: Option<Decimal>,
        current_amount: Decimal,
        /// Percent of the target saved, capped at 100
        progress: Option<Decimal>,
    },
}

/// Read-only view of a task, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub icon: &'static str,
    pub color: TaskColor,
    #[serde(flatten)]
    pub details: DisplayDetails,
}

impl Task {
    /// Derives the display state for this task.
    ///
    /// Pure: the same task with the same clock reading and settings always
    /// yields the same state.
    pub fn produce_display_state(&self, ctx: &DisplayContext<'_>) -> DisplayState {
        let task_type = self.task_type();

        let (color, details) = match &self.kind {
            TaskKind::Standard => (TaskColor::Blue, DisplayDetails::Standard {}),
            TaskKind::Deadline { due_date, due_at } => {
                let days_left = due_at.map(|due| days_until(due, ctx.now()));
                let color = match days_left {
                    Some(days) if days < ctx.settings.deadline_warning_days => TaskColor::Red,
                    _ => TaskColor::Orange,
                };
                let days_left_label = match days_left {
                    Some(days) if days > 0 => format!("{} days left", days),
                    _ => OVERDUE_LABEL.to_string(),
                };
                (
                    color,
                    DisplayDetails::Deadline {
                        due_date: due_date.clone(),
                        due_at: *due_at,
                        days_left,
                        days_left_label,
                    },
                )
            }
            TaskKind::Saving {
                target_amount,
                current_amount,
            } => (
                TaskColor::Green,
                DisplayDetails::Saving {
                    target_amount: *target_amount,
                    current_amount: *current_amount,
                    progress: savings_progress(
                        *current_amount,
                        *target_amount,
                        ctx.settings.amount_policy,
                    ),
                },
            ),
        };

        DisplayState {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            task_type,
            icon: task_type.icon(),
            color,
            details,
        }
    }
}

/// Percent of `target` covered by `current`, capped at 100.
///
/// Returns `None` when there is no meaningful target. Under the hardened
/// policy non-positive targets count as meaningless and the result is also
/// floored at 0. A ratio too large to represent, or a positive balance over a
/// zero target under the permissive policy, saturates at 100; the negative
/// counterparts have no value under the permissive policy.
pub fn savings_progress(
    current: Decimal,
    target: Option<Decimal>,
    policy: AmountPolicy,
) -> Option<Decimal> {
    let target = target?;
    if matches!(policy, AmountPolicy::Hardened) && target <= Decimal::ZERO {
        return None;
    }

    let percent = match current
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(MAX_PROGRESS_PERCENT))
    {
        Some(percent) => percent.min(MAX_PROGRESS_PERCENT),
        None if current.is_zero() => return None,
        None => {
            let positive = if target.is_zero() {
                current > Decimal::ZERO
            } else {
                (current > Decimal::ZERO) == (target > Decimal::ZERO)
            };
            if positive {
                MAX_PROGRESS_PERCENT
            } else {
                match policy {
                    AmountPolicy::Hardened => Decimal::ZERO,
                    AmountPolicy::Permissive => return None,
                }
            }
        }
    };

    Some(match policy {
        AmountPolicy::Hardened => percent.max(Decimal::ZERO),
        AmountPolicy::Permissive => percent,
    })
}

impl DisplayState {
    /// `"42.5% complete"` for saving goals with a known progress.
    pub fn progress_label(&self) -> Option<String> {
        match &self.details {
            DisplayDetails::Saving {
                progress: Some(progress),
                ..
            } => Some(format!(
                "{:.*}% complete",
                PROGRESS_LABEL_PRECISION as usize,
                progress
            )),
            _ => None,
        }
    }

    /// Computes the view-only business flags at `now`.
    pub fn flags(&self, now: DateTime<Utc>) -> TaskFlags {
        let deadline_failed = match &self.details {
            DisplayDetails::Deadline { due_at: Some(due), .. } => now > *due && !self.completed,
            _ => false,
        };
        let goal_reached = match &self.details {
            DisplayDetails::Saving {
                target_amount: Some(target),
                current_amount,
                ..
            } => current_amount >= target,
            _ => false,
        };

        let accent = if deadline_failed {
            TaskColor::Red
        } else if goal_reached {
            TaskColor::Green
        } else if self.completed {
            TaskColor::Blue
        } else {
            self.color
        };

        let badge = if deadline_failed {
            Some(TaskBadge::Failed)
        } else if goal_reached {
            Some(TaskBadge::GoalReached)
        } else {
            None
        };

        TaskFlags {
            deadline_failed,
            goal_reached,
            checkbox_checked: self.completed || goal_reached,
            checkbox_locked: goal_reached,
            can_add_money: self.task_type == TaskType::Saving && !goal_reached,
            accent,
            badge,
        }
    }
}

/// Status marker shown next to a task's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskBadge {
    Failed,
    GoalReached,
}

/// View-layer overlays computed from a display state and the current time.
///
/// None of these mutate the stored `completed` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFlags {
    pub deadline_failed: bool,
    pub goal_reached: bool,
    /// Checkbox shows as ticked when completed or when the goal is reached
    pub checkbox_checked: bool,
    /// Manual toggling is disabled once a saving goal is reached
    pub checkbox_locked: bool,
    pub can_add_money: bool,
    pub accent: TaskColor,
    pub badge: Option<TaskBadge>,
}

/// A typed task together with its derived state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(skip)]
    pub task: Task,
    pub id: String,
    pub display: DisplayState,
    pub flags: TaskFlags,
}

impl TaskView {
    pub fn build(task: Task, ctx: &DisplayContext<'_>) -> Self {
        let display = task.produce_display_state(ctx);
        let flags = display.flags(ctx.now());
        Self {
            id: task.id.clone(),
            task,
            display,
            flags,
        }
    }
}
