//! Tasks module - task variants, display-state derivation, services, and traits.

mod tasks_display;
mod tasks_model;
mod tasks_service;
mod tasks_traits;


pub use tasks_display::{
    savings_progress, DisplayDetails, DisplayState, TaskBadge, TaskColor, TaskFlags, TaskView,
};
pub use tasks_model::{create_task, NewTask, Task, TaskKind, TaskRecord, TaskType, TaskUpdate};
pub use tasks_service::TaskService;
pub use tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
