//! Collections module - named groupings of tasks.

mod collections_model;
mod collections_service;
mod collections_traits;

pub use collections_model::{Collection, CollectionUpdate, NewCollection};
pub use collections_service::CollectionService;
pub use collections_traits::{CollectionRepositoryTrait, CollectionServiceTrait};
