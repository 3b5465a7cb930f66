//! Domain events module.
//!
//! Domain event types and the sink trait that task and collection services
//! emit through after successful mutations.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
