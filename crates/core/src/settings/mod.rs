//! Settings module - display and derivation settings.

mod settings_model;

pub use settings_model::{AmountPolicy, DisplayContext, DisplaySettings};
