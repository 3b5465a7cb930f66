//! Display settings domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DEADLINE_WARNING_DAYS;
use crate::errors::{Error, Result};
use crate::utils::time_utils::Clock;

/// How savings amounts that make no arithmetic sense are treated when
/// computing progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountPolicy {
    /// Progress is clamped into `[0, 100]`.
    #[default]
    Hardened,
    /// Only the upper clamp applies; negative balances give negative progress.
    Permissive,
}

/// Settings that influence display-state derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// Deadline tasks with fewer days left than this are shown as urgent
    pub deadline_warning_days: i64,
    pub amount_policy: AmountPolicy,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            deadline_warning_days: DEFAULT_DEADLINE_WARNING_DAYS,
            amount_policy: AmountPolicy::default(),
        }
    }
}

impl DisplaySettings {
    /// Loads settings from a JSON document. Missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: DisplaySettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.deadline_warning_days < 0 {
            return Err(Error::InvalidConfigValue(format!(
                "deadlineWarningDays must not be negative (got {})",
                self.deadline_warning_days
            )));
        }
        Ok(())
    }
}

/// Everything a derivation needs from its environment: the current time and
/// the display settings.
#[derive(Clone, Copy)]
pub struct DisplayContext<'a> {
    pub clock: &'a dyn Clock,
    pub settings: DisplaySettings,
}

impl<'a> DisplayContext<'a> {
    /// Creates a context with default settings.
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            settings: DisplaySettings::default(),
        }
    }

    pub fn with_settings(clock: &'a dyn Clock, settings: DisplaySettings) -> Self {
        Self { clock, settings }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
