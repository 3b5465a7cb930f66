use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Milliseconds in one calendar day, used for days-left countdowns
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Days-left below which a deadline is shown as urgent
pub const DEFAULT_DEADLINE_WARNING_DAYS: i64 = 3;

/// Upper bound for savings progress, in percent
pub const MAX_PROGRESS_PERCENT: Decimal = dec!(100);

/// Decimal places shown in progress labels
pub const PROGRESS_LABEL_PRECISION: u32 = 1;

/// Label shown for deadline tasks with no days remaining
pub const OVERDUE_LABEL: &str = "Overdue";

pub const STANDARD_ICON: &str = "📝";
pub const DEADLINE_ICON: &str = "⏰";
pub const SAVING_ICON: &str = "💰";
