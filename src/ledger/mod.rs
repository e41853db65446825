//! Daily ledger
//!
//! Persistence of the current day and history log, the rollover policy, and
//! the per-process session that serves meal, water, sleep and weight updates,
//! and goal-based suggestions.

pub mod clock;
pub mod rollover;
pub mod session;
pub mod store;
pub mod suggestions;

pub use clock::{Clock, FixedClock, SystemClock};
pub use rollover::{summarize_day, RolloverOutcome};
pub use session::{DailyLedger, GoalProgress, QUOTES};
pub use store::{LedgerStore, DAILY_KEY, HISTORY_KEY};
pub use suggestions::{suggestions, Suggestion, SuggestionKind};
