//! Timing and size limits of the browse screen.

use std::time::Duration;

/// Quiet period before a typed search term is committed to the applied filters.
pub const APPLY_DEBOUNCE: Duration = Duration::from_millis(500);

/// Quiet period before a suggestion lookup is sent.
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(250);

/// Shortest trimmed search term that triggers suggestions.
pub const MIN_SUGGESTION_TERM_LEN: usize = 2;

/// Distinct values kept per suggestion group.
pub const SUGGESTIONS_PER_GROUP: usize = 6;
