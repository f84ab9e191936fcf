//! Epoch-based debounce timers.
//!
//! The engine never reads a clock. Restarting a timer bumps its epoch and asks
//! the host to call back after the delay; a callback carrying an old epoch is
//! ignored, which is what cancels the earlier timer.

use std::collections::BTreeMap;

use super::commands::{DebounceTimer, EngineCommand};
use super::constants::{APPLY_DEBOUNCE, SUGGESTION_DEBOUNCE};

#[derive(Debug, Clone, Default)]
pub(crate) struct SearchDebounce {
    epochs: BTreeMap<DebounceTimer, u64>,
    armed: BTreeMap<DebounceTimer, u64>,
}

impl SearchDebounce {
    pub(crate) fn restart(&mut self, timer: DebounceTimer) -> EngineCommand {
        let epoch = self.epochs.entry(timer).or_insert(0);
        *epoch += 1;
        self.armed.insert(timer, *epoch);
        let delay = match timer {
            DebounceTimer::ApplySearch => APPLY_DEBOUNCE,
            DebounceTimer::Suggestions => SUGGESTION_DEBOUNCE,
        };
        EngineCommand::ArmTimer { timer, epoch: *epoch, delay }
    }

    pub(crate) fn cancel(&mut self, timer: DebounceTimer) {
        *self.epochs.entry(timer).or_insert(0) += 1;
        self.armed.remove(&timer);
    }

    pub(crate) fn cancel_all(&mut self) {
        self.cancel(DebounceTimer::ApplySearch);
        self.cancel(DebounceTimer::Suggestions);
    }

    /// True exactly once for the live arming of `timer`.
    pub(crate) fn fire(&mut self, timer: DebounceTimer, epoch: u64) -> bool {
        if self.armed.get(&timer) == Some(&epoch) {
            self.armed.remove(&timer);
            true
        } else {
            false
        }
    }

    pub(crate) fn is_armed(&self, timer: DebounceTimer) -> bool {
        self.armed.contains_key(&timer)
    }
}
