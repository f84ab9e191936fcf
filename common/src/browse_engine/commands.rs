//! Side effects requested by the engine, and the tickets that match responses to them.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::{
    entries_query::{EntriesQuery, SuggestionRequest, ValueScope},
    filter::ChainField,
};

/// Work the host has to carry out on behalf of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    FetchEntries { ticket: RequestTicket, query: EntriesQuery },
    FetchUniqueValues { ticket: RequestTicket, field: ChainField, scope: ValueScope },
    FetchSuggestions { ticket: RequestTicket, request: SuggestionRequest },
    FetchStatistics { ticket: RequestTicket },
    /// Call `on_timer_fired(timer, epoch)` once `delay` has elapsed.
    ArmTimer { timer: DebounceTimer, epoch: u64, delay: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DebounceTimer {
    ApplySearch,
    Suggestions,
}

/// Logical slot a response is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestTarget {
    Entries,
    UniqueValues(ChainField),
    Suggestions,
    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub target: RequestTarget,
    pub generation: u64,
}

/// Hands out tickets and remembers the newest one per target.
///
/// Only the response carrying the newest ticket of its target is accepted, so
/// an older request resolving late can never overwrite a newer one.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestGenerations {
    next: u64,
    latest: BTreeMap<RequestTarget, u64>,
}

impl RequestGenerations {
    pub(crate) fn issue(&mut self, target: RequestTarget) -> RequestTicket {
        self.next += 1;
        self.latest.insert(target, self.next);
        RequestTicket { target, generation: self.next }
    }

    pub(crate) fn is_latest(&self, ticket: &RequestTicket) -> bool {
        self.latest.get(&ticket.target) == Some(&ticket.generation)
    }

    /// Marks every outstanding request for `target` as stale.
    pub(crate) fn invalidate(&mut self, target: RequestTarget) {
        self.latest.remove(&target);
    }

    /// Like `is_latest`, and retires the ticket so a duplicate delivery is ignored.
    pub(crate) fn settle(&mut self, ticket: &RequestTicket) -> bool {
        if self.is_latest(ticket) {
            self.latest.remove(&ticket.target);
            true
        } else {
            false
        }
    }

    pub(crate) fn is_pending(&self, target: RequestTarget) -> bool {
        self.latest.contains_key(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let mut gens = RequestGenerations::default();
        let first = gens.issue(RequestTarget::Entries);
        let second = gens.issue(RequestTarget::Entries);
        assert!(!gens.is_latest(&first));
        assert!(gens.settle(&second));
        assert!(!gens.settle(&second));
        assert!(!gens.is_pending(RequestTarget::Entries));
    }

    #[test]
    fn targets_are_independent() {
        let mut gens = RequestGenerations::default();
        let antibody = gens.issue(RequestTarget::UniqueValues(ChainField::Autoantibody));
        let antigen = gens.issue(RequestTarget::UniqueValues(ChainField::Autoantigen));
        gens.invalidate(RequestTarget::UniqueValues(ChainField::Autoantigen));
        assert!(gens.is_latest(&antibody));
        assert!(!gens.is_latest(&antigen));
    }
}
