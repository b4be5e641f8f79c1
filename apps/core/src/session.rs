/// Monotonic tickets for the two session events a presentation layer feeds
/// the core: query changed and query confirmed.
///
/// Queries are resolved synchronously today, but a caller that resolves off
/// the event thread still needs two guarantees: a suggestion list for query
/// `n` must never overwrite one already delivered for query `n+1`
/// (drop-if-stale), and the outcome of an earlier dispatch must be discarded
/// once a newer confirmation exists (last-confirmed-wins). Single-threaded,
/// no locks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuerySequencer {
    issued: u64,
    delivered: u64,
    confirmed: u64,
    settled: u64,
}

impl QuerySequencer {
    /// Stamps a new query-changed event.
    pub fn begin_query(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// True if the suggestion list for `ticket` may be delivered. A ticket
    /// older than one already delivered is stale and must be dropped.
    pub fn accept_suggestions(&mut self, ticket: u64) -> bool {
        if ticket <= self.delivered {
            return false;
        }
        self.delivered = ticket;
        true
    }

    /// Stamps a new confirmation (Enter).
    pub fn begin_confirmation(&mut self) -> u64 {
        self.confirmed += 1;
        self.confirmed
    }

    /// True if the dispatch outcome for `ticket` is still the latest
    /// confirmation. A pending dispatch is allowed to complete, but its
    /// outcome is discarded once a newer one has been confirmed.
    pub fn accept_outcome(&mut self, ticket: u64) -> bool {
        if ticket < self.confirmed || ticket <= self.settled {
            return false;
        }
        self.settled = ticket;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::QuerySequencer;

    #[test]
    fn in_order_suggestions_are_accepted() {
        let mut seq = QuerySequencer::default();
        let first = seq.begin_query();
        let second = seq.begin_query();
        assert!(seq.accept_suggestions(first));
        assert!(seq.accept_suggestions(second));
    }

    #[test]
    fn stale_suggestions_are_dropped() {
        let mut seq = QuerySequencer::default();
        let first = seq.begin_query();
        let second = seq.begin_query();
        assert!(seq.accept_suggestions(second));
        assert!(!seq.accept_suggestions(first));
    }

    #[test]
    fn last_confirmed_dispatch_wins() {
        let mut seq = QuerySequencer::default();
        let first = seq.begin_confirmation();
        let second = seq.begin_confirmation();
        // The older dispatch completes after the newer one was confirmed.
        assert!(!seq.accept_outcome(first));
        assert!(seq.accept_outcome(second));
    }

    #[test]
    fn outcome_is_settled_once() {
        let mut seq = QuerySequencer::default();
        let ticket = seq.begin_confirmation();
        assert!(seq.accept_outcome(ticket));
        assert!(!seq.accept_outcome(ticket));
    }
}
