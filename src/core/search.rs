use crate::core::{Lead, RankingEngine, RankingStatistics};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    term: String,
    due_at: Instant,
}

/// Result of one search evaluation: the ranked matches and the statistics
/// of the filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub leads: Vec<Lead>,
    pub statistics: RankingStatistics,
}

/// Holds the last loaded lead list and a single cancel-and-reschedule
/// debounce slot for free-text queries.
#[derive(Debug, Clone)]
pub struct SearchController {
    engine: RankingEngine,
    debounce: Duration,
    all_leads: Vec<Lead>,
    query: String,
    pending: Option<PendingSearch>,
}

impl SearchController {
    pub fn new(engine: RankingEngine, debounce: Duration) -> Self {
        Self {
            engine,
            debounce,
            all_leads: Vec::new(),
            query: String::new(),
            pending: None,
        }
    }

    pub fn update_leads(&mut self, leads: Vec<Lead>) {
        self.all_leads = leads;
    }

    pub fn all_leads(&self) -> &[Lead] {
        &self.all_leads
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// When the pending search becomes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    /// Records the new query and replaces any pending evaluation.
    pub fn on_query_changed(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        if self.pending.is_some() {
            tracing::trace!("Superseding pending search");
        }
        self.query = term.clone();
        self.pending = Some(PendingSearch {
            term,
            due_at: now + self.debounce,
        });
    }

    /// Runs the pending search once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchOutcome> {
        match &self.pending {
            Some(pending) if now >= pending.due_at => self.flush(),
            _ => None,
        }
    }

    /// Runs the pending search immediately, ignoring the quiet period.
    pub fn flush(&mut self) -> Option<SearchOutcome> {
        let pending = self.pending.take()?;
        Some(self.evaluate(&pending.term))
    }

    pub fn evaluate(&self, term: &str) -> SearchOutcome {
        let filtered = self.engine.filter(&self.all_leads, term);
        let statistics = self.engine.compute_statistics(&filtered);
        let leads = self.engine.sort(&filtered);
        tracing::debug!(
            "Search '{}' matched {} of {} leads",
            term.trim(),
            leads.len(),
            self.all_leads.len()
        );
        SearchOutcome { leads, statistics }
    }

    /// Drops the query and any pending search; returns the unfiltered view.
    pub fn clear(&mut self) -> SearchOutcome {
        self.pending = None;
        self.query.clear();
        self.evaluate("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, score: u32, timestamp: i64) -> Lead {
        Lead {
            id: format!("{}{}", name, timestamp),
            name: name.to_string(),
            score,
            date: String::new(),
            timestamp,
        }
    }

    fn controller() -> SearchController {
        let mut c = SearchController::new(RankingEngine::default(), DEFAULT_DEBOUNCE);
        c.update_leads(vec![
            lead("acme corp", 28, 1),
            lead("Beta", 12, 2),
            lead("Acme Labs", 16, 3),
        ]);
        c
    }

    #[test]
    fn test_only_last_query_within_window_runs() {
        let mut c = controller();
        let t0 = Instant::now();

        c.on_query_changed("b", t0);
        c.on_query_changed("ac", t0 + Duration::from_millis(100));
        c.on_query_changed("acme", t0 + Duration::from_millis(200));

        // 300ms after the first keystroke but only 100ms after the last.
        assert!(c.poll(t0 + Duration::from_millis(300)).is_none());

        let outcome = c.poll(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(outcome.leads.len(), 2);
        assert_eq!(outcome.leads[0].name, "acme corp");

        // Executed once; nothing left pending.
        assert!(c.poll(t0 + Duration::from_secs(5)).is_none());
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn test_deadline_tracks_latest_change() {
        let mut c = controller();
        let t0 = Instant::now();
        c.on_query_changed("a", t0);
        assert_eq!(c.next_deadline(), Some(t0 + DEFAULT_DEBOUNCE));
        c.on_query_changed("ab", t0 + Duration::from_millis(50));
        assert_eq!(
            c.next_deadline(),
            Some(t0 + Duration::from_millis(50) + DEFAULT_DEBOUNCE)
        );
        assert_eq!(c.query(), "ab");
    }

    #[test]
    fn test_statistics_follow_the_filter() {
        let mut c = controller();
        let t0 = Instant::now();
        c.on_query_changed("ACME", t0);
        let outcome = c.poll(t0 + DEFAULT_DEBOUNCE).unwrap();

        assert_eq!(outcome.statistics.total_leads, 2);
        assert_eq!(outcome.statistics.average_score, 22.0);
        assert_eq!(outcome.statistics.high_priority_count, 1);
        assert_eq!(outcome.statistics.medium_priority_count, 1);
        assert_eq!(outcome.statistics.low_priority_count, 0);
    }

    #[test]
    fn test_flush_runs_pending_immediately() {
        let mut c = controller();
        assert!(c.flush().is_none());
        c.on_query_changed("beta", Instant::now());
        let outcome = c.flush().unwrap();
        assert_eq!(outcome.leads.len(), 1);
        assert!(c.flush().is_none());
    }

    #[test]
    fn test_clear_cancels_pending_and_shows_everything() {
        let mut c = controller();
        let t0 = Instant::now();
        c.on_query_changed("beta", t0);
        let outcome = c.clear();

        assert_eq!(c.query(), "");
        assert_eq!(outcome.leads.len(), 3);
        assert_eq!(outcome.statistics.total_leads, 3);
        assert!(c.poll(t0 + Duration::from_secs(1)).is_none());
    }
}
