use crate::core::{Lead, PriorityTier, RankingStatistics};
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::borrow::Cow;

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityThresholds {
    pub high: u32,
    pub medium: u32,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            high: 25,
            medium: 15,
        }
    }
}

/// Stateless ordering, filtering and aggregation over lead lists.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    thresholds: PriorityThresholds,
    display_offset: Option<FixedOffset>,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(PriorityThresholds::default())
    }
}

impl RankingEngine {
    /// Dates are displayed in the host's local time zone, resolved per instant.
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self {
            thresholds,
            display_offset: None,
        }
    }

    /// Pins display to a fixed UTC offset instead of the local time zone.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = Some(offset);
        self
    }

    pub fn thresholds(&self) -> PriorityThresholds {
        self.thresholds
    }

    /// Highest score first; equal scores put the most recent lead first.
    /// Stable, so exact duplicates keep their input order.
    pub fn sort(&self, leads: &[Lead]) -> Vec<Lead> {
        let mut sorted = leads.to_vec();
        sorted.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
        });
        sorted
    }

    /// Case-insensitive substring match on the name. A blank term borrows
    /// the input unchanged.
    pub fn filter<'a>(&self, leads: &'a [Lead], term: &str) -> Cow<'a, [Lead]> {
        let term = term.trim();
        if term.is_empty() {
            return Cow::Borrowed(leads);
        }

        let needle = term.to_lowercase();
        Cow::Owned(
            leads
                .iter()
                .filter(|lead| lead.name.trim().to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        )
    }

    pub fn compute_statistics(&self, leads: &[Lead]) -> RankingStatistics {
        if leads.is_empty() {
            return RankingStatistics::default();
        }

        let total: u64 = leads.iter().map(|lead| u64::from(lead.score)).sum();
        let average = total as f64 / leads.len() as f64;

        let mut stats = RankingStatistics {
            total_leads: leads.len(),
            average_score: (average * 10.0).round() / 10.0,
            ..RankingStatistics::default()
        };
        for lead in leads {
            match self.classify(lead.score) {
                PriorityTier::Alta => stats.high_priority_count += 1,
                PriorityTier::Media => stats.medium_priority_count += 1,
                PriorityTier::Baixa => stats.low_priority_count += 1,
            }
        }
        stats
    }

    pub fn classify(&self, score: u32) -> PriorityTier {
        if score >= self.thresholds.high {
            PriorityTier::Alta
        } else if score >= self.thresholds.medium {
            PriorityTier::Media
        } else {
            PriorityTier::Baixa
        }
    }

    /// `dd/mm/yyyy, HH:MM`, for display only.
    pub fn format_display_date(&self, lead: &Lead) -> String {
        match lead.created_at() {
            Some(created_at) => self.format_instant(created_at),
            None => lead.date.clone(),
        }
    }

    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        match self.display_offset {
            Some(offset) => instant
                .with_timezone(&offset)
                .format(DISPLAY_DATE_FORMAT)
                .to_string(),
            None => instant
                .with_timezone(&Local)
                .format(DISPLAY_DATE_FORMAT)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, score: u32, timestamp: i64) -> Lead {
        Lead {
            id: format!("{}-{}", name, timestamp),
            name: name.to_string(),
            score,
            date: DateTime::from_timestamp_millis(timestamp)
                .unwrap()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            timestamp,
        }
    }

    fn utc_engine() -> RankingEngine {
        RankingEngine::default().with_display_offset(FixedOffset::east_opt(0).unwrap())
    }

    fn names(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_score_then_recency() {
        let engine = utc_engine();
        let leads = vec![lead("Acme", 28, 1_000), lead("Beta", 12, 2_000), lead("Gamma", 28, 3_000)];
        let sorted = engine.sort(&leads);
        assert_eq!(names(&sorted), vec!["Gamma", "Acme", "Beta"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let engine = utc_engine();
        let mut first = lead("First", 20, 5_000);
        first.id = "1".to_string();
        let mut second = lead("Second", 20, 5_000);
        second.id = "2".to_string();
        let leads = vec![lead("Low", 11, 9_000), first, second, lead("Top", 30, 1)];

        let once = engine.sort(&leads);
        assert_eq!(names(&once), vec!["Top", "First", "Second", "Low"]);
        assert_eq!(engine.sort(&once), once);
    }

    #[test]
    fn test_filter_blank_term_borrows_input() {
        let engine = utc_engine();
        let leads = vec![lead("Acme", 20, 1)];
        assert!(matches!(engine.filter(&leads, ""), Cow::Borrowed(_)));
        assert!(matches!(engine.filter(&leads, "   "), Cow::Borrowed(_)));
        assert_eq!(engine.filter(&leads, "").as_ref(), leads.as_slice());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let engine = utc_engine();
        let leads = vec![lead("acme corp", 20, 1), lead("Beta", 20, 2), lead("ACME Labs", 15, 3)];
        let filtered = engine.filter(&leads, "ACME");
        assert_eq!(names(&filtered), vec!["acme corp", "ACME Labs"]);
        assert!(engine.filter(&leads, "  corp ").len() == 1);
        assert!(engine.filter(&leads, "zeta").is_empty());
    }

    #[test]
    fn test_statistics_empty_is_zero() {
        let stats = utc_engine().compute_statistics(&[]);
        assert_eq!(stats, RankingStatistics::default());
        assert_eq!(stats.average_score, 0.0);
    }

    #[test]
    fn test_statistics_average_and_tiers() {
        let engine = utc_engine();
        let leads = vec![lead("a", 10, 1), lead("b", 20, 2), lead("c", 30, 3)];
        let stats = engine.compute_statistics(&leads);
        assert_eq!(stats.total_leads, 3);
        assert_eq!(stats.average_score, 20.0);
        assert_eq!(stats.high_priority_count, 1);
        assert_eq!(stats.medium_priority_count, 1);
        assert_eq!(stats.low_priority_count, 1);
    }

    #[test]
    fn test_statistics_average_rounds_to_one_decimal() {
        let engine = utc_engine();
        let leads = vec![lead("a", 10, 1), lead("b", 10, 2), lead("c", 11, 3)];
        // 31 / 3 = 10.333...
        assert_eq!(engine.compute_statistics(&leads).average_score, 10.3);
        let leads = vec![lead("a", 25, 1), lead("b", 26, 2)];
        assert_eq!(engine.compute_statistics(&leads).average_score, 25.5);
        let leads = vec![lead("a", 20, 1), lead("b", 20, 2), lead("c", 21, 3)];
        // 61 / 3 = 20.333...
        assert_eq!(engine.compute_statistics(&leads).average_score, 20.3);
    }

    #[test]
    fn test_classify_boundaries() {
        let engine = utc_engine();
        assert_eq!(engine.classify(25).as_str(), "alta");
        assert_eq!(engine.classify(24).as_str(), "media");
        assert_eq!(engine.classify(15).as_str(), "media");
        assert_eq!(engine.classify(14).as_str(), "baixa");
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = RankingEngine::new(PriorityThresholds { high: 22, medium: 14 });
        assert_eq!(engine.classify(22), PriorityTier::Alta);
        assert_eq!(engine.classify(14), PriorityTier::Media);
        assert_eq!(engine.classify(13), PriorityTier::Baixa);
    }

    #[test]
    fn test_format_display_date() {
        let engine = utc_engine();
        let l = lead("a", 20, 1_792_418_700_000);
        assert_eq!(engine.format_display_date(&l), "19/10/2026, 14:05");

        let sao_paulo = utc_engine().with_display_offset(FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(sao_paulo.format_display_date(&l), "19/10/2026, 11:05");
    }
}
