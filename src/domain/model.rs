use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u32 = 10;
pub const MAX_SCORE: u32 = 30;
pub const MAX_NAME_CHARS: usize = 100;

/// One qualification record as persisted in the ranking collection.
///
/// `date` is kept as the ISO-8601 text it was stored with so that
/// collections written elsewhere round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub date: String,
    pub timestamp: i64,
}

impl Lead {
    /// Calendar instant of creation, falling back to `timestamp` when
    /// `date` is not valid RFC 3339.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| DateTime::from_timestamp_millis(self.timestamp))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingStatistics {
    pub total_leads: usize,
    pub average_score: f64,
    pub high_priority_count: usize,
    pub medium_priority_count: usize,
    pub low_priority_count: usize,
}

/// Tier shown in the ranking view (high >= 25, medium >= 15 by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Alta,
    Media,
    Baixa,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Alta => "alta",
            PriorityTier::Media => "media",
            PriorityTier::Baixa => "baixa",
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-way classification written to exports and shown by the triage form.
///
/// Its cut-offs (25/20/15) differ from [`PriorityTier`]'s and are kept
/// separate on purpose; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Alta,
    Media,
    Baixa,
    NaoPriorizar,
}

impl Classification {
    pub const ALTA_MIN: u32 = 25;
    pub const MEDIA_MIN: u32 = 20;
    pub const BAIXA_MIN: u32 = 15;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::ALTA_MIN {
            Classification::Alta
        } else if score >= Self::MEDIA_MIN {
            Classification::Media
        } else if score >= Self::BAIXA_MIN {
            Classification::Baixa
        } else {
            Classification::NaoPriorizar
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Classification::Alta => "Alta Prioridade",
            Classification::Media => "Média Prioridade",
            Classification::Baixa => "Baixa Prioridade",
            Classification::NaoPriorizar => "Não Priorizar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Triage,
    Ranking,
}

impl Tab {
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Triage => "triagem",
            Tab::Ranking => "ranking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message surfaced to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// CSV bytes plus the filename suggested for saving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}
