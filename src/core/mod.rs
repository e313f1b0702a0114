pub mod export;
pub mod ranking;
pub mod search;
pub mod store;
pub mod system;
pub mod triage;

pub use crate::domain::model::{
    Classification, CsvExport, Lead, Notification, NotificationKind, PriorityTier,
    RankingStatistics, Tab,
};
pub use crate::domain::ports::{
    Clock, ConfigProvider, Dialogs, ExportSink, Navigator, RankingView, Storage, SystemClock,
};
pub use crate::utils::error::Result;
pub use ranking::{PriorityThresholds, RankingEngine};
