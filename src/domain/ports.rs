use crate::domain::model::{CsvExport, Lead, Notification, RankingStatistics, Tab};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Synchronous key/value medium holding serialized collections.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn high_threshold(&self) -> u32;
    fn medium_threshold(&self) -> u32;
    fn utc_offset_minutes(&self) -> Option<i32>;
    fn debounce(&self) -> Duration;
    fn export_dir(&self) -> &str;
}

pub trait RankingView {
    /// `leads` arrive already ranked; position is index + 1.
    fn render_table(&mut self, leads: &[Lead]);
    fn render_stats(&mut self, stats: &RankingStatistics);
    fn notify(&mut self, notification: Notification);
    fn set_query_text(&mut self, text: &str);
}

/// One-shot dialogs: every call opens the dialog once and returns its answer.
pub trait Dialogs {
    /// `None` when the user cancels.
    fn request_company_name(&mut self, score: u32) -> Option<String>;
    fn confirm_clear(&mut self) -> bool;
}

pub trait Navigator {
    fn switch_to_tab(&mut self, tab: Tab);
}

pub trait ExportSink {
    /// Hands the export to the user; returns where it went.
    fn deliver(&mut self, export: &CsvExport) -> Result<String>;
}
