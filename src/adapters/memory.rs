//! In-process implementations of the ports, for embedding and tests.

use crate::core::{
    Clock, CsvExport, Dialogs, ExportSink, Lead, Navigator, Notification, RankingStatistics,
    RankingView, Result, Storage, Tab,
};
use crate::utils::error::LeadError;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shared key/value map. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A medium that rejects every operation, like a blocked browser store.
    pub fn unavailable() -> Self {
        Self {
            items: Arc::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(LeadError::storage_unavailable("memory storage disabled"));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(lock(&self.items).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        lock(&self.items).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check()?;
        lock(&self.items).remove(key);
        Ok(())
    }
}

/// Clock that only moves when told to, optionally by a fixed step per read.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    step: chrono::Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, chrono::Duration::zero())
    }

    pub fn with_step(start: DateTime<Utc>, step: chrono::Duration) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
            step,
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = lock(&self.now);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = lock(&self.now);
        let current = *now;
        *now += self.step;
        current
    }
}

/// Everything a [`RecordingView`] was asked to show.
#[derive(Debug, Clone, Default)]
pub struct ViewLog {
    pub tables: Vec<Vec<Lead>>,
    pub stats: Vec<RankingStatistics>,
    pub notifications: Vec<Notification>,
    pub query_texts: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    log: Arc<Mutex<ViewLog>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewLog {
        lock(&self.log).clone()
    }

    pub fn last_table(&self) -> Option<Vec<Lead>> {
        lock(&self.log).tables.last().cloned()
    }

    pub fn last_stats(&self) -> Option<RankingStatistics> {
        lock(&self.log).stats.last().copied()
    }

    pub fn last_notification(&self) -> Option<Notification> {
        lock(&self.log).notifications.last().cloned()
    }
}

impl RankingView for RecordingView {
    fn render_table(&mut self, leads: &[Lead]) {
        lock(&self.log).tables.push(leads.to_vec());
    }

    fn render_stats(&mut self, stats: &RankingStatistics) {
        lock(&self.log).stats.push(*stats);
    }

    fn notify(&mut self, notification: Notification) {
        lock(&self.log).notifications.push(notification);
    }

    fn set_query_text(&mut self, text: &str) {
        lock(&self.log).query_texts.push(text.to_string());
    }
}

/// Answers dialogs from pre-loaded queues. An exhausted name queue cancels;
/// an exhausted confirmation queue declines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    names: Arc<Mutex<VecDeque<Option<String>>>>,
    confirmations: Arc<Mutex<VecDeque<bool>>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_name(&self, name: Option<&str>) -> &Self {
        lock(&self.names).push_back(name.map(str::to_string));
        self
    }

    pub fn push_confirmation(&self, answer: bool) -> &Self {
        lock(&self.confirmations).push_back(answer);
        self
    }
}

impl Dialogs for ScriptedDialogs {
    fn request_company_name(&mut self, _score: u32) -> Option<String> {
        lock(&self.names).pop_front().flatten()
    }

    fn confirm_clear(&mut self) -> bool {
        lock(&self.confirmations).pop_front().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    tabs: Arc<Mutex<Vec<Tab>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> Vec<Tab> {
        lock(&self.tabs).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn switch_to_tab(&mut self, tab: Tab) {
        lock(&self.tabs).push(tab);
    }
}

/// Keeps delivered exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    exports: Arc<Mutex<Vec<CsvExport>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exports(&self) -> Vec<CsvExport> {
        lock(&self.exports).clone()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, export: &CsvExport) -> Result<String> {
        lock(&self.exports).push(export.clone());
        Ok(format!("memory://{}", export.filename))
    }
}
