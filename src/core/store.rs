use crate::core::{Clock, Lead, Result, Storage, SystemClock};
use crate::utils::error::LeadError;
use crate::utils::validation::{validate_lead_name, validate_lead_score};
use chrono::SecondsFormat;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const DEFAULT_STORAGE_KEY: &str = "leadRankingData";

const AVAILABILITY_SUFFIX: &str = "__availability";

static ID_FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Persists leads as one JSON array under a single storage key.
///
/// Every write rewrites the whole collection (read, append, write).
pub struct LeadStore<S: Storage> {
    storage: S,
    storage_key: String,
    available: bool,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> LeadStore<S> {
    pub fn new(storage: S, storage_key: impl Into<String>) -> Self {
        Self::with_clock(storage, storage_key, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: S, storage_key: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let storage_key = storage_key.into();
        let available = Self::check_availability(&storage, &storage_key);
        Self {
            storage,
            storage_key,
            available,
            clock,
        }
    }

    /// Writes and removes a scratch item in the collection's own key namespace.
    fn check_availability(storage: &S, storage_key: &str) -> bool {
        let scratch_key = availability_key(storage_key);
        let result = storage
            .set_item(&scratch_key, "1")
            .and_then(|_| storage.remove_item(&scratch_key));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Local storage not available: {}", e);
                false
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&self, name: &str, score: u32) -> Result<Lead> {
        let name = validate_lead_name(name)?;
        validate_lead_score(score)?;

        if !self.available {
            return Err(LeadError::storage_unavailable(
                "storage availability check failed at start-up",
            ));
        }

        let now = self.clock.now();
        let timestamp = now.timestamp_millis();
        let mut leads = self.read_collection()?;

        let mut id = generate_id(timestamp);
        while leads.iter().any(|lead| lead.id == id) {
            id = generate_id(timestamp);
        }

        let lead = Lead {
            id,
            name: name.to_string(),
            score,
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            timestamp,
        };

        leads.push(lead.clone());
        let json = serde_json::to_string(&leads)?;
        self.storage.set_item(&self.storage_key, &json)?;

        tracing::debug!(
            "Saved lead {} ({}, score {}); collection now holds {}",
            lead.id,
            lead.name,
            lead.score,
            leads.len()
        );
        Ok(lead)
    }

    /// Never fails: an unavailable medium or unreadable data yields an empty list.
    pub fn load_all(&self) -> Vec<Lead> {
        if !self.available {
            return Vec::new();
        }

        match self.read_collection() {
            Ok(leads) => leads,
            Err(e) => {
                tracing::error!("Failed to load leads from '{}': {}", self.storage_key, e);
                Vec::new()
            }
        }
    }

    pub fn clear_all(&self) -> Result<()> {
        if !self.available {
            return Err(LeadError::storage_unavailable(
                "storage availability check failed at start-up",
            ));
        }

        self.storage.remove_item(&self.storage_key)?;
        tracing::debug!("Cleared collection '{}'", self.storage_key);
        Ok(())
    }

    pub fn has_data(&self) -> bool {
        !self.load_all().is_empty()
    }

    fn read_collection(&self) -> Result<Vec<Lead>> {
        match self.storage.get_item(&self.storage_key)? {
            Some(data) if !data.trim().is_empty() => Ok(serde_json::from_str(&data)?),
            _ => Ok(Vec::new()),
        }
    }
}

fn availability_key(storage_key: &str) -> String {
    format!("{}{}", storage_key, AVAILABILITY_SUFFIX)
}

fn random_u64_best_effort() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_be_bytes(bytes),
        Err(_) => {
            let seq = ID_FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() as u64)
                .unwrap_or(0);
            seq.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ nanos
        }
    }
}

/// Base-36 creation millis followed by base-36 random bits.
fn generate_id(timestamp_ms: i64) -> String {
    let mut id = to_base36(timestamp_ms.max(0) as u64);
    id.push_str(&to_base36(random_u64_best_effort()));
    id
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
