pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, RankingSettings};
pub use crate::core::{
    export::CsvExporter,
    search::SearchController,
    store::LeadStore,
    system::{Collaborators, LeadRankingSystem},
    Lead, PriorityTier, RankingEngine, RankingStatistics,
};
pub use utils::error::{LeadError, Result};
