use clap::Parser;
use lead_ranking::adapters::terminal::{DirectorySink, LogNavigator, TerminalDialogs, TerminalView};
use lead_ranking::config::{ranking_engine, Command};
use lead_ranking::core::{triage, ConfigProvider, Storage};
use lead_ranking::utils::logger;
use lead_ranking::{CliConfig, Collaborators, LeadRankingSystem, LeadStore, LocalStorage};
use std::time::Instant;

fn main() {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting lead-ranking CLI");
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let engine = ranking_engine(&settings);
    let store = LeadStore::new(LocalStorage::new(settings.data_dir()), settings.storage_key());
    if !store.is_available() {
        eprintln!(
            "⚠️ Armazenamento local não disponível em {}",
            settings.data_dir()
        );
    }

    let (preset_name, assume_yes) = match &config.command {
        Command::Save { name, .. } | Command::Triage { name, .. } => (name.clone(), false),
        Command::Clear { yes } => (None, *yes),
        _ => (None, false),
    };
    let export_dir = match &config.command {
        Command::Export {
            output_dir: Some(dir),
        } => dir.clone(),
        _ => settings.export_dir().to_string(),
    };
    let view = match &config.command {
        Command::List { .. } => TerminalView::new(engine.clone()),
        Command::Stats { .. } => TerminalView::new(engine.clone()).stats_only(),
        _ => TerminalView::new(engine.clone()).table_only(),
    };

    let ui = Collaborators {
        view: Box::new(view),
        dialogs: Box::new(TerminalDialogs::new(preset_name, assume_yes)),
        navigator: Box::new(LogNavigator),
        sink: Box::new(DirectorySink::new(export_dir)),
    };
    let mut system = LeadRankingSystem::new(store, engine, settings.debounce(), ui);

    match config.command {
        Command::Save { score, .. } => {
            system.save_analysis_result(score);
        }
        Command::Triage { answers, save, .. } => match triage::evaluate(&answers) {
            Ok(result) => {
                println!("Pontuação total: {}", result.total);
                println!("Classificação: {}", result.verdict());
                if save {
                    system.save_analysis_result(result.total);
                }
            }
            Err(e) => eprintln!("❌ {}", e.user_friendly_message()),
        },
        Command::List { search } => show(&mut system, search.as_deref()),
        Command::Stats { search, json: true } => {
            system.reload();
            let outcome = system.search().evaluate(search.as_deref().unwrap_or(""));
            match serde_json::to_string_pretty(&outcome.statistics) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("❌ {}", e),
            }
        }
        Command::Stats { search, .. } => show(&mut system, search.as_deref()),
        Command::Export { .. } => {
            if let Some(location) = system.export_data() {
                println!("📁 {}", location);
            }
        }
        Command::Clear { .. } => {
            system.show_clear_confirmation();
        }
    }
}

/// Renders the ranking, optionally narrowed by a search term.
fn show<S: Storage>(system: &mut LeadRankingSystem<S>, search: Option<&str>) {
    match search {
        Some(term) => {
            system.reload();
            system.on_search_input(term, Instant::now());
            system.flush_search();
        }
        None => system.load_and_display_data(),
    }
}
