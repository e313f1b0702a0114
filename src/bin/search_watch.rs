use clap::Parser;
use lead_ranking::adapters::terminal::{DirectorySink, LogNavigator, NoDialogs, TerminalView};
use lead_ranking::config::{ranking_engine, RankingSettings};
use lead_ranking::core::ConfigProvider;
use lead_ranking::utils::logger;
use lead_ranking::{Collaborators, LeadRankingSystem, LeadStore, LocalStorage};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "search-watch")]
#[command(about = "Live ranking search: each stdin line is the current query")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding the lead collection
    #[arg(long)]
    data_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let settings = match RankingSettings::load(args.config.as_deref(), args.data_dir.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Watching searches over {} (debounce {:?})",
        settings.data_dir(),
        settings.debounce()
    );

    let engine = ranking_engine(&settings);
    let store = LeadStore::new(LocalStorage::new(settings.data_dir()), settings.storage_key());
    let ui = Collaborators {
        view: Box::new(TerminalView::new(engine.clone())),
        dialogs: Box::new(NoDialogs),
        navigator: Box::new(LogNavigator),
        sink: Box::new(DirectorySink::new(settings.export_dir())),
    };
    let mut system = LeadRankingSystem::new(store, engine, settings.debounce(), ui);
    system.load_and_display_data();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = system.search_deadline();
        let wait = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at.into()).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            line = lines.next_line() => match line? {
                Some(term) => system.on_search_input(&term, std::time::Instant::now()),
                None => {
                    system.flush_search();
                    break;
                }
            },
            _ = wait => {
                system.poll_search(std::time::Instant::now());
            }
        }
    }

    Ok(())
}
