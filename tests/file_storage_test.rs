use lead_ranking::adapters::memory::{RecordingNavigator, RecordingView, ScriptedDialogs};
use lead_ranking::adapters::terminal::{DirectorySink, NoDialogs};
use lead_ranking::config::{ranking_engine, RankingSettings};
use lead_ranking::core::store::DEFAULT_STORAGE_KEY;
use lead_ranking::core::ConfigProvider;
use lead_ranking::{Collaborators, Lead, LeadRankingSystem, LeadStore, LocalStorage};
use std::collections::HashSet;
use tempfile::TempDir;

#[test]
fn test_collection_survives_reopening() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = LeadStore::new(LocalStorage::new(temp_dir.path()), DEFAULT_STORAGE_KEY);
        assert!(store.is_available());
        store.save("Acme", 28).unwrap();
        store.save("Beta", 12).unwrap();
    }

    let reopened = LeadStore::new(LocalStorage::new(temp_dir.path()), DEFAULT_STORAGE_KEY);
    let leads = reopened.load_all();
    assert_eq!(leads.len(), 2);
    let ids: HashSet<&str> = leads.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids.len(), 2);

    let raw = std::fs::read_to_string(temp_dir.path().join("leadRankingData.json")).unwrap();
    let parsed: Vec<Lead> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, leads);
}

#[test]
fn test_foreign_collection_round_trips_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let original = r#"[{"id":"m1x2y3abc","name":"Legacy Ltda","score":25,"date":"2025-03-01T12:30:00.000Z","timestamp":1740832200000}]"#;
    std::fs::write(temp_dir.path().join("leadRankingData.json"), original).unwrap();

    let store = LeadStore::new(LocalStorage::new(temp_dir.path()), DEFAULT_STORAGE_KEY);
    store.save("Novo", 18).unwrap();

    let leads = store.load_all();
    assert_eq!(leads.len(), 2);
    let legacy = serde_json::to_string(&vec![leads[0].clone()]).unwrap();
    assert_eq!(legacy, original);
}

#[test]
fn test_unusable_directory_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let store = LeadStore::new(LocalStorage::new(&blocker), DEFAULT_STORAGE_KEY);
    assert!(!store.is_available());
    assert!(store.load_all().is_empty());
    assert!(store.save("Acme", 20).is_err());
}

#[test]
fn test_export_writes_file_into_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let settings = RankingSettings {
        data_dir: temp_dir.path().join("data").display().to_string(),
        export_dir: temp_dir.path().join("exports").display().to_string(),
        utc_offset_minutes: Some(-180),
        ..RankingSettings::default()
    };

    let engine = ranking_engine(&settings);
    let store = LeadStore::new(LocalStorage::new(settings.data_dir()), settings.storage_key());
    let dialogs = ScriptedDialogs::new();
    dialogs.push_name(Some("Acme")).push_name(Some("Beta"));

    let ui = Collaborators {
        view: Box::new(RecordingView::new()),
        dialogs: Box::new(dialogs),
        navigator: Box::new(RecordingNavigator::new()),
        sink: Box::new(DirectorySink::new(settings.export_dir())),
    };
    let mut system = LeadRankingSystem::new(store, engine, settings.debounce(), ui);

    system.save_analysis_result(22).unwrap();
    system.save_analysis_result(17).unwrap();

    let location = system.export_data().unwrap();
    assert!(location.contains("ranking-leads-"));
    assert!(location.ends_with(".csv"));

    let bytes = std::fs::read(&location).unwrap();
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);

    let text = String::from_utf8(bytes).unwrap();
    let rows: Vec<&str> = text.split('\n').collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with(r#""1","Acme","22","Média Prioridade","#));
    assert!(rows[2].starts_with(r#""2","Beta","17","Baixa Prioridade","#));
}

#[test]
fn test_promptless_front_end_searches_and_exports_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let export_dir = temp_dir.path().join("exports");

    let seed = LeadStore::new(LocalStorage::new(&data_dir), DEFAULT_STORAGE_KEY);
    seed.save("Acme", 28).unwrap();
    seed.save("Beta", 12).unwrap();

    let store = LeadStore::new(LocalStorage::new(&data_dir), DEFAULT_STORAGE_KEY);
    let view = RecordingView::new();
    let ui = Collaborators {
        view: Box::new(view.clone()),
        dialogs: Box::new(NoDialogs),
        navigator: Box::new(RecordingNavigator::new()),
        sink: Box::new(DirectorySink::new(&export_dir)),
    };
    let mut system = LeadRankingSystem::new(
        store,
        ranking_engine(&RankingSettings::default()),
        std::time::Duration::from_millis(300),
        ui,
    );
    system.load_and_display_data();

    system.on_search_input("acm", std::time::Instant::now());
    assert!(system.flush_search());
    let shown = view.last_table().unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].name, "Acme");

    assert!(system.save_analysis_result(20).is_none());
    assert!(!system.show_clear_confirmation());
    assert_eq!(system.store().load_all().len(), 2);

    let location = system.export_data().unwrap();
    assert!(location.starts_with(&export_dir.display().to_string()));
}
