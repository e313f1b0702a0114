use crate::core::export::CsvExporter;
use crate::core::search::{SearchController, SearchOutcome};
use crate::core::store::LeadStore;
use crate::core::{
    Clock, Dialogs, ExportSink, Lead, Navigator, Notification, RankingEngine, RankingView, Storage,
    SystemClock, Tab,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Collaborators supplied by the presentation layer.
pub struct Collaborators {
    pub view: Box<dyn RankingView>,
    pub dialogs: Box<dyn Dialogs>,
    pub navigator: Box<dyn Navigator>,
    pub sink: Box<dyn ExportSink>,
}

/// Entry points the view layer calls in response to user actions.
///
/// None of them return errors: every failure is turned into a notification
/// and the system stays usable.
pub struct LeadRankingSystem<S: Storage> {
    store: LeadStore<S>,
    engine: RankingEngine,
    search: SearchController,
    exporter: CsvExporter,
    ui: Collaborators,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> LeadRankingSystem<S> {
    pub fn new(
        store: LeadStore<S>,
        engine: RankingEngine,
        debounce: Duration,
        ui: Collaborators,
    ) -> Self {
        Self {
            store,
            search: SearchController::new(engine.clone(), debounce),
            exporter: CsvExporter::new(engine.clone()),
            engine,
            ui,
            clock: Arc::new(SystemClock),
        }
    }

    /// Clock used to date exports.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &LeadStore<S> {
        &self.store
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn load_and_display_data(&mut self) {
        let leads = self.store.load_all();
        self.update_display(leads);
    }

    /// Refreshes the search controller's list without rendering.
    pub fn reload(&mut self) -> usize {
        let sorted = self.engine.sort(&self.store.load_all());
        let count = sorted.len();
        self.search.update_leads(sorted);
        count
    }

    fn update_display(&mut self, leads: Vec<Lead>) {
        let sorted = self.engine.sort(&leads);
        let stats = self.engine.compute_statistics(&sorted);

        self.ui.view.render_table(&sorted);
        self.ui.view.render_stats(&stats);
        self.search.update_leads(sorted);
    }

    pub fn refresh_ranking(&mut self) {
        self.load_and_display_data();
        self.clear_search_text();
        self.ui
            .view
            .notify(Notification::success("🔄 Ranking atualizado!"));
    }

    /// Asks for a company name and stores the score under it.
    ///
    /// Returns the stored lead, or `None` when the dialog was cancelled or
    /// the save failed.
    pub fn save_analysis_result(&mut self, score: u32) -> Option<Lead> {
        let company_name = loop {
            match self.ui.dialogs.request_company_name(score) {
                None => {
                    tracing::debug!("Save dialog cancelled for score {}", score);
                    return None;
                }
                Some(name) if name.trim().is_empty() => {
                    self.ui
                        .view
                        .notify(Notification::error("Por favor, digite o nome da empresa"));
                }
                Some(name) => break name.trim().to_string(),
            }
        };

        match self.store.save(&company_name, score) {
            Ok(lead) => {
                tracing::info!("Lead '{}' saved with score {}", lead.name, lead.score);
                self.ui.view.notify(Notification::success(format!(
                    "✅ {} salvo no ranking!",
                    company_name
                )));
                self.load_and_display_data();
                self.clear_search_text();
                self.ui.navigator.switch_to_tab(Tab::Ranking);
                Some(lead)
            }
            Err(e) => {
                tracing::warn!("Failed to save lead '{}': {}", company_name, e);
                self.ui.view.notify(Notification::error(format!(
                    "❌ Erro ao salvar: {}",
                    e.user_friendly_message()
                )));
                None
            }
        }
    }

    /// Guarded entry to the destructive clear: refuses when there is
    /// nothing stored, otherwise asks for confirmation first.
    pub fn show_clear_confirmation(&mut self) -> bool {
        if !self.store.has_data() {
            self.ui
                .view
                .notify(Notification::error("❌ Não há dados para limpar"));
            return false;
        }

        if !self.ui.dialogs.confirm_clear() {
            tracing::debug!("Clear cancelled by user");
            return false;
        }

        self.clear_all_data()
    }

    pub fn clear_all_data(&mut self) -> bool {
        match self.store.clear_all() {
            Ok(()) => {
                tracing::info!("Lead history cleared");
                self.load_and_display_data();
                self.clear_search_text();
                self.ui
                    .view
                    .notify(Notification::success("🗑️ Histórico limpo com sucesso!"));
                true
            }
            Err(e) => {
                tracing::warn!("Failed to clear leads: {}", e);
                self.ui.view.notify(Notification::error(format!(
                    "❌ Erro ao limpar: {}",
                    e.user_friendly_message()
                )));
                false
            }
        }
    }

    /// Exports every stored lead; returns where the file was delivered.
    pub fn export_data(&mut self) -> Option<String> {
        let leads = self.store.load_all();
        if leads.is_empty() {
            self.ui
                .view
                .notify(Notification::error("❌ Não há dados para exportar"));
            return None;
        }

        let today = self.clock.now().date_naive();
        let delivered = self
            .exporter
            .export(&leads, today)
            .and_then(|export| self.ui.sink.deliver(&export));

        match delivered {
            Ok(location) => {
                tracing::info!("Exported {} leads to {}", leads.len(), location);
                self.ui
                    .view
                    .notify(Notification::success("📊 Dados exportados com sucesso!"));
                Some(location)
            }
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                self.ui.view.notify(Notification::error(format!(
                    "❌ Erro ao exportar: {}",
                    e.user_friendly_message()
                )));
                None
            }
        }
    }

    pub fn on_tab_selected(&mut self, tab: Tab) {
        if tab == Tab::Ranking {
            self.load_and_display_data();
        }
    }

    pub fn on_search_input(&mut self, term: &str, now: Instant) {
        self.search.on_query_changed(term, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.next_deadline()
    }

    /// Renders the pending search if its quiet period is over.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(outcome) => {
                self.render_outcome(&outcome);
                true
            }
            None => false,
        }
    }

    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(outcome) => {
                self.render_outcome(&outcome);
                true
            }
            None => false,
        }
    }

    /// Resets the query and re-renders the unfiltered list.
    pub fn clear_search(&mut self) {
        let outcome = self.search.clear();
        self.ui.view.set_query_text("");
        self.render_outcome(&outcome);
    }

    fn clear_search_text(&mut self) {
        self.search.clear();
        self.ui.view.set_query_text("");
    }

    fn render_outcome(&mut self, outcome: &SearchOutcome) {
        self.ui.view.render_table(&outcome.leads);
        self.ui.view.render_stats(&outcome.statistics);
    }
}
