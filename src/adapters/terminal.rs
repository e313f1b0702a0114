use crate::core::{
    CsvExport, Dialogs, ExportSink, Lead, Navigator, Notification, NotificationKind, RankingEngine,
    RankingStatistics, RankingView, Result, Tab,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Prints the ranking table and statistics to stdout; errors go to stderr.
pub struct TerminalView {
    engine: RankingEngine,
    show_stats: bool,
    show_table: bool,
}

impl TerminalView {
    pub fn new(engine: RankingEngine) -> Self {
        Self {
            engine,
            show_stats: true,
            show_table: true,
        }
    }

    pub fn stats_only(mut self) -> Self {
        self.show_table = false;
        self
    }

    pub fn table_only(mut self) -> Self {
        self.show_stats = false;
        self
    }

    fn format_row(&self, position: usize, lead: &Lead) -> String {
        format!(
            "{:>4}º  {:<40}  {:>3}  {:<6}  {}",
            position,
            truncate(&lead.name, 40),
            lead.score,
            self.engine.classify(lead.score).as_str(),
            self.engine.format_display_date(lead)
        )
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

impl RankingView for TerminalView {
    fn render_table(&mut self, leads: &[Lead]) {
        if !self.show_table {
            return;
        }
        if leads.is_empty() {
            println!("Nenhum lead encontrado.");
            return;
        }

        println!(
            "{:>5}  {:<40}  {:>3}  {:<6}  {}",
            "Pos.", "Nome da Empresa", "Pts", "Tier", "Data da Triagem"
        );
        for (index, lead) in leads.iter().enumerate() {
            println!("{}", self.format_row(index + 1, lead));
        }
    }

    fn render_stats(&mut self, stats: &RankingStatistics) {
        if !self.show_stats || stats.total_leads == 0 {
            return;
        }
        println!(
            "Total de Leads: {} | Média Geral: {} | Alta: {} | Média: {} | Baixa: {}",
            stats.total_leads,
            stats.average_score,
            stats.high_priority_count,
            stats.medium_priority_count,
            stats.low_priority_count
        );
    }

    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message),
            NotificationKind::Error => eprintln!("{}", notification.message),
        }
    }

    fn set_query_text(&mut self, _text: &str) {}
}

/// Dialogs answered from command-line flags, falling back to stdin prompts.
pub struct TerminalDialogs {
    preset_name: Option<String>,
    assume_yes: bool,
}

impl TerminalDialogs {
    pub fn new(preset_name: Option<String>, assume_yes: bool) -> Self {
        Self {
            preset_name,
            assume_yes,
        }
    }

    fn prompt(question: &str) -> Option<String> {
        print!("{}", question);
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Dialogs for TerminalDialogs {
    fn request_company_name(&mut self, score: u32) -> Option<String> {
        if let Some(name) = self.preset_name.take() {
            return Some(name);
        }
        Self::prompt(&format!(
            "Nome da empresa para a pontuação {} (vazio + EOF cancela): ",
            score
        ))
    }

    fn confirm_clear(&mut self) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::prompt("Limpar todo o histórico? Esta ação não pode ser desfeita [s/N]: ")
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes"))
            .unwrap_or(false)
    }
}

/// For front-ends that never prompt: every name request cancels and every
/// clear request is declined.
#[derive(Debug, Default)]
pub struct NoDialogs;

impl Dialogs for NoDialogs {
    fn request_company_name(&mut self, score: u32) -> Option<String> {
        tracing::debug!("Name dialog for score {} cancelled: no prompt available", score);
        None
    }

    fn confirm_clear(&mut self) -> bool {
        false
    }
}

/// The CLI has no tabs; switching only shows up in the debug log.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn switch_to_tab(&mut self, tab: Tab) {
        tracing::debug!("Switching to tab '{}'", tab.name());
    }
}

/// Writes exports into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, export: &CsvExport) -> Result<String> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&export.filename);
        fs::write(&path, export.as_bytes())?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Acme", 10), "Acme");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("exports"));
        let export = CsvExport {
            filename: "ranking-leads-2026-10-19.csv".to_string(),
            content: "\u{FEFF}\"a\"".to_string(),
        };

        let location = sink.deliver(&export).unwrap();
        let written = fs::read(&location).unwrap();
        assert_eq!(written, export.as_bytes());
        assert!(location.ends_with("ranking-leads-2026-10-19.csv"));
    }

    #[test]
    fn test_no_dialogs_cancel_and_decline() {
        let mut dialogs = NoDialogs;
        assert_eq!(dialogs.request_company_name(20), None);
        assert!(!dialogs.confirm_clear());
    }

    #[test]
    fn test_preset_name_is_used_once() {
        let mut dialogs = TerminalDialogs::new(Some("Acme".to_string()), true);
        assert_eq!(dialogs.request_company_name(20).as_deref(), Some("Acme"));
        assert!(dialogs.confirm_clear());
    }
}
