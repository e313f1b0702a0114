use crate::core::{Classification, CsvExport, Lead, RankingEngine, Result};
use crate::utils::error::LeadError;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const UTF8_BOM: char = '\u{FEFF}';

const HEADERS: [&str; 5] = [
    "Posição",
    "Nome da Empresa",
    "Pontuação",
    "Classificação",
    "Data da Triagem",
];

/// Serializes a ranked lead list to spreadsheet-friendly CSV.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    engine: RankingEngine,
}

impl CsvExporter {
    pub fn new(engine: RankingEngine) -> Self {
        Self { engine }
    }

    pub fn filename_for(export_date: NaiveDate) -> String {
        format!("ranking-leads-{}.csv", export_date.format("%Y-%m-%d"))
    }

    pub fn export(&self, leads: &[Lead], export_date: NaiveDate) -> Result<CsvExport> {
        let content = self.to_csv(leads)?;
        Ok(CsvExport {
            filename: Self::filename_for(export_date),
            content,
        })
    }

    /// BOM, quoted header, then one quoted row per lead in ranking order.
    /// Rows are joined with `\n`; there is no trailing newline.
    pub fn to_csv(&self, leads: &[Lead]) -> Result<String> {
        if leads.is_empty() {
            return Err(LeadError::EmptyExportError);
        }

        let sorted = self.engine.sort(leads);

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(HEADERS)?;
        for (index, lead) in sorted.iter().enumerate() {
            let position = (index + 1).to_string();
            let score = lead.score.to_string();
            let date = self.engine.format_display_date(lead);
            writer.write_record([
                position.as_str(),
                lead.name.as_str(),
                score.as_str(),
                Classification::from_score(lead.score).text(),
                date.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| LeadError::IoError(e.into_error()))?;
        let mut body = String::from_utf8(bytes)?;
        if body.ends_with('\n') {
            body.pop();
        }

        tracing::debug!("Encoded {} leads to CSV ({} bytes)", sorted.len(), body.len());

        let mut content = String::with_capacity(body.len() + UTF8_BOM.len_utf8());
        content.push(UTF8_BOM);
        content.push_str(&body);
        Ok(content)
    }
}
