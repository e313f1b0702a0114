use crate::core::{Classification, Result};
use crate::utils::error::LeadError;

/// Outcome of the qualification questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageResult {
    pub total: u32,
    pub classification: Classification,
}

impl TriageResult {
    pub fn verdict(&self) -> &'static str {
        match self.classification {
            Classification::Alta => "🚀 ALTA PRIORIDADE - Prospect ideal para abordagem imediata",
            Classification::Media => "⚖️ MÉDIA PRIORIDADE - Bom potencial, vale investir tempo",
            Classification::Baixa => "⚠️ BAIXA PRIORIDADE - Considerar apenas se sobrar tempo",
            Classification::NaoPriorizar => "❌ NÃO PRIORIZAR - Focar em prospects melhores",
        }
    }
}

/// Sums the selected answer values into a total score.
pub fn evaluate(answers: &[u32]) -> Result<TriageResult> {
    if answers.is_empty() {
        return Err(LeadError::validation(
            "answers",
            "Responda ao menos uma pergunta da triagem",
        ));
    }

    let total = answers
        .iter()
        .try_fold(0u32, |acc, value| acc.checked_add(*value))
        .ok_or_else(|| LeadError::validation("answers", "Pontuação fora do intervalo"))?;

    Ok(TriageResult {
        total,
        classification: Classification::from_score(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_answers() {
        let result = evaluate(&[3, 3, 3, 3, 3, 3, 3, 3, 2]).unwrap();
        assert_eq!(result.total, 26);
        assert_eq!(result.classification, Classification::Alta);
        assert!(result.verdict().starts_with("🚀"));
    }

    #[test]
    fn test_verdicts_follow_cut_offs() {
        assert_eq!(evaluate(&[20]).unwrap().classification, Classification::Media);
        assert_eq!(evaluate(&[15]).unwrap().classification, Classification::Baixa);
        assert_eq!(
            evaluate(&[10, 4]).unwrap().classification,
            Classification::NaoPriorizar
        );
    }

    #[test]
    fn test_empty_answers_rejected() {
        assert!(matches!(evaluate(&[]), Err(LeadError::ValidationError { .. })));
    }
}
