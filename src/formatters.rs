//! Bounded display text for zone and report lists
//!
//! USSD screens hold roughly 180 characters, so lists are capped and
//! descriptions truncated before they reach the dialog.

use crate::catalog::{Report, RiskLevel, Zone};

/// Maximum zones listed on one screen
pub const MAX_ZONES: usize = 5;
/// Report descriptions longer than this are cut and get an ellipsis
pub const MAX_DESCRIPTION_CHARS: usize = 67;

/// Municipality filters that mean "no filter"
const UNFILTERED_MUNICIPALITIES: [&str; 2] = ["outro", "todos"];

/// List zones at `filter` (all zones when None), 1-indexed, at most
/// [`MAX_ZONES`] lines plus a remaining-count footer.
pub fn format_zones(zones: &[Zone], filter: Option<RiskLevel>) -> String {
    let matching: Vec<&Zone> = zones
        .iter()
        .filter(|z| filter.map_or(true, |level| z.risk_level == level.level()))
        .collect();

    if matching.is_empty() {
        return match filter {
            Some(level) => format!("Nenhuma zona de risco {level} encontrada."),
            None => "Nenhuma zona de risco encontrada.".to_string(),
        };
    }

    let mut lines = vec![match filter {
        Some(level) => format!("Zonas de risco {level}:"),
        None => "Zonas de risco:".to_string(),
    }];
    lines.extend(
        matching
            .iter()
            .take(MAX_ZONES)
            .enumerate()
            .map(|(i, z)| format!("{}. {} ({})", i + 1, z.location, z.risk_label())),
    );

    let remaining = matching.len().saturating_sub(MAX_ZONES);
    if remaining > 0 {
        lines.push(format!("... e mais {remaining} zona(s)."));
    }

    lines.join("\n")
}

/// Show the first report for `municipality` ("outro"/"todos" match all),
/// with a remaining-count footer.
pub fn format_reports(reports: &[Report], municipality: &str) -> String {
    let wanted = municipality.trim().to_lowercase();
    let unfiltered = UNFILTERED_MUNICIPALITIES.contains(&wanted.as_str());

    let matching: Vec<&Report> = reports
        .iter()
        .filter(|r| unfiltered || r.municipality.to_lowercase() == wanted)
        .collect();

    let Some(first) = matching.first() else {
        return format!("Nenhum relato encontrado para {municipality}.");
    };

    let mut text = format!(
        "{}: {} (Risco: {})",
        first.title,
        truncate(&first.description, MAX_DESCRIPTION_CHARS),
        first.risk_level
    );

    let remaining = matching.len() - 1;
    if remaining > 0 {
        text.push_str(&format!("\n... e mais {remaining} relato(s)."));
    }

    text
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod proptests;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn zones(n: usize, level: RiskLevel) -> Vec<Zone> {
        (0..n).map(|i| Zone::new(format!("Zona {i}"), level)).collect()
    }

    #[test]
    fn test_zones_filtered_by_level() {
        let catalog = Catalog::sample();
        let text = format_zones(&catalog.zones, Some(RiskLevel::Medio));

        assert!(text.starts_with("Zonas de risco Médio:"));
        assert!(text.contains("1. Viana - Zango (Médio)"));
        assert!(!text.contains("(Alto)"));
        assert!(!text.contains("(Baixo)"));
    }

    #[test]
    fn test_zones_capped_with_footer() {
        let text = format_zones(&zones(8, RiskLevel::Alto), Some(RiskLevel::Alto));
        let entries = text.lines().filter(|l| l.contains("(Alto)")).count();

        assert_eq!(entries, MAX_ZONES);
        assert!(text.contains("5. Zona 4 (Alto)"));
        assert!(!text.contains("Zona 5"));
        assert!(text.ends_with("... e mais 3 zona(s)."));
    }

    #[test]
    fn test_zones_without_filter_lists_all_levels() {
        let mut list = zones(1, RiskLevel::Baixo);
        list.extend(zones(1, RiskLevel::Alto));
        let text = format_zones(&list, None);

        assert_eq!(text, "Zonas de risco:\n1. Zona 0 (Baixo)\n2. Zona 0 (Alto)");
    }

    #[test]
    fn test_zones_none_found_names_filter() {
        let text = format_zones(&zones(3, RiskLevel::Baixo), Some(RiskLevel::Alto));
        assert_eq!(text, "Nenhuma zona de risco Alto encontrada.");
        assert_eq!(format_zones(&[], None), "Nenhuma zona de risco encontrada.");
    }

    #[test]
    fn test_reports_case_insensitive_match() {
        let catalog = Catalog::sample();
        let text = format_reports(&catalog.reports, "cacuaco");

        assert!(text.starts_with("Lixo acumulado: "));
        assert!(text.contains("(Risco: Médio)"));
        assert!(text.ends_with("... e mais 1 relato(s)."));
    }

    #[test]
    fn test_reports_truncate_description() {
        let catalog = Catalog::sample();
        let text = format_reports(&catalog.reports, "Cazenga");
        let expected: String = catalog.reports[0]
            .description
            .chars()
            .take(MAX_DESCRIPTION_CHARS)
            .collect();

        assert!(text.starts_with(&format!("Surto de malária: {expected}... (Risco: Alto)")));
    }

    #[test]
    fn test_reports_short_description_untouched() {
        let reports = vec![Report::new("T", "curta", RiskLevel::Baixo, "Viana")];
        assert_eq!(format_reports(&reports, "Viana"), "T: curta (Risco: Baixo)");
    }

    #[test]
    fn test_reports_todos_and_outro_unfiltered() {
        let catalog = Catalog::sample();
        let all = format_reports(&catalog.reports, "Todos");
        let other = format_reports(&catalog.reports, "outro");

        assert!(all.starts_with("Surto de malária"));
        assert!(all.ends_with("... e mais 4 relato(s)."));
        assert_eq!(all, other);
    }

    #[test]
    fn test_reports_none_found() {
        let catalog = Catalog::sample();
        assert_eq!(
            format_reports(&catalog.reports, "Belas"),
            "Nenhum relato encontrado para Belas."
        );
    }
}
