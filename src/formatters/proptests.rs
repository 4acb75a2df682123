//! Property-based tests for list bounds

use super::*;
use proptest::prelude::*;

fn arb_level() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![
        Just(RiskLevel::Baixo),
        Just(RiskLevel::Medio),
        Just(RiskLevel::Alto),
    ]
}

fn arb_zone() -> impl Strategy<Value = Zone> {
    ("[A-Za-z ]{1,20}", arb_level()).prop_map(|(location, level)| Zone::new(location, level))
}

fn arb_report() -> impl Strategy<Value = Report> {
    (
        "[A-Za-z]{1,12}",
        "[a-zà-ú ]{0,120}",
        arb_level(),
        prop_oneof![Just("Cazenga"), Just("Viana"), Just("Cacuaco")],
    )
        .prop_map(|(title, description, level, municipality)| {
            Report::new(title, description, level, municipality)
        })
}

proptest! {
    #[test]
    fn zones_never_exceed_cap(
        zones in prop::collection::vec(arb_zone(), 0..40),
        filter in prop::option::of(arb_level()),
    ) {
        let text = format_zones(&zones, filter);
        let entries = text
            .lines()
            .filter(|l| l.split_once(". ").is_some_and(|(n, _)| n.parse::<usize>().is_ok()))
            .count();
        prop_assert!(entries <= MAX_ZONES);
    }

    #[test]
    fn zones_entries_match_filter(zones in prop::collection::vec(arb_zone(), 1..20), level in arb_level()) {
        let text = format_zones(&zones, Some(level));
        for other in [RiskLevel::Baixo, RiskLevel::Medio, RiskLevel::Alto] {
            if other != level {
                let marker = format!("({other})");
                prop_assert!(!text.contains(&marker));
            }
        }
    }

    #[test]
    fn reports_show_single_entry(
        reports in prop::collection::vec(arb_report(), 0..20),
        municipality in prop_oneof![Just("Cazenga"), Just("todos"), Just("Belas")],
    ) {
        let text = format_reports(&reports, municipality);
        prop_assert!(text.matches("(Risco: ").count() <= 1);
    }

    #[test]
    fn report_description_bounded(report in arb_report()) {
        let text = format_reports(std::slice::from_ref(&report), "todos");
        let first_line = text.lines().next().unwrap_or_default();
        let overhead = report.title.chars().count()
            + ": ".len()
            + " (Risco: )".len()
            + report.risk_level.label().chars().count();
        prop_assert!(first_line.chars().count() <= overhead + MAX_DESCRIPTION_CHARS + 3);
    }
}
