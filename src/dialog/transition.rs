//! Pure dialog transitions
//!
//! `(flow, input) -> Step`. No I/O happens here; steps that need an SMS or
//! an analysis describe it and the engine performs it.

use super::menus::{
    EMERGENCY_CONTACTS, HEALTH_TIPS, HEALTH_TIPS_MENU, INVALID_SELECTION, MAIN_MENU,
    MISSING_SYMPTOMS, MISSING_ZONE_PROBLEM, MUNICIPALITIES, MUNICIPALITY_PROMPT,
    RISK_LEVELS, RISK_LEVEL_PROMPT, SYMPTOMS_PROMPT, ZONE_PROBLEM_PROMPT,
};
use super::Flow;
use crate::analysis::AnalysisKind;
use crate::catalog::{Catalog, RiskLevel};
use crate::formatters::{format_reports, format_zones};

/// What the dialog does next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Show a prompt and wait at `next`
    Prompt { text: String, next: Flow },
    /// Close the dialog with `text`
    End { text: String },
    /// Close the dialog with `text` after texting `sms` to the caller
    EndWithSms { text: String, sms: String },
    /// Close the dialog with the analysis of `description`, texted as well
    EndWithAnalysis {
        kind: AnalysisKind,
        description: String,
    },
}

impl Step {
    fn prompt(text: &str, next: Flow) -> Self {
        Step::Prompt {
            text: text.to_string(),
            next,
        }
    }

    fn end(text: &str) -> Self {
        Step::End {
            text: text.to_string(),
        }
    }

    /// Same text on screen and by SMS
    fn end_with_copy(text: String) -> Self {
        Step::EndWithSms {
            sms: text.clone(),
            text,
        }
    }

    pub fn main_menu() -> Self {
        Self::prompt(MAIN_MENU, Flow::Menu)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Step::Prompt { .. })
    }
}

/// Last `*`-separated token of the accumulated input, or "" for empty text
pub fn last_input(text: &str) -> &str {
    text.rsplit('*').next().unwrap_or_default()
}

/// Decide the next step for a session at `flow` receiving `input`
pub fn transition(flow: Flow, input: &str, catalog: &Catalog) -> Step {
    // An empty token outside the menu means the gateway replayed or resumed
    // the dialog; start over from the menu.
    if input.is_empty() && !flow.accepts_empty_input() {
        return Step::main_menu();
    }

    let choice = input.trim();

    match flow {
        Flow::Initial | Flow::Unknown => Step::main_menu(),
        Flow::Menu if input.is_empty() => Step::main_menu(),
        Flow::Menu => menu_selection(choice),
        Flow::ZonesRiskLevelSelection => risk_level_selection(choice, catalog),
        Flow::ReportsMunicipalitySelection => municipality_selection(choice, catalog),
        Flow::SymptomsInput => description_input(
            choice,
            AnalysisKind::MalariaSymptoms,
            MISSING_SYMPTOMS,
        ),
        Flow::ZoneProblemInput => {
            description_input(choice, AnalysisKind::ZoneSolution, MISSING_ZONE_PROBLEM)
        }
        Flow::HealthTipsMenu => health_tip_selection(choice),
    }
}

// ============================================================================
// Per-state handlers
// ============================================================================

fn menu_selection(choice: &str) -> Step {
    match choice {
        "1" => Step::prompt(RISK_LEVEL_PROMPT, Flow::ZonesRiskLevelSelection),
        "2" => Step::prompt(MUNICIPALITY_PROMPT, Flow::ReportsMunicipalitySelection),
        "3" => Step::prompt(SYMPTOMS_PROMPT, Flow::SymptomsInput),
        "4" => Step::prompt(ZONE_PROBLEM_PROMPT, Flow::ZoneProblemInput),
        "5" => Step::prompt(HEALTH_TIPS_MENU, Flow::HealthTipsMenu),
        "6" => Step::end(EMERGENCY_CONTACTS),
        _ => Step::end(INVALID_SELECTION),
    }
}

fn risk_level_selection(choice: &str, catalog: &Catalog) -> Step {
    let filter = match choice {
        "4" => None,
        "5" => return Step::main_menu(),
        _ => {
            let level = menu_index(choice, RISK_LEVELS.len())
                .and_then(|i| RiskLevel::from_label(RISK_LEVELS[i]));
            let Some(level) = level else {
                return Step::end(INVALID_SELECTION);
            };
            Some(level)
        }
    };
    Step::end_with_copy(format_zones(&catalog.zones, filter))
}

fn municipality_selection(choice: &str, catalog: &Catalog) -> Step {
    let municipality = match choice {
        "6" => return Step::main_menu(),
        _ => match menu_index(choice, MUNICIPALITIES.len()) {
            Some(i) => MUNICIPALITIES[i],
            None => return Step::end(INVALID_SELECTION),
        },
    };
    Step::end_with_copy(format_reports(&catalog.reports, municipality))
}

fn description_input(description: &str, kind: AnalysisKind, missing: &str) -> Step {
    if description.is_empty() {
        return Step::end(missing);
    }
    Step::EndWithAnalysis {
        kind,
        description: description.to_string(),
    }
}

fn health_tip_selection(choice: &str) -> Step {
    match choice {
        "4" => Step::main_menu(),
        _ => match menu_index(choice, HEALTH_TIPS.len()) {
            Some(i) => Step::end_with_copy(HEALTH_TIPS[i].to_string()),
            None => Step::end(INVALID_SELECTION),
        },
    }
}

/// Zero-based index for a 1-based option among `count`
fn menu_index(choice: &str, count: usize) -> Option<usize> {
    match choice.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) && !choice.starts_with(['+', '0']) => Some(n - 1),
        _ => None,
    }
}
