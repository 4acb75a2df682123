//! Dialog flow states

use serde::{Deserialize, Serialize};

/// Node of the menu tree a session is waiting at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Fresh session, nothing shown yet
    #[default]
    Initial,
    Menu,
    ZonesRiskLevelSelection,
    ReportsMunicipalitySelection,
    SymptomsInput,
    ZoneProblemInput,
    HealthTipsMenu,
    /// Tag written by another version of the service; recovered to the menu
    #[serde(other)]
    Unknown,
}

impl Flow {
    #[allow(dead_code)] // Exhaustive list for tests
    pub const ALL: [Flow; 8] = [
        Flow::Initial,
        Flow::Menu,
        Flow::ZonesRiskLevelSelection,
        Flow::ReportsMunicipalitySelection,
        Flow::SymptomsInput,
        Flow::ZoneProblemInput,
        Flow::HealthTipsMenu,
        Flow::Unknown,
    ];

    /// Whether an empty input is expected here (anywhere else it means the
    /// gateway replayed or resumed the dialog and we return to the menu)
    pub fn accepts_empty_input(self) -> bool {
        matches!(self, Flow::Initial | Flow::Menu)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Initial => "initial",
            Flow::Menu => "menu",
            Flow::ZonesRiskLevelSelection => "zones_risk_level_selection",
            Flow::ReportsMunicipalitySelection => "reports_municipality_selection",
            Flow::SymptomsInput => "symptoms_input",
            Flow::ZoneProblemInput => "zone_problem_input",
            Flow::HealthTipsMenu => "health_tips_menu",
            Flow::Unknown => "unknown",
        }
    }
}
