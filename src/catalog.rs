//! Risk zones and community reports
//!
//! The data is simulated; in production it would come from the health
//! authority's feed. The catalog is injected into the dialog engine so
//! tests can supply their own lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level, numeric 1-3 in the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Baixo = 1,
    Medio = 2,
    Alto = 3,
}

impl RiskLevel {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(RiskLevel::Baixo),
            2 => Some(RiskLevel::Medio),
            3 => Some(RiskLevel::Alto),
            _ => None,
        }
    }

    /// Case-insensitive label lookup: alto=3, médio=2, baixo=1
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "alto" => Some(RiskLevel::Alto),
            "médio" | "medio" => Some(RiskLevel::Medio),
            "baixo" => Some(RiskLevel::Baixo),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Baixo => "Baixo",
            RiskLevel::Medio => "Médio",
            RiskLevel::Alto => "Alto",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub location: String,
    /// 1 = Baixo, 2 = Médio, 3 = Alto
    pub risk_level: u8,
}

impl Zone {
    pub fn new(location: impl Into<String>, risk: RiskLevel) -> Self {
        Self {
            location: location.into(),
            risk_level: risk.level(),
        }
    }

    pub fn risk_label(&self) -> &'static str {
        RiskLevel::from_level(self.risk_level).map_or("Desconhecido", RiskLevel::label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub municipality: String,
}

impl Report {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        risk_level: RiskLevel,
        municipality: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            risk_level,
            municipality: municipality.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub zones: Vec<Zone>,
    pub reports: Vec<Report>,
}

impl Catalog {
    /// Built-in sample data for Luanda
    pub fn sample() -> Self {
        let zones = vec![
            Zone::new("Cazenga - Hoji ya Henda", RiskLevel::Alto),
            Zone::new("Cacuaco - Sequele", RiskLevel::Alto),
            Zone::new("Viana - Zango", RiskLevel::Medio),
            Zone::new("Sambizanga - Ngola Kiluanje", RiskLevel::Alto),
            Zone::new("Belas - Kilamba", RiskLevel::Baixo),
            Zone::new("Talatona - Camama", RiskLevel::Baixo),
            Zone::new("Kilamba Kiaxi - Golfe", RiskLevel::Medio),
            Zone::new("Rangel - Terra Nova", RiskLevel::Medio),
            Zone::new("Cacuaco - Kikolo", RiskLevel::Alto),
            Zone::new("Viana - Estalagem", RiskLevel::Alto),
        ];

        let reports = vec![
            Report::new(
                "Surto de malária",
                "Aumento de casos de malária reportados no centro de saúde local após as chuvas.",
                RiskLevel::Alto,
                "Cazenga",
            ),
            Report::new(
                "Água parada",
                "Valas de drenagem entupidas com água parada junto ao mercado.",
                RiskLevel::Medio,
                "Cazenga",
            ),
            Report::new(
                "Lixo acumulado",
                "Contentores cheios há duas semanas na rua principal do bairro.",
                RiskLevel::Medio,
                "Cacuaco",
            ),
            Report::new(
                "Casos de cólera",
                "Suspeita de casos de cólera ligados a um poço contaminado.",
                RiskLevel::Alto,
                "Cacuaco",
            ),
            Report::new(
                "Mosquiteiros distribuídos",
                "Campanha de distribuição de mosquiteiros concluída no Zango.",
                RiskLevel::Baixo,
                "Viana",
            ),
        ];

        Self { zones, reports }
    }
}
