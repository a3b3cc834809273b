use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DemandKind {
    Daily,
    Monthly,
}

impl DemandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandKind::Daily => "daily",
            DemandKind::Monthly => "monthly",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DemandRow {
    pub date: String,
    pub ingredient: String,
    pub consumption: f64,
    #[serde(rename = "type")]
    pub kind: DemandKind,
    pub high_risk: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Season {
    Summer,
    Winter,
    Spring,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Fall => "fall",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemandUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub date: String,
    pub season: Option<Season>,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DemandSummary {
    pub unique_ingredients: usize,
    pub total_consumption: f64,
    pub high_risk_count: usize,
}

impl DemandSummary {
    pub fn from_rows(rows: &[DemandRow]) -> Self {
        DemandSummary {
            unique_ingredients: rows
                .iter()
                .map(|row| row.ingredient.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
            total_consumption: rows.iter().map(|row| row.consumption).sum(),
            high_risk_count: rows.iter().filter(|row| row.high_risk).count(),
        }
    }
}
