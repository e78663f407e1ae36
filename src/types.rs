use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tabled::Tabled;

/// Column names every complaint table must carry, in the order they are
/// reported when missing.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "category",
    "subcategory",
    "person_id",
    "household_id",
    "row_id",
    "island",
    "atoll",
];

pub const TRANSLATION_COLUMNS: [&str; 4] =
    ["category", "subcategory", "category_en", "subcategory_en"];

pub const POPULATION_TOTAL_COLUMNS: [&str; 2] = ["total_population", "total_households"];

#[derive(Debug, Deserialize)]
pub struct RawComplaintRow {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub person_id: Option<String>,
    pub household_id: Option<String>,
    pub row_id: Option<String>,
    pub island: Option<String>,
    pub atoll: Option<String>,
}

/// One complaint, with the English labels resolved.
///
/// Every field is an opaque, trimmed string; an empty string means the cell
/// was blank in the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintRecord {
    pub category: String,
    pub subcategory: String,
    pub person_id: String,
    pub household_id: String,
    pub row_id: String,
    pub island: String,
    pub atoll: String,
    pub category_en: String,
    pub subcategory_en: String,
}

#[derive(Debug, Deserialize)]
pub struct RawTranslationRow {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub category_en: Option<String>,
    pub subcategory_en: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPopulationRow {
    pub atoll: Option<String>,
    pub island: Option<String>,
    pub total_population: Option<String>,
    pub total_households: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationEntry {
    pub total_population: Option<u64>,
    pub total_households: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPct {
    pub name: String,
    pub pct: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_households: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_complaints: usize,
    pub total_individuals: usize,
    pub total_households: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationStats {
    pub subcategory_counts: Vec<NamedCount>,
    pub subcategory_percentages: Vec<NamedPct>,
    pub individual_counts: Vec<NamedCount>,
    pub individual_percentages: Vec<NamedPct>,
    pub individual_pop_percentages: Vec<NamedPct>,
    pub household_counts: Vec<NamedCount>,
    pub household_percentages: Vec<NamedPct>,
    pub household_pop_percentages: Vec<NamedPct>,
    pub population_info: PopulationInfo,
    pub summary: Summary,
}

/// Per-location statistics for one grouping dimension, ordered by location
/// name.
pub type LocationStatistics = BTreeMap<String, LocationStats>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_complaints: usize,
    pub total_individuals: usize,
    pub total_households: usize,
    pub by_atoll: LocationStatistics,
    pub by_island: LocationStatistics,
}

/// What the analysis entry point hands back: either a full result or the
/// reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SubcategoryPreviewRow {
    #[serde(rename = "Location")]
    #[tabled(rename = "Location")]
    pub location: String,
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Subcategory")]
    #[tabled(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Complaints")]
    #[tabled(rename = "Complaints")]
    pub complaints: String,
    #[serde(rename = "PctComplaints")]
    #[tabled(rename = "PctComplaints")]
    pub pct_complaints: String,
}
