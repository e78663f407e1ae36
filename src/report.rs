// Pipeline entry points and result assembly.
//
// `analyze_*` never return an error: every failure is folded into an
// `AnalysisOutcome` with `success == false` and no partial data.
use crate::aggregate::{aggregate, LocationDimension};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::labels::{resolve, TranslationTable};
use crate::loader::{
    load_complaints, load_complaints_from_path, load_population_from_path,
    load_translations_from_path,
};
use crate::population::{normalize, PopulationTable};
use crate::types::{AnalysisOutcome, AnalysisResult, ComplaintRecord, LocationStatistics};
use log::{error, info};
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;

/// Input files for one run. Only the complaint table is required.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInputs {
    pub complaints: PathBuf,
    pub translations: Option<PathBuf>,
    pub population: Option<PathBuf>,
}

impl AnalysisOutcome {
    pub fn success(result: AnalysisResult) -> Self {
        AnalysisOutcome {
            success: true,
            data: Some(result),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisOutcome {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl From<Result<AnalysisResult>> for AnalysisOutcome {
    fn from(r: Result<AnalysisResult>) -> Self {
        match r {
            Ok(result) => AnalysisOutcome::success(result),
            Err(e) => {
                error!("analysis failed: {}", e);
                AnalysisOutcome::failure(format!("Error processing file: {}", e))
            }
        }
    }
}

/// Wrap both location collections and the overall totals into one result.
pub fn assemble(
    records: &[ComplaintRecord],
    by_atoll: LocationStatistics,
    by_island: LocationStatistics,
) -> AnalysisResult {
    let individuals: HashSet<&str> = records
        .iter()
        .filter(|r| !r.person_id.is_empty())
        .map(|r| r.person_id.as_str())
        .collect();
    let households: HashSet<&str> = records
        .iter()
        .filter(|r| !r.household_id.is_empty())
        .map(|r| r.household_id.as_str())
        .collect();
    AnalysisResult {
        total_complaints: records.len(),
        total_individuals: individuals.len(),
        total_households: households.len(),
        by_atoll,
        by_island,
    }
}

/// Resolve labels, aggregate by atoll and island, overlay population totals
/// and assemble the result. Pure with respect to its inputs.
pub fn run(
    records: Vec<ComplaintRecord>,
    translations: Option<&TranslationTable>,
    population: Option<&PopulationTable>,
    config: &AnalysisConfig,
) -> AnalysisResult {
    let records = resolve(records, translations);
    let [by_atoll, by_island] = LocationDimension::ALL.map(|dimension| {
        let stats = aggregate(&records, dimension, config.top_n);
        normalize(stats, dimension, population)
    });
    info!(
        "analysed {} complaints across {} atolls and {} islands",
        records.len(),
        by_atoll.len(),
        by_island.len()
    );
    assemble(&records, by_atoll, by_island)
}

/// Analyse a complaint table read from `reader` with already-loaded auxiliary
/// tables.
pub fn analyze_reader<R: Read>(
    reader: R,
    source: &str,
    translations: Option<&TranslationTable>,
    population: Option<&PopulationTable>,
    config: &AnalysisConfig,
) -> AnalysisOutcome {
    load_complaints(reader, source)
        .map(|records| run(records, translations, population, config))
        .into()
}

fn analyze_files_inner(inputs: &AnalysisInputs, config: &AnalysisConfig) -> Result<AnalysisResult> {
    let records = load_complaints_from_path(&inputs.complaints)?;
    let translations = inputs
        .translations
        .as_deref()
        .map(load_translations_from_path)
        .transpose()?;
    let population = inputs
        .population
        .as_deref()
        .map(load_population_from_path)
        .transpose()?;
    Ok(run(
        records,
        translations.as_ref(),
        population.as_ref(),
        config,
    ))
}

/// Load every input file and analyse it.
pub fn analyze_files(inputs: &AnalysisInputs, config: &AnalysisConfig) -> AnalysisOutcome {
    analyze_files_inner(inputs, config).into()
}
