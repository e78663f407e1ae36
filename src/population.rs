// Population overlay: percentages of the real population rather than of the
// surveyed sample.
use crate::aggregate::{percentages_of, LocationDimension};
use crate::types::{LocationStatistics, PopulationEntry, PopulationInfo};
use log::debug;
use std::collections::HashMap;

/// Population and household totals per atoll and per island.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    atolls: HashMap<String, PopulationEntry>,
    islands: HashMap<String, PopulationEntry>,
}

impl PopulationTable {
    /// Register one population row under each non-blank location it names.
    /// An earlier row for the same location takes precedence.
    pub fn insert_row(&mut self, atoll: String, island: String, entry: PopulationEntry) {
        if !atoll.is_empty() {
            self.atolls.entry(atoll).or_insert(entry);
        }
        if !island.is_empty() {
            self.islands.entry(island).or_insert(entry);
        }
    }

    pub fn lookup(&self, dimension: LocationDimension, location: &str) -> Option<PopulationEntry> {
        let map = match dimension {
            LocationDimension::Atoll => &self.atolls,
            LocationDimension::Island => &self.islands,
        };
        map.get(location).copied()
    }

    pub fn atoll_count(&self) -> usize {
        self.atolls.len()
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }
}

/// Attach population percentages to each location's already-ranked
/// individual and household lists.
///
/// A basis stays empty when the location has no entry or the relevant total is
/// missing or zero.
pub fn normalize(
    mut stats: LocationStatistics,
    dimension: LocationDimension,
    population: Option<&PopulationTable>,
) -> LocationStatistics {
    let Some(table) = population else {
        return stats;
    };

    let mut unmatched = 0usize;
    for (location, s) in stats.iter_mut() {
        let Some(entry) = table.lookup(dimension, location) else {
            unmatched += 1;
            continue;
        };
        s.population_info = PopulationInfo {
            total_population: entry.total_population,
            total_households: entry.total_households,
        };
        if let Some(total) = entry.total_population.filter(|t| *t > 0) {
            s.individual_pop_percentages = percentages_of(&s.individual_counts, total);
        }
        if let Some(total) = entry.total_households.filter(|t| *t > 0) {
            s.household_pop_percentages = percentages_of(&s.household_counts, total);
        }
    }
    if unmatched > 0 {
        debug!(
            "{} of {} {} locations have no population entry",
            unmatched,
            stats.len(),
            dimension
        );
    }
    stats
}
