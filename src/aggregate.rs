// Per-location subcategory distributions.
//
// For one grouping dimension, records are partitioned by location and three
// rankings are built per location: complaints, distinct individuals and
// distinct households per subcategory.
use crate::types::{ComplaintRecord, LocationStatistics, LocationStats, NamedCount, NamedPct, Summary};
use crate::util::percentage;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationDimension {
    Atoll,
    Island,
}

impl LocationDimension {
    pub const ALL: [LocationDimension; 2] = [LocationDimension::Atoll, LocationDimension::Island];

    pub fn as_str(self) -> &'static str {
        match self {
            LocationDimension::Atoll => "atoll",
            LocationDimension::Island => "island",
        }
    }

    pub fn location_of(self, record: &ComplaintRecord) -> &str {
        match self {
            LocationDimension::Atoll => &record.atoll,
            LocationDimension::Island => &record.island,
        }
    }
}

impl fmt::Display for LocationDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Default)]
struct SubcategoryAcc<'a> {
    name: &'a str,
    complaints: usize,
    persons: HashSet<&'a str>,
    households: HashSet<&'a str>,
}

/// Count each subcategory with `metric`, sort descending and keep the first
/// `top_n`. The sort is stable, so equal counts stay in first-appearance order.
fn ranked<F>(accs: &[SubcategoryAcc<'_>], top_n: usize, metric: F) -> Vec<NamedCount>
where
    F: Fn(&SubcategoryAcc<'_>) -> usize,
{
    let mut counts: Vec<NamedCount> = accs
        .iter()
        .map(|a| NamedCount {
            name: a.name.to_string(),
            count: metric(a),
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

pub(crate) fn percentages_of(counts: &[NamedCount], whole: u64) -> Vec<NamedPct> {
    counts
        .iter()
        .map(|c| NamedPct {
            name: c.name.clone(),
            pct: percentage(c.count, whole),
        })
        .collect()
}

/// Partition `records` by location, preserving first-appearance order.
/// Records with a blank location are left out.
fn group_by_location<'a>(
    records: &'a [ComplaintRecord],
    dimension: LocationDimension,
) -> Vec<(&'a str, Vec<&'a ComplaintRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&ComplaintRecord>)> = Vec::new();
    for r in records {
        let loc = dimension.location_of(r);
        if loc.is_empty() {
            continue;
        }
        let i = *index.entry(loc).or_insert_with(|| {
            groups.push((loc, Vec::new()));
            groups.len() - 1
        });
        groups[i].1.push(r);
    }
    groups
}

fn location_stats<'a>(rows: &[&'a ComplaintRecord], top_n: usize) -> LocationStats {
    let mut order: HashMap<&'a str, usize> = HashMap::new();
    let mut accs: Vec<SubcategoryAcc<'a>> = Vec::new();
    let mut persons: HashSet<&'a str> = HashSet::new();
    let mut households: HashSet<&'a str> = HashSet::new();

    for &r in rows {
        if !r.person_id.is_empty() {
            persons.insert(&r.person_id);
        }
        if !r.household_id.is_empty() {
            households.insert(&r.household_id);
        }
        if r.subcategory_en.is_empty() {
            continue;
        }
        let i = *order.entry(r.subcategory_en.as_str()).or_insert_with(|| {
            accs.push(SubcategoryAcc {
                name: &r.subcategory_en,
                ..Default::default()
            });
            accs.len() - 1
        });
        let acc = &mut accs[i];
        acc.complaints += 1;
        if !r.person_id.is_empty() {
            acc.persons.insert(&r.person_id);
        }
        if !r.household_id.is_empty() {
            acc.households.insert(&r.household_id);
        }
    }

    let subcategory_counts = ranked(&accs, top_n, |a| a.complaints);
    let individual_counts = ranked(&accs, top_n, |a| a.persons.len());
    let household_counts = ranked(&accs, top_n, |a| a.households.len());

    let summary = Summary {
        total_complaints: rows.len(),
        total_individuals: persons.len(),
        total_households: households.len(),
    };

    LocationStats {
        subcategory_percentages: percentages_of(&subcategory_counts, summary.total_complaints as u64),
        individual_percentages: percentages_of(&individual_counts, summary.total_individuals as u64),
        household_percentages: percentages_of(&household_counts, summary.total_households as u64),
        subcategory_counts,
        individual_counts,
        household_counts,
        summary,
        ..Default::default()
    }
}

/// Build statistics for every location observed in `dimension`.
///
/// Population bases are left empty here; see [`crate::population::normalize`].
pub fn aggregate(
    records: &[ComplaintRecord],
    dimension: LocationDimension,
    top_n: usize,
) -> LocationStatistics {
    group_by_location(records, dimension)
        .into_iter()
        .map(|(loc, rows)| (loc.to_string(), location_stats(&rows, top_n)))
        .collect()
}
