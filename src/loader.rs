// Reading the complaint, translation and population tables.
//
// Both CSV files and spreadsheets (first sheet of an .xlsx/.xls workbook) are
// read into a `RawTable` first: trimmed header names plus string rows. Schema
// checks and row decoding then run on that one shape, whatever the format.
use crate::error::{AnalysisError, Result};
use crate::labels::TranslationTable;
use crate::population::PopulationTable;
use crate::types::{
    ComplaintRecord, PopulationEntry, RawComplaintRow, RawPopulationRow, RawTranslationRow,
    POPULATION_TOTAL_COLUMNS, REQUIRED_COLUMNS, TRANSLATION_COLUMNS,
};
use crate::util::{clean_cell, parse_total_safe};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Whether the file name carries one of the accepted extensions.
pub fn allowed_file(path: &Path) -> bool {
    extension_of(path)
        .map(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Names from `required` that are absent from `headers`, in `required` order.
pub fn missing_columns(headers: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect()
}

/// A table held in memory as header names and untyped string rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    source: String,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    /// Read a CSV table. Rows may be shorter than the header.
    pub fn from_csv<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| AnalysisError::malformed(source, "headers", e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result
                .map_err(|e| AnalysisError::malformed(source, format!("row {}", idx + 1), e))?;
            rows.push(record);
        }
        Ok(RawTable {
            source: source.to_string(),
            headers,
            rows,
        })
    }

    /// Build a table from a worksheet range; the first row holds the headers.
    pub fn from_sheet(range: &Range<Data>, source: &str) -> Self {
        let mut cells = range.rows();
        let headers = cells
            .next()
            .map(|r| r.iter().map(|c| c.to_string().trim().to_string()).collect())
            .unwrap_or_default();
        let rows = cells
            .map(|r| StringRecord::from(r.iter().map(|c| c.to_string()).collect::<Vec<_>>()))
            .collect();
        RawTable {
            source: source.to_string(),
            headers,
            rows,
        }
    }

    /// Read the first sheet of an .xlsx/.xls workbook.
    fn from_workbook(path: &Path, source: &str) -> Result<Self> {
        // Surface a missing or unreadable file as an I/O error, not a parse one.
        drop(open_file(path)?);
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| AnalysisError::malformed(source, "workbook", e))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => return Err(AnalysisError::malformed(source, "first sheet", e)),
            None => {
                return Err(AnalysisError::malformed(
                    source,
                    "first sheet",
                    "workbook has no sheets",
                ))
            }
        };
        Ok(Self::from_sheet(&range, source))
    }

    /// Read a table file, choosing the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = source_name(path);
        match extension_of(path).as_deref() {
            Some("csv") => Self::from_csv(open_file(path)?, &source),
            Some("xlsx") | Some("xls") => Self::from_workbook(path, &source),
            _ => Err(AnalysisError::UnsupportedFile {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn check_columns(&self, required: &[&str], table: &'static str) -> Result<()> {
        let missing = missing_columns(&self.headers, required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Schema { table, missing })
        }
    }

    /// Decode every row by header name. Unknown columns are ignored and missing
    /// trailing cells read as `None`.
    fn decode<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let header_record = StringRecord::from(self.headers.clone());
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                row.deserialize(Some(&header_record)).map_err(|e| {
                    AnalysisError::malformed(&self.source, format!("row {}", idx + 1), e)
                })
            })
            .collect()
    }
}

/// Turn a raw table into complaint records. The `_en` labels start out as
/// copies of the originals; [`crate::labels::resolve`] replaces them.
pub fn complaints_from_table(table: &RawTable) -> Result<Vec<ComplaintRecord>> {
    table.check_columns(&REQUIRED_COLUMNS, "complaint")?;

    let ignored: Vec<&str> = table
        .headers
        .iter()
        .map(|h| h.as_str())
        .filter(|h| !REQUIRED_COLUMNS.contains(h))
        .collect();
    if !ignored.is_empty() {
        debug!("{}: ignoring extra columns {:?}", table.source, ignored);
    }

    let records: Vec<ComplaintRecord> = table
        .decode::<RawComplaintRow>()?
        .into_iter()
        .map(|row| {
            let category = clean_cell(row.category);
            let subcategory = clean_cell(row.subcategory);
            ComplaintRecord {
                category_en: category.clone(),
                subcategory_en: subcategory.clone(),
                category,
                subcategory,
                person_id: clean_cell(row.person_id),
                household_id: clean_cell(row.household_id),
                row_id: clean_cell(row.row_id),
                island: clean_cell(row.island),
                atoll: clean_cell(row.atoll),
            }
        })
        .collect();

    info!("{}: loaded {} complaint rows", table.source, records.len());
    Ok(records)
}

/// Parse a complaint CSV read from `reader`.
pub fn load_complaints<R: Read>(reader: R, source: &str) -> Result<Vec<ComplaintRecord>> {
    complaints_from_table(&RawTable::from_csv(reader, source)?)
}

pub fn load_complaints_from_path(path: &Path) -> Result<Vec<ComplaintRecord>> {
    complaints_from_table(&RawTable::from_path(path)?)
}

/// Build the translation table. The first entry for a `(category,
/// subcategory)` key wins; later duplicates are dropped with a warning.
pub fn translations_from_table(raw: &RawTable) -> Result<TranslationTable> {
    raw.check_columns(&TRANSLATION_COLUMNS, "translation")?;

    let mut table = TranslationTable::default();
    let mut duplicates = 0usize;
    for row in raw.decode::<RawTranslationRow>()? {
        let inserted = table.insert(
            clean_cell(row.category),
            clean_cell(row.subcategory),
            clean_cell(row.category_en),
            clean_cell(row.subcategory_en),
        );
        if !inserted {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        warn!(
            "{}: {} duplicate translation keys ignored (first entry kept)",
            raw.source, duplicates
        );
    }
    info!("{}: loaded {} translation entries", raw.source, table.len());
    Ok(table)
}

pub fn load_translations<R: Read>(reader: R, source: &str) -> Result<TranslationTable> {
    translations_from_table(&RawTable::from_csv(reader, source)?)
}

pub fn load_translations_from_path(path: &Path) -> Result<TranslationTable> {
    translations_from_table(&RawTable::from_path(path)?)
}

/// Build the population table. It needs an `atoll` and/or `island` column; the
/// total columns are optional and an absent or unparseable total simply means
/// no population basis for that location.
pub fn population_from_table(raw: &RawTable) -> Result<PopulationTable> {
    if !raw.has_column("atoll") && !raw.has_column("island") {
        return Err(AnalysisError::Schema {
            table: "population",
            missing: vec!["atoll or island".to_string()],
        });
    }
    let missing_totals = missing_columns(&raw.headers, &POPULATION_TOTAL_COLUMNS);
    if !missing_totals.is_empty() {
        warn!(
            "{}: no {} column(s); population percentages will be empty",
            raw.source,
            missing_totals.join(", ")
        );
    }

    let mut table = PopulationTable::default();
    for row in raw.decode::<RawPopulationRow>()? {
        let entry = PopulationEntry {
            total_population: parse_total_safe(row.total_population.as_deref()),
            total_households: parse_total_safe(row.total_households.as_deref()),
        };
        table.insert_row(clean_cell(row.atoll), clean_cell(row.island), entry);
    }
    info!(
        "{}: population entries for {} atolls, {} islands",
        raw.source,
        table.atoll_count(),
        table.island_count()
    );
    Ok(table)
}

pub fn load_population<R: Read>(reader: R, source: &str) -> Result<PopulationTable> {
    population_from_table(&RawTable::from_csv(reader, source)?)
}

pub fn load_population_from_path(path: &Path) -> Result<PopulationTable> {
    population_from_table(&RawTable::from_path(path)?)
}
