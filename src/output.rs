use crate::types::{LocationStatistics, SubcategoryPreviewRow};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn write_text(path: &str, contents: &str) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, contents)?;
    Ok(())
}

/// Flatten the top `per_location` complaint subcategories of every location
/// into table rows for the console preview.
pub fn preview_rows(stats: &LocationStatistics, per_location: usize) -> Vec<SubcategoryPreviewRow> {
    let mut rows = Vec::new();
    for (location, s) in stats {
        for (idx, (count, pct)) in s
            .subcategory_counts
            .iter()
            .zip(&s.subcategory_percentages)
            .take(per_location)
            .enumerate()
        {
            rows.push(SubcategoryPreviewRow {
                location: location.clone(),
                rank: idx + 1,
                subcategory: count.name.clone(),
                complaints: format_int(count.count),
                pct_complaints: format!("{}%", format_number(pct.pct, 2)),
            });
        }
    }
    rows
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
