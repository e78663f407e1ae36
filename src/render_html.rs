// Standalone HTML report for an analysis result.
//
// Output is asset-free and deterministic for a given `generated_at`. All
// location and subcategory names are HTML-escaped.
use crate::types::{AnalysisResult, LocationStatistics, NamedCount, NamedPct};
use crate::util::{format_int, format_number};
use chrono::NaiveDateTime;
use std::fmt::Write as _;

const TITLE: &str = "Citizen Complaint Analysis Report";

/// Escape text for HTML.
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn pct_cell(list: &[NamedPct], idx: usize) -> String {
    // A missing basis renders as 0%.
    let v = list.get(idx).map(|p| p.pct).unwrap_or(0.0);
    format!("{}%", format_number(v, 2))
}

pub struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(32 * 1024),
        }
    }

    pub fn start(&mut self, generated_at: NaiveDateTime) {
        let _ = write!(
            self.buf,
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
             <style>\
             body{{font-family:Arial,sans-serif;margin:20px;}}\
             h1,h2,h3{{color:#2c3e50;}}\
             table{{border-collapse:collapse;width:100%;margin:20px 0;}}\
             th,td{{border:1px solid #ddd;padding:8px;text-align:left;}}\
             th{{background-color:#3498db;color:white;}}\
             .location-section{{margin:30px 0;}}\
             .analysis-section{{margin:20px 0;}}\
             </style></head><body><h1>{}</h1><p>Generated on: {}</p>",
            TITLE,
            TITLE,
            generated_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</body></html>");
        self.buf
    }

    pub fn section_summary(&mut self, result: &AnalysisResult) {
        let _ = write!(
            self.buf,
            "<h2>Summary Statistics</h2>\
             <p>Total Complaints: {}</p>\
             <p>Total Individuals: {}</p>\
             <p>Total Households: {}</p>",
            format_int(result.total_complaints),
            format_int(result.total_individuals),
            format_int(result.total_households)
        );
    }

    fn table_complaints(&mut self, counts: &[NamedCount], pcts: &[NamedPct]) {
        self.buf.push_str(
            "<div class=\"analysis-section\">\
             <h4>Top Complaint Subcategories (by total complaints)</h4>\
             <table><tr><th>Subcategory</th><th>Count</th><th>Percentage of Total Complaints</th></tr>",
        );
        for (i, c) in counts.iter().enumerate() {
            let _ = write!(
                self.buf,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                esc(&c.name),
                format_int(c.count),
                pct_cell(pcts, i)
            );
        }
        self.buf.push_str("</table></div>");
    }

    #[allow(clippy::too_many_arguments)]
    fn table_with_population(
        &mut self,
        heading: &str,
        count_label: &str,
        surveyed_label: &str,
        population_label: &str,
        counts: &[NamedCount],
        pcts: &[NamedPct],
        pop_pcts: &[NamedPct],
    ) {
        let _ = write!(
            self.buf,
            "<div class=\"analysis-section\"><h4>{}</h4>\
             <table><tr><th>Subcategory</th><th>{}</th><th>{}</th><th>{}</th></tr>",
            heading, count_label, surveyed_label, population_label
        );
        for (i, c) in counts.iter().enumerate() {
            let _ = write!(
                self.buf,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                esc(&c.name),
                format_int(c.count),
                pct_cell(pcts, i),
                pct_cell(pop_pcts, i)
            );
        }
        self.buf.push_str("</table></div>");
    }

    pub fn section_locations(&mut self, heading: &str, stats: &LocationStatistics) {
        let _ = write!(
            self.buf,
            "<div class=\"location-section\"><h2>{}</h2>",
            esc(heading)
        );
        for (location, s) in stats {
            let _ = write!(self.buf, "<h3>{}</h3>", esc(location));
            self.table_complaints(&s.subcategory_counts, &s.subcategory_percentages);
            self.table_with_population(
                "Top Complaint Subcategories (by unique individuals)",
                "Unique Individuals",
                "% of Surveyed Individuals",
                "% of Total Population",
                &s.individual_counts,
                &s.individual_percentages,
                &s.individual_pop_percentages,
            );
            self.table_with_population(
                "Top Complaint Subcategories (by unique households)",
                "Unique Households",
                "% of Surveyed Households",
                "% of Total Households",
                &s.household_counts,
                &s.household_percentages,
                &s.household_pop_percentages,
            );
        }
        self.buf.push_str("</div>");
    }
}

impl Default for HtmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the full report: summary, then every atoll, then every island.
pub fn render_html(result: &AnalysisResult, generated_at: NaiveDateTime) -> String {
    let mut b = HtmlBuilder::new();
    b.start(generated_at);
    b.section_summary(result);
    b.section_locations("Analysis by Atoll", &result.by_atoll);
    b.section_locations("Analysis by Island", &result.by_island);
    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationStats;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn sample() -> AnalysisResult {
        let mut s = LocationStats::default();
        s.subcategory_counts = vec![NamedCount { name: "Water <supply>".into(), count: 2 }];
        s.subcategory_percentages = vec![NamedPct { name: "Water <supply>".into(), pct: 100.0 }];
        s.individual_counts = vec![NamedCount { name: "Water <supply>".into(), count: 1 }];
        s.individual_percentages = vec![NamedPct { name: "Water <supply>".into(), pct: 50.0 }];
        let mut result = AnalysisResult {
            total_complaints: 2,
            total_individuals: 2,
            total_households: 1,
            ..Default::default()
        };
        result.by_atoll.insert("AtollA".into(), s);
        result
    }

    #[test]
    fn escapes_names_and_stamps_time() {
        let html = render_html(&sample(), at());
        assert!(html.contains("Generated on: 2024-03-01 09:30:00"));
        assert!(html.contains("Water &lt;supply&gt;"));
        assert!(!html.contains("Water <supply>"));
        assert!(html.contains("<h3>AtollA</h3>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn missing_population_basis_renders_zero() {
        let html = render_html(&sample(), at());
        assert!(html.contains("<td>50.00%</td><td>0.00%</td>"));
    }

    #[test]
    fn same_input_same_output() {
        assert_eq!(render_html(&sample(), at()), render_html(&sample(), at()));
    }
}
