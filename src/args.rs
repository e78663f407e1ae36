// Command-line surface for the analysis binary.
use clap::Parser;
use std::path::PathBuf;

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "complaint_breakdown",
    about = "Break down citizen complaints by subcategory per atoll and island"
)]
pub struct Args {
    /// Complaint table (.csv, .xlsx or .xls) with category, subcategory, person_id,
    /// household_id, row_id, island and atoll columns.
    pub complaints: PathBuf,

    /// Translation table (.csv, .xlsx or .xls): category, subcategory, category_en, subcategory_en.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Population table (.csv, .xlsx or .xls): atoll and/or island, total_population, total_households.
    #[arg(long)]
    pub population: Option<PathBuf>,

    /// Where to write the JSON result.
    #[arg(long, default_value = "complaint_analysis.json")]
    pub out: String,

    /// Also write an HTML report to this path.
    #[arg(long)]
    pub html: Option<String>,

    /// Subcategories kept per location in each ranking.
    #[arg(long, default_value_t = complaint_breakdown::config::DEFAULT_TOP_N)]
    pub top: usize,

    /// Subcategories per location shown in the console preview.
    #[arg(long, default_value_t = 3)]
    pub preview: usize,

    /// Only log warnings and errors.
    #[arg(long)]
    pub quiet: bool,
}
