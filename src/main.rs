// Entry point: load the tables named on the command line, run the analysis,
// write the JSON result (and optionally the HTML report), and print a short
// console preview.
mod args;

use args::Args;
use chrono::Local;
use clap::Parser;
use complaint_breakdown::output::{preview_rows, preview_table_rows, write_json, write_text};
use complaint_breakdown::render_html::render_html;
use complaint_breakdown::util::format_int;
use complaint_breakdown::{analyze_files, AnalysisConfig, AnalysisInputs, AnalysisResult};
use log::info;
use std::process::ExitCode;

const MAX_PREVIEW_ROWS: usize = 60;

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Print overall totals and the top subcategories of each location.
fn print_summary(result: &AnalysisResult, per_location: usize) {
    println!("Summary Statistics");
    println!("Total Complaints: {}", format_int(result.total_complaints));
    println!("Total Individuals: {}", format_int(result.total_individuals));
    println!("Total Households: {}\n", format_int(result.total_households));

    println!("Top Subcategories by Atoll ({} atolls)\n", result.by_atoll.len());
    preview_table_rows(&preview_rows(&result.by_atoll, per_location), MAX_PREVIEW_ROWS);

    println!("Top Subcategories by Island ({} islands)\n", result.by_island.len());
    preview_table_rows(&preview_rows(&result.by_island, per_location), MAX_PREVIEW_ROWS);
}

/// Write the JSON result and, when requested, the HTML report.
fn handle_outputs(args: &Args, result: &AnalysisResult) -> bool {
    let mut ok = true;
    if let Err(e) = write_json(&args.out, result) {
        eprintln!("Write error: {}", e);
        ok = false;
    } else {
        info!("wrote {}", args.out);
    }
    if let Some(path) = &args.html {
        let html = render_html(result, Local::now().naive_local());
        if let Err(e) = write_text(path, &html) {
            eprintln!("Write error: {}", e);
            ok = false;
        } else {
            info!("wrote {}", path);
        }
    }
    ok
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet);

    let config = match AnalysisConfig::with_top_n(args.top) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    let inputs = AnalysisInputs {
        complaints: args.complaints.clone(),
        translations: args.translations.clone(),
        population: args.population.clone(),
    };

    let outcome = analyze_files(&inputs, &config);
    let result = match outcome.data {
        Some(result) if outcome.success => result,
        _ => {
            eprintln!("{}", outcome.error.as_deref().unwrap_or("Error processing file"));
            return ExitCode::FAILURE;
        }
    };

    print_summary(&result, args.preview);
    if !handle_outputs(&args, &result) {
        return ExitCode::FAILURE;
    }
    println!("(Full results exported to {})", args.out);
    ExitCode::SUCCESS
}
