use complaint_breakdown::loader::{load_complaints_from_path, load_population, load_translations};
use complaint_breakdown::{
    analyze_files, analyze_reader, AnalysisConfig, AnalysisError, AnalysisInputs, AnalysisOutcome,
    AnalysisResult,
};
use std::fs;
use std::path::{Path, PathBuf};

const COMPLAINTS: &str = "\
category,subcategory,person_id,household_id,row_id,island,atoll
A,x,p1,h1,r1,IslandA,AtollA
A,x,p1,h2,r2,IslandA,AtollA
B,y,p2,h1,r3,IslandA,AtollA
B,y,p3,h3,r4,IslandB,AtollA
C,z,p4,h4,r5,IslandC,AtollB
";

const TRANSLATIONS: &str = "\
category,subcategory,category_en,subcategory_en
A,x,Health,Clinic access
B,y,Water,
";

const POPULATION: &str = "\
atoll,island,total_population,total_households
AtollA,,400,\"1,000\"
,IslandA,50,0
";

fn run(
    translations: Option<&str>,
    population: Option<&str>,
    config: &AnalysisConfig,
) -> AnalysisOutcome {
    let tr = translations.map(|t| load_translations(t.as_bytes(), "translations.csv").unwrap());
    let pop = population.map(|p| load_population(p.as_bytes(), "population.csv").unwrap());
    analyze_reader(
        COMPLAINTS.as_bytes(),
        "complaints.csv",
        tr.as_ref(),
        pop.as_ref(),
        config,
    )
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn data(outcome: AnalysisOutcome) -> AnalysisResult {
    assert!(outcome.success, "analysis failed: {:?}", outcome.error);
    outcome.data.expect("successful outcome carries data")
}

fn names_counts(list: &[complaint_breakdown::types::NamedCount]) -> Vec<(String, usize)> {
    list.iter().map(|c| (c.name.clone(), c.count)).collect()
}

#[test]
fn full_pipeline_with_all_tables() {
    let result = data(run(
        Some(TRANSLATIONS),
        Some(POPULATION),
        &AnalysisConfig::default(),
    ));
    assert_eq!(result.total_complaints, 5);
    assert_eq!(result.total_individuals, 4);
    assert_eq!(result.total_households, 4);

    let atoll_a = &result.by_atoll["AtollA"];
    assert_eq!(
        names_counts(&atoll_a.subcategory_counts),
        vec![("Clinic access".to_string(), 2), ("y".to_string(), 2)]
    );
    assert_eq!(
        names_counts(&atoll_a.individual_counts),
        vec![("y".to_string(), 2), ("Clinic access".to_string(), 1)]
    );
    assert_eq!(atoll_a.individual_percentages[0].pct, 66.67);
    assert_eq!(atoll_a.individual_pop_percentages[0].pct, 0.5);
    assert_eq!(atoll_a.household_pop_percentages[0].pct, 0.2);
    assert_eq!(atoll_a.population_info.total_population, Some(400));

    // IslandA has a population entry with zero households.
    let island_a = &result.by_island["IslandA"];
    assert_eq!(island_a.individual_pop_percentages.len(), 2);
    assert!(island_a.household_pop_percentages.is_empty());

    // No population entry at all.
    let atoll_b = &result.by_atoll["AtollB"];
    assert!(atoll_b.individual_pop_percentages.is_empty());
    assert!(atoll_b.household_pop_percentages.is_empty());
    assert_eq!(atoll_b.subcategory_counts[0].name, "z");
}

#[test]
fn output_is_deterministic() {
    let config = AnalysisConfig::default();
    let a = serde_json::to_string(&run(Some(TRANSLATIONS), Some(POPULATION), &config)).unwrap();
    let b = serde_json::to_string(&run(Some(TRANSLATIONS), Some(POPULATION), &config)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn json_shape_matches_contract() {
    let outcome = run(None, None, &AnalysisConfig::default());
    let v = serde_json::to_value(&outcome).unwrap();
    assert_eq!(v["success"], true);
    let island_b = &v["data"]["by_island"]["IslandB"];
    assert_eq!(island_b["subcategory_counts"][0]["name"], "y");
    assert_eq!(island_b["subcategory_counts"][0]["count"], 1);
    assert_eq!(island_b["subcategory_percentages"][0]["pct"], 100.0);
    assert_eq!(island_b["individual_pop_percentages"], serde_json::json!([]));
    assert_eq!(island_b["population_info"], serde_json::json!({}));
    assert_eq!(island_b["summary"]["total_complaints"], 1);
    assert!(v.get("error").is_none());
}

#[test]
fn top_n_limits_every_ranking() {
    let config = AnalysisConfig::with_top_n(1).unwrap();
    let result = data(run(None, None, &config));
    let atoll_a = &result.by_atoll["AtollA"];
    assert_eq!(atoll_a.subcategory_counts.len(), 1);
    assert_eq!(atoll_a.individual_counts.len(), 1);
    assert_eq!(atoll_a.household_counts.len(), 1);
    assert_eq!(atoll_a.subcategory_counts[0].name, "x");
}

#[test]
fn missing_columns_fail_without_data() {
    let csv = "category,subcategory,person_id,row_id,island\nA,x,p1,r1,I\n";
    let outcome = analyze_reader(csv.as_bytes(), "c.csv", None, None, &AnalysisConfig::default());
    assert!(!outcome.success);
    assert!(outcome.data.is_none());
    let msg = outcome.error.unwrap();
    assert!(msg.contains("household_id"));
    assert!(msg.contains("atoll"));
    assert!(!msg.contains("person_id"));
}

#[test]
fn files_on_disk_run_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = AnalysisInputs {
        complaints: write_file(dir.path(), "complaints.csv", COMPLAINTS.as_bytes()),
        translations: Some(write_file(dir.path(), "translations.csv", TRANSLATIONS.as_bytes())),
        population: Some(write_file(dir.path(), "population.csv", POPULATION.as_bytes())),
    };
    let from_files = data(analyze_files(&inputs, &AnalysisConfig::default()));
    let in_memory = data(run(Some(TRANSLATIONS), Some(POPULATION), &AnalysisConfig::default()));
    assert_eq!(from_files.total_complaints, 5);
    assert_eq!(
        serde_json::to_string(&from_files).unwrap(),
        serde_json::to_string(&in_memory).unwrap()
    );
}

#[test]
fn malformed_file_names_its_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bytes = COMPLAINTS.as_bytes().to_vec();
    bytes.extend_from_slice(b"A,\xff\xfe,p9,h9,r9,IslandA,AtollA\n");
    let path = write_file(dir.path(), "complaints.csv", &bytes);

    match load_complaints_from_path(&path) {
        Err(AnalysisError::MalformedInput { source_name, stage, .. }) => {
            assert_eq!(source_name, "complaints.csv");
            assert_eq!(stage, "row 6");
        }
        other => panic!("expected malformed input, got {:?}", other),
    }

    let outcome = analyze_files(
        &AnalysisInputs {
            complaints: path,
            ..Default::default()
        },
        &AnalysisConfig::default(),
    );
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("complaints.csv"));
}

#[test]
fn population_without_totals_leaves_bases_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = AnalysisInputs {
        complaints: write_file(dir.path(), "complaints.csv", COMPLAINTS.as_bytes()),
        translations: None,
        population: Some(write_file(dir.path(), "population.csv", b"atoll\nAtollA\nAtollB\n")),
    };
    let result = data(analyze_files(&inputs, &AnalysisConfig::default()));
    for stats in result.by_atoll.values().chain(result.by_island.values()) {
        assert!(stats.individual_pop_percentages.is_empty());
        assert!(stats.household_pop_percentages.is_empty());
        assert!(stats.population_info.total_population.is_none());
    }
    assert_eq!(result.by_atoll["AtollA"].individual_counts.len(), 2);
}
