//! Integration tests for the batch driver
//!
//! These tests run the complete load → transform → store pipeline on the
//! fixture files in `testdata/raw` and inspect the processed output.

use heritage_etl::config::EtlConfig;
use heritage_etl::dataset::DatasetKind;
use heritage_etl::error::EtlError;
use heritage_etl::pipeline::{DatasetOutcome, process_file, run_batch};
use heritage_etl::store::{processed_path, read_processed};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_config(processed: &Path) -> EtlConfig {
    EtlConfig {
        raw_dir: PathBuf::from("testdata/raw"),
        processed_dir: processed.to_path_buf(),
        ..EtlConfig::default()
    }
}

fn header(path: &Path) -> String {
    let text = std::fs::read_to_string(path).expect("processed file should be readable");
    text.lines().next().unwrap_or_default().to_owned()
}

fn processed(dir: &Path, kind: DatasetKind) -> DataFrame {
    read_processed(dir, kind)
        .expect("processed file should parse")
        .expect("processed file should exist")
}

fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .and_then(|c| c.as_materialized_series().cast(&DataType::String))
        .expect("column should exist")
        .str()
        .expect("column should be text")
        .into_iter()
        .map(|v| v.map(ToOwned::to_owned))
        .collect()
}

#[test]
fn test_full_batch_on_fixtures() {
    let out = TempDir::new().expect("temp dir");
    let summary = run_batch(&fixture_config(out.path()), &DatasetKind::ALL);

    assert_eq!(summary.processed(), 4, "{}", summary.summary());
    assert!(summary.is_success());

    assert_eq!(
        header(&processed_path(out.path(), DatasetKind::TourismStatistics)),
        "Year,Domestic_Visitors,International_Visitors,Revenue_Crores,Total_Visitors,International_Percentage"
    );
    assert_eq!(
        header(&processed_path(out.path(), DatasetKind::CulturalSites)),
        "Site_Name,State,Visitors_2022,Latitude,Longitude,UNESCO_Heritage,Region,Popularity"
    );
    assert_eq!(
        header(&processed_path(out.path(), DatasetKind::ArtForms)),
        "Art_Form,Type,Region,Practitioners_Estimate,Govt_Recognition,Tourism_Potential,\
         Tourism_Potential_Score,Recognition_Score,Cultural_Significance"
    );
    assert_eq!(
        header(&processed_path(out.path(), DatasetKind::GovernmentFunding)),
        "Year,Ministry,Budget_Allocation_Crores,Utilization_Percentage,\
         Actual_Utilization_Crores,YoY_Budget_Growth"
    );
}

#[test]
fn test_tourism_output_values() {
    let out = TempDir::new().expect("temp dir");
    run_batch(&fixture_config(out.path()), &[DatasetKind::TourismStatistics]);

    let df = processed(out.path(), DatasetKind::TourismStatistics);
    assert_eq!(df.height(), 13);

    let years: Vec<i64> = df.column("Year").unwrap().i64().unwrap().into_no_null_iter().collect();
    let row = years.iter().position(|y| *y == 2020).expect("2020 row");

    let totals = df.column("Total_Visitors").unwrap().i64().unwrap();
    let pct = df.column("International_Percentage").unwrap().f64().unwrap();
    assert_eq!(totals.get(row), Some(76_500_000));
    assert_eq!(pct.get(row), Some(3.27));
}

#[test]
fn test_sites_output_values() {
    let out = TempDir::new().expect("temp dir");
    run_batch(&fixture_config(out.path()), &[DatasetKind::CulturalSites]);

    let df = processed(out.path(), DatasetKind::CulturalSites);
    let names = strings(&df, "Site_Name");
    let regions = strings(&df, "Region");
    let popularity = strings(&df, "Popularity");

    let find = |site: &str| {
        names
            .iter()
            .position(|n| n.as_deref() == Some(site))
            .expect("site should be present")
    };

    let taj = find("Taj Mahal");
    assert_eq!(regions[taj].as_deref(), Some("North India"));
    assert_eq!(popularity[taj].as_deref(), Some("High"));

    let khajuraho = find("Khajuraho Temples");
    assert_eq!(regions[khajuraho].as_deref(), Some("Central India"));
    assert_eq!(popularity[khajuraho].as_deref(), Some("Low"));

    let konark = find("Konark Sun Temple");
    assert_eq!(regions[konark].as_deref(), Some("East India"));
    assert_eq!(popularity[konark].as_deref(), Some("Medium"));
}

#[test]
fn test_art_forms_output_values() {
    let out = TempDir::new().expect("temp dir");
    run_batch(&fixture_config(out.path()), &[DatasetKind::ArtForms]);

    let df = processed(out.path(), DatasetKind::ArtForms);
    assert_eq!(df.height(), 15);

    let potential = df.column("Tourism_Potential_Score").unwrap().i64().unwrap();
    let recognition = df.column("Recognition_Score").unwrap().i64().unwrap();
    let significance = df.column("Cultural_Significance").unwrap().f64().unwrap();

    for i in 0..df.height() {
        let (p, r) = (potential.get(i).unwrap(), recognition.get(i).unwrap());
        assert_eq!(significance.get(i), Some((p + r) as f64 / 2.0));
    }
    // Bharatanatyam: High (3) + National (2)
    assert_eq!(significance.get(0), Some(2.5));
}

#[test]
fn test_funding_output_values() {
    let out = TempDir::new().expect("temp dir");
    run_batch(&fixture_config(out.path()), &[DatasetKind::GovernmentFunding]);

    let df = processed(out.path(), DatasetKind::GovernmentFunding);
    assert_eq!(df.height(), 24);

    let ministries = strings(&df, "Ministry");
    assert_eq!(ministries[0].as_deref(), Some("Culture"));
    assert_eq!(ministries[8].as_deref(), Some("Textiles"));
    assert_eq!(ministries[16].as_deref(), Some("Tourism"));

    let growth = df.column("YoY_Budget_Growth").unwrap().f64().unwrap();
    assert_eq!(growth.get(0), None, "first Culture year has no growth");
    assert_eq!(growth.get(1), Some(7.14));
    assert_eq!(growth.get(8), None, "first Textiles year has no growth");
    assert_eq!(growth.get(16), None, "first Tourism year has no growth");
    // Tourism 2021: 2700 → 1500
    assert_eq!(growth.get(22), Some(-44.44));

    let actual = df.column("Actual_Utilization_Crores").unwrap().f64().unwrap();
    assert_eq!(actual.get(0), Some(2576.0));
}

#[test]
fn test_batch_isolation() {
    let dir = TempDir::new().expect("temp dir");
    let raw = dir.path().join("raw");
    std::fs::create_dir_all(&raw).unwrap();

    std::fs::copy(
        "testdata/raw/tourism_statistics_mock.csv",
        raw.join("tourism_statistics_mock.csv"),
    )
    .unwrap();
    std::fs::write(
        raw.join("cultural_sites_mock.csv"),
        "Site_Name,State,Visitors_2022,Latitude,Longitude,UNESCO_Heritage\n\
         Taj Mahal,Uttar Pradesh,6500000,27.1751,78.0421,True\n\
         Red Fort,Delhi,4200000\n",
    )
    .unwrap();
    std::fs::write(
        raw.join("art_forms_mock.csv"),
        "Art_Form,Type,Region,Govt_Recognition,Tourism_Potential\n\
         Kathak,Dance,North India,National,Extreme\n",
    )
    .unwrap();

    let config = EtlConfig {
        raw_dir: raw,
        processed_dir: dir.path().join("processed"),
        ..EtlConfig::default()
    };
    let summary = run_batch(&config, &DatasetKind::ALL);

    assert_eq!(
        (summary.processed(), summary.skipped(), summary.failed()),
        (1, 1, 2),
        "{}",
        summary.summary()
    );
    assert!(!summary.is_success());

    match summary.outcome(DatasetKind::CulturalSites) {
        Some(DatasetOutcome::Failed(err)) => {
            assert!(matches!(err.root(), EtlError::MalformedInput { .. }));
            assert!(err.to_string().contains("line 3"), "{err}");
        }
        other => panic!("expected malformed sites, got {other:?}"),
    }
    match summary.outcome(DatasetKind::ArtForms) {
        Some(DatasetOutcome::Failed(err)) => {
            assert!(matches!(err.root(), EtlError::UnknownCategory { .. }));
        }
        other => panic!("expected unknown category, got {other:?}"),
    }
    assert!(matches!(
        summary.outcome(DatasetKind::GovernmentFunding),
        Some(DatasetOutcome::Skipped(_))
    ));

    assert!(processed_path(&config.processed_dir, DatasetKind::TourismStatistics).exists());
    assert!(!processed_path(&config.processed_dir, DatasetKind::CulturalSites).exists());
    assert!(!processed_path(&config.processed_dir, DatasetKind::ArtForms).exists());
}

#[test]
fn test_rerun_is_byte_identical() {
    let out = TempDir::new().expect("temp dir");
    let config = fixture_config(out.path());

    run_batch(&config, &DatasetKind::ALL);
    let first: Vec<Vec<u8>> = DatasetKind::ALL
        .iter()
        .map(|k| std::fs::read(processed_path(out.path(), *k)).unwrap())
        .collect();

    let summary = run_batch(&config, &DatasetKind::ALL);
    assert!(summary.is_success());
    for (kind, before) in DatasetKind::ALL.iter().zip(&first) {
        let after = std::fs::read(processed_path(out.path(), *kind)).unwrap();
        assert_eq!(&after, before, "{kind} output changed between runs");
    }
}

#[test]
fn test_funding_output_ignores_input_order() {
    let dir = TempDir::new().expect("temp dir");
    let text = std::fs::read_to_string("testdata/raw/government_funding_mock.csv").unwrap();
    let mut lines: Vec<&str> = text.lines().collect();
    let header = lines.remove(0);
    lines.reverse();
    let shuffled = dir.path().join("government_funding_reversed.csv");
    std::fs::write(&shuffled, format!("{header}\n{}\n", lines.join("\n"))).unwrap();

    let ordered_out = dir.path().join("ordered");
    let reversed_out = dir.path().join("reversed");
    process_file(
        DatasetKind::GovernmentFunding,
        Path::new("testdata/raw/government_funding_mock.csv"),
        &ordered_out,
    )
    .unwrap();
    process_file(DatasetKind::GovernmentFunding, &shuffled, &reversed_out).unwrap();

    let ordered = std::fs::read(processed_path(&ordered_out, DatasetKind::GovernmentFunding)).unwrap();
    let reversed =
        std::fs::read(processed_path(&reversed_out, DatasetKind::GovernmentFunding)).unwrap();
    assert_eq!(ordered, reversed);
}

#[test]
fn test_missing_input_is_not_found() {
    let dir = TempDir::new().expect("temp dir");
    let err = process_file(
        DatasetKind::ArtForms,
        &dir.path().join("art_forms.csv"),
        dir.path(),
    )
    .unwrap_err();
    assert!(err.is_not_found());
}
