use adnimeta_core::output::sheet_name;
use adnimeta_core::{
    build_tables, summarize, write_report, ExtractorConfig, FieldValue, ScanType,
    ScanTypeAggregator,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn pet_xml(subject: &str, age: &str, sex: &str, group: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<idaxs>
  <project>
    <subject>
      <subjectIdentifier>{subject}</subjectIdentifier>
      <researchGroup>{group}</researchGroup>
      <subjectSex>{sex}</subjectSex>
      <study>
        <subjectAge>{age}</subjectAge>
        <series>
          <modality>PET</modality>
          <seriesIdentifier>50001</seriesIdentifier>
          <imagingProtocol>
            <protocolTerm>
              <protocol term="Radiopharmaceutical">18F-FDG</protocol>
              <protocol term="Number of Rows">128</protocol>
            </protocolTerm>
          </imagingProtocol>
        </series>
      </study>
    </subject>
  </project>
</idaxs>"#
    )
}

const T2_XML: &str = r#"<idaxs>
  <project>
    <subject>
      <subjectIdentifier>941_S_1202</subjectIdentifier>
      <researchGroup>MCI</researchGroup>
      <subjectSex>F</subjectSex>
      <study>
        <subjectAge>0</subjectAge>
        <series>
          <modality>MRI</modality>
          <protocolTerm>
            <protocol term="TE">98.0</protocol>
            <protocol term="Field Strength">3.0</protocol>
          </protocolTerm>
        </series>
      </study>
    </subject>
  </project>
</idaxs>"#;

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn fixture_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    let fdg = base.join("ADNI_PET_metadata").join("FDG");
    write(&fdg, "s1_PET_FDG.xml", &pet_xml("002_S_0001", "60", "M", "AD"));
    write(&fdg, "s2_PET_FDG.xml", &pet_xml("002_S_0002", "70", "M", "MCI"));
    write(&fdg, "s3_PET_FDG.xml", &pet_xml("002_S_0003", "80", "F", "CN"));
    write(&fdg, "notes.txt", "not metadata");

    let mri = base.join("Metainformation").join("Axial");
    write(&mri, "Axial_T2_STAR.xml", T2_XML);
    write(&mri, "Axial_PD_T2_FSE.xml", "<idaxs><unclosed></idaxs>");

    temp_dir
}

#[test]
fn test_auto_discovered_run_writes_workbook() {
    let temp_dir = fixture_tree();
    let config = ExtractorConfig::new(temp_dir.path());

    let mut aggregator = ScanTypeAggregator::new(&config);
    aggregator.run(&config).unwrap();

    assert_eq!(aggregator.scan_types(), vec![ScanType::MriT2, ScanType::PetFdg]);
    assert_eq!(aggregator.count(ScanType::PetFdg), 3);
    assert_eq!(aggregator.count(ScanType::MriT2), 1);
    assert_eq!(aggregator.failed_count(), 1);

    let rows = summarize(&aggregator);
    let fdg = rows.iter().find(|r| r.scan_type == ScanType::PetFdg).unwrap();
    assert_eq!(fdg.average_age, Some(70.0));
    assert_eq!(fdg.male_ratio_display(), "66.7%");
    let t2 = rows.iter().find(|r| r.scan_type == ScanType::MriT2).unwrap();
    assert_eq!(t2.average_age, None);

    let tables = build_tables(&aggregator);
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["MRI_T2", "PET_FDG", "scan_type_summary"]);
    assert_eq!(tables[0].cell(0, "te_ms"), Some(&FieldValue::Float(98.0)));
    assert_eq!(tables[0].cell(0, "radiopharmaceutical"), None);
    assert_eq!(tables[1].cell(2, "num_rows"), Some(&FieldValue::Int(128)));

    let sheets: Vec<_> = tables.iter().map(|t| sheet_name(&t.name)).collect();
    assert_eq!(sheets, vec!["MRI_T2", "PET_FDG", "scan_type_summary"]);

    let output = temp_dir.path().join("report.xlsx");
    write_report(&output, &aggregator).unwrap();

    // One worksheet part per table, nothing more
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(contains(&bytes, "xl/workbook.xml"));
    for part in 1..=3 {
        assert!(contains(&bytes, &format!("xl/worksheets/sheet{}.xml", part)));
    }
    assert!(!contains(&bytes, "xl/worksheets/sheet4.xml"));
}

#[test]
fn test_selector_with_adni_fallback_and_cap() {
    let temp_dir = TempDir::new().unwrap();
    let pet = temp_dir.path().join("ADNI").join("PET_AV45").join("visit1");
    for i in 0..4 {
        write(
            &pet,
            &format!("s{}_AV45.xml", i),
            &pet_xml(&format!("011_S_000{}", i), "75", "F", "CN"),
        );
    }

    let config = ExtractorConfig::new(temp_dir.path())
        .with_max_files_per_type(2)
        .with_folders(vec!["PET_AV45".to_string(), "Missing".to_string()]);
    let mut aggregator = ScanTypeAggregator::new(&config);
    aggregator.run(&config).unwrap();

    let records = aggregator.records(ScanType::PetAv45);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].filename, "s0_AV45.xml");
    assert_eq!(records[1].filename, "s1_AV45.xml");
}

#[test]
fn test_empty_run_creates_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = ExtractorConfig::new(temp_dir.path());

    let mut aggregator = ScanTypeAggregator::new(&config);
    aggregator.run(&config).unwrap();
    assert!(aggregator.is_empty());

    let output = temp_dir.path().join("report.xlsx");
    assert!(write_report(&output, &aggregator).is_err());
    assert!(!output.exists());
}

#[cfg(feature = "json")]
#[test]
fn test_records_serialize_to_json() {
    let temp_dir = fixture_tree();
    let config = ExtractorConfig::new(temp_dir.path());
    let mut aggregator = ScanTypeAggregator::new(&config);
    aggregator.run(&config).unwrap();

    let json = serde_json::to_value(aggregator.records(ScanType::PetFdg)).unwrap();
    assert_eq!(json[0]["scan_type"], "PET_FDG");
    assert_eq!(json[0]["subject"]["subject_id"], "002_S_0001");

    let summary = serde_json::to_value(summarize(&aggregator)).unwrap();
    assert_eq!(summary[1]["data_count"], 3);
}
