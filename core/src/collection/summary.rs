use crate::collection::aggregator::ScanTypeAggregator;
use crate::types::{FieldValue, MetadataRecord, ScanType, ABSENT_MARKER};

/// Column names of the summary sheet
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "scan_type",
    "data_count",
    "average_age",
    "male_ratio",
    "ad_patients",
    "mci_patients",
    "cn_patients",
];

/// Per-scan-type statistics for the summary sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SummaryRow {
    pub scan_type: ScanType,
    pub data_count: usize,
    /// Mean of the non-zero ages, rounded to one decimal
    pub average_age: Option<f64>,
    /// Share of records with gender `M`, in percent
    pub male_ratio: Option<f64>,
    pub ad_patients: usize,
    pub mci_patients: usize,
    pub cn_patients: usize,
}

impl SummaryRow {
    /// Computes the summary for one scan type's records
    pub fn from_records(scan_type: ScanType, records: &[MetadataRecord]) -> Self {
        let ages: Vec<f64> = records
            .iter()
            .filter_map(|r| r.subject.age)
            .filter(|age| *age != 0.0)
            .collect();
        let average_age = if ages.is_empty() {
            None
        } else {
            Some(round_to_tenth(ages.iter().sum::<f64>() / ages.len() as f64))
        };

        let male_count = records
            .iter()
            .filter(|r| r.subject.gender.as_deref() == Some("M"))
            .count();
        let male_ratio = if records.is_empty() {
            None
        } else {
            Some(male_count as f64 / records.len() as f64 * 100.0)
        };

        let group_count = |group: &str| {
            records
                .iter()
                .filter(|r| r.subject.research_group.as_deref() == Some(group))
                .count()
        };

        Self {
            scan_type,
            data_count: records.len(),
            average_age,
            male_ratio,
            ad_patients: group_count("AD"),
            mci_patients: group_count("MCI"),
            cn_patients: group_count("CN"),
        }
    }

    /// Male ratio as a percentage string, e.g. `66.7%`, or `N/A`
    pub fn male_ratio_display(&self) -> String {
        self.male_ratio
            .map(|ratio| format!("{:.1}%", ratio))
            .unwrap_or_else(|| ABSENT_MARKER.to_string())
    }

    /// Row cells in [`SUMMARY_COLUMNS`] order
    pub fn cells(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.scan_type.to_string()),
            FieldValue::Int(self.data_count as i64),
            self.average_age
                .map_or(FieldValue::Absent, FieldValue::Float),
            FieldValue::Text(self.male_ratio_display()),
            FieldValue::Int(self.ad_patients as i64),
            FieldValue::Int(self.mci_patients as i64),
            FieldValue::Int(self.cn_patients as i64),
        ]
    }
}

/// Summarizes every non-empty scan type, in first-discovery order
pub fn summarize(aggregator: &ScanTypeAggregator) -> Vec<SummaryRow> {
    aggregator
        .buckets()
        .filter(|(_, records)| !records.is_empty())
        .map(|(scan_type, records)| SummaryRow::from_records(scan_type, records))
        .collect()
}

/// Rounds to one decimal from the exact binary value, ties to even
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ExtractorConfig;

    fn record(scan_type: ScanType, age: Option<f64>, gender: &str, group: &str) -> MetadataRecord {
        let mut record = MetadataRecord::new("scan.xml", scan_type);
        record.subject.age = age;
        record.subject.gender = Some(gender.to_string());
        record.subject.research_group = Some(group.to_string());
        record
    }

    #[test]
    fn test_summary_fdg_scenario() {
        let records = vec![
            record(ScanType::PetFdg, Some(60.0), "M", "AD"),
            record(ScanType::PetFdg, Some(70.0), "M", "MCI"),
            record(ScanType::PetFdg, Some(80.0), "F", "CN"),
        ];
        let row = SummaryRow::from_records(ScanType::PetFdg, &records);

        assert_eq!(row.data_count, 3);
        assert_eq!(row.average_age, Some(70.0));
        assert_eq!(row.male_ratio_display(), "66.7%");
        assert_eq!((row.ad_patients, row.mci_patients, row.cn_patients), (1, 1, 1));
    }

    #[test]
    fn test_summary_without_ages() {
        let records = vec![
            record(ScanType::MriDti, None, "F", "CN"),
            record(ScanType::MriDti, Some(0.0), "F", "CN"),
        ];
        let row = SummaryRow::from_records(ScanType::MriDti, &records);

        assert_eq!(row.average_age, None);
        assert_eq!(row.cells()[2], FieldValue::Absent);
        assert_eq!(row.male_ratio_display(), "0.0%");
        assert_eq!(row.cn_patients, 2);
    }

    #[test]
    fn test_summary_rounds_average_age() {
        let records = vec![
            record(ScanType::MriT2, Some(70.0), "M", "EMCI"),
            record(ScanType::MriT2, Some(71.0), "M", "EMCI"),
            record(ScanType::MriT2, Some(71.0), "M", "EMCI"),
        ];
        let row = SummaryRow::from_records(ScanType::MriT2, &records);

        assert_eq!(row.average_age, Some(70.7));
        assert_eq!(row.male_ratio_display(), "100.0%");
        assert_eq!((row.ad_patients, row.mci_patients, row.cn_patients), (0, 0, 0));

        let ties = vec![
            record(ScanType::MriT2, Some(70.0), "M", "CN"),
            record(ScanType::MriT2, Some(70.5), "F", "CN"),
        ];
        let row = SummaryRow::from_records(ScanType::MriT2, &ties);
        assert_eq!(row.average_age, Some(70.2));

        let single = vec![record(ScanType::MriT2, Some(72.25), "M", "CN")];
        let row = SummaryRow::from_records(ScanType::MriT2, &single);
        assert_eq!(row.average_age, Some(72.2));
    }

    #[test]
    fn test_empty_records_have_no_ratio() {
        let row = SummaryRow::from_records(ScanType::Other, &[]);
        assert_eq!(row.male_ratio_display(), ABSENT_MARKER);
        assert_eq!(row.average_age, None);
    }

    #[test]
    fn test_summarize_follows_discovery_order() {
        let mut aggregator = ScanTypeAggregator::new(&ExtractorConfig::default());
        aggregator.insert(record(ScanType::MriFlair, Some(65.0), "F", "CN"));
        aggregator.insert(record(ScanType::PetAv45, Some(75.0), "M", "AD"));
        aggregator.insert(record(ScanType::MriFlair, Some(67.0), "M", "MCI"));

        let rows = summarize(&aggregator);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scan_type, ScanType::MriFlair);
        assert_eq!(rows[0].data_count, 2);
        assert_eq!(rows[0].average_age, Some(66.0));
        assert_eq!(rows[1].scan_type, ScanType::PetAv45);
        assert_eq!(rows[1].male_ratio_display(), "100.0%");
    }
}
