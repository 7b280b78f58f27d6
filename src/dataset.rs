//! Catalogue of the four dashboard datasets.
//!
//! Each [`DatasetKind`] knows where its raw file is discovered, where its
//! processed file lands, which warehouse table receives it, which key
//! columns the loader must find and which columns its transform derives.

use clap::ValueEnum;
use std::fmt;

/// Value kind a derivation expects from a required key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Whole numbers (years).
    Integer,
    /// Integer or floating point.
    Number,
    /// Free text or category labels.
    Text,
    /// Present, but not used by any derivation.
    Any,
}

/// A key column the loader requires, with the kind the transform relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumn {
    pub name: &'static str,
    pub kind: ValueKind,
}

const fn required(name: &'static str, kind: ValueKind) -> RequiredColumn {
    RequiredColumn { name, kind }
}

pub mod columns {
    //! Column names shared by the loader, the transforms and the tests.

    pub const YEAR: &str = "Year";

    pub const DOMESTIC_VISITORS: &str = "Domestic_Visitors";
    pub const INTERNATIONAL_VISITORS: &str = "International_Visitors";
    pub const REVENUE_CRORES: &str = "Revenue_Crores";
    pub const TOTAL_VISITORS: &str = "Total_Visitors";
    pub const INTERNATIONAL_PERCENTAGE: &str = "International_Percentage";

    pub const SITE_NAME: &str = "Site_Name";
    pub const STATE: &str = "State";
    pub const VISITORS_2022: &str = "Visitors_2022";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const UNESCO_HERITAGE: &str = "UNESCO_Heritage";
    pub const REGION: &str = "Region";
    pub const POPULARITY: &str = "Popularity";

    pub const ART_FORM: &str = "Art_Form";
    pub const TYPE: &str = "Type";
    pub const GOVT_RECOGNITION: &str = "Govt_Recognition";
    pub const TOURISM_POTENTIAL: &str = "Tourism_Potential";
    pub const TOURISM_POTENTIAL_SCORE: &str = "Tourism_Potential_Score";
    pub const RECOGNITION_SCORE: &str = "Recognition_Score";
    pub const CULTURAL_SIGNIFICANCE: &str = "Cultural_Significance";

    pub const MINISTRY: &str = "Ministry";
    pub const BUDGET_ALLOCATION_CRORES: &str = "Budget_Allocation_Crores";
    pub const UTILIZATION_PERCENTAGE: &str = "Utilization_Percentage";
    pub const ACTUAL_UTILIZATION_CRORES: &str = "Actual_Utilization_Crores";
    pub const YOY_BUDGET_GROWTH: &str = "YoY_Budget_Growth";
}

use columns as c;

const TOURISM_REQUIRED: [RequiredColumn; 4] = [
    required(c::YEAR, ValueKind::Integer),
    required(c::DOMESTIC_VISITORS, ValueKind::Number),
    required(c::INTERNATIONAL_VISITORS, ValueKind::Number),
    required(c::REVENUE_CRORES, ValueKind::Number),
];

const SITES_REQUIRED: [RequiredColumn; 6] = [
    required(c::SITE_NAME, ValueKind::Any),
    required(c::STATE, ValueKind::Text),
    required(c::VISITORS_2022, ValueKind::Number),
    required(c::LATITUDE, ValueKind::Any),
    required(c::LONGITUDE, ValueKind::Any),
    required(c::UNESCO_HERITAGE, ValueKind::Any),
];

const ART_FORMS_REQUIRED: [RequiredColumn; 5] = [
    required(c::ART_FORM, ValueKind::Any),
    required(c::TYPE, ValueKind::Any),
    required(c::REGION, ValueKind::Any),
    required(c::GOVT_RECOGNITION, ValueKind::Text),
    required(c::TOURISM_POTENTIAL, ValueKind::Text),
];

const FUNDING_REQUIRED: [RequiredColumn; 4] = [
    required(c::YEAR, ValueKind::Integer),
    required(c::MINISTRY, ValueKind::Text),
    required(c::BUDGET_ALLOCATION_CRORES, ValueKind::Number),
    required(c::UTILIZATION_PERCENTAGE, ValueKind::Number),
];

/// The datasets the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum DatasetKind {
    TourismStatistics,
    CulturalSites,
    ArtForms,
    GovernmentFunding,
}

impl DatasetKind {
    /// Every dataset, in processing order.
    pub const ALL: [Self; 4] = [
        Self::TourismStatistics,
        Self::CulturalSites,
        Self::ArtForms,
        Self::GovernmentFunding,
    ];

    /// File-name stem used to discover raw files and name processed ones.
    pub fn slug(self) -> &'static str {
        match self {
            Self::TourismStatistics => "tourism_statistics",
            Self::CulturalSites => "cultural_sites",
            Self::ArtForms => "art_forms",
            Self::GovernmentFunding => "government_funding",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::TourismStatistics => "Tourism Statistics",
            Self::CulturalSites => "Cultural Sites",
            Self::ArtForms => "Art Forms",
            Self::GovernmentFunding => "Government Funding",
        }
    }

    pub fn processed_file_name(self) -> String {
        format!("{}_processed.csv", self.slug())
    }

    /// Remote table the warehouse sink appends to.
    pub fn warehouse_table(self) -> &'static str {
        match self {
            Self::TourismStatistics => "TOURISM_STATISTICS",
            Self::CulturalSites => "CULTURAL_SITES",
            Self::ArtForms => "ART_FORMS",
            Self::GovernmentFunding => "GOVERNMENT_FUNDING",
        }
    }

    pub fn required_columns(self) -> &'static [RequiredColumn] {
        match self {
            Self::TourismStatistics => &TOURISM_REQUIRED,
            Self::CulturalSites => &SITES_REQUIRED,
            Self::ArtForms => &ART_FORMS_REQUIRED,
            Self::GovernmentFunding => &FUNDING_REQUIRED,
        }
    }

    /// Columns appended by the transform, in output order.
    pub fn derived_columns(self) -> &'static [&'static str] {
        match self {
            Self::TourismStatistics => &[c::TOTAL_VISITORS, c::INTERNATIONAL_PERCENTAGE],
            Self::CulturalSites => &[c::REGION, c::POPULARITY],
            Self::ArtForms => &[
                c::TOURISM_POTENTIAL_SCORE,
                c::RECOGNITION_SCORE,
                c::CULTURAL_SIGNIFICANCE,
            ],
            Self::GovernmentFunding => &[c::ACTUAL_UTILIZATION_CRORES, c::YOY_BUDGET_GROWTH],
        }
    }

    /// Whether a file name looks like a raw export of this dataset.
    pub fn matches_raw_file(self, file_name: &str) -> bool {
        file_name.contains(self.slug())
            && std::path::Path::new(file_name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_distinct() {
        let slugs: std::collections::BTreeSet<_> =
            DatasetKind::ALL.iter().map(|k| k.slug()).collect();
        assert_eq!(slugs.len(), DatasetKind::ALL.len());
        assert_eq!(
            DatasetKind::GovernmentFunding.processed_file_name(),
            "government_funding_processed.csv"
        );
        assert_eq!(DatasetKind::ArtForms.warehouse_table(), "ART_FORMS");
    }

    #[test]
    fn test_matches_raw_file() {
        let kind = DatasetKind::TourismStatistics;
        assert!(kind.matches_raw_file("tourism_statistics_mock.csv"));
        assert!(kind.matches_raw_file("2022_tourism_statistics.CSV"));
        assert!(!kind.matches_raw_file("tourism_statistics_20240101.json"));
        assert!(!kind.matches_raw_file("cultural_sites_mock.csv"));
    }

    #[test]
    fn test_parse_from_cli_value() {
        let kind = DatasetKind::from_str("government-funding", false);
        assert_eq!(kind, Ok(DatasetKind::GovernmentFunding));
        assert!(DatasetKind::from_str("seasonal-tourism", false).is_err());
    }

    #[test]
    fn test_derived_columns_do_not_clash_with_required() {
        for kind in DatasetKind::ALL {
            for derived in kind.derived_columns() {
                // Art forms carry a raw `Region` column; sites derive one.
                let clash = kind
                    .required_columns()
                    .iter()
                    .any(|r| r.name == *derived);
                assert!(!clash, "{kind}: derived column {derived} is also required");
            }
        }
    }
}
