//! Cultural sites: region classification and popularity bins.

use crate::dataset::columns::{POPULARITY, REGION, STATE, VISITORS_2022};
use crate::error::Result;
use polars::prelude::*;

/// Broad geographic region of a state or union territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
    Northeast,
    Other,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "North India",
            Self::South => "South India",
            Self::East => "East India",
            Self::West => "West India",
            Self::Central => "Central India",
            Self::Northeast => "Northeast India",
            Self::Other => "Other",
        }
    }

    /// Region for a state name; unknown or missing states are [`Region::Other`].
    pub fn of_state(state: Option<&str>) -> Self {
        state
            .and_then(|s| {
                STATE_REGIONS
                    .iter()
                    .find(|(name, _)| *name == s)
                    .map(|(_, region)| *region)
            })
            .unwrap_or(Self::Other)
    }
}

const STATE_REGIONS: [(&str, Region); 30] = [
    ("Jammu and Kashmir", Region::North),
    ("Himachal Pradesh", Region::North),
    ("Punjab", Region::North),
    ("Uttarakhand", Region::North),
    ("Haryana", Region::North),
    ("Delhi", Region::North),
    ("Uttar Pradesh", Region::North),
    ("Karnataka", Region::South),
    ("Andhra Pradesh", Region::South),
    ("Tamil Nadu", Region::South),
    ("Kerala", Region::South),
    ("Telangana", Region::South),
    ("Bihar", Region::East),
    ("Jharkhand", Region::East),
    ("West Bengal", Region::East),
    ("Odisha", Region::East),
    ("Rajasthan", Region::West),
    ("Gujarat", Region::West),
    ("Maharashtra", Region::West),
    ("Goa", Region::West),
    ("Madhya Pradesh", Region::Central),
    ("Chhattisgarh", Region::Central),
    ("Sikkim", Region::Northeast),
    ("Assam", Region::Northeast),
    ("Meghalaya", Region::Northeast),
    ("Tripura", Region::Northeast),
    ("Mizoram", Region::Northeast),
    ("Manipur", Region::Northeast),
    ("Nagaland", Region::Northeast),
    ("Arunachal Pradesh", Region::Northeast),
];

/// Visitor-volume class of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popularity {
    Low,
    Medium,
    High,
}

/// Lower bound (inclusive) of the medium bin.
pub const MEDIUM_VISITORS: f64 = 1_000_000.0;
/// Lower bound (inclusive) of the high bin.
pub const HIGH_VISITORS: f64 = 3_000_000.0;

impl Popularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Closed-left bins: `[0, 1M)`, `[1M, 3M)`, `[3M, inf)`.
    /// Negative or NaN counts fall outside every bin.
    pub fn from_visitors(visitors: f64) -> Option<Self> {
        if visitors >= HIGH_VISITORS {
            Some(Self::High)
        } else if visitors >= MEDIUM_VISITORS {
            Some(Self::Medium)
        } else if visitors >= 0.0 {
            Some(Self::Low)
        } else {
            None
        }
    }
}

/// Add `Region` and `Popularity`.
pub fn transform(mut df: DataFrame) -> Result<DataFrame> {
    let regions: Vec<&str> = df
        .column(STATE)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|state| Region::of_state(state).as_str())
        .collect();

    let visitors = df
        .column(VISITORS_2022)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let popularity: Vec<Option<&str>> = visitors
        .f64()?
        .into_iter()
        .map(|v| v.and_then(Popularity::from_visitors).map(Popularity::as_str))
        .collect();

    df.with_column(Column::new(REGION.into(), regions))?;
    df.with_column(Column::new(POPULARITY.into(), popularity))?;
    Ok(df)
}
