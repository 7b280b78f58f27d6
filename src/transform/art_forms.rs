//! Art forms: categorical scores and cultural significance.

use crate::dataset::columns::{
    CULTURAL_SIGNIFICANCE, GOVT_RECOGNITION, RECOGNITION_SCORE, TOURISM_POTENTIAL,
    TOURISM_POTENTIAL_SCORE,
};
use crate::error::{EtlError, Result};
use polars::prelude::*;

pub const TOURISM_POTENTIAL_SCORES: [(&str, i64); 3] = [("Low", 1), ("Medium", 2), ("High", 3)];

pub const RECOGNITION_SCORES: [(&str, i64); 3] =
    [("State", 1), ("National", 2), ("International", 3)];

/// Label reported for a missing category cell.
const MISSING_LABEL: &str = "<missing>";

/// Look `value` up in a score table.
///
/// # Errors
///
/// [`EtlError::UnknownCategory`] naming `column` and the value when the value
/// is missing or not in the table.
pub fn score(table: &[(&str, i64)], column: &str, value: Option<&str>) -> Result<i64> {
    let Some(value) = value else {
        return Err(EtlError::unknown_category(column, MISSING_LABEL));
    };
    table
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, score)| *score)
        .ok_or_else(|| EtlError::unknown_category(column, value))
}

fn score_column(df: &DataFrame, column: &str, table: &[(&str, i64)]) -> Result<Vec<i64>> {
    df.column(column)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| score(table, column, value))
        .collect()
}

/// Add `Tourism_Potential_Score`, `Recognition_Score` and
/// `Cultural_Significance` (their plain average, unrounded).
pub fn transform(mut df: DataFrame) -> Result<DataFrame> {
    let potential = score_column(&df, TOURISM_POTENTIAL, &TOURISM_POTENTIAL_SCORES)?;
    let recognition = score_column(&df, GOVT_RECOGNITION, &RECOGNITION_SCORES)?;

    let significance: Vec<f64> = potential
        .iter()
        .zip(&recognition)
        .map(|(p, r)| (p + r) as f64 / 2.0)
        .collect();

    df.with_column(Column::new(TOURISM_POTENTIAL_SCORE.into(), potential))?;
    df.with_column(Column::new(RECOGNITION_SCORE.into(), recognition))?;
    df.with_column(Column::new(CULTURAL_SIGNIFICANCE.into(), significance))?;
    Ok(df)
}
