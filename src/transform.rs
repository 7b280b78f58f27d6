//! Per-dataset derivations.
//!
//! Each submodule exposes one pure `transform(DataFrame) -> Result<DataFrame>`
//! that appends the dataset's derived columns. Transforms never drop rows;
//! only the funding transform reorders them.

pub mod art_forms;
pub mod funding;
pub mod sites;
pub mod tourism;

use crate::dataset::DatasetKind;
use crate::error::Result;
use polars::prelude::{Column, DataFrame};

/// Apply the derivation for `kind`.
///
/// # Errors
///
/// Propagates the transform's error, e.g. [`crate::error::EtlError::UnknownCategory`]
/// for art forms with an unrecognised label.
pub fn apply(kind: DatasetKind, df: DataFrame) -> Result<DataFrame> {
    match kind {
        DatasetKind::TourismStatistics => tourism::transform(df),
        DatasetKind::CulturalSites => sites::transform(df),
        DatasetKind::ArtForms => art_forms::transform(df),
        DatasetKind::GovernmentFunding => funding::transform(df),
    }
}

/// Round to `decimals` places, ties to even on the scaled value.
///
/// Polars' `Expr::round` breaks ties away from zero, so derived columns are
/// rounded through here instead.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Replace the `Float64` column `name` with its values passed through [`round_to`].
pub(crate) fn round_column(df: &mut DataFrame, name: &str, decimals: i32) -> Result<()> {
    let rounded: Vec<Option<f64>> = df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|value| value.map(|v| round_to(v, decimals)))
        .collect();
    df.with_column(Column::new(name.into(), rounded))?;
    Ok(())
}
