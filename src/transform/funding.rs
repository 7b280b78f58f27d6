//! Government funding: actual utilisation and year-over-year budget growth.

use super::{round_column, round_to};
use crate::dataset::columns::{
    ACTUAL_UTILIZATION_CRORES, BUDGET_ALLOCATION_CRORES, MINISTRY, UTILIZATION_PERCENTAGE, YEAR,
    YOY_BUDGET_GROWTH,
};
use crate::error::Result;
use polars::prelude::*;

/// Add `Actual_Utilization_Crores`, sort by (Ministry, Year) and add
/// `YoY_Budget_Growth`.
///
/// The output is in sorted order, not input order.
pub fn transform(df: DataFrame) -> Result<DataFrame> {
    let actual = (col(BUDGET_ALLOCATION_CRORES).cast(DataType::Float64)
        * col(UTILIZATION_PERCENTAGE).cast(DataType::Float64)
        / lit(100.0))
    .alias(ACTUAL_UTILIZATION_CRORES);

    let mut df = df.lazy().with_column(actual).collect()?;
    round_column(&mut df, ACTUAL_UTILIZATION_CRORES, 2)?;

    let mut sorted = df.sort(
        [MINISTRY, YEAR],
        SortMultipleOptions::default()
            .with_maintain_order(true)
            .with_nulls_last(true),
    )?;

    let ministries = sorted.column(MINISTRY)?.as_materialized_series().clone();
    let allocations = sorted
        .column(BUDGET_ALLOCATION_CRORES)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;

    let rows: Vec<(Option<&str>, Option<f64>)> = ministries
        .str()?
        .into_iter()
        .zip(allocations.f64()?.into_iter())
        .collect();

    let growth = yoy_growth(&rows);
    sorted.with_column(Column::new(YOY_BUDGET_GROWTH.into(), growth))?;
    Ok(sorted)
}

/// Percent change of each allocation against the previous row of the same
/// ministry. `rows` must already be grouped by ministry and ordered by year.
///
/// The first row of a ministry has no growth. So does a row whose own or
/// previous allocation is missing, or whose previous allocation is zero.
/// Rows without a ministry form no partition and get no growth.
pub fn yoy_growth(rows: &[(Option<&str>, Option<f64>)]) -> Vec<Option<f64>> {
    let mut growth = Vec::with_capacity(rows.len());

    for partition in rows.chunk_by(|a, b| a.0.is_some() && a.0 == b.0) {
        let mut previous: Option<f64> = None;
        for (i, (ministry, allocation)) in partition.iter().enumerate() {
            let value = match (ministry, previous, allocation) {
                (Some(_), Some(prev), Some(curr)) if i > 0 && prev != 0.0 => {
                    Some(round_to((curr / prev - 1.0) * 100.0, 2))
                }
                _ => None,
            };
            growth.push(value);
            previous = *allocation;
        }
    }

    growth
}
