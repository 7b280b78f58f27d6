//! Tourism statistics: visitor totals and international share.

use super::round_column;
use crate::dataset::columns::{
    DOMESTIC_VISITORS, INTERNATIONAL_PERCENTAGE, INTERNATIONAL_VISITORS, TOTAL_VISITORS,
};
use crate::error::Result;
use polars::prelude::*;

/// Fill missing cells with zero, then add `Total_Visitors` and
/// `International_Percentage`.
///
/// A zero total yields a percentage of exactly `0.0` rather than NaN.
pub fn transform(df: DataFrame) -> Result<DataFrame> {
    let zero_filled: Vec<Expr> = df
        .schema()
        .iter()
        .map(|(name, dtype)| col(name.as_str()).fill_null(zero_for(dtype)))
        .collect();

    let percentage = col(INTERNATIONAL_VISITORS).cast(DataType::Float64)
        / col(TOTAL_VISITORS).cast(DataType::Float64)
        * lit(100.0);

    let mut out = df
        .lazy()
        .with_columns(zero_filled)
        .with_column((col(DOMESTIC_VISITORS) + col(INTERNATIONAL_VISITORS)).alias(TOTAL_VISITORS))
        .with_column(
            when(col(TOTAL_VISITORS).eq(lit(0)))
                .then(lit(0.0))
                .otherwise(percentage)
                .alias(INTERNATIONAL_PERCENTAGE),
        )
        .collect()?;
    round_column(&mut out, INTERNATIONAL_PERCENTAGE, 2)?;

    Ok(out)
}

fn zero_for(dtype: &DataType) -> Expr {
    match dtype {
        DataType::Boolean => lit(false),
        DataType::String => lit("0"),
        _ => lit(0),
    }
}
