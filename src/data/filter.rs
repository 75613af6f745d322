use super::model::Table;

// ---------------------------------------------------------------------------
// Range filter: one numeric column, one closed interval
// ---------------------------------------------------------------------------

/// The user's filter selection: rows pass when the value in `column`
/// lies in `[lo, hi]`, both ends inclusive.  Invariant: `lo <= hi`, and
/// both bounds lie within the column's observed range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    pub column: String,
    pub lo: f64,
    pub hi: f64,
}

impl RangeFilter {
    /// Clamp the bounds back into `[min, max]` and restore `lo <= hi`.
    pub fn clamp_to(&mut self, min: f64, max: f64) {
        self.lo = self.lo.clamp(min, max);
        self.hi = self.hi.clamp(min, max);
        if self.lo > self.hi {
            std::mem::swap(&mut self.lo, &mut self.hi);
        }
    }
}

/// Observed [min, max] of a numeric column, skipping missing cells.
/// `None` for text columns, unknown columns, and all-missing columns.
pub fn observed_range(table: &Table, column: &str) -> Option<(f64, f64)> {
    let values = table.numeric_column(column)?;
    let mut present = values.iter().copied().flatten();
    let first = present.next()?;
    let (min, max) = present.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some((min, max))
}

/// Default filter for a freshly loaded table: the first numeric column at
/// its full observed range, i.e. no rows excluded.  `None` when the table
/// has no numeric columns.
pub fn init_filter(table: &Table) -> Option<RangeFilter> {
    let column = table.numeric_columns().into_iter().next()?;
    filter_for_column(table, &column)
}

/// A full-range (identity) filter over the given column.
pub fn filter_for_column(table: &Table, column: &str) -> Option<RangeFilter> {
    let (lo, hi) = observed_range(table, column)?;
    Some(RangeFilter {
        column: column.to_string(),
        lo,
        hi,
    })
}

/// Indices of rows passing the filter, in table order.
///
/// Both bounds are inclusive, so boundary rows are retained.  Rows whose
/// cell is missing never pass.  A filter naming an unknown or non-numeric
/// column selects nothing.
pub fn filtered_indices(table: &Table, filter: &RangeFilter) -> Vec<usize> {
    let Some(values) = table.numeric_column(&filter.column) else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| matches!(v, Some(x) if filter.lo <= *x && *x <= filter.hi))
        .map(|(i, _)| i)
        .collect()
}
