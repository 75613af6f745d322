use super::model::Table;

// ---------------------------------------------------------------------------
// Descriptive statistics over numeric columns
// ---------------------------------------------------------------------------

/// Standard describe() row for one numeric column.  `count` counts
/// non-missing cells; `std` is the sample standard deviation (n - 1
/// denominator); quartiles interpolate linearly between order statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summaries for every numeric column of the table, in table order.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .numeric_columns()
        .into_iter()
        .filter_map(|name| {
            let values = table.numeric_column(&name)?;
            summarize(&name, values)
        })
        .collect()
}

fn summarize(name: &str, values: &[Option<f64>]) -> Option<ColumnSummary> {
    let mut present: Vec<f64> = values.iter().copied().flatten().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);

    let count = present.len();
    let mean = present.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        0.0
    } else {
        let var = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    };

    Some(ColumnSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min: present[0],
        q25: percentile(&present, 25.0),
        median: percentile(&present, 50.0),
        q75: percentile(&present, 75.0),
        max: present[count - 1],
    })
}

/// Linearly interpolated percentile over already-sorted values.
/// Exact at p = 0 and p = 100.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of empty slice");
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Bin values into `bins` equal-width intervals over [min, max].  Only the
/// final bin is closed on the right.  A degenerate min == max collapses to
/// a single bin holding every value.  Empty input yields no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            lo: min,
            hi: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Sturges' rule, never fewer than one bin.
pub fn suggested_bin_count(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        ((n as f64).log2().ceil() as usize + 1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_matches_hand_computed_values() {
        let table = load_csv("a,b\n1,10\n2,20\n3,30\n4,40\n".as_bytes()).unwrap();
        let summaries = describe(&table);
        assert_eq!(summaries.len(), 2);

        let a = &summaries[0];
        assert_eq!(a.name, "a");
        assert_eq!(a.count, 4);
        assert!(close(a.mean, 2.5));
        // Sample std of 1,2,3,4.
        assert!(close(a.std, (5.0f64 / 3.0).sqrt()));
        assert!(close(a.min, 1.0));
        assert!(close(a.q25, 1.75));
        assert!(close(a.median, 2.5));
        assert!(close(a.q75, 3.25));
        assert!(close(a.max, 4.0));
    }

    #[test]
    fn describe_skips_missing_cells() {
        let table = load_csv("v\n1\n\n3\n".as_bytes()).unwrap();
        let summaries = describe(&table);
        assert_eq!(summaries[0].count, 2);
        assert!(close(summaries[0].mean, 2.0));
    }

    #[test]
    fn describe_ignores_text_columns() {
        let table = load_csv("name,city\nAlice,NY\n".as_bytes()).unwrap();
        assert!(describe(&table).is_empty());
    }

    #[test]
    fn single_value_column_has_zero_std() {
        let table = load_csv("v\n7\n".as_bytes()).unwrap();
        let s = &describe(&table)[0];
        assert_eq!(s.count, 1);
        assert!(close(s.std, 0.0));
        assert!(close(s.min, s.max));
    }

    #[test]
    fn percentile_endpoints_are_exact() {
        let sorted = [1.0, 2.0, 3.0, 10.0];
        assert!(close(percentile(&sorted, 0.0), 1.0));
        assert!(close(percentile(&sorted, 100.0), 10.0));
        assert!(close(percentile(&sorted, 50.0), 2.5));
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0];
        let bins = histogram(&values, 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // Max lands in the final (right-closed) bin.
        assert_eq!(bins[1].count, 3);
    }

    #[test]
    fn degenerate_histogram_is_a_single_bin() {
        let bins = histogram(&[4.0, 4.0, 4.0], 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert!(close(bins[0].lo, bins[0].hi));
    }

    #[test]
    fn sturges_is_monotone_and_positive() {
        assert_eq!(suggested_bin_count(0), 1);
        assert_eq!(suggested_bin_count(1), 1);
        assert!(suggested_bin_count(100) >= suggested_bin_count(10));
    }
}
