use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::filter::{self, RangeFilter};
use crate::data::loader::ParseCache;
use crate::data::model::Table;
use crate::data::stats;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Histogram,
    Box,
    Line,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Box,
        ChartKind::Line,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Scatter",
            ChartKind::Histogram => "Histogram",
            ChartKind::Box => "Box",
            ChartKind::Line => "Line",
        }
    }

    /// Histogram is single-axis; everything else plots x against y.
    pub fn needs_y(self) -> bool {
        !matches!(self, ChartKind::Histogram)
    }
}

/// Chart kind plus axis columns.  The same column on both axes, or the
/// filter column as an axis, are accepted inputs, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        ChartSpec {
            kind: ChartKind::Scatter,
            x: None,
            y: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub severity: Severity,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Analytics,
    Admin,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Analytics, Page::Admin];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Analytics => "Analytics",
            Page::Admin => "Admin",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  The whole pipeline
/// (table → filter → visible rows → chart/export inputs) is derivable
/// from the fields here; widgets mutate state and the next frame redraws
/// from it.
pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub page: Page,

    /// Loaded table (None until the user opens a file).
    pub table: Option<Arc<Table>>,
    /// Display name of the loaded file.
    pub source_name: Option<String>,
    /// Parsed tables memoized by file identity.
    pub cache: ParseCache,

    /// Current range filter; None while no table is loaded or the table
    /// has no numeric columns (downstream stages are halted then).
    pub filter: Option<RangeFilter>,
    /// Indices of rows passing the current filter (cached).
    pub visible_rows: Vec<usize>,

    pub chart: ChartSpec,
    /// Column inspected on the Analytics page.
    pub analytics_column: Option<String>,

    /// Status / error message shown in the UI.
    pub status: Option<StatusLine>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            config,
            session: Session::default(),
            page: Page::Dashboard,
            table: None,
            source_name: None,
            cache: ParseCache::default(),
            filter: None,
            visible_rows: Vec::new(),
            chart: ChartSpec::default(),
            analytics_column: None,
            status: None,
        }
    }

    /// Load a file through the parse cache and install the result.
    pub fn load_file(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(table) => {
                log::info!(
                    "loaded {} rows x {} columns from {}",
                    table.n_rows,
                    table.n_cols(),
                    path.display()
                );
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("table")
                    .to_string();
                self.set_table(table, name);
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", path.display());
                self.status = Some(StatusLine {
                    severity: Severity::Error,
                    text: format!("Error: {e:#}"),
                });
            }
        }
    }

    /// Ingest a newly loaded table and reset the downstream pipeline:
    /// default filter = first numeric column at its full range, default
    /// chart axes = first numeric columns.
    pub fn set_table(&mut self, table: Arc<Table>, name: String) {
        let numeric = table.numeric_columns();

        self.filter = filter::init_filter(&table);
        self.visible_rows = (0..table.n_rows).collect();
        self.chart = ChartSpec {
            kind: self.chart.kind,
            x: numeric.first().cloned(),
            y: numeric.get(1).or_else(|| numeric.first()).cloned(),
        };
        self.analytics_column = numeric.first().cloned();

        self.status = if numeric.is_empty() {
            Some(StatusLine {
                severity: Severity::Warning,
                text: "No numeric columns found. Filtering, charts and export are disabled."
                    .to_string(),
            })
        } else {
            None
        };

        self.source_name = Some(name);
        self.table = Some(table);
    }

    /// Recompute `visible_rows` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_rows = match &self.filter {
                Some(f) => filter::filtered_indices(table, f),
                None => (0..table.n_rows).collect(),
            };
            log::debug!(
                "{} of {} rows pass the filter",
                self.visible_rows.len(),
                table.n_rows
            );
        }
    }

    /// Switch the filter to another column, at that column's full range.
    pub fn set_filter_column(&mut self, column: &str) {
        if let Some(table) = &self.table {
            self.filter = filter::filter_for_column(table, column);
            self.refilter();
        }
    }

    /// Move the filter bounds, clamped to the column's observed range.
    pub fn set_filter_range(&mut self, lo: f64, hi: f64) {
        let Some(table) = &self.table else { return };
        let Some(f) = &mut self.filter else { return };
        let Some((min, max)) = filter::observed_range(table, &f.column) else {
            return;
        };
        f.lo = lo;
        f.hi = hi;
        f.clamp_to(min, max);
        self.refilter();
    }

    /// Bin count for histograms: configured override or Sturges' rule.
    pub fn histogram_bins(&self, n_values: usize) -> usize {
        self.config
            .histogram_bins
            .unwrap_or_else(|| stats::suggested_bin_count(n_values))
    }
}
