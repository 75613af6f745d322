/// Data layer: core types, loading, statistics, filtering, and export.
///
/// Architecture:
/// ```text
///       .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table  (memoized by file identity)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named columns, numeric / text classification
///   └──────────┘
///        │
///        ├──────────────► stats    describe(), histogram bins
///        ▼
///   ┌──────────┐
///   │  filter   │  closed numeric range → row indices
///   └──────────┘
///        │
///        ├──────────────► plot     (ui layer)
///        ▼
///   ┌──────────┐
///   │  export   │  filtered rows → CSV bytes
///   └──────────┘
/// ```
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
