/// Data layer: core types, loading, and queries.
///
/// Architecture:
/// ```text
///  wide .csv (one row per country, one column per year)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  reshape wide table → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, entity/year index, year bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  range filter · growth metric · pair comparison
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
