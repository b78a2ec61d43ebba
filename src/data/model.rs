use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record – one (entity, year) observation
// ---------------------------------------------------------------------------

/// A single normalized observation: one entity's value for one year.
///
/// `value` is `None` for an absent observation, which is a distinct state
/// from `Some(0.0)` — callers must never collapse the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable short identifier for a country or region (e.g. `"USA"`).
    pub entity_code: String,
    /// Observation year, within the dataset's fixed historical range.
    pub year: i32,
    /// Raw-unit value, or `None` for a missing observation.
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with pre-computed lookup indices.
///
/// Constructed once at process start (see [`crate::data::loader`]) and
/// treated as immutable from then on; queries in [`crate::data::query`]
/// borrow it and never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All records, ordered by source row and then by year.
    pub records: Vec<Record>,
    /// Distinct entity codes in first-appearance (source row) order.
    pub entity_codes: Vec<String>,
    /// Per-entity snapshot index: entity code → (year → value).
    pub index: BTreeMap<String, BTreeMap<i32, Option<f64>>>,
    /// Earliest year present in the source's year columns.
    pub year_min: i32,
    /// Latest year present in the source's year columns.
    pub year_max: i32,
}

impl Dataset {
    /// Build the entity list and snapshot index from normalized records.
    ///
    /// `year_min..=year_max` come from the source's column set, not from the
    /// records themselves, so an all-absent dataset still knows its bounds.
    pub fn from_records(records: Vec<Record>, year_min: i32, year_max: i32) -> Self {
        let mut entity_codes: Vec<String> = Vec::new();
        let mut index: BTreeMap<String, BTreeMap<i32, Option<f64>>> = BTreeMap::new();

        for rec in &records {
            if !index.contains_key(&rec.entity_code) {
                entity_codes.push(rec.entity_code.clone());
            }
            index
                .entry(rec.entity_code.clone())
                .or_default()
                .entry(rec.year)
                .or_insert(rec.value);
        }

        Dataset {
            records,
            entity_codes,
            index,
            year_min,
            year_max,
        }
    }

    /// Distinct entity codes, stable across calls (first-appearance order).
    pub fn entity_codes(&self) -> &[String] {
        &self.entity_codes
    }

    /// Look up one entity's value for one year. Outer `None` means the
    /// (entity, year) pair does not exist in the dataset at all; inner
    /// `None` means the pair exists but the observation is absent.
    pub fn snapshot(&self, entity_code: &str, year: i32) -> Option<Option<f64>> {
        self.index.get(entity_code)?.get(&year).copied()
    }

    /// Clamp a requested year to the dataset's valid bounds.
    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.year_min, self.year_max)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GrowthMetric – percentage change between two snapshots
// ---------------------------------------------------------------------------

/// Direction of a growth metric, for delta coloring in a metric tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    /// Never produced by the current strict `> 0` classification; exact-zero
    /// growth reports `Down`. Kept so callers can match exhaustively if the
    /// classification is ever revisited.
    Flat,
    /// Growth could not be computed (missing snapshot or degenerate start).
    Unavailable,
}

/// Result of a start-year → end-year growth query for one entity.
///
/// Values are in the source's raw units; scaling for display (the original
/// reports billions) is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetric {
    /// Value at the end year, if observed.
    pub end_value: Option<f64>,
    /// `(end / start - 1) * 100`, or `None` when unavailable.
    pub growth_percent: Option<f64>,
    pub trend: Trend,
}

impl GrowthMetric {
    /// The metric reported when growth cannot be computed.
    pub fn unavailable(end_value: Option<f64>) -> Self {
        GrowthMetric {
            end_value,
            growth_percent: None,
            trend: Trend::Unavailable,
        }
    }
}
