//! Data core for a GDP-by-country explorer.
//!
//! Loads a wide-format table (one row per country, one column per year)
//! into an immutable, indexed [`Dataset`] and answers the analytical
//! questions a dashboard front end asks: which entities exist, a
//! year-range-filtered series, a start→end growth metric, and a two-entity
//! comparison. Presentation (charts, widgets, layout) lives elsewhere and
//! calls into this crate.
//!
//! ```no_run
//! use std::collections::BTreeSet;
//! use gdp_explorer_core::{filter_series, growth_metric, load_csv};
//!
//! let dataset = load_csv(std::path::Path::new("gdp_data.csv"))?;
//! let codes: BTreeSet<String> = ["USA".into(), "JPN".into()].into();
//! let series = filter_series(&dataset, &codes, 1990, 2020);
//! let metric = growth_metric(&dataset, "USA", 1990, 2020);
//! # Ok::<(), gdp_explorer_core::LoadError>(())
//! ```
//!
//! The dataset is loaded once, blocking, at startup and never mutated;
//! every query is a pure function over that shared handle, so concurrent
//! sessions only ever share read-only state.

pub mod data;

pub use data::loader::{load_csv, read_dataset, LoadError, ENTITY_COLUMN};
pub use data::model::{Dataset, GrowthMetric, Record, Trend};
pub use data::query::{available_entities, compare_pair, filter_series, growth_metric};
