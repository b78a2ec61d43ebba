use std::collections::BTreeSet;

use super::model::{Dataset, GrowthMetric, Record, Trend};

// ---------------------------------------------------------------------------
// Stateless queries over the immutable dataset
// ---------------------------------------------------------------------------

/// Distinct entity codes for populating a selection control.
///
/// First-appearance (source row) order, stable across calls.
pub fn available_entities(dataset: &Dataset) -> &[String] {
    dataset.entity_codes()
}

/// Records for the selected entities within `[year_start, year_end]`,
/// inclusive on both ends, in dataset order.
///
/// Requested years outside the dataset's bounds are clamped to them, so a
/// caller may pass an unchecked slider range. An empty `entity_codes` set
/// yields an empty series; the caller owns the "select at least one"
/// prompt before invoking this.
pub fn filter_series<'a>(
    dataset: &'a Dataset,
    entity_codes: &BTreeSet<String>,
    year_start: i32,
    year_end: i32,
) -> Vec<&'a Record> {
    let lo = dataset.clamp_year(year_start);
    let hi = dataset.clamp_year(year_end);
    dataset
        .records
        .iter()
        .filter(|rec| {
            (lo..=hi).contains(&rec.year) && entity_codes.contains(rec.entity_code.as_str())
        })
        .collect()
}

/// Percentage growth for one entity between a start and an end year.
///
/// Unavailable (no percent, [`Trend::Unavailable`]) when either snapshot is
/// missing, or when the start value is absent, zero, or non-finite —
/// dividing by it would leak an infinity or NaN to the caller. Exact-zero
/// growth classifies as [`Trend::Down`]: the strict `> 0` comparison is
/// preserved source behavior, not an accident (see the tests).
pub fn growth_metric(
    dataset: &Dataset,
    entity_code: &str,
    year_start: i32,
    year_end: i32,
) -> GrowthMetric {
    let end_value = match dataset.snapshot(entity_code, year_end) {
        Some(v) => v,
        None => return GrowthMetric::unavailable(None),
    };
    let start_value = match dataset.snapshot(entity_code, year_start) {
        Some(v) => v,
        None => return GrowthMetric::unavailable(end_value),
    };

    let (start, end) = match (start_value, end_value) {
        (Some(s), Some(e)) if s != 0.0 && s.is_finite() => (s, e),
        _ => return GrowthMetric::unavailable(end_value),
    };

    let growth_percent = (end / start - 1.0) * 100.0;
    let trend = if growth_percent > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    };
    GrowthMetric {
        end_value,
        growth_percent: Some(growth_percent),
        trend,
    }
}

/// Two-entity comparison series: [`filter_series`] restricted to `{a, b}`.
///
/// `a == b` degrades to a single-entity series; whether that is worth
/// rendering is the caller's call.
pub fn compare_pair<'a>(
    dataset: &'a Dataset,
    entity_a: &str,
    entity_b: &str,
    year_start: i32,
    year_end: i32,
) -> Vec<&'a Record> {
    let codes: BTreeSet<String> = [entity_a.to_string(), entity_b.to_string()].into();
    filter_series(dataset, &codes, year_start, year_end)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_dataset;

    const SAMPLE: &str = "\
Country Name,Country Code,2000,2001,2002,2003
United States,USA,100.0,110.0,121.0,133.0
Japan,JPN,50.0,,55.0,50.0
China,CHN,,10.0,20.0,40.0
Zeroland,ZRO,0.0,1.0,2.0,3.0
";

    fn sample() -> Dataset {
        read_dataset(SAMPLE.as_bytes()).unwrap()
    }

    fn codes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn entities_in_row_order() {
        let ds = sample();
        assert_eq!(available_entities(&ds), ["USA", "JPN", "CHN", "ZRO"]);
    }

    #[test]
    fn range_is_inclusive_both_ends() {
        let ds = sample();
        let series = filter_series(&ds, &codes(&["USA"]), 2001, 2002);
        let years: Vec<i32> = series.iter().map(|r| r.year).collect();
        assert_eq!(years, [2001, 2002]);
    }

    #[test]
    fn single_year_range() {
        let ds = sample();
        let series = filter_series(&ds, &codes(&["USA"]), 2001, 2001);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].year, 2001);
    }

    #[test]
    fn out_of_bounds_years_are_clamped() {
        let ds = sample();
        let clamped = filter_series(&ds, &codes(&["USA"]), -9999, 9999);
        let full = filter_series(&ds, &codes(&["USA"]), ds.year_min, ds.year_max);
        assert_eq!(clamped, full);
        assert_eq!(clamped.len(), 4);
    }

    #[test]
    fn empty_selection_yields_empty_series() {
        let ds = sample();
        assert!(filter_series(&ds, &BTreeSet::new(), 2000, 2003).is_empty());
    }

    #[test]
    fn absent_values_survive_filtering() {
        let ds = sample();
        let series = filter_series(&ds, &codes(&["JPN"]), 2000, 2003);
        assert_eq!(series.len(), 4);
        assert_eq!(series[1].value, None);
    }

    #[test]
    fn growth_correctness() {
        let ds = sample();
        let m = growth_metric(&ds, "USA", 2000, 2001);
        assert_eq!(m.end_value, Some(110.0));
        assert!((m.growth_percent.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(m.trend, Trend::Up);
    }

    #[test]
    fn fifty_percent_growth() {
        let csv = "Country Code,2000,2001\nAAA,100.0,150.0\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        let m = growth_metric(&ds, "AAA", 2000, 2001);
        assert_eq!(m.growth_percent, Some(50.0));
        assert_eq!(m.trend, Trend::Up);
    }

    #[test]
    fn negative_growth_is_down() {
        let ds = sample();
        let m = growth_metric(&ds, "JPN", 2002, 2003);
        assert!(m.growth_percent.unwrap() < 0.0);
        assert_eq!(m.trend, Trend::Down);
    }

    #[test]
    fn exact_zero_growth_classifies_as_down() {
        // 50.0 -> 50.0: strict > 0 check reports Down, not Flat
        let ds = sample();
        let m = growth_metric(&ds, "JPN", 2000, 2003);
        assert_eq!(m.growth_percent, Some(0.0));
        assert_eq!(m.trend, Trend::Down);
    }

    #[test]
    fn absent_start_is_unavailable() {
        let ds = sample();
        let m = growth_metric(&ds, "CHN", 2000, 2003);
        assert_eq!(m.growth_percent, None);
        assert_eq!(m.trend, Trend::Unavailable);
        // end snapshot still reported for the metric tile
        assert_eq!(m.end_value, Some(40.0));
    }

    #[test]
    fn absent_end_is_unavailable() {
        let ds = sample();
        let m = growth_metric(&ds, "JPN", 2000, 2001);
        assert_eq!(m.end_value, None);
        assert_eq!(m.growth_percent, None);
        assert_eq!(m.trend, Trend::Unavailable);
    }

    #[test]
    fn zero_start_is_unavailable() {
        let ds = sample();
        let m = growth_metric(&ds, "ZRO", 2000, 2003);
        assert_eq!(m.growth_percent, None);
        assert_eq!(m.trend, Trend::Unavailable);
    }

    #[test]
    fn unknown_entity_is_unavailable() {
        let ds = sample();
        let m = growth_metric(&ds, "XXX", 2000, 2003);
        assert_eq!(m, GrowthMetric::unavailable(None));
    }

    #[test]
    fn out_of_range_year_is_unavailable() {
        let ds = sample();
        let m = growth_metric(&ds, "USA", 1990, 2001);
        assert_eq!(m.growth_percent, None);
        assert_eq!(m.trend, Trend::Unavailable);
    }

    #[test]
    fn compare_pair_matches_union_of_series() {
        let ds = sample();
        let pair = compare_pair(&ds, "USA", "JPN", 2000, 2003);
        let swapped = compare_pair(&ds, "JPN", "USA", 2000, 2003);
        assert_eq!(pair, swapped);

        let mut union = filter_series(&ds, &codes(&["USA"]), 2000, 2003);
        union.extend(filter_series(&ds, &codes(&["JPN"]), 2000, 2003));
        assert_eq!(pair.len(), union.len());
        for rec in union {
            assert!(pair.contains(&rec));
        }
    }

    #[test]
    fn compare_pair_same_entity_degrades_to_single_series() {
        let ds = sample();
        let pair = compare_pair(&ds, "USA", "USA", 2000, 2003);
        assert_eq!(pair, filter_series(&ds, &codes(&["USA"]), 2000, 2003));
    }
}
