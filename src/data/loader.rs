use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Record};

/// Header of the entity-identifier column in the source table.
pub const ENTITY_COLUMN: &str = "Country Code";

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Failure to turn the source file into a [`Dataset`]. Fatal to startup:
/// without a valid dataset there is nothing to query.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reading CSV")]
    Csv(#[from] csv::Error),
    #[error("header has no '{ENTITY_COLUMN}' column")]
    MissingEntityColumn,
    #[error("header has no year columns (four-digit integer headers)")]
    NoYearColumns,
    #[error("year columns are not contiguous: expected {expected}, found {found}")]
    NonContiguousYears { expected: i32, found: i32 },
    #[error("source contains no data rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the wide-format GDP table at `path` into a normalized [`Dataset`].
///
/// Expected layout: a header row with a `Country Code` column plus one
/// column per year (four-digit headers spanning a contiguous range), then
/// one row per entity. Empty cells are absent observations.
///
/// This is the one I/O-bound step of the whole crate; call it once at
/// startup and pass the resulting handle to the query layer. Re-loading the
/// same file yields an equal dataset.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_dataset(file)
}

/// Reshape a wide CSV table from any reader.
///
/// Split out from [`load_csv`] so callers (and tests) can feed in-memory
/// data without touching the filesystem.
pub fn read_dataset<R: Read>(rdr: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let entity_idx = headers
        .iter()
        .position(|h| h == ENTITY_COLUMN)
        .ok_or(LoadError::MissingEntityColumn)?;

    // Year columns: any header that is a four-digit integer. Everything else
    // (country name, indicator columns, ...) is ignored, like the original
    // wide-to-long melt.
    let mut year_cols: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != entity_idx)
        .filter_map(|(i, h)| parse_year_header(h).map(|y| (i, y)))
        .collect();
    year_cols.sort_by_key(|&(_, y)| y);

    let (&(_, year_min), &(_, year_max)) = match (year_cols.first(), year_cols.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(LoadError::NoYearColumns),
    };
    let expected = year_max - year_min + 1;
    let found = year_cols.len() as i32;
    if found != expected {
        return Err(LoadError::NonContiguousYears { expected, found });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let entity_code = row.get(entity_idx).unwrap_or("").trim().to_string();
        for &(col_idx, year) in &year_cols {
            let value = parse_cell(row.get(col_idx).unwrap_or(""), &entity_code, year);
            records.push(Record {
                entity_code: entity_code.clone(),
                year,
                value,
            });
        }
    }
    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let dataset = Dataset::from_records(records, year_min, year_max);
    log::info!(
        "loaded {} records: {} entities, years {}-{}",
        dataset.len(),
        dataset.entity_codes().len(),
        dataset.year_min,
        dataset.year_max
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell / header parsing
// ---------------------------------------------------------------------------

fn parse_year_header(h: &str) -> Option<i32> {
    let h = h.trim();
    if h.len() != 4 || !h.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    h.parse().ok()
}

/// Parse one value cell. Empty means absent; a malformed or non-finite
/// number is normalized to absent (never to zero, never an error).
fn parse_cell(cell: &str, entity_code: &str, year: i32) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            log::warn!("{entity_code} {year}: unusable cell '{cell}', treating as absent");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
