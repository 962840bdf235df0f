use crate::error::Error;
use crate::types::Series;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Read a series from a tab-separated source.
///
/// The first line is a header and is discarded. Every following line must
/// have at least two fields; the second one is the sample value. The first
/// field (an acquisition timestamp) is ignored.
pub fn load_series<R: BufRead>(reader: R) -> Result<Series, Error> {
    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => {
            header?;
        }
        None => return Ok(Series::default()),
    }

    let mut vals = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        // Header is line 1.
        vals.push(parse_value(&line, idx + 2)?);
    }

    Ok(Series::from_values(vals))
}

/// Read a series from a file. See [`load_series`].
pub fn load_file<P: AsRef<Path>>(file: P) -> Result<Series> {
    let file = file.as_ref();
    let reader = BufReader::new(File::open(file).with_context(|| format!("failed to open {file:?}"))?);
    let series = load_series(reader).with_context(|| format!("failed to load {file:?}"))?;
    if series.is_empty() {
        log::warn!("{file:?} holds no samples");
    }
    log::debug!("loaded {} samples from {file:?}", series.len());
    Ok(series)
}

fn parse_value(line: &str, line_no: usize) -> Result<f64, Error> {
    let field = line
        .trim_end_matches(['\r', '\n'])
        .split('\t')
        .nth(1)
        .ok_or_else(|| Error::MalformedRecord {
            line: line_no,
            reason: "expected at least two tab-separated fields".to_string(),
        })?;

    field.trim().parse::<f64>().map_err(|e| Error::MalformedRecord {
        line: line_no,
        reason: format!("invalid value {field:?}: {e}"),
    })
}
